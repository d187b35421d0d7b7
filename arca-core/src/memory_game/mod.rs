//! Memory match engine.
//!
//! A board of face-down pairs. The player turns two cards over; if they
//! share a `pair_id` the pair is solved, otherwise both flip back. Input is
//! locked while a pair is on show.
//!
//! ```text
//! Idle ──start_game──▶ Playing ──2nd flip──▶ Resolving ──deadline──▶ Playing
//!                                                     └──last pair──▶ Won
//! ```
//!
//! Reveal delays are scheduled resolutions, not callbacks: the second flip
//! records a deadline on the game clock, and [`MemoryGame::advance`] applies
//! the resolution once the clock reaches it. The clock only moves while a
//! game is in progress.

pub mod achievement;
pub mod card;
pub mod theme;

pub use achievement::{Achievement, AchievementBook, AchievementId, GameSummary};
pub use card::{Card, build_deck};
pub use theme::{Difficulty, Theme, ThemeId, ThemeItem};

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MemoryGameConfig;
use crate::error::Result;

/// Engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No game started yet, or the player left the board.
    #[default]
    Idle,
    /// Waiting for the player to flip a card.
    Playing,
    /// Two cards are face-up; input is locked until the deadline.
    Resolving,
    /// Every pair solved. Terminal until the next `start_game`.
    Won,
}

/// Per-game counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    /// Current score. Becomes the final score on a win.
    pub score: u32,
    /// Pairs turned over, matched or not.
    pub move_count: u32,
    /// Whole seconds of play.
    pub elapsed_seconds: u32,
    /// True only while two cards are face-up awaiting resolution.
    pub locked: bool,
    /// Face-up, unresolved positions; never more than two.
    pub flipped_positions: Vec<usize>,
}

/// What a flip did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed: locked board, bad position, or card already up.
    Ignored,
    /// First card of a pair turned over.
    Revealed,
    /// Second card turned over; the pair resolves after its delay.
    PairRevealed {
        /// Whether the two cards share a `pair_id`.
        matched: bool,
    },
}

/// A finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victory {
    /// Score including level and time bonuses.
    pub final_score: u32,
    /// Seconds on the clock at the win.
    pub elapsed_seconds: u32,
    /// Pairs turned over.
    pub move_count: u32,
    /// Trophies this game newly earned.
    pub unlocked: Vec<AchievementId>,
}

/// Something the clock caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A pair was solved.
    Matched {
        /// First card's position.
        first: usize,
        /// Second card's position.
        second: usize,
        /// Score after the match.
        score: u32,
    },
    /// A pair flipped back face-down.
    Mismatched {
        /// First card's position.
        first: usize,
        /// Second card's position.
        second: usize,
        /// Score after the penalty.
        score: u32,
    },
    /// The last pair was solved. Emitted once per game.
    Won(Victory),
}

#[derive(Debug, Clone, Copy)]
struct PendingResolution {
    first: usize,
    second: usize,
    matched: bool,
    due_at_ms: u64,
}

/// The memory match engine.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    config: MemoryGameConfig,
    theme: Theme,
    difficulty: Difficulty,
    cards: Vec<Card>,
    session: GameSession,
    phase: Phase,
    clock_ms: u64,
    pending: Option<PendingResolution>,
    achievements: AchievementBook,
    final_score: Option<u32>,
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new(MemoryGameConfig::default())
    }
}

impl MemoryGame {
    /// Create an idle engine with the given rules.
    #[must_use]
    pub fn new(config: MemoryGameConfig) -> Self {
        Self {
            config,
            theme: ThemeId::Heroes.theme(),
            difficulty: Difficulty::Easy,
            cards: Vec::new(),
            session: GameSession::default(),
            phase: Phase::Idle,
            clock_ms: 0,
            pending: None,
            achievements: AchievementBook::new(),
            final_score: None,
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Deal a fresh board and start playing.
    ///
    /// # Errors
    /// Returns `ArcaError::ThemeTooSmall` if the theme cannot supply enough pairs.
    pub fn start_game(&mut self, theme: ThemeId, difficulty: Difficulty) -> Result<()> {
        self.start_game_with_rng(&theme.theme(), difficulty, &mut rand::thread_rng())
    }

    /// Deal a fresh board from `theme` using `rng` for the shuffle.
    ///
    /// The previous deck, counters and pending pair are discarded; trophies
    /// are kept.
    ///
    /// # Errors
    /// Returns `ArcaError::ThemeTooSmall` if the theme cannot supply enough pairs.
    pub fn start_game_with_rng<R: Rng + ?Sized>(
        &mut self,
        theme: &Theme,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<()> {
        let cards = build_deck(theme, difficulty.pair_count(), rng)?;

        self.theme = theme.clone();
        self.difficulty = difficulty;
        self.cards = cards;
        self.session = GameSession::default();
        self.pending = None;
        self.clock_ms = 0;
        self.final_score = None;
        self.phase = Phase::Playing;

        info!(theme = %theme.id, %difficulty, cards = self.cards.len(), "Memory game started");
        Ok(())
    }

    /// Deal again with the same theme and difficulty.
    ///
    /// # Errors
    /// Returns `ArcaError::ThemeTooSmall` if the theme cannot supply enough pairs.
    pub fn restart(&mut self) -> Result<()> {
        let theme = self.theme.clone();
        self.start_game_with_rng(&theme, self.difficulty, &mut rand::thread_rng())
    }

    /// Leave the board. The deck is discarded and the clock stops.
    pub fn exit(&mut self) {
        self.cards.clear();
        self.session = GameSession::default();
        self.pending = None;
        self.clock_ms = 0;
        self.phase = Phase::Idle;
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Turn the card at `position` face-up.
    ///
    /// Silently ignored while locked, outside play, for an out-of-range
    /// position, or for a card that is already face-up or matched.
    pub fn flip(&mut self, position: usize) -> FlipOutcome {
        if self.phase != Phase::Playing || self.session.locked {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.get_mut(position) else {
            return FlipOutcome::Ignored;
        };
        if card.is_flipped || card.is_matched {
            return FlipOutcome::Ignored;
        }

        card.is_flipped = true;
        self.session.flipped_positions.push(position);

        let [first, second] = self.session.flipped_positions[..] else {
            debug!(position, "First card revealed");
            return FlipOutcome::Revealed;
        };

        let matched = self.cards[first].pair_id == self.cards[second].pair_id;
        let delay_ms = if matched {
            self.config.match_delay_ms
        } else {
            self.config.mismatch_delay_ms
        };

        self.session.locked = true;
        self.session.move_count += 1;
        self.phase = Phase::Resolving;
        self.pending = Some(PendingResolution {
            first,
            second,
            matched,
            due_at_ms: self.clock_ms.saturating_add(delay_ms),
        });

        debug!(first, second, matched, delay_ms, "Pair revealed");
        FlipOutcome::PairRevealed { matched }
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// One second of play. Same as `advance(1s)`.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        self.advance(Duration::from_secs(1))
    }

    /// Move the game clock forward by `step`.
    ///
    /// Applies the pending resolution if its deadline falls within the step
    /// and keeps `elapsed_seconds` equal to whole seconds of play. Does
    /// nothing outside `Playing`/`Resolving`; a win stops the clock at the
    /// moment of the final match.
    pub fn advance(&mut self, step: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_active() {
            return events;
        }

        let step_ms = u64::try_from(step.as_millis()).unwrap_or(u64::MAX);
        let target = self.clock_ms.saturating_add(step_ms);

        if let Some(due) = self.pending.map(|p| p.due_at_ms) {
            if due <= target {
                self.set_clock(due);
                self.resolve(&mut events);
                if self.phase == Phase::Won {
                    return events;
                }
            }
        }

        self.set_clock(target);
        events
    }

    fn set_clock(&mut self, ms: u64) {
        self.clock_ms = ms;
        self.session.elapsed_seconds = u32::try_from(ms / 1000).unwrap_or(u32::MAX);
    }

    fn resolve(&mut self, events: &mut Vec<GameEvent>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let PendingResolution { first, second, matched, .. } = pending;

        if matched {
            for pos in [first, second] {
                self.cards[pos].is_matched = true;
            }
            self.session.score = self.session.score.saturating_add(self.config.match_points);
        } else {
            for pos in [first, second] {
                self.cards[pos].is_flipped = false;
            }
            self.session.score = self.session.score.saturating_sub(self.config.mismatch_penalty);
        }

        self.session.flipped_positions.clear();
        self.session.locked = false;
        self.phase = Phase::Playing;

        let score = self.session.score;
        debug!(first, second, matched, score, "Pair resolved");
        events.push(if matched {
            GameEvent::Matched { first, second, score }
        } else {
            GameEvent::Mismatched { first, second, score }
        });

        if matched && self.cards.iter().all(|c| c.is_matched) {
            events.push(GameEvent::Won(self.finalize()));
        }
    }

    fn finalize(&mut self) -> Victory {
        let elapsed = self.session.elapsed_seconds;
        let mut final_score = self.session.score + self.difficulty.bonus();
        if elapsed < self.config.fast_bonus_threshold_secs {
            final_score += self.config.fast_bonus;
        }
        if elapsed < self.config.very_fast_bonus_threshold_secs {
            final_score += self.config.very_fast_bonus;
        }

        let summary = GameSummary {
            elapsed_seconds: elapsed,
            move_count: self.session.move_count,
            pair_count: u32::try_from(self.difficulty.pair_count()).unwrap_or(u32::MAX),
        };
        let unlocked = self
            .achievements
            .evaluate(&summary, self.config.speedster_threshold_secs);

        self.session.score = final_score;
        self.final_score = Some(final_score);
        self.phase = Phase::Won;

        info!(
            final_score,
            elapsed_seconds = elapsed,
            moves = summary.move_count,
            trophies = unlocked.len(),
            "Memory game won"
        );

        Victory {
            final_score,
            elapsed_seconds: elapsed,
            move_count: summary.move_count,
            unlocked,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The board, in position order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Counters for the current game.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current engine state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the clock is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Resolving)
    }

    /// Theme of the current (or last) board.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Difficulty of the current (or last) board.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Trophy gallery.
    #[must_use]
    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    /// Final score, once the game is won.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Mismatched pairs so far.
    #[must_use]
    pub fn mistakes(&self) -> u32 {
        let matched_pairs = self.cards.iter().filter(|c| c.is_matched).count() / 2;
        self.session
            .move_count
            .saturating_sub(u32::try_from(matched_pairs).unwrap_or(u32::MAX))
    }

    /// Elapsed time as `m:ss`.
    #[must_use]
    pub fn format_clock(&self) -> String {
        let secs = self.session.elapsed_seconds;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn started(difficulty: Difficulty) -> MemoryGame {
        let mut game = MemoryGame::default();
        game.start_game_with_rng(&ThemeId::Heroes.theme(), difficulty, &mut StdRng::seed_from_u64(9))
            .expect("start");
        game
    }

    fn partner_of(game: &MemoryGame, pos: usize) -> usize {
        let pair_id = game.cards()[pos].pair_id;
        game.cards()
            .iter()
            .position(|c| c.pair_id == pair_id && c.id != pos)
            .expect("every card has a partner")
    }

    fn non_partner_of(game: &MemoryGame, pos: usize) -> usize {
        let pair_id = game.cards()[pos].pair_id;
        game.cards()
            .iter()
            .position(|c| c.pair_id != pair_id && !c.is_matched)
            .expect("another pair exists")
    }

    #[test]
    fn new_engine_is_idle_and_ignores_input() {
        let mut game = MemoryGame::default();
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.flip(0), FlipOutcome::Ignored);
        assert!(game.tick().is_empty());
        assert_eq!(game.session().elapsed_seconds, 0);
    }

    #[test]
    fn first_flip_reveals_without_locking() {
        let mut game = started(Difficulty::Easy);
        assert_eq!(game.flip(0), FlipOutcome::Revealed);
        assert!(game.cards()[0].is_flipped);
        assert!(!game.session().locked);
        assert_eq!(game.session().move_count, 0);
    }

    #[test]
    fn flipping_the_same_card_twice_is_ignored() {
        let mut game = started(Difficulty::Easy);
        game.flip(3);
        assert_eq!(game.flip(3), FlipOutcome::Ignored);
        assert_eq!(game.session().flipped_positions, vec![3]);
    }

    #[test]
    fn out_of_range_flip_is_ignored() {
        let mut game = started(Difficulty::Easy);
        assert_eq!(game.flip(99), FlipOutcome::Ignored);
    }

    #[test]
    fn second_flip_locks_and_counts_a_move() {
        let mut game = started(Difficulty::Easy);
        let other = partner_of(&game, 0);
        game.flip(0);
        assert_eq!(game.flip(other), FlipOutcome::PairRevealed { matched: true });
        assert!(game.session().locked);
        assert_eq!(game.session().move_count, 1);
        assert_eq!(game.phase(), Phase::Resolving);

        let third = (0..12).find(|&p| p != 0 && p != other).expect("third card");
        assert_eq!(game.flip(third), FlipOutcome::Ignored);
        assert!(!game.cards()[third].is_flipped);
    }

    #[test]
    fn match_resolves_after_short_delay() {
        let mut game = started(Difficulty::Easy);
        let other = partner_of(&game, 0);
        game.flip(0);
        game.flip(other);

        assert!(game.advance(Duration::from_millis(599)).is_empty());
        assert!(game.session().locked);

        let events = game.advance(Duration::from_millis(1));
        assert_eq!(events, vec![GameEvent::Matched { first: 0, second: other, score: 10 }]);
        assert!(game.cards()[0].is_matched && game.cards()[other].is_matched);
        assert!(!game.session().locked);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn mismatch_waits_longer_and_flips_back() {
        let mut game = started(Difficulty::Easy);
        let other = non_partner_of(&game, 0);
        game.flip(0);
        game.flip(other);

        assert!(game.advance(Duration::from_millis(999)).is_empty());
        let events = game.advance(Duration::from_millis(1));
        assert_eq!(events, vec![GameEvent::Mismatched { first: 0, second: other, score: 0 }]);
        assert!(game.cards()[0].is_face_down());
        assert!(game.cards()[other].is_face_down());
        assert!(game.session().flipped_positions.is_empty());
    }

    #[test]
    fn elapsed_seconds_counts_whole_seconds() {
        let mut game = started(Difficulty::Easy);
        game.advance(Duration::from_millis(1500));
        assert_eq!(game.session().elapsed_seconds, 1);
        game.advance(Duration::from_millis(500));
        assert_eq!(game.session().elapsed_seconds, 2);
        game.tick();
        assert_eq!(game.session().elapsed_seconds, 3);
        assert_eq!(game.format_clock(), "0:03");
    }

    #[test]
    fn format_clock_pads_seconds() {
        let mut game = started(Difficulty::Easy);
        game.advance(Duration::from_secs(65));
        assert_eq!(game.format_clock(), "1:05");
    }

    #[test]
    fn exit_stops_the_clock() {
        let mut game = started(Difficulty::Easy);
        game.tick();
        game.exit();
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.cards().is_empty());
        game.tick();
        assert_eq!(game.session().elapsed_seconds, 0);
    }

    #[test]
    fn mistakes_counts_mismatched_moves() {
        let mut game = started(Difficulty::Easy);
        let wrong = non_partner_of(&game, 0);
        game.flip(0);
        game.flip(wrong);
        game.advance(Duration::from_secs(1));

        let right = partner_of(&game, 0);
        game.flip(0);
        game.flip(right);
        game.advance(Duration::from_secs(1));

        assert_eq!(game.session().move_count, 2);
        assert_eq!(game.mistakes(), 1);
    }
}
