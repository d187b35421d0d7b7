//! Property-Based Tests for the memory match engine.
//!
//! Random seeds, themes, levels and click sequences drive the engine; the
//! deck, lock and scoring invariants must hold after every step.

use std::collections::HashMap;
use std::time::Duration;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use arca_core::memory_game::{Card, Difficulty, GameEvent, MemoryGame, Phase, ThemeId};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_theme() -> impl Strategy<Value = ThemeId> {
    prop::sample::select(ThemeId::ALL.to_vec())
}

fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

/// A player action: click a position, or let some milliseconds pass.
#[derive(Debug, Clone)]
enum Step {
    Click(usize),
    Wait(u64),
}

fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0..24usize).prop_map(Step::Click),
            1 => (0..1500u64).prop_map(Step::Wait),
        ],
        0..200,
    )
}

fn deal(theme: ThemeId, difficulty: Difficulty, seed: u64) -> MemoryGame {
    let mut game = MemoryGame::default();
    game.start_game_with_rng(&theme.theme(), difficulty, &mut StdRng::seed_from_u64(seed))
        .expect("built-in themes fit every level");
    game
}

// ---------------------------------------------------------------------------
// Property: every deck holds exactly two of each of pair_count faces
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn deck_has_exactly_two_of_each_pair(
        theme in arb_theme(),
        difficulty in arb_difficulty(),
        seed in any::<u64>(),
    ) {
        let game = deal(theme, difficulty, seed);
        prop_assert_eq!(game.cards().len(), 2 * difficulty.pair_count());

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for card in game.cards() {
            *counts.entry(card.pair_id).or_default() += 1;
        }
        prop_assert_eq!(counts.len(), difficulty.pair_count());
        prop_assert!(counts.values().all(|&n| n == 2));
    }
}

// ---------------------------------------------------------------------------
// Property: ignored flips change nothing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn flips_on_locked_or_face_up_cards_are_no_ops(
        seed in any::<u64>(),
        steps in arb_steps(),
        probe in 0..24usize,
    ) {
        let mut game = deal(ThemeId::Heroes, Difficulty::Hard, seed);
        for step in steps {
            match step {
                Step::Click(pos) => { game.flip(pos); }
                Step::Wait(ms) => { game.advance(Duration::from_millis(ms)); }
            }
        }

        let target_busy = game
            .cards()
            .get(probe)
            .is_some_and(|c| c.is_flipped || c.is_matched);
        if game.session().locked || target_busy {
            let before: Vec<Card> = game.cards().to_vec();
            let session_before = game.session().clone();
            game.flip(probe);
            prop_assert_eq!(game.cards(), before.as_slice());
            prop_assert_eq!(game.session(), &session_before);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: lock, matched flags and score evolve as the rules say
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn invariants_hold_through_random_play(
        theme in arb_theme(),
        difficulty in arb_difficulty(),
        seed in any::<u64>(),
        steps in arb_steps(),
    ) {
        let mut game = deal(theme, difficulty, seed);
        let mut matched_before: Vec<bool> = vec![false; game.cards().len()];
        let mut wins = 0;

        for step in steps {
            let score_before = game.session().score;
            let events = match step {
                Step::Click(pos) => { game.flip(pos); Vec::new() }
                Step::Wait(ms) => game.advance(Duration::from_millis(ms)),
            };

            for event in &events {
                match event {
                    GameEvent::Matched { first, second, score } => {
                        prop_assert_eq!(*score, score_before + 10);
                        prop_assert!(game.cards()[*first].is_matched);
                        prop_assert!(game.cards()[*second].is_matched);
                    }
                    GameEvent::Mismatched { first, second, score } => {
                        prop_assert_eq!(*score, score_before.saturating_sub(2));
                        prop_assert!(game.cards()[*first].is_face_down());
                        prop_assert!(game.cards()[*second].is_face_down());
                        prop_assert!(!game.session().locked);
                    }
                    GameEvent::Won(_) => wins += 1,
                }
            }

            let session = game.session();
            prop_assert!(session.flipped_positions.len() <= 2);
            prop_assert_eq!(session.locked, session.flipped_positions.len() == 2);
            prop_assert_eq!(session.locked, game.phase() == Phase::Resolving);

            for (card, was) in game.cards().iter().zip(matched_before.iter_mut()) {
                prop_assert!(!*was || card.is_matched, "a matched card reverted");
                if card.is_matched {
                    prop_assert!(card.is_flipped);
                }
                *was = card.is_matched;
            }
        }

        let all_matched = game.cards().iter().all(|c| c.is_matched);
        prop_assert_eq!(game.phase() == Phase::Won, all_matched);
        prop_assert!(wins <= 1);
        prop_assert_eq!(wins == 1, all_matched);
    }
}
