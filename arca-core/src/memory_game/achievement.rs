//! Memory game trophies.
//!
//! Trophies are one-way flags that live as long as the engine does. They
//! are evaluated once, when a game is won.

use serde::{Deserialize, Serialize};

/// Identifies a trophy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    /// Completed any game.
    FirstWin,
    /// Won in under the speedster threshold.
    Speedster,
    /// Won without a single mismatch.
    Sage,
}

impl AchievementId {
    /// All trophies, in gallery order.
    pub const ALL: [AchievementId; 3] = [Self::FirstWin, Self::Speedster, Self::Sage];

    /// Trophy title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::FirstWin => "Primeira Vitória",
            Self::Speedster => "Veloz",
            Self::Sage => "Sábio",
        }
    }

    /// How the trophy is earned.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::FirstWin => "Completou o jogo uma vez",
            Self::Speedster => "Ganhou em menos de 45s",
            Self::Sage => "Venceu sem errar nenhum par",
        }
    }
}

/// A trophy and whether it has been earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Which trophy.
    pub id: AchievementId,
    /// Earned at least once. Never reverts.
    pub unlocked: bool,
}

/// The facts about a finished game that trophies are judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    /// Seconds on the clock at the win.
    pub elapsed_seconds: u32,
    /// Pairs turned over.
    pub move_count: u32,
    /// Pairs on the board.
    pub pair_count: u32,
}

/// The trophy gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementBook {
    entries: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementBook {
    /// A gallery with every trophy locked.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: AchievementId::ALL
                .iter()
                .map(|&id| Achievement { id, unlocked: false })
                .collect(),
        }
    }

    /// Whether `id` has been earned.
    #[must_use]
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.entries.iter().any(|a| a.id == id && a.unlocked)
    }

    /// All trophies, in gallery order.
    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    /// Number of trophies earned.
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    /// Judge a won game and unlock whatever it earned.
    ///
    /// Returns only the trophies that were newly unlocked by this game.
    pub fn evaluate(&mut self, summary: &GameSummary, speedster_threshold_secs: u32) -> Vec<AchievementId> {
        AchievementId::ALL
            .into_iter()
            .filter(|id| match id {
                AchievementId::FirstWin => true,
                AchievementId::Speedster => summary.elapsed_seconds < speedster_threshold_secs,
                AchievementId::Sage => summary.move_count == summary.pair_count,
            })
            .filter(|&id| self.unlock(id))
            .collect()
    }

    fn unlock(&mut self, id: AchievementId) -> bool {
        match self.entries.iter_mut().find(|a| a.id == id) {
            Some(entry) if !entry.unlocked => {
                entry.unlocked = true;
                true
            }
            _ => false,
        }
    }
}
