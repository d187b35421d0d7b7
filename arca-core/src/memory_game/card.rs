//! Cards and deck construction.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{ArcaError, Result};
use crate::memory_game::theme::{Theme, ThemeItem};

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Position in the deck.
    pub id: usize,
    /// Shared by exactly two cards.
    pub pair_id: u32,
    /// Face symbol.
    pub content: String,
    /// Face-up, either pending resolution or matched.
    pub is_flipped: bool,
    /// Permanently solved.
    pub is_matched: bool,
}

impl Card {
    /// Whether the card can still be turned over by the player.
    #[must_use]
    pub fn is_face_down(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}

/// Build a shuffled deck of `pair_count` pairs from the first items of `theme`.
///
/// Each selected item appears twice; the permutation is uniform over the
/// RNG, and card ids are assigned after shuffling so `id` == position.
///
/// # Errors
/// Returns [`ArcaError::ThemeTooSmall`] if the theme has fewer than
/// `pair_count` items.
pub fn build_deck<R: Rng + ?Sized>(theme: &Theme, pair_count: usize, rng: &mut R) -> Result<Vec<Card>> {
    if pair_count > theme.items.len() {
        return Err(ArcaError::ThemeTooSmall {
            theme: theme.id,
            requested: pair_count,
            available: theme.items.len(),
        });
    }

    let selected = &theme.items[..pair_count];
    let mut faces: Vec<&ThemeItem> = selected.iter().chain(selected.iter()).collect();
    faces.shuffle(rng);

    Ok(faces
        .into_iter()
        .enumerate()
        .map(|(id, item)| Card {
            id,
            pair_id: item.id,
            content: item.content.clone(),
            is_flipped: false,
            is_matched: false,
        })
        .collect())
}
