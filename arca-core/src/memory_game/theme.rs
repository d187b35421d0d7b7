//! Card themes and difficulty levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the built-in card themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeId {
    /// Heroes of the Bible.
    Heroes,
    /// Noah's ark animals.
    Animals,
    /// Fruits of the Spirit.
    Fruits,
    /// The days of creation.
    Creation,
}

impl ThemeId {
    /// All built-in themes, in menu order.
    pub const ALL: [ThemeId; 4] = [Self::Heroes, Self::Animals, Self::Fruits, Self::Creation];

    /// Build the full theme definition.
    #[must_use]
    pub fn theme(self) -> Theme {
        let (name, icon, card_back, items) = match self {
            Self::Heroes => ("Heróis da Bíblia", "👑", "🛡️", HEROES),
            Self::Animals => ("Arca de Noé", "🦁", "🌿", ANIMALS),
            Self::Fruits => ("Frutos do Espírito", "🍇", "❤️", FRUITS),
            Self::Creation => ("A Criação", "🌍", "✨", CREATION),
        };
        Theme {
            id: self,
            name: name.to_string(),
            icon: icon.to_string(),
            card_back: card_back.to_string(),
            items: items
                .iter()
                .zip(1u32..)
                .map(|(content, id)| ThemeItem {
                    id,
                    content: (*content).to_string(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Heroes => "HEROES",
            Self::Animals => "ANIMALS",
            Self::Fruits => "FRUITS",
            Self::Creation => "CREATION",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEROES" => Ok(Self::Heroes),
            "ANIMALS" => Ok(Self::Animals),
            "FRUITS" => Ok(Self::Fruits),
            "CREATION" => Ok(Self::Creation),
            _ => Err(format!("unknown theme: '{s}'")),
        }
    }
}

const HEROES: &[&str] = &[
    "🧔🏻‍♂️", "👑", "🦁", "🌊", "🐋", "💪", "👸", "🌈", "🍎", "👶", "🥖", "🍷",
];
const ANIMALS: &[&str] = &[
    "🦁", "🐘", "🦒", "🦓", "🐒", "🐼", "🐸", "🐢", "🐦", "🦉", "🦋", "🐠",
];
const FRUITS: &[&str] = &[
    "❤️", "😊", "🕊️", "⏳", "🤝", "🤲", "💎", "🤫", "🧘", "🙏", "✝️", "📖",
];
const CREATION: &[&str] = &[
    "☀️", "🌙", "🌟", "☁️", "🌊", "🏔️", "🌳", "🌺", "🐟", "🦅", "🦖", "👫",
];

/// One face that can appear on a pair of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeItem {
    /// Becomes the `pair_id` of both cards built from this item.
    pub id: u32,
    /// Symbol shown on the card face.
    pub content: String,
}

/// A named set of card faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Which theme this is.
    pub id: ThemeId,
    /// Display name.
    pub name: String,
    /// Menu icon.
    pub icon: String,
    /// Symbol shown on the back of every card.
    pub card_back: String,
    /// Available faces; item ids are unique within a theme.
    pub items: Vec<ThemeItem>,
}

/// Difficulty level: how many pairs and how big the completion bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Six pairs.
    #[default]
    Easy,
    /// Eight pairs.
    Medium,
    /// Twelve pairs.
    Hard,
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(self) -> usize {
        match self {
            Self::Easy => 6,
            Self::Medium => 8,
            Self::Hard => 12,
        }
    }

    /// Score bonus for completing a game at this level.
    #[must_use]
    pub fn bonus(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 25,
            Self::Hard => 50,
        }
    }

    /// Label shown on the level picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Fácil",
            Self::Medium => "Médio",
            Self::Hard => "Difícil",
        }
    }

    /// Grid columns used to lay the board out.
    #[must_use]
    pub fn grid_columns(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 4,
            Self::Hard => 6,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            _ => Err(format!("unknown difficulty: '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_theme_covers_the_hardest_level() {
        for id in ThemeId::ALL {
            let theme = id.theme();
            assert!(
                theme.items.len() >= Difficulty::Hard.pair_count(),
                "{id} is too small for HARD"
            );
        }
    }

    #[test]
    fn theme_item_ids_are_unique() {
        for id in ThemeId::ALL {
            let theme = id.theme();
            let ids: HashSet<u32> = theme.items.iter().map(|i| i.id).collect();
            assert_eq!(ids.len(), theme.items.len());
        }
    }

    #[test]
    fn display_and_from_str_agree() {
        for id in ThemeId::ALL {
            assert_eq!(id.to_string().parse::<ThemeId>(), Ok(id));
        }
        for level in Difficulty::ALL {
            assert_eq!(level.to_string().parse::<Difficulty>(), Ok(level));
        }
        assert!("EXPERT".parse::<Difficulty>().is_err());
    }

    #[test]
    fn levels_scale_up() {
        assert_eq!(Difficulty::Easy.pair_count(), 6);
        assert_eq!(Difficulty::Medium.pair_count(), 8);
        assert_eq!(Difficulty::Hard.pair_count(), 12);
        assert!(Difficulty::Easy.bonus() < Difficulty::Medium.bonus());
        assert!(Difficulty::Medium.bonus() < Difficulty::Hard.bonus());
    }
}
