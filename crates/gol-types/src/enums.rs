//! Enumeration types for the board service.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Classification of a board generation.
///
/// Every value other than [`BoardStatus::NotFinished`] is terminal. A board
/// leaves `NotFinished` at most once; later generations inherit the terminal
/// value unchanged.
///
/// The integer codes returned by [`BoardStatus::code`] are the values
/// persisted in the `status` column and must not be renumbered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum BoardStatus {
    /// No terminal condition detected yet.
    #[default]
    NotFinished,
    /// Every cell died.
    FadedAway,
    /// The board returned to an earlier state after more than one generation.
    Oscillatory,
    /// The board is identical to the generation right before it.
    Stable,
    /// The iteration ceiling was reached without any repeat.
    Infinite,
}

impl BoardStatus {
    /// Whether this status ends classification for the board.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::NotFinished)
    }

    /// Persisted integer code.
    pub const fn code(self) -> i16 {
        match self {
            Self::NotFinished => 0,
            Self::FadedAway => 1,
            Self::Oscillatory => 2,
            Self::Stable => 3,
            Self::Infinite => 4,
        }
    }

    /// Decode a persisted integer code.
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::NotFinished),
            1 => Some(Self::FadedAway),
            2 => Some(Self::Oscillatory),
            3 => Some(Self::Stable),
            4 => Some(Self::Infinite),
            _ => None,
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFinished => "NotFinished",
            Self::FadedAway => "FadedAway",
            Self::Oscillatory => "Oscillatory",
            Self::Stable => "Stable",
            Self::Infinite => "Infinite",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_finished_is_open() {
        assert!(!BoardStatus::NotFinished.is_terminal());
        assert!(BoardStatus::FadedAway.is_terminal());
        assert!(BoardStatus::Stable.is_terminal());
        assert!(BoardStatus::Oscillatory.is_terminal());
        assert!(BoardStatus::Infinite.is_terminal());
    }

    #[test]
    fn codes_match_the_stored_numbering() {
        assert_eq!(BoardStatus::Oscillatory.code(), 2);
        assert_eq!(BoardStatus::Stable.code(), 3);
        assert_eq!(BoardStatus::from_code(4), Some(BoardStatus::Infinite));
        assert_eq!(BoardStatus::from_code(5), None);
        assert_eq!(BoardStatus::from_code(-1), None);
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&BoardStatus::FadedAway).unwrap_or_default();
        assert_eq!(json, "\"FadedAway\"");
        assert_eq!(BoardStatus::FadedAway.to_string(), "FadedAway");
    }
}
