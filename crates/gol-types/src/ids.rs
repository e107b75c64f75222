//! Type-safe identifier wrappers around [`Uuid`].
//!
//! A board is a chain of generations. Every generation row gets its own
//! [`SnapshotId`], and all generations of the same board share one
//! [`BoardId`]. Both use UUID v7 so inserts land in index order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Whether this is the all-zero UUID, which never names a real row.
            pub const fn is_nil(self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier shared by every generation of one simulated board.
    BoardId
}

define_id! {
    /// Identifier of a single persisted generation.
    SnapshotId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_never_nil() {
        assert!(!BoardId::new().is_nil());
        assert!(!SnapshotId::new().is_nil());
        assert!(BoardId::from(Uuid::nil()).is_nil());
    }

    #[test]
    fn nil_check_is_usable_in_const_context() {
        const NIL_BOARD: bool = BoardId(Uuid::nil()).is_nil();
        const NIL_SNAPSHOT: bool = SnapshotId(Uuid::from_u128(1)).is_nil();
        assert_eq!([NIL_BOARD, NIL_SNAPSHOT], [true, false]);
    }

    #[test]
    fn board_id_serializes_as_bare_uuid_string() {
        let id = BoardId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{}\"", id.into_inner()));
    }

    #[test]
    fn parse_from_str_matches_display() {
        let id = BoardId::new();
        let parsed: Result<BoardId, _> = id.to_string().parse();
        assert_eq!(parsed.ok(), Some(id));
        assert!("not-a-uuid".parse::<BoardId>().is_err());
    }
}
