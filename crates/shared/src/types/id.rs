//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `DetailAccountId` where a
//! `GeneralAccountId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(GeneralAccountId, "Unique identifier for a general (parent) account.");
typed_id!(DetailAccountId, "Unique identifier for a detail (child) account.");
typed_id!(LedgerEntryId, "Unique identifier for a ledger entry line.");
typed_id!(JournalEntryId, "Unique identifier for a journal entry aggregate.");
typed_id!(PeriodResultId, "Unique identifier for a yearly period result.");
typed_id!(UserId, "Unique identifier for an acting user.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_and_parse_round_trip() {
        let id = LedgerEntryId::new();
        let parsed = LedgerEntryId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_from_uuid_preserves_value() {
        let raw = Uuid::now_v7();
        assert_eq!(DetailAccountId::from_uuid(raw).into_inner(), raw);
    }

    #[test]
    fn test_uuid_v7_is_time_ordered() {
        let first = JournalEntryId::new();
        let second = JournalEntryId::new();
        assert!(first.into_inner() <= second.into_inner());
    }
}
