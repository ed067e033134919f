//! Typed record identifiers
//!
//! All ids are UUIDs on the wire and in the database. `Display` adds a short
//! prefix (`CARD-...`) for logs; `FromStr` accepts either form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Time-ordered, so rows inserted later sort later
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Identity
define_id!(UserId, "USR");
define_id!(ResetTokenId, "RST");

// Budget records
define_id!(CategoryId, "CAT");
define_id!(ExpenseId, "EXP");
define_id!(IncomeId, "INC");
define_id!(FixedExpenseId, "FIX");

// Credit cards
define_id!(CreditCardId, "CARD");
define_id!(CardPurchaseId, "CPUR");

// Investments
define_id!(GoalId, "GOAL");
define_id!(SimulationId, "SIM");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_prefixed_forms_parse_alike() {
        let id = CreditCardId::new();
        assert!(id.to_string().starts_with("CARD-"));

        let bare: CreditCardId = id.as_uuid().to_string().parse().unwrap();
        let prefixed: CreditCardId = id.to_string().parse().unwrap();
        assert_eq!(bare, prefixed);
    }

    #[test]
    fn test_v7_ids_sort_by_creation() {
        let first = ExpenseId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = ExpenseId::new_v7();
        assert!(first.as_uuid() < second.as_uuid());
    }
}
