//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion and display formatting.

use core_kernel::{
    UserId, CategoryId, ExpenseId, IncomeId, FixedExpenseId,
    CreditCardId, CardPurchaseId, GoalId, SimulationId, ResetTokenId,
};
use uuid::Uuid;

mod user_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = UserId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = UserId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = UserId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_parse_accepts_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id: UserId = uuid.to_string().parse().unwrap();
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("USR-not-a-uuid".parse::<UserId>().is_err());
    }
}

mod prefixes {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert!(UserId::new().to_string().starts_with("USR-"));
        assert!(ResetTokenId::new().to_string().starts_with("RST-"));
        assert!(CategoryId::new().to_string().starts_with("CAT-"));
        assert!(ExpenseId::new().to_string().starts_with("EXP-"));
        assert!(IncomeId::new().to_string().starts_with("INC-"));
        assert!(FixedExpenseId::new().to_string().starts_with("FIX-"));
        assert!(CreditCardId::new().to_string().starts_with("CARD-"));
        assert!(CardPurchaseId::new().to_string().starts_with("CPUR-"));
        assert!(GoalId::new().to_string().starts_with("GOAL-"));
        assert!(SimulationId::new().to_string().starts_with("SIM-"));
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = GoalId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn test_deserializes_from_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id: CardPurchaseId = serde_json::from_str(&format!("\"{}\"", uuid)).unwrap();
        assert_eq!(*id.as_uuid(), uuid);
    }
}
