//! Billing Domain Ports
//!
//! `CreditCardPort` is everything the card endpoints need from storage. Every
//! method is scoped by the owning user: a card or purchase belonging to
//! someone else is reported as `PortError::NotFound`.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{CardPurchaseId, CategoryId, CreditCardId, DomainPort, PortError, UserId};

use crate::card::{CardBrand, CreditCard};
use crate::purchase::CardPurchase;

/// Fields supplied when creating or replacing a card
#[derive(Debug, Clone)]
pub struct NewCreditCard {
    pub name: String,
    pub last_digits: Option<String>,
    pub brand: CardBrand,
    pub limit: Decimal,
    pub closing_day: u32,
    pub due_day: u32,
    pub color: String,
    pub is_active: bool,
}

/// Fields supplied when creating or replacing a card purchase
#[derive(Debug, Clone)]
pub struct NewCardPurchase {
    pub name: String,
    pub description: Option<String>,
    pub total_amount: Decimal,
    pub installments: u32,
    pub purchase_date: NaiveDate,
    pub category_id: Option<CategoryId>,
}

/// Storage operations for credit cards and their purchases
#[async_trait]
pub trait CreditCardPort: DomainPort {
    // ========================================================================
    // Cards
    // ========================================================================

    /// Lists the user's cards, newest first
    async fn list_cards(&self, user_id: UserId) -> Result<Vec<CreditCard>, PortError>;

    /// Retrieves one card
    ///
    /// # Returns
    ///
    /// The card if it exists and belongs to `user_id`, or `PortError::NotFound`
    async fn get_card(&self, user_id: UserId, id: CreditCardId) -> Result<CreditCard, PortError>;

    /// Creates a card
    async fn create_card(&self, user_id: UserId, card: NewCreditCard) -> Result<CreditCard, PortError>;

    /// Replaces every editable field of a card
    async fn update_card(
        &self,
        user_id: UserId,
        id: CreditCardId,
        card: NewCreditCard,
    ) -> Result<CreditCard, PortError>;

    /// Deletes a card together with its purchases
    async fn delete_card(&self, user_id: UserId, id: CreditCardId) -> Result<(), PortError>;

    // ========================================================================
    // Purchases
    // ========================================================================

    /// Lists the purchases of one card, most recent purchase date first
    async fn list_purchases(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
    ) -> Result<Vec<CardPurchase>, PortError>;

    /// Records a purchase on a card
    async fn create_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        purchase: NewCardPurchase,
    ) -> Result<CardPurchase, PortError>;

    /// Replaces a purchase; it must belong to `card_id`
    async fn update_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        id: CardPurchaseId,
        purchase: NewCardPurchase,
    ) -> Result<CardPurchase, PortError>;

    /// Deletes a purchase; it must belong to `card_id`
    async fn delete_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        id: CardPurchaseId,
    ) -> Result<(), PortError>;
}
