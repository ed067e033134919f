//! PostgreSQL Billing Adapter
//!
//! Implements `CreditCardPort` over `CardRepository`. Purchases are always
//! addressed through their card, so a purchase on another user's card, or on
//! a different card of the same user, is `NotFound`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use core_kernel::{
    CardPurchaseId, CategoryId, CreditCardId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
    UserId,
};
use domain_billing::{CardPurchase, CreditCard, CreditCardPort, NewCardPurchase, NewCreditCard};

use crate::error::DatabaseError;
use crate::repositories::cards::{
    CardPurchaseRow, CardPurchaseValues, CardRepository, CreditCardRow, CreditCardValues,
};

use super::{decode, unsigned};

const ADAPTER_ID: &str = "postgres-billing-adapter";

/// PostgreSQL-backed implementation of `CreditCardPort`
#[derive(Debug, Clone)]
pub struct PostgresBillingAdapter {
    repository: CardRepository,
    pool: PgPool,
}

impl PostgresBillingAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CardRepository::new(pool.clone()),
            pool,
        }
    }
}

fn card_from_row(row: CreditCardRow) -> Result<CreditCard, DatabaseError> {
    Ok(CreditCard {
        id: CreditCardId::from_uuid(row.card_id),
        user_id: UserId::from_uuid(row.user_id),
        brand: decode("brand", &row.brand)?,
        closing_day: unsigned("closing_day", row.closing_day)?,
        due_day: unsigned("due_day", row.due_day)?,
        name: row.name,
        last_digits: row.last_digits,
        limit: row.credit_limit,
        color: row.color,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn purchase_from_row(row: CardPurchaseRow) -> Result<CardPurchase, DatabaseError> {
    Ok(CardPurchase {
        id: CardPurchaseId::from_uuid(row.purchase_id),
        user_id: UserId::from_uuid(row.user_id),
        credit_card_id: CreditCardId::from_uuid(row.card_id),
        category_id: row.category_id.map(CategoryId::from_uuid),
        installments: unsigned("installments", row.installments)?,
        name: row.name,
        description: row.description,
        total_amount: row.total_amount,
        purchase_date: row.purchase_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn card_values(card: NewCreditCard) -> CreditCardValues {
    CreditCardValues {
        name: card.name,
        last_digits: card.last_digits,
        brand: card.brand.as_str(),
        credit_limit: card.limit,
        closing_day: card.closing_day as i32,
        due_day: card.due_day as i32,
        color: card.color,
        is_active: card.is_active,
    }
}

fn purchase_values(purchase: NewCardPurchase) -> CardPurchaseValues {
    CardPurchaseValues {
        category_id: purchase.category_id.map(Uuid::from),
        name: purchase.name,
        description: purchase.description,
        total_amount: purchase.total_amount,
        installments: purchase.installments as i32,
        purchase_date: purchase.purchase_date,
    }
}

impl DomainPort for PostgresBillingAdapter {}

#[async_trait]
impl HealthCheckable for PostgresBillingAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, ADAPTER_ID).await
    }
}

#[async_trait]
impl CreditCardPort for PostgresBillingAdapter {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_cards(&self, user_id: UserId) -> Result<Vec<CreditCard>, PortError> {
        let rows = self.repository.list_cards(user_id.into()).await?;
        debug!(count = rows.len(), "Cards listed");
        let cards = rows
            .into_iter()
            .map(card_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    #[instrument(skip(self), fields(user_id = %user_id, card_id = %id))]
    async fn get_card(&self, user_id: UserId, id: CreditCardId) -> Result<CreditCard, PortError> {
        let row = self.repository.get_card(user_id.into(), id.into()).await?;
        Ok(card_from_row(row)?)
    }

    #[instrument(skip(self, card), fields(user_id = %user_id))]
    async fn create_card(&self, user_id: UserId, card: NewCreditCard) -> Result<CreditCard, PortError> {
        let id = CreditCardId::new_v7();
        let row = self
            .repository
            .insert_card(user_id.into(), id.into(), &card_values(card))
            .await?;
        info!(card_id = %id, "Card created");
        Ok(card_from_row(row)?)
    }

    #[instrument(skip(self, card), fields(user_id = %user_id, card_id = %id))]
    async fn update_card(
        &self,
        user_id: UserId,
        id: CreditCardId,
        card: NewCreditCard,
    ) -> Result<CreditCard, PortError> {
        let row = self
            .repository
            .update_card(user_id.into(), id.into(), &card_values(card))
            .await?;
        info!("Card updated");
        Ok(card_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, card_id = %id))]
    async fn delete_card(&self, user_id: UserId, id: CreditCardId) -> Result<(), PortError> {
        self.repository.delete_card(user_id.into(), id.into()).await?;
        info!("Card deleted with its purchases");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id, card_id = %card_id))]
    async fn list_purchases(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
    ) -> Result<Vec<CardPurchase>, PortError> {
        // An empty list must still distinguish a missing card
        self.repository.get_card(user_id.into(), card_id.into()).await?;
        let rows = self.repository.list_purchases(user_id.into(), card_id.into()).await?;
        debug!(count = rows.len(), "Purchases listed");
        let purchases = rows
            .into_iter()
            .map(purchase_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(purchases)
    }

    #[instrument(skip(self, purchase), fields(user_id = %user_id, card_id = %card_id))]
    async fn create_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        purchase: NewCardPurchase,
    ) -> Result<CardPurchase, PortError> {
        let id = CardPurchaseId::new_v7();
        let row = self
            .repository
            .insert_purchase(user_id.into(), card_id.into(), id.into(), &purchase_values(purchase))
            .await?;
        info!(purchase_id = %id, installments = row.installments, "Purchase recorded");
        Ok(purchase_from_row(row)?)
    }

    #[instrument(skip(self, purchase), fields(user_id = %user_id, card_id = %card_id, purchase_id = %id))]
    async fn update_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        id: CardPurchaseId,
        purchase: NewCardPurchase,
    ) -> Result<CardPurchase, PortError> {
        let row = self
            .repository
            .update_purchase(user_id.into(), card_id.into(), id.into(), &purchase_values(purchase))
            .await?;
        info!("Purchase updated");
        Ok(purchase_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, card_id = %card_id, purchase_id = %id))]
    async fn delete_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        id: CardPurchaseId,
    ) -> Result<(), PortError> {
        self.repository
            .delete_purchase(user_id.into(), card_id.into(), id.into())
            .await?;
        info!("Purchase deleted");
        Ok(())
    }
}
