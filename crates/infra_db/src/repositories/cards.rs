//! Credit card and card purchase repository

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone, FromRow)]
pub struct CreditCardRow {
    pub card_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub last_digits: Option<String>,
    pub brand: String,
    pub credit_limit: Decimal,
    pub closing_day: i32,
    pub due_day: i32,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CardPurchaseRow {
    pub purchase_id: Uuid,
    pub user_id: Uuid,
    pub card_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub total_amount: Decimal,
    pub installments: i32,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreditCardValues {
    pub name: String,
    pub last_digits: Option<String>,
    pub brand: &'static str,
    pub credit_limit: Decimal,
    pub closing_day: i32,
    pub due_day: i32,
    pub color: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct CardPurchaseValues {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub total_amount: Decimal,
    pub installments: i32,
    pub purchase_date: NaiveDate,
}

const CARD_COLUMNS: &str = "card_id, user_id, name, last_digits, brand, credit_limit, \
     closing_day, due_day, color, is_active, created_at, updated_at";
const PURCHASE_COLUMNS: &str = "purchase_id, user_id, card_id, category_id, name, description, \
     total_amount, installments, purchase_date, created_at, updated_at";

/// Repository for credit cards and their purchases
#[derive(Debug, Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Cards
    // ========================================================================

    pub async fn list_cards(&self, user_id: Uuid) -> Result<Vec<CreditCardRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CreditCardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM credit_cards WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_card(&self, user_id: Uuid, card_id: Uuid) -> Result<CreditCardRow, DatabaseError> {
        sqlx::query_as::<_, CreditCardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM credit_cards WHERE card_id = $1 AND user_id = $2"
        ))
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("CreditCard", card_id))
    }

    pub async fn insert_card(
        &self,
        user_id: Uuid,
        card_id: Uuid,
        values: &CreditCardValues,
    ) -> Result<CreditCardRow, DatabaseError> {
        let row = sqlx::query_as::<_, CreditCardRow>(&format!(
            r#"
            INSERT INTO credit_cards (card_id, user_id, name, last_digits, brand, credit_limit,
                                      closing_day, due_day, color, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(card_id)
        .bind(user_id)
        .bind(&values.name)
        .bind(&values.last_digits)
        .bind(values.brand)
        .bind(values.credit_limit)
        .bind(values.closing_day)
        .bind(values.due_day)
        .bind(&values.color)
        .bind(values.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_card(
        &self,
        user_id: Uuid,
        card_id: Uuid,
        values: &CreditCardValues,
    ) -> Result<CreditCardRow, DatabaseError> {
        sqlx::query_as::<_, CreditCardRow>(&format!(
            r#"
            UPDATE credit_cards
            SET name = $3, last_digits = $4, brand = $5, credit_limit = $6, closing_day = $7,
                due_day = $8, color = $9, is_active = $10, updated_at = now()
            WHERE card_id = $1 AND user_id = $2
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(card_id)
        .bind(user_id)
        .bind(&values.name)
        .bind(&values.last_digits)
        .bind(values.brand)
        .bind(values.credit_limit)
        .bind(values.closing_day)
        .bind(values.due_day)
        .bind(&values.color)
        .bind(values.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("CreditCard", card_id))
    }

    /// Deletes a card; its purchases go with it (ON DELETE CASCADE)
    pub async fn delete_card(&self, user_id: Uuid, card_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM credit_cards WHERE card_id = $1 AND user_id = $2")
            .bind(card_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("CreditCard", card_id));
        }
        Ok(())
    }

    // ========================================================================
    // Purchases
    // ========================================================================

    pub async fn list_purchases(&self, user_id: Uuid, card_id: Uuid) -> Result<Vec<CardPurchaseRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CardPurchaseRow>(&format!(
            r#"
            SELECT {PURCHASE_COLUMNS} FROM card_purchases
            WHERE card_id = $1 AND user_id = $2
            ORDER BY purchase_date DESC, created_at DESC
            "#
        ))
        .bind(card_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts a purchase on a card owned by `user_id`
    ///
    /// The insert selects from the owner's card, so a foreign or missing card
    /// writes nothing and reports `NotFound`.
    pub async fn insert_purchase(
        &self,
        user_id: Uuid,
        card_id: Uuid,
        purchase_id: Uuid,
        values: &CardPurchaseValues,
    ) -> Result<CardPurchaseRow, DatabaseError> {
        sqlx::query_as::<_, CardPurchaseRow>(&format!(
            r#"
            INSERT INTO card_purchases (purchase_id, user_id, card_id, category_id, name,
                                        description, total_amount, installments, purchase_date)
            SELECT $1, c.user_id, c.card_id, $4, $5, $6, $7, $8, $9
            FROM credit_cards c
            WHERE c.card_id = $3 AND c.user_id = $2
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(purchase_id)
        .bind(user_id)
        .bind(card_id)
        .bind(values.category_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.total_amount)
        .bind(values.installments)
        .bind(values.purchase_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("CreditCard", card_id))
    }

    pub async fn update_purchase(
        &self,
        user_id: Uuid,
        card_id: Uuid,
        purchase_id: Uuid,
        values: &CardPurchaseValues,
    ) -> Result<CardPurchaseRow, DatabaseError> {
        sqlx::query_as::<_, CardPurchaseRow>(&format!(
            r#"
            UPDATE card_purchases
            SET category_id = $4, name = $5, description = $6, total_amount = $7,
                installments = $8, purchase_date = $9, updated_at = now()
            WHERE purchase_id = $1 AND user_id = $2 AND card_id = $3
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(purchase_id)
        .bind(user_id)
        .bind(card_id)
        .bind(values.category_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.total_amount)
        .bind(values.installments)
        .bind(values.purchase_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("CardPurchase", purchase_id))
    }

    pub async fn delete_purchase(&self, user_id: Uuid, card_id: Uuid, purchase_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM card_purchases WHERE purchase_id = $1 AND user_id = $2 AND card_id = $3",
        )
        .bind(purchase_id)
        .bind(user_id)
        .bind(card_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("CardPurchase", purchase_id));
        }
        Ok(())
    }
}
