//! Credit card, purchase and statement handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use core_kernel::{CardPurchaseId, CreditCardId, UserId};
use domain_billing::CreditCard;

use crate::auth::AuthUser;
use crate::dto::cards::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::AppState;

/// Renders a card with its purchases and the current month's statement
async fn with_statement(state: &AppState, user_id: UserId, card: CreditCard) -> Result<CreditCardResponse, ApiError> {
    let purchases = state.cards.list_purchases(user_id, card.id).await?;
    CreditCardResponse::new(card, purchases, state.timezone.current_month())
}

async fn check_purchase_category(state: &AppState, user_id: UserId, request: &PurchaseRequest) -> Result<(), ApiError> {
    if let Some(category_id) = request.category_id {
        state.budget.get_category(user_id, category_id).await?;
    }
    Ok(())
}

// ============================================================================
// Cards
// ============================================================================

/// Lists cards by name
pub async fn list_cards(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<CreditCardResponse>>>, ApiError> {
    let cards = state.cards.list_cards(user.id).await?;
    debug!(user_id = %user.id, count = cards.len(), "Credit cards listed");

    let mut responses = Vec::with_capacity(cards.len());
    for card in cards {
        responses.push(with_statement(&state, user.id, card).await?);
    }
    Ok(ApiResponse::ok(responses))
}

pub async fn get_card(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<CreditCardId>,
) -> Result<Json<ApiResponse<CreditCardResponse>>, ApiError> {
    let card = state.cards.get_card(user.id, id).await?;
    Ok(ApiResponse::ok(with_statement(&state, user.id, card).await?))
}

pub async fn create_card(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreditCardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreditCardResponse>>), ApiError> {
    let card = state.cards.create_card(user.id, request.into_new()?).await?;
    info!(user_id = %user.id, card_id = %card.id, "Credit card created");
    Ok(ApiResponse::created(with_statement(&state, user.id, card).await?))
}

pub async fn update_card(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<CreditCardId>,
    ValidatedJson(request): ValidatedJson<CreditCardRequest>,
) -> Result<Json<ApiResponse<CreditCardResponse>>, ApiError> {
    let card = state.cards.update_card(user.id, id, request.into_new()?).await?;
    info!(user_id = %user.id, card_id = %id, "Credit card updated");
    Ok(ApiResponse::ok(with_statement(&state, user.id, card).await?))
}

/// Deletes a card together with its purchases
pub async fn delete_card(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<CreditCardId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.cards.delete_card(user.id, id).await?;
    info!(user_id = %user.id, card_id = %id, "Credit card deleted");
    Ok(MessageResponse::new("Cartão excluído"))
}

// ============================================================================
// Purchases
// ============================================================================

pub async fn list_purchases(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(card_id): ApiPath<CreditCardId>,
) -> Result<Json<ApiResponse<Vec<PurchaseResponse>>>, ApiError> {
    let purchases = state.cards.list_purchases(user.id, card_id).await?;
    let responses = purchases
        .into_iter()
        .map(PurchaseResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ApiResponse::ok(responses))
}

pub async fn create_purchase(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(card_id): ApiPath<CreditCardId>,
    ValidatedJson(request): ValidatedJson<PurchaseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PurchaseResponse>>), ApiError> {
    check_purchase_category(&state, user.id, &request).await?;

    let purchase = state
        .cards
        .create_purchase(user.id, card_id, request.into_new()?)
        .await?;
    info!(
        user_id = %user.id,
        card_id = %card_id,
        purchase_id = %purchase.id,
        installments = purchase.installments,
        "Card purchase created"
    );
    Ok(ApiResponse::created(purchase.try_into()?))
}

pub async fn update_purchase(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath((card_id, id)): ApiPath<(CreditCardId, CardPurchaseId)>,
    ValidatedJson(request): ValidatedJson<PurchaseRequest>,
) -> Result<Json<ApiResponse<PurchaseResponse>>, ApiError> {
    check_purchase_category(&state, user.id, &request).await?;

    let purchase = state
        .cards
        .update_purchase(user.id, card_id, id, request.into_new()?)
        .await?;
    info!(user_id = %user.id, card_id = %card_id, purchase_id = %id, "Card purchase updated");
    Ok(ApiResponse::ok(purchase.try_into()?))
}

pub async fn delete_purchase(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath((card_id, id)): ApiPath<(CreditCardId, CardPurchaseId)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.cards.delete_purchase(user.id, card_id, id).await?;
    info!(user_id = %user.id, card_id = %card_id, purchase_id = %id, "Card purchase deleted");
    Ok(MessageResponse::new("Compra excluída"))
}

// ============================================================================
// Statements
// ============================================================================

/// Itemized statement for `?year&month`, defaulting to the current month
pub async fn get_statement(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(card_id): ApiPath<CreditCardId>,
    ApiQuery(query): ApiQuery<StatementQuery>,
) -> Result<Json<ApiResponse<CardStatementResponse>>, ApiError> {
    let reference = query.reference(state.timezone.current_month())?;
    let card = state.cards.get_card(user.id, card_id).await?;
    let purchases = state.cards.list_purchases(user.id, card_id).await?;

    let statement = card.statement(&purchases, reference)?;
    debug!(user_id = %user.id, card_id = %card_id, month = %reference, "Statement built");
    Ok(ApiResponse::ok(CardStatementResponse::new(card_id, statement)))
}
