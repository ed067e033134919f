//! Category handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use core_kernel::{CategoryId, PortError};

use crate::auth::AuthUser;
use crate::dto::budget::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::AppState;

/// Lists the caller's categories by name, optionally of one type
pub async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<CategoryQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, ApiError> {
    let categories = state
        .budget
        .list_categories(user.id, query.category_type)
        .await?;
    Ok(ApiResponse::ok(categories.iter().map(Into::into).collect()))
}

/// Creates a category; names are unique per user
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), ApiError> {
    let category = state
        .budget
        .create_category(user.id, request.into())
        .await
        .map_err(|e| match e {
            PortError::Conflict { .. } => {
                ApiError::Conflict("Já existe uma categoria com esse nome".to_string())
            }
            other => other.into(),
        })?;

    info!(user_id = %user.id, category_id = %category.id, "Category created");
    Ok(ApiResponse::created((&category).into()))
}

/// Deletes a category; its expenses become uncategorized
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.budget.delete_category(user.id, id).await?;
    info!(user_id = %user.id, category_id = %id, "Category deleted");
    Ok(MessageResponse::new("Categoria excluída"))
}
