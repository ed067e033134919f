//! HTTP API Layer
//!
//! REST API for the personal finance manager using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource, all scoped to the caller
//! - **Middleware**: bearer-token authentication and audit logging
//! - **DTOs**: camelCase request/response bodies and the `{success, data}` envelope
//! - **Error Handling**: `{error, code}` responses with matching status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::postgres(pool, config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod notifier;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{HealthCheckable, TemporalError, Timezone};
use domain_billing::CreditCardPort;
use domain_budget::BudgetPort;
use domain_identity::AccountService;
use domain_investment::InvestmentPort;
use infra_db::{
    DatabasePool, PostgresBillingAdapter, PostgresBudgetAdapter, PostgresIdentityAdapter,
    PostgresInvestmentAdapter,
};

use crate::config::ApiConfig;
use crate::handlers::{
    auth as auth_handlers, categories, credit_cards, dashboard, expenses, fixed_expenses, goals,
    health, incomes, simulations,
};
use crate::middleware::{audit_middleware, auth_middleware};
use crate::notifier::LogResetNotifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub budget: Arc<dyn BudgetPort>,
    pub cards: Arc<dyn CreditCardPort>,
    pub investments: Arc<dyn InvestmentPort>,
    /// Adapters probed by the readiness check
    pub health_checks: Vec<Arc<dyn HealthCheckable>>,
    pub config: ApiConfig,
    /// Defines "today" and the current month
    pub timezone: Timezone,
}

impl AppState {
    /// Wires every port to its PostgreSQL adapter
    pub fn postgres(pool: DatabasePool, config: ApiConfig) -> Result<Self, TemporalError> {
        let timezone = config.timezone()?;

        let identity = Arc::new(PostgresIdentityAdapter::new(pool.clone()));
        let budget = Arc::new(PostgresBudgetAdapter::new(pool.clone()));
        let cards = Arc::new(PostgresBillingAdapter::new(pool.clone()));
        let investments = Arc::new(PostgresInvestmentAdapter::new(pool));
        let notifier = Arc::new(LogResetNotifier::new(config.public_url.clone()));

        let health_checks: Vec<Arc<dyn HealthCheckable>> = vec![
            identity.clone(),
            budget.clone(),
            cards.clone(),
            investments.clone(),
        ];

        Ok(Self {
            accounts: AccountService::new(identity, notifier),
            health_checks,
            budget,
            cards,
            investments,
            config,
            timezone,
        })
    }
}

/// Creates the main API router
///
/// Everything under `/api` except `/api/auth` requires a bearer token.
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/forgot-password", post(auth_handlers::forgot_password))
        .route("/reset-password", post(auth_handlers::reset_password));

    let category_routes = Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/:id", axum::routing::delete(categories::delete_category));

    let expense_routes = Router::new()
        .route("/", get(expenses::list_expenses).post(expenses::create_expense))
        .route(
            "/:id",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        );

    let income_routes = Router::new()
        .route("/", get(incomes::list_incomes).post(incomes::create_income))
        .route(
            "/:id",
            get(incomes::get_income)
                .put(incomes::update_income)
                .delete(incomes::delete_income),
        );

    let fixed_expense_routes = Router::new()
        .route(
            "/",
            get(fixed_expenses::list_fixed_expenses).post(fixed_expenses::create_fixed_expense),
        )
        .route(
            "/:id",
            get(fixed_expenses::get_fixed_expense)
                .put(fixed_expenses::update_fixed_expense)
                .patch(fixed_expenses::mark_fixed_expense_paid)
                .delete(fixed_expenses::delete_fixed_expense),
        );

    let card_routes = Router::new()
        .route("/", get(credit_cards::list_cards).post(credit_cards::create_card))
        .route(
            "/:id",
            get(credit_cards::get_card)
                .put(credit_cards::update_card)
                .delete(credit_cards::delete_card),
        )
        .route(
            "/:id/expenses",
            get(credit_cards::list_purchases).post(credit_cards::create_purchase),
        )
        .route(
            "/:id/expenses/:expense_id",
            axum::routing::put(credit_cards::update_purchase).delete(credit_cards::delete_purchase),
        )
        .route("/:id/statement", get(credit_cards::get_statement));

    let goal_routes = Router::new()
        .route("/", get(goals::list_goals).post(goals::create_goal))
        .route(
            "/:id",
            get(goals::get_goal)
                .put(goals::update_goal)
                .delete(goals::delete_goal),
        );

    let simulation_routes = Router::new()
        .route(
            "/",
            get(simulations::list_simulations).post(simulations::create_simulation),
        )
        .route("/preview", post(simulations::preview_simulation))
        .route("/:id", axum::routing::delete(simulations::delete_simulation));

    // Protected API routes
    let protected_routes = Router::new()
        .nest("/categories", category_routes)
        .nest("/expenses", expense_routes)
        .nest("/incomes", income_routes)
        .nest("/fixed-expenses", fixed_expense_routes)
        .nest("/credit-cards", card_routes)
        .nest("/goals", goal_routes)
        .nest("/simulations", simulation_routes)
        .route("/dashboard", get(dashboard::get_dashboard))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
