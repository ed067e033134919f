//! HTTP tests against the router wired to the in-memory adapters

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use chrono::{Datelike, Duration};
use serde_json::{json, Value};

use core_kernel::{HealthCheckable, Timezone};
use domain_identity::AccountService;
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::{InMemoryFinanceStore, InMemoryUserStore, RecordingNotifier, UserFixtures};

struct TestApp {
    server: TestServer,
    notifier: Arc<RecordingNotifier>,
}

fn test_app() -> TestApp {
    let users = Arc::new(InMemoryUserStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = Arc::new(InMemoryFinanceStore::new());
    let health: Arc<dyn HealthCheckable> = store.clone();

    let state = AppState {
        accounts: AccountService::new(users, notifier.clone()),
        budget: store.clone(),
        cards: store.clone(),
        investments: store,
        health_checks: vec![health],
        config: ApiConfig::default(),
        timezone: Timezone::default(),
    };

    TestApp {
        server: TestServer::new(create_router(state)).unwrap(),
        notifier,
    }
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

impl TestApp {
    async fn register(&self, email: &str) -> TestResponse {
        self.server
            .post("/api/auth/register")
            .json(&json!({
                "name": "Ana Souza",
                "email": email,
                "password": UserFixtures::strong_password(),
                "confirmPassword": UserFixtures::strong_password(),
            }))
            .await
    }

    async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.server
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await
    }

    /// Registers a fresh user and returns their token
    async fn signed_in(&self) -> String {
        let email = UserFixtures::email();
        self.register(&email).await.assert_status(StatusCode::CREATED);
        let body: Value = self
            .login(&email, UserFixtures::strong_password())
            .await
            .json();
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn get(&self, token: &str, path: &str) -> TestResponse {
        self.server
            .get(path)
            .add_header(header::AUTHORIZATION, bearer(token))
            .await
    }

    async fn post(&self, token: &str, path: &str, body: Value) -> TestResponse {
        self.server
            .post(path)
            .add_header(header::AUTHORIZATION, bearer(token))
            .json(&body)
            .await
    }

    async fn put(&self, token: &str, path: &str, body: Value) -> TestResponse {
        self.server
            .put(path)
            .add_header(header::AUTHORIZATION, bearer(token))
            .json(&body)
            .await
    }

    async fn patch(&self, token: &str, path: &str, body: Value) -> TestResponse {
        self.server
            .patch(path)
            .add_header(header::AUTHORIZATION, bearer(token))
            .json(&body)
            .await
    }

    async fn delete(&self, token: &str, path: &str) -> TestResponse {
        self.server
            .delete(path)
            .add_header(header::AUTHORIZATION, bearer(token))
            .await
    }
}

fn today() -> chrono::NaiveDate {
    Timezone::default().today()
}

// ============================================================================
// Health
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_and_readiness_are_public() {
        let app = test_app();

        app.server.get("/health").await.assert_status_ok();

        let ready: Value = app.server.get("/health/ready").await.json();
        assert_eq!(ready["status"], "ready");
        assert_eq!(ready["checks"][0]["adapter_id"], "in-memory-finance-store");
    }
}

// ============================================================================
// Auth
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_returns_profile_and_seeds_categories() {
        let app = test_app();
        let email = UserFixtures::email();

        let response = app.register(&email).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Conta criada com sucesso!");
        assert_eq!(body["user"]["email"], email);
        assert!(body["user"].get("passwordHash").is_none());

        let token = {
            let login: Value = app.login(&email, UserFixtures::strong_password()).await.json();
            login["data"]["token"].as_str().unwrap().to_string()
        };
        let categories: Value = app.get(&token, "/api/categories").await.json();
        let names: Vec<&str> = categories["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"Alimentação"));
        assert!(names.contains(&"Outros"));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let app = test_app();
        let email = UserFixtures::email();
        app.register(&email).await.assert_status(StatusCode::CREATED);

        let response = app.register(&email).await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["error"], "Este email já está cadastrado");
        assert_eq!(body["code"], "conflict");
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_confirmation() {
        let app = test_app();
        let response = app
            .server
            .post("/api/auth/register")
            .json(&json!({
                "name": "Ana Souza",
                "email": UserFixtures::email(),
                "password": "Segredo123",
                "confirmPassword": "Segredo124",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let app = test_app();
        let email = UserFixtures::email();
        app.register(&email).await;

        let response = app.login(&email, "Errada123").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["error"], "Email ou senha inválidos");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = test_app();

        let response = app.server.get("/api/expenses").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["error"], "Não autorizado");

        app.get("not-a-token", "/api/dashboard")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let app = test_app();
        let email = UserFixtures::email();
        app.register(&email).await;

        let response = app
            .server
            .post("/api/auth/forgot-password")
            .json(&json!({ "email": email }))
            .await;
        response.assert_status_ok();

        let notices = app.notifier.notices().await;
        assert_eq!(notices.len(), 1);
        let token = notices[0].token.clone();

        app.server
            .post("/api/auth/reset-password")
            .json(&json!({
                "token": token,
                "password": "NovaSenha9",
                "confirmPassword": "NovaSenha9",
            }))
            .await
            .assert_status_ok();

        app.login(&email, "NovaSenha9").await.assert_status_ok();
        app.login(&email, UserFixtures::strong_password())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        // A consumed token cannot be replayed.
        app.server
            .post("/api/auth/reset-password")
            .json(&json!({
                "token": token,
                "password": "Outra1234",
                "confirmPassword": "Outra1234",
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_forgot_password_does_not_reveal_unknown_email() {
        let app = test_app();
        let email = UserFixtures::email();
        app.register(&email).await;

        let known: Value = app
            .server
            .post("/api/auth/forgot-password")
            .json(&json!({ "email": email }))
            .await
            .json();
        let unknown: Value = app
            .server
            .post("/api/auth/forgot-password")
            .json(&json!({ "email": "ninguem@example.com" }))
            .await
            .json();

        assert_eq!(known, unknown);
        assert_eq!(app.notifier.notices().await.len(), 1);
    }
}

// ============================================================================
// Categories, expenses and incomes
// ============================================================================

mod budget_tests {
    use super::*;

    async fn first_category_id(app: &TestApp, token: &str) -> String {
        let body: Value = app.get(token, "/api/categories?type=EXPENSE").await.json();
        body["data"][0]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_duplicate_category_name_is_conflict() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(&token, "/api/categories", json!({ "name": "Moradia" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["error"], "Já existe uma categoria com esse nome");

        let created = app
            .post(&token, "/api/categories", json!({ "name": "Pets", "color": "#123abc" }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["data"]["type"], "EXPENSE");
    }

    #[tokio::test]
    async fn test_expense_crud_embeds_category() {
        let app = test_app();
        let token = app.signed_in().await;
        let category_id = first_category_id(&app, &token).await;

        let created = app
            .post(
                &token,
                "/api/expenses",
                json!({
                    "name": "Mercado",
                    "amount": 150.5,
                    "date": today(),
                    "type": "VARIABLE",
                    "categoryId": category_id,
                }),
            )
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["amount"], 150.5);
        assert_eq!(body["data"]["category"]["id"], category_id.as_str());

        let updated: Value = app
            .put(
                &token,
                &format!("/api/expenses/{id}"),
                json!({
                    "name": "Mercado do mês",
                    "amount": 200,
                    "date": today(),
                    "type": "VARIABLE",
                }),
            )
            .await
            .json();
        assert_eq!(updated["data"]["name"], "Mercado do mês");
        assert!(updated["data"]["category"].is_null());

        let deleted: Value = app.delete(&token, &format!("/api/expenses/{id}")).await.json();
        assert_eq!(deleted["message"], "Despesa excluída");

        app.get(&token, &format!("/api/expenses/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_foreign_expense_is_not_found() {
        let app = test_app();
        let owner = app.signed_in().await;
        let stranger = app.signed_in().await;

        let body: Value = app
            .post(
                &owner,
                "/api/expenses",
                json!({ "name": "Aluguel", "amount": 1200, "date": today(), "type": "FIXED" }),
            )
            .await
            .json();
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let response = app.get(&stranger, &format!("/api/expenses/{id}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Despesa não encontrada");
        assert_eq!(body["code"], "not_found");

        app.delete(&stranger, &format!("/api/expenses/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_expense_validation_messages() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(
                &token,
                "/api/expenses",
                json!({ "name": "Café", "amount": -3, "date": today(), "type": "VARIABLE" }),
            )
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "validation_error");

        let malformed = app
            .post(&token, "/api/expenses", json!({ "name": "Café", "type": "OTHER" }))
            .await;
        malformed.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = malformed.json();
        assert_eq!(body["error"], "Dados inválidos");

        app.get(&token, "/api/expenses/not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_amount_rounding_to_zero_cents_is_rejected() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(
                &token,
                "/api/expenses",
                json!({ "name": "Café", "amount": 0.004, "date": today(), "type": "VARIABLE" }),
            )
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Valor deve ser positivo e no máximo 999.999.999");

        let listed: Value = app.get(&token, "/api/expenses").await.json();
        assert!(listed["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expense_date_filter_needs_both_bounds() {
        let app = test_app();
        let token = app.signed_in().await;
        let old = today() - Duration::days(60);

        for date in [old, today()] {
            app.post(
                &token,
                "/api/expenses",
                json!({ "name": "Conta", "amount": 10, "date": date, "type": "VARIABLE" }),
            )
            .await
            .assert_status(StatusCode::CREATED);
        }

        let recent: Value = app
            .get(
                &token,
                &format!(
                    "/api/expenses?startDate={}&endDate={}",
                    today() - Duration::days(7),
                    today()
                ),
            )
            .await
            .json();
        assert_eq!(recent["data"].as_array().unwrap().len(), 1);

        let half_open: Value = app
            .get(&token, &format!("/api/expenses?startDate={}", today()))
            .await
            .json();
        assert_eq!(half_open["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_income_filter_by_type() {
        let app = test_app();
        let token = app.signed_in().await;

        for kind in ["SALARY", "FREELANCE"] {
            app.post(
                &token,
                "/api/incomes",
                json!({ "name": kind, "amount": 1000, "date": today(), "type": kind }),
            )
            .await
            .assert_status(StatusCode::CREATED);
        }

        let body: Value = app.get(&token, "/api/incomes?type=SALARY").await.json();
        let incomes = body["data"].as_array().unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0]["isRecurring"], false);

        app.get(&token, "/api/incomes?type=LOTTERY")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fixed_expense_mark_paid() {
        let app = test_app();
        let token = app.signed_in().await;

        let body: Value = app
            .post(
                &token,
                "/api/fixed-expenses",
                json!({ "name": "Internet", "amount": 99.9, "dueDay": 10, "frequency": "MONTHLY" }),
            )
            .await
            .json();
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["isActive"], true);
        assert!(body["data"]["lastPaidAt"].is_null());
        assert_eq!(body["data"]["isPaidThisMonth"], false);

        let paid: Value = app
            .patch(&token, &format!("/api/fixed-expenses/{id}"), json!({ "markAsPaid": true }))
            .await
            .json();
        assert!(paid["data"]["lastPaidAt"].is_string());
        assert_eq!(paid["data"]["isPaidThisMonth"], true);

        let unpaid: Value = app
            .patch(&token, &format!("/api/fixed-expenses/{id}"), json!({ "markAsPaid": false }))
            .await
            .json();
        assert!(unpaid["data"]["lastPaidAt"].is_null());
        assert_eq!(unpaid["data"]["isPaidThisMonth"], false);
    }
}

// ============================================================================
// Credit cards
// ============================================================================

mod card_tests {
    use super::*;

    async fn create_card(app: &TestApp, token: &str) -> String {
        let response = app
            .post(
                token,
                "/api/credit-cards",
                json!({
                    "name": "Nubank",
                    "lastDigits": "1234",
                    "brand": "MASTERCARD",
                    "limit": 5000,
                    "closingDay": 10,
                    "dueDay": 17,
                }),
            )
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_statement_allocates_installments() {
        let app = test_app();
        let token = app.signed_in().await;
        let card = create_card(&app, &token).await;

        let purchase = app
            .post(
                &token,
                &format!("/api/credit-cards/{card}/expenses"),
                json!({ "name": "Geladeira", "totalAmount": 300, "installments": 3, "date": "2024-03-15" }),
            )
            .await;
        purchase.assert_status(StatusCode::CREATED);
        let body: Value = purchase.json();
        assert_eq!(body["data"]["installmentAmount"], 100.0);

        // Bought after the closing day: first installment bills in April.
        let march: Value = app
            .get(&token, &format!("/api/credit-cards/{card}/statement?year=2024&month=3"))
            .await
            .json();
        assert_eq!(march["data"]["summary"]["total"], 0.0);

        let april: Value = app
            .get(&token, &format!("/api/credit-cards/{card}/statement?year=2024&month=4"))
            .await
            .json();
        assert_eq!(april["data"]["summary"]["total"], 100.0);
        assert_eq!(april["data"]["summary"]["availableCredit"], 4900.0);
        assert_eq!(april["data"]["lines"][0]["installmentNumber"], 1);

        let june: Value = app
            .get(&token, &format!("/api/credit-cards/{card}/statement?year=2024&month=6"))
            .await
            .json();
        assert_eq!(june["data"]["lines"][0]["installmentNumber"], 3);
    }

    #[tokio::test]
    async fn test_card_detail_embeds_purchases_and_current_statement() {
        let app = test_app();
        let token = app.signed_in().await;
        let card = create_card(&app, &token).await;

        let body: Value = app
            .post(
                &token,
                &format!("/api/credit-cards/{card}/expenses"),
                json!({ "name": "Livro", "totalAmount": 80, "date": today() }),
            )
            .await
            .json();
        let purchase = body["data"]["id"].as_str().unwrap().to_string();

        let detail: Value = app.get(&token, &format!("/api/credit-cards/{card}")).await.json();
        assert_eq!(detail["data"]["expenses"].as_array().unwrap().len(), 1);
        assert_eq!(
            detail["data"]["statement"]["referenceMonth"],
            format!("{:04}-{:02}", today().year(), today().month())
        );

        let deleted: Value = app
            .delete(&token, &format!("/api/credit-cards/{card}/expenses/{purchase}"))
            .await
            .json();
        assert_eq!(deleted["message"], "Compra excluída");

        let purchases: Value = app
            .get(&token, &format!("/api/credit-cards/{card}/expenses"))
            .await
            .json();
        assert!(purchases["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_card_rejects_bad_last_digits_and_foreign_access() {
        let app = test_app();
        let owner = app.signed_in().await;
        let stranger = app.signed_in().await;

        app.post(
            &owner,
            "/api/credit-cards",
            json!({ "name": "X", "lastDigits": "12a4", "brand": "VISA", "limit": 100, "closingDay": 1, "dueDay": 8 }),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);

        let card = create_card(&app, &owner).await;
        let response = app.get(&stranger, &format!("/api/credit-cards/{card}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Cartão não encontrado");
    }

    #[tokio::test]
    async fn test_card_limit_rounding_to_zero_is_rejected() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(
                &token,
                "/api/credit-cards",
                json!({ "name": "X", "lastDigits": "1234", "brand": "VISA", "limit": 0.001, "closingDay": 1, "dueDay": 8 }),
            )
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Limite deve ser positivo e no máximo 999.999.999");
    }
}

// ============================================================================
// Goals and simulations
// ============================================================================

mod investment_tests {
    use super::*;

    #[tokio::test]
    async fn test_goal_progress_and_days_left() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(
                &token,
                "/api/goals",
                json!({
                    "name": "Reserva",
                    "targetAmount": 1000,
                    "currentAmount": 250,
                    "deadline": today() + Duration::days(30),
                }),
            )
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["progressPercent"], 25);
        assert_eq!(body["data"]["daysLeft"], 30);
        assert_eq!(body["data"]["isCompleted"], false);
        assert_eq!(body["data"]["priority"], 1);

        let id = body["data"]["id"].as_str().unwrap().to_string();
        let completed: Value = app
            .put(
                &token,
                &format!("/api/goals/{id}"),
                json!({
                    "name": "Reserva",
                    "targetAmount": 1000,
                    "currentAmount": 1000,
                    "deadline": today() + Duration::days(30),
                }),
            )
            .await
            .json();
        assert_eq!(completed["data"]["isCompleted"], true);
    }

    #[tokio::test]
    async fn test_simulation_is_projected_server_side() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(
                &token,
                "/api/simulations",
                json!({
                    "name": "Aposentadoria",
                    "initialAmount": 1000,
                    "monthlyContribution": 0,
                    "interestRate": 12,
                    "interestType": "SIMPLE",
                    "periodMonths": 12,
                }),
            )
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["projectedAmount"], 1120.0);

        let list: Value = app.get(&token, "/api/simulations").await.json();
        assert_eq!(list["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_preview_returns_summary_and_series() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(
                &token,
                "/api/simulations/preview",
                json!({
                    "initialAmount": 1000,
                    "monthlyContribution": 100,
                    "interestRate": 10,
                    "interestType": "COMPOUND",
                    "periodMonths": 24,
                }),
            )
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["series"].as_array().unwrap().len(), 25);
        assert_eq!(body["data"]["summary"]["totalInvested"], 3400.0);

        let list: Value = app.get(&token, "/api/simulations").await.json();
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_preview_rejects_out_of_range_period() {
        let app = test_app();
        let token = app.signed_in().await;

        let response = app
            .post(
                &token,
                "/api/simulations/preview",
                json!({
                    "initialAmount": 1000,
                    "monthlyContribution": 0,
                    "interestRate": 10,
                    "interestType": "COMPOUND",
                    "periodMonths": 0,
                }),
            )
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Dashboard
// ============================================================================

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_totals_for_current_month() {
        let app = test_app();
        let token = app.signed_in().await;

        app.post(
            &token,
            "/api/incomes",
            json!({ "name": "Salário", "amount": 5000, "date": today(), "type": "SALARY" }),
        )
        .await
        .assert_status(StatusCode::CREATED);
        app.post(
            &token,
            "/api/expenses",
            json!({ "name": "Mercado", "amount": 1250.5, "date": today(), "type": "VARIABLE" }),
        )
        .await
        .assert_status(StatusCode::CREATED);
        app.post(
            &token,
            "/api/fixed-expenses",
            json!({ "name": "Aluguel", "amount": 1500, "dueDay": 5, "frequency": "MONTHLY" }),
        )
        .await
        .assert_status(StatusCode::CREATED);

        let response = app.get(&token, "/api/dashboard").await;
        response.assert_status_ok();
        let body: Value = response.json();
        let data = &body["data"];

        assert_eq!(data["totalIncome"], 5000.0);
        assert_eq!(data["totalExpenses"], 1250.5);
        assert_eq!(data["balance"], 3749.5);
        assert_eq!(data["totalFixedExpenses"], 1500.0);
        assert_eq!(data["monthlyData"].as_array().unwrap().len(), 6);
        assert_eq!(data["recentExpenses"].as_array().unwrap().len(), 1);
        assert_eq!(data["upcomingFixedExpenses"].as_array().unwrap().len(), 1);
        assert!(data["upcomingFixedExpenses"][0]["daysUntilDue"].is_u64());
        // Uncategorized spending is left out of the breakdown.
        assert!(data["expensesByCategory"].as_array().unwrap().is_empty());
    }
}
