// 🌐 REST API
// JSON surface over a shared Session; used by the expense-server binary

use crate::budget::BudgetStatus;
use crate::currency::{self, RateProvider};
use crate::error::{CurrencyError, TrackerError};
use crate::expense::{Expense, NewExpense};
use crate::export::{to_csv_string, DEFAULT_EXPORT_FILE};
use crate::session::{MutationReport, RecordedAlerts, Session};
use crate::store::SqliteStore;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tower_http::cors::CorsLayer;

pub type ServerSession = Session<SqliteStore, RecordedAlerts>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<ServerSession>>,
    rates: Arc<dyn RateProvider>,
}

impl AppState {
    pub fn new(session: ServerSession, rates: Arc<dyn RateProvider>) -> Self {
        AppState {
            session: Arc::new(Mutex::new(session)),
            rates,
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, ServerSession>, ApiError> {
        self.session
            .lock()
            .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        let body = ErrorResponse {
            error: self.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Validation(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CurrencyError> for ApiError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::UnsupportedCurrency(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// API Response wrapper
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Serialize)]
pub struct MutationResponse {
    #[serde(flatten)]
    report: MutationReport,
    alerts: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SummaryResponse {
    pub totals: BTreeMap<String, f64>,
    pub grand_total: f64,
    pub budget: Option<f64>,
    pub budget_status: Option<BudgetStatus>,
    pub total_rewards: u64,
}

#[derive(Serialize, Deserialize)]
pub struct BudgetRequest {
    /// `null` clears the budget
    pub value: Option<f64>,
}

#[derive(Deserialize)]
pub struct ConvertQuery {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Serialize, Deserialize)]
pub struct ConvertResponse {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
}

fn with_alerts(session: &mut ServerSession, report: MutationReport) -> MutationResponse {
    MutationResponse {
        report,
        alerts: session.alerts_mut().drain(),
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    ApiResponse::ok("OK")
}

/// GET /api/expenses
async fn list_expenses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    let session = state.session()?;
    Ok(ApiResponse::ok(session.ledger().expenses().to_vec()))
}

/// POST /api/expenses
async fn create_expense(
    State(state): State<AppState>,
    Json(new): Json<NewExpense>,
) -> Result<(StatusCode, Json<ApiResponse<MutationResponse>>), ApiError> {
    let mut session = state.session()?;
    let report = session.add_expense(new)?;
    Ok((StatusCode::CREATED, ApiResponse::ok(with_alerts(&mut session, report))))
}

/// PUT /api/expenses/:id - replaces the record under a new id
async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<NewExpense>,
) -> Result<Json<ApiResponse<MutationResponse>>, ApiError> {
    let mut session = state.session()?;
    let report = session
        .edit_expense(id, fields)?
        .ok_or_else(|| ApiError::NotFound(format!("expense {}", id)))?;
    Ok(ApiResponse::ok(with_alerts(&mut session, report)))
}

/// DELETE /api/expenses/:id - unknown ids succeed with no expense
async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MutationResponse>>, ApiError> {
    let mut session = state.session()?;
    let report = session.delete_expense(id)?;
    Ok(ApiResponse::ok(with_alerts(&mut session, report)))
}

/// GET /api/summary
async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SummaryResponse>>, ApiError> {
    let session = state.session()?;
    let ledger = session.ledger();

    Ok(ApiResponse::ok(SummaryResponse {
        totals: ledger.totals_by_category(),
        grand_total: ledger.grand_total(),
        budget: session.budget(),
        budget_status: session.budget_status(),
        total_rewards: session.total_rewards(),
    }))
}

/// GET /api/budget
async fn get_budget(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BudgetRequest>>, ApiError> {
    let session = state.session()?;
    Ok(ApiResponse::ok(BudgetRequest {
        value: session.budget(),
    }))
}

/// PUT /api/budget
async fn put_budget(
    State(state): State<AppState>,
    Json(request): Json<BudgetRequest>,
) -> Result<Json<ApiResponse<MutationResponse>>, ApiError> {
    let mut session = state.session()?;

    let report = match request.value {
        Some(value) => session.set_budget(value)?,
        None => {
            session.clear_budget()?;
            MutationReport::default()
        }
    };
    Ok(ApiResponse::ok(with_alerts(&mut session, report)))
}

/// GET /api/convert?amount=..&from=..&to=..
async fn convert_amount(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ApiResponse<ConvertResponse>>, ApiError> {
    if !query.amount.is_finite() {
        return Err(ApiError::BadRequest("amount must be a number".to_string()));
    }
    let converted =
        currency::convert(state.rates.as_ref(), query.amount, &query.from, &query.to).await?;

    Ok(ApiResponse::ok(ConvertResponse {
        amount: query.amount,
        from: query.from.to_uppercase(),
        to: query.to.to_uppercase(),
        converted,
    }))
}

/// GET /api/export.csv
async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let csv = {
        let session = state.session()?;
        to_csv_string(session.ledger().expenses())?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DEFAULT_EXPORT_FILE),
            ),
        ],
        csv,
    )
        .into_response())
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn build_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/:id", axum::routing::put(update_expense).delete(delete_expense))
        .route("/summary", get(get_summary))
        .route("/budget", get(get_budget).put(put_budget))
        .route("/convert", get(convert_amount))
        .route("/export.csv", get(export_csv))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::RateTable;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use std::collections::HashMap;
    use tower::util::ServiceExt;

    struct FixedRates;

    #[async_trait]
    impl RateProvider for FixedRates {
        async fn latest(&self, _base: &str) -> Result<RateTable, CurrencyError> {
            let mut rates = HashMap::new();
            rates.insert("EUR".to_string(), 0.5);
            Ok(RateTable { base: None, rates })
        }
    }

    fn create_test_state() -> AppState {
        let store = SqliteStore::open_in_memory().unwrap();
        AppState::new(Session::open(store, RecordedAlerts::default()), Arc::new(FixedRates))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn lunch(amount: f64) -> serde_json::Value {
        serde_json::json!({
            "name": "Lunch",
            "amount": amount,
            "category": "Food",
            "date": "2024-03-01"
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_list_expenses() {
        let state = create_test_state();

        let response = build_app(state.clone())
            .oneshot(json_request("PUT", "/api/budget", serde_json::json!({"value": 100.0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = build_app(state.clone())
            .oneshot(json_request("POST", "/api/expenses", lunch(70.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["data"]["budget_status"], "WithinLimit");
        assert_eq!(body["data"]["reward"]["reward"], 3);
        assert_eq!(body["data"]["alerts"].as_array().unwrap().len(), 1);

        let response = build_app(state)
            .oneshot(Request::builder().uri("/api/expenses").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Lunch");
    }

    #[tokio::test]
    async fn test_invalid_expense_is_bad_request() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(json_request("POST", "/api/expenses", lunch(-5.0)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_expense_is_not_found() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(json_request("PUT", "/api/expenses/12345", lunch(5.0)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_expense_is_ok() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/expenses/12345")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_negative_budget_rejected() {
        let state = create_test_state();
        build_app(state.clone())
            .oneshot(json_request("PUT", "/api/budget", serde_json::json!({"value": 100.0})))
            .await
            .unwrap();

        let response = build_app(state.clone())
            .oneshot(json_request("PUT", "/api/budget", serde_json::json!({"value": -1.0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = build_app(state)
            .oneshot(Request::builder().uri("/api/budget").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["value"], 100.0);
    }

    #[tokio::test]
    async fn test_padded_category_is_trimmed() {
        let state = create_test_state();
        let padded = serde_json::json!({
            "name": " Snack ",
            "amount": 2.5,
            "category": " Food ",
            "date": "2024-03-01"
        });
        build_app(state.clone())
            .oneshot(json_request("POST", "/api/expenses", padded))
            .await
            .unwrap();
        build_app(state.clone())
            .oneshot(json_request("POST", "/api/expenses", lunch(10.0)))
            .await
            .unwrap();

        let response = build_app(state)
            .oneshot(Request::builder().uri("/api/summary").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        let totals = body["data"]["totals"].as_object().unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Food"], 12.5);
    }

    #[tokio::test]
    async fn test_summary_and_export() {
        let state = create_test_state();
        build_app(state.clone())
            .oneshot(json_request("POST", "/api/expenses", lunch(12.5)))
            .await
            .unwrap();

        let response = build_app(state.clone())
            .oneshot(Request::builder().uri("/api/summary").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["totals"]["Food"], 12.5);
        assert_eq!(body["data"]["budget"], serde_json::Value::Null);

        let response = build_app(state)
            .oneshot(Request::builder().uri("/api/export.csv").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Lunch,12.5,Food,2024-03-01\n");
    }

    #[tokio::test]
    async fn test_convert_endpoint() {
        let app = build_app(create_test_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/convert?amount=20&from=usd&to=eur")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["converted"], 10.0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/convert?amount=20&from=usd&to=xyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
