//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::domain::{AmountInput, EntryView, OperationContext};
use crate::error::AppError;
use crate::handlers::{
    AccountHandler, AddEntryCommand, EditEntryCommand, EntryHandler, LoginCommand, SignupCommand,
};
use crate::state::AppState;

use super::extract::{ApiJson, ApiPath};
use super::middleware::auth_middleware;

const STATUS_SUCCESS: &str = "success";

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: i32,
    pub email: String,
}

/// Missing fields are read as empty and rejected as invalid credentials
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub first_name: String,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub entries: Vec<EntryView>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub title: String,
    pub category_name: String,
    pub amount: AmountInput,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub message: String,
    pub entry_id: i32,
    pub category_id: i32,
}

/// Field names follow the existing client
#[derive(Debug, Deserialize)]
pub struct EditEntryRequest {
    /// Category id; categories are not created on edit
    pub category: i32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Amount")]
    pub amount: AmountInput,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct EntryChangedResponse {
    pub message: String,
    pub entry_id: i32,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router. Routes outside the public set require a bearer token.
pub fn create_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(health_check))
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/categories", get(get_categories));

    let protected = Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/addentry", post(add_entry))
        .route("/api/portfolio/:entry_id", delete(delete_entry))
        .route("/api/portfolio/edit/:entry_id", put(edit_entry))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// =========================================================================
// POST /api/signup
// =========================================================================

async fn signup(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let command = SignupCommand::new(
        request.first_name,
        request.last_name,
        request.email,
        request.password,
    );

    let result = AccountHandler::new(&state).signup(command, &context).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully".to_string(),
            user_id: result.user_id,
            email: result.email,
        }),
    ))
}

// =========================================================================
// POST /api/login
// =========================================================================

async fn login(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let command = LoginCommand::new(request.email, request.password);
    let token = AccountHandler::new(&state).login(command, &context).await?;

    Ok(Json(LoginResponse { token }))
}

// =========================================================================
// GET /api/dashboard
// =========================================================================

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = AccountHandler::new(&state).resolve_user(&identity).await?;

    Ok(Json(DashboardResponse {
        first_name: user.first_name,
    }))
}

// =========================================================================
// GET /api/portfolio
// =========================================================================

async fn get_portfolio(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let entries = EntryHandler::new(&state).list(&identity).await?;

    Ok(Json(PortfolioResponse {
        entries,
        status: STATUS_SUCCESS.to_string(),
    }))
}

// =========================================================================
// GET /api/categories
// =========================================================================

async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = EntryHandler::new(&state).categories().await?;

    Ok(Json(CategoriesResponse {
        categories,
        status: STATUS_SUCCESS.to_string(),
    }))
}

// =========================================================================
// POST /api/addentry
// =========================================================================

async fn add_entry(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Extension(context): Extension<OperationContext>,
    ApiJson(request): ApiJson<AddEntryRequest>,
) -> Result<(StatusCode, Json<AddEntryResponse>), AppError> {
    let command = AddEntryCommand::new(
        request.title,
        request.category_name,
        request.amount,
        request.date,
    );

    let added = EntryHandler::new(&state)
        .add(&identity, command, &context)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse {
            message: "Finance entry added successfully".to_string(),
            entry_id: added.entry_id,
            category_id: added.category_id,
        }),
    ))
}

// =========================================================================
// DELETE /api/portfolio/:entry_id
// =========================================================================

async fn delete_entry(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Extension(context): Extension<OperationContext>,
    ApiPath(entry_id): ApiPath<i32>,
) -> Result<Json<EntryChangedResponse>, AppError> {
    EntryHandler::new(&state)
        .delete(&identity, entry_id, &context)
        .await?;

    Ok(Json(EntryChangedResponse {
        message: "Finance entry deleted successfully".to_string(),
        entry_id,
    }))
}

// =========================================================================
// PUT /api/portfolio/edit/:entry_id
// =========================================================================

async fn edit_entry(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Extension(context): Extension<OperationContext>,
    ApiPath(entry_id): ApiPath<i32>,
    ApiJson(request): ApiJson<EditEntryRequest>,
) -> Result<Json<EntryChangedResponse>, AppError> {
    let command = EditEntryCommand::new(
        entry_id,
        request.category,
        request.title,
        request.amount,
        request.date,
    );

    EntryHandler::new(&state)
        .edit(&identity, command, &context)
        .await?;

    Ok(Json(EntryChangedResponse {
        message: "Finance entry updated successfully".to_string(),
        entry_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_deserialize() {
        let json = r#"{
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "Jane.Doe@x.com",
            "password": "Abcd1234!"
        }"#;

        let request: SignupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.first_name, "Jane");
        assert_eq!(request.last_name, "Doe");
    }

    #[test]
    fn test_signup_request_requires_every_field() {
        let json = r#"{"firstName": "Jane", "email": "jane@x.com", "password": "Abcd1234!"}"#;
        assert!(serde_json::from_str::<SignupRequest>(json).is_err());
    }

    #[test]
    fn test_login_request_defaults_missing_fields() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_add_entry_request_deserialize() {
        let json = r#"{
            "title": "Pay",
            "category_name": "Income",
            "amount": "100",
            "date": "2024-03-01"
        }"#;

        let request: AddEntryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, AmountInput::Text("100".to_string()));
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_add_entry_request_rejects_bad_date() {
        let json = r#"{"title": "Pay", "category_name": "Income", "amount": 1, "date": "03/01/2024"}"#;
        assert!(serde_json::from_str::<AddEntryRequest>(json).is_err());
    }

    #[test]
    fn test_edit_entry_request_field_names() {
        let json = r#"{"category": 2, "Title": "Rent", "Amount": -1200.5, "date": "2024-03-03"}"#;

        let request: EditEntryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.category, 2);
        assert_eq!(request.title, "Rent");
        assert_eq!(request.amount, AmountInput::Number(-1200.5));
    }
}
