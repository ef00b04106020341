use crate::auth::{
    create_token, ensure_password_strength, ensure_university_email, hash_password,
    verify_password, AuthUser,
};
use crate::error::{AppError, AppResult};
use crate::handlers::users::{ensure_email_available, UserResponse};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use chrono::Utc;
use common::{landing_path, navigation_for_role, NavItem};
use model::entities::user::{self, AccountStatus, Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Self-service student registration
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Must be a `@sust.edu` address
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub hall_name: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Issued session for an approved account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub token_type: String,
    pub user: UserResponse,
    /// Client route to open after login
    pub redirect: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NavigationResponse {
    pub role: Role,
    pub landing: String,
    pub items: Vec<NavItem>,
}

/// Register a new student account. The account waits for admin approval.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration received, pending approval", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<RegisterRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    let hall_name = request.hall_name.trim();
    if hall_name.is_empty() {
        return Err(AppError::Validation("Hall name is required".to_string()));
    }

    let email = request.email.trim().to_string();
    ensure_university_email(&email)?;
    ensure_password_strength(&request.password)?;
    if request.password != request.confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    ensure_email_available(&state.db, &email).await?;

    let account = user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email),
        password_hash: Set(hash_password(&request.password, state.settings.bcrypt_cost)?),
        role: Set(Role::Student),
        hall_name: Set(Some(hall_name.to_string())),
        account_status: Set(AccountStatus::Pending),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Registered user {} ({}), awaiting approval", account.id, account.email);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UserResponse::from(account),
            "Registration successful. Your account is pending admin approval.",
        )),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 403, description = "Account pending, rejected or suspended", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<LoginRequest>>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let email = request.email.trim();
    let account = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await?;

    let Some(account) = account else {
        debug!("Login attempt for unknown email {}", email);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&request.password, &account.password_hash)? {
        warn!("Wrong password for user {}", account.id);
        return Err(AppError::InvalidCredentials);
    }

    if !account.is_approved() {
        info!(
            "Login refused for user {} with status {:?}",
            account.id, account.account_status
        );
        return Err(AppError::AccountNotApproved(account.account_status));
    }

    let token = create_token(&account, &state.settings)?;
    let redirect = landing_path(account.role.as_str()).to_string();
    info!("User {} logged in as {}", account.id, account.role.as_str());

    Ok(Json(ApiResponse::success(
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            user: UserResponse::from(account),
            redirect,
        },
        "Login successful",
    )))
}

/// The authenticated caller
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(auth))]
pub async fn me(auth: AuthUser) -> AppResult<Json<ApiResponse<UserResponse>>> {
    Ok(Json(ApiResponse::success(
        UserResponse::from(auth.0),
        "Current user retrieved successfully",
    )))
}

/// Navigation entries for the caller's role
#[utoipa::path(
    get,
    path = "/api/v1/auth/navigation",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Navigation for the caller's role", body = ApiResponse<NavigationResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(auth))]
pub async fn navigation(auth: AuthUser) -> AppResult<Json<ApiResponse<NavigationResponse>>> {
    let role = auth.role();
    Ok(Json(ApiResponse::success(
        NavigationResponse {
            role,
            landing: landing_path(role.as_str()).to_string(),
            items: navigation_for_role(role.as_str()),
        },
        "Navigation retrieved successfully",
    )))
}
