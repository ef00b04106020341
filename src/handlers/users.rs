use crate::auth::{ensure_password_strength, ensure_university_email, hash_password, AuthUser};
use crate::error::{AppError, AppResult};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDateTime, Utc};
use common::UserHallRoleCount;
use model::entities::user::{self, AccountStatus, Role};
use model::parse_active_enum;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating a user on behalf of the administration
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Must be a `@sust.edu` address
    pub email: String,
    pub password: String,
    /// Defaults to `STUDENT`
    pub role: Option<Role>,
    pub hall_name: Option<String>,
    /// Defaults to `PENDING`
    pub account_status: Option<AccountStatus>,
}

/// Request body for updating a user. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub email: Option<String>,
    /// Re-hashed before it is stored
    pub password: Option<String>,
    pub role: Option<Role>,
    pub hall_name: Option<String>,
    pub account_status: Option<AccountStatus>,
}

/// Filters for listing users
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UserListQuery {
    pub hall_name: Option<String>,
    /// Role name, e.g. `STUDENT`
    pub role: Option<String>,
    /// Account status, e.g. `PENDING`
    pub status: Option<String>,
}

/// User response model. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub hall_name: Option<String>,
    pub account_status: AccountStatus,
    pub created_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            hall_name: model.hall_name,
            account_status: model.account_status,
            created_at: model.created_at,
        }
    }
}

pub(crate) fn parse_role(raw: &str) -> AppResult<Role> {
    parse_active_enum(raw).ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", raw)))
}

pub(crate) fn parse_account_status(raw: &str) -> AppResult<AccountStatus> {
    parse_active_enum(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown account status: {}", raw)))
}

pub(crate) async fn find_user(db: &DatabaseConnection, user_id: i32) -> AppResult<user::Model> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("User", user_id))
}

pub(crate) async fn ensure_email_available(db: &DatabaseConnection, email: &str) -> AppResult<()> {
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;
    if existing.is_some() {
        warn!("Email {} is already registered", email);
        return Err(AppError::Conflict(format!("Email already registered: {}", email)));
    }
    Ok(())
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Valid(Json(request)): Valid<Json<CreateUserRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    auth.require_admin()?;
    trace!("Entering create_user function");

    let email = request.email.trim().to_string();
    ensure_university_email(&email)?;
    ensure_password_strength(&request.password)?;
    ensure_email_available(&state.db, &email).await?;

    let new_user = user::ActiveModel {
        name: Set(request.name.trim().to_string()),
        email: Set(email),
        password_hash: Set(hash_password(&request.password, state.settings.bcrypt_cost)?),
        role: Set(request.role.unwrap_or(Role::Student)),
        hall_name: Set(request.hall_name),
        account_status: Set(request.account_status.unwrap_or(AccountStatus::Pending)),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let created = new_user.insert(&state.db).await?;
    info!("User created successfully with ID: {}, role: {}", created.id, created.role.as_str());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse::from(created), "User created successfully")),
    ))
}

/// Get all users, optionally filtered by hall, role and account status
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(UserListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 400, description = "Unknown role or status filter", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    auth.require_admin()?;

    let mut select = user::Entity::find();
    if let Some(hall_name) = query.hall_name.as_deref() {
        select = select.filter(user::Column::HallName.eq(hall_name));
    }
    if let Some(role) = query.role.as_deref() {
        select = select.filter(user::Column::Role.eq(parse_role(role)?));
    }
    if let Some(status) = query.status.as_deref() {
        select = select.filter(user::Column::AccountStatus.eq(parse_account_status(status)?));
    }

    let users = select.order_by_asc(user::Column::Id).all(&state.db).await?;
    debug!("Retrieved {} users from database", users.len());

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
        "Users retrieved successfully",
    )))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    auth.require_admin()?;
    let user = find_user(&state.db, user_id).await?;
    Ok(Json(ApiResponse::success(
        UserResponse::from(user),
        "User retrieved successfully",
    )))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateUserRequest>>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    auth.require_admin()?;
    let existing = find_user(&state.db, user_id).await?;
    let mut active: user::ActiveModel = existing.clone().into();

    if let Some(name) = request.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = request.email {
        let email = email.trim().to_string();
        if email != existing.email {
            ensure_university_email(&email)?;
            ensure_email_available(&state.db, &email).await?;
            active.email = Set(email);
        }
    }
    if let Some(password) = request.password {
        ensure_password_strength(&password)?;
        active.password_hash = Set(hash_password(&password, state.settings.bcrypt_cost)?);
    }
    if let Some(role) = request.role {
        active.role = Set(role);
    }
    if let Some(hall_name) = request.hall_name {
        active.hall_name = Set(Some(hall_name));
    }
    if let Some(status) = request.account_status {
        active.account_status = Set(status);
    }

    let updated = active.update(&state.db).await?;
    info!("User {} updated", updated.id);

    Ok(Json(ApiResponse::success(
        UserResponse::from(updated),
        "User updated successfully",
    )))
}

/// Delete a user together with their complaints
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> AppResult<StatusCode> {
    auth.require_admin()?;
    let result = user::Entity::delete_by_id(user_id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("User", user_id));
    }
    info!("User {} deleted", user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Distinct hall names users are assigned to
#[utoipa::path(
    get,
    path = "/api/v1/users/halls",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Hall names retrieved successfully", body = ApiResponse<Vec<String>>)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_user_halls(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    auth.require_admin()?;
    let halls = user::Entity::find()
        .filter(user::Column::HallName.is_not_null())
        .select_only()
        .column(user::Column::HallName)
        .distinct()
        .order_by_asc(user::Column::HallName)
        .into_tuple::<Option<String>>()
        .all(&state.db)
        .await?;

    Ok(Json(ApiResponse::success(
        halls.into_iter().flatten().collect(),
        "Hall names retrieved successfully",
    )))
}

#[derive(Debug, FromQueryResult)]
struct HallRoleRow {
    hall_name: Option<String>,
    role: String,
    count: i64,
}

/// User counts grouped by hall and role
#[utoipa::path(
    get,
    path = "/api/v1/users/statistics",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User statistics retrieved successfully", body = ApiResponse<Vec<UserHallRoleCount>>)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_user_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<UserHallRoleCount>>>> {
    auth.require_admin()?;
    let rows = user::Entity::find()
        .select_only()
        .column(user::Column::HallName)
        .column(user::Column::Role)
        .column_as(user::Column::Id.count(), "count")
        .group_by(user::Column::HallName)
        .group_by(user::Column::Role)
        .order_by_asc(user::Column::HallName)
        .order_by_asc(user::Column::Role)
        .into_model::<HallRoleRow>()
        .all(&state.db)
        .await?;

    let statistics = rows
        .into_iter()
        .map(|row| UserHallRoleCount {
            hall_name: row.hall_name,
            role: row.role,
            count: row.count.max(0) as u64,
        })
        .collect();

    Ok(Json(ApiResponse::success(
        statistics,
        "User statistics retrieved successfully",
    )))
}
