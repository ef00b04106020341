//! Account approval workflow. Every route here requires an admin.

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::handlers::users::{find_user, parse_account_status, UserResponse};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    response::Json,
};
use model::entities::user::{self, AccountStatus, Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

async fn users_with_status(
    db: &DatabaseConnection,
    status: AccountStatus,
) -> AppResult<Vec<UserResponse>> {
    let users = user::Entity::find()
        .filter(user::Column::AccountStatus.eq(status))
        .order_by_asc(user::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

async fn set_account_status(
    state: &AppState,
    user_id: i32,
    status: AccountStatus,
) -> AppResult<UserResponse> {
    let existing = find_user(&state.db, user_id).await?;
    let previous = existing.account_status;
    let mut active: user::ActiveModel = existing.into();
    active.account_status = Set(status);
    let updated = active.update(&state.db).await?;
    info!(
        "User {} account status changed from {:?} to {:?}",
        user_id, previous, status
    );
    Ok(UserResponse::from(updated))
}

/// Accounts waiting for approval, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/pending-users",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_pending_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    auth.require_admin()?;
    let users = users_with_status(&state.db, AccountStatus::Pending).await?;
    Ok(Json(ApiResponse::success(users, "Pending users retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/users/status/{status}",
    tag = "admin",
    params(
        ("status" = String, Path, description = "PENDING, APPROVED, REJECTED or SUSPENDED"),
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 400, description = "Unknown status", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_users_by_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(status): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    auth.require_admin()?;
    let status = parse_account_status(&status)?;
    let users = users_with_status(&state.db, status).await?;
    Ok(Json(ApiResponse::success(users, "Users retrieved successfully")))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{user_id}/approve",
    tag = "admin",
    params(("user_id" = i32, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User approved", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn approve_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    auth.require_admin()?;
    let user = set_account_status(&state, user_id, AccountStatus::Approved).await?;
    Ok(Json(ApiResponse::success(user, "User approved successfully")))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{user_id}/reject",
    tag = "admin",
    params(("user_id" = i32, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User rejected", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn reject_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    auth.require_admin()?;
    let user = set_account_status(&state, user_id, AccountStatus::Rejected).await?;
    Ok(Json(ApiResponse::success(user, "User rejected successfully")))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{user_id}/suspend",
    tag = "admin",
    params(("user_id" = i32, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User suspended", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn suspend_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    auth.require_admin()?;
    let user = set_account_status(&state, user_id, AccountStatus::Suspended).await?;
    Ok(Json(ApiResponse::success(user, "User suspended successfully")))
}

/// Re-activate a suspended or rejected account
#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{user_id}/activate",
    tag = "admin",
    params(("user_id" = i32, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User activated", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn activate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    auth.require_admin()?;
    let user = set_account_status(&state, user_id, AccountStatus::Approved).await?;
    Ok(Json(ApiResponse::success(user, "User activated successfully")))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{user_id}/role",
    tag = "admin",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn update_user_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
    Json(request): Json<UpdateRoleRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    auth.require_admin()?;
    let existing = find_user(&state.db, user_id).await?;
    let mut active: user::ActiveModel = existing.into();
    active.role = Set(request.role);
    let updated = active.update(&state.db).await?;
    info!("User {} role changed to {}", user_id, request.role.as_str());
    Ok(Json(ApiResponse::success(
        UserResponse::from(updated),
        "User role updated successfully",
    )))
}
