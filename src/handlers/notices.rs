use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDateTime, Utc};
use model::entities::{hall_notice, user::Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_NOTICE_PRIORITY: &str = "NORMAL";

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub hall_name: String,
    /// Defaults to `NORMAL`
    #[validate(length(min = 1, max = 20))]
    pub priority: Option<String>,
    /// Defaults to true
    pub published: Option<bool>,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateNoticeRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub hall_name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub priority: Option<String>,
    pub published: Option<bool>,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NoticeListQuery {
    pub hall_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoticeResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub hall_name: String,
    pub priority: String,
    pub published: bool,
    pub attachment_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<hall_notice::Model> for NoticeResponse {
    fn from(model: hall_notice::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            hall_name: model.hall_name,
            priority: model.priority,
            published: model.published,
            attachment_url: model.attachment_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn normalize_priority(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Published notices, newest first
#[utoipa::path(
    get,
    path = "/api/v1/notices",
    tag = "notices",
    params(NoticeListQuery),
    responses(
        (status = 200, description = "Notices retrieved successfully", body = ApiResponse<Vec<NoticeResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_notices(
    State(state): State<AppState>,
    Query(query): Query<NoticeListQuery>,
) -> AppResult<Json<ApiResponse<Vec<NoticeResponse>>>> {
    let mut select = hall_notice::Entity::find().filter(hall_notice::Column::Published.eq(true));
    if let Some(hall_name) = query.hall_name {
        select = select.filter(hall_notice::Column::HallName.eq(hall_name));
    }
    let notices = select
        .order_by_desc(hall_notice::Column::CreatedAt)
        .order_by_desc(hall_notice::Column::Id)
        .all(&state.db)
        .await?;
    debug!("Retrieved {} notices", notices.len());
    Ok(Json(ApiResponse::success(
        notices.into_iter().map(NoticeResponse::from).collect(),
        "Notices retrieved successfully",
    )))
}

/// A single published notice
#[utoipa::path(
    get,
    path = "/api/v1/notices/{notice_id}",
    tag = "notices",
    params(("notice_id" = i32, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice retrieved successfully", body = ApiResponse<NoticeResponse>),
        (status = 404, description = "Notice not found or unpublished", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_notice(
    State(state): State<AppState>,
    Path(notice_id): Path<i32>,
) -> AppResult<Json<ApiResponse<NoticeResponse>>> {
    let notice = hall_notice::Entity::find_by_id(notice_id)
        .filter(hall_notice::Column::Published.eq(true))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Notice", notice_id))?;
    Ok(Json(ApiResponse::success(
        NoticeResponse::from(notice),
        "Notice retrieved successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/notices",
    tag = "notices",
    request_body = CreateNoticeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Notice created successfully", body = ApiResponse<NoticeResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn create_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Valid(Json(request)): Valid<Json<CreateNoticeRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<NoticeResponse>>)> {
    auth.require_any(&Role::NOTICE_BOARD)?;

    let now = Utc::now().naive_utc();
    let created = hall_notice::ActiveModel {
        title: Set(request.title),
        description: Set(request.description),
        hall_name: Set(request.hall_name),
        priority: Set(request
            .priority
            .as_deref()
            .map(normalize_priority)
            .unwrap_or_else(|| DEFAULT_NOTICE_PRIORITY.to_string())),
        published: Set(request.published.unwrap_or(true)),
        attachment_url: Set(request.attachment_url),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Notice {} posted for {} by user {}", created.id, created.hall_name, auth.id());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            NoticeResponse::from(created),
            "Notice created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/notices/{notice_id}",
    tag = "notices",
    params(("notice_id" = i32, Path, description = "Notice ID")),
    request_body = UpdateNoticeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notice updated successfully", body = ApiResponse<NoticeResponse>),
        (status = 404, description = "Notice not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn update_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notice_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateNoticeRequest>>,
) -> AppResult<Json<ApiResponse<NoticeResponse>>> {
    auth.require_any(&Role::NOTICE_BOARD)?;
    let existing = hall_notice::Entity::find_by_id(notice_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Notice", notice_id))?;

    let mut active: hall_notice::ActiveModel = existing.into();
    if let Some(title) = request.title {
        active.title = Set(title);
    }
    if let Some(description) = request.description {
        active.description = Set(description);
    }
    if let Some(hall_name) = request.hall_name {
        active.hall_name = Set(hall_name);
    }
    if let Some(priority) = request.priority.as_deref() {
        active.priority = Set(normalize_priority(priority));
    }
    if let Some(published) = request.published {
        active.published = Set(published);
    }
    if let Some(url) = request.attachment_url {
        active.attachment_url = Set(Some(url));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&state.db).await?;
    Ok(Json(ApiResponse::success(
        NoticeResponse::from(updated),
        "Notice updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/notices/{notice_id}",
    tag = "notices",
    params(("notice_id" = i32, Path, description = "Notice ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Notice deleted"),
        (status = 404, description = "Notice not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn delete_notice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notice_id): Path<i32>,
) -> AppResult<StatusCode> {
    auth.require_any(&Role::NOTICE_BOARD)?;
    let result = hall_notice::Entity::delete_by_id(notice_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Notice", notice_id));
    }
    info!("Notice {} deleted", notice_id);
    Ok(StatusCode::NO_CONTENT)
}
