use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::users::find_user;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDateTime, Utc};
use model::entities::{
    complaint::{self, ComplaintPriority, ComplaintStatus},
    complaint_note,
    user::{self, Role},
};
use model::parse_active_enum;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    /// Free-form category, e.g. `Maintenance`
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    /// Defaults to `MEDIUM`
    pub priority: Option<ComplaintPriority>,
}

/// Status change, optionally with a timeline note and a response to the owner
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateComplaintStatusRequest {
    pub status: ComplaintStatus,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
    #[validate(length(max = 2000))]
    pub admin_response: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct AddNoteRequest {
    #[validate(length(min = 1, max = 1000))]
    pub note: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ComplaintListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    /// Only honoured for complaint desk roles
    pub user_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplaintNoteResponse {
    pub id: i32,
    pub note: String,
    pub author_id: i32,
    pub author_name: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Complaint response model. `notes` is only filled for single-complaint responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    pub user_id: i32,
    pub user_name: Option<String>,
    pub admin_response: Option<String>,
    pub responded_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub resolved_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Vec<ComplaintNoteResponse>,
}

impl ComplaintResponse {
    fn new(model: complaint::Model, user_name: Option<String>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            category: model.category,
            priority: model.priority,
            status: model.status,
            user_id: model.user_id,
            user_name,
            admin_response: model.admin_response,
            responded_by: model.responded_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            resolved_at: model.resolved_at,
            notes: Vec::new(),
        }
    }
}

async fn user_names<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> AppResult<HashMap<i32, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let users = user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(users.into_iter().map(|u| (u.id, u.name)).collect())
}

async fn to_responses(
    db: &DatabaseConnection,
    complaints: Vec<complaint::Model>,
) -> AppResult<Vec<ComplaintResponse>> {
    let names = user_names(db, complaints.iter().map(|c| c.user_id).collect()).await?;
    Ok(complaints
        .into_iter()
        .map(|c| {
            let name = names.get(&c.user_id).cloned();
            ComplaintResponse::new(c, name)
        })
        .collect())
}

/// Full view of one complaint: owner name and the note timeline, oldest first.
async fn complaint_detail<C: ConnectionTrait>(
    db: &C,
    complaint: complaint::Model,
) -> AppResult<ComplaintResponse> {
    let notes = complaint_note::Entity::find()
        .filter(complaint_note::Column::ComplaintId.eq(complaint.id))
        .order_by_asc(complaint_note::Column::CreatedAt)
        .order_by_asc(complaint_note::Column::Id)
        .all(db)
        .await?;

    let mut ids: Vec<i32> = notes.iter().map(|n| n.author_id).collect();
    ids.push(complaint.user_id);
    ids.sort_unstable();
    ids.dedup();
    let names = user_names(db, ids).await?;

    let owner = names.get(&complaint.user_id).cloned();
    let mut response = ComplaintResponse::new(complaint, owner);
    response.notes = notes
        .into_iter()
        .map(|n| ComplaintNoteResponse {
            author_name: names.get(&n.author_id).cloned(),
            id: n.id,
            note: n.note,
            author_id: n.author_id,
            created_at: n.created_at,
        })
        .collect();
    Ok(response)
}

async fn find_complaint<C: ConnectionTrait>(db: &C, complaint_id: i32) -> AppResult<complaint::Model> {
    complaint::Entity::find_by_id(complaint_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Complaint", complaint_id))
}

/// Owners see their own complaints; the complaint desk sees all of them.
fn ensure_can_view(auth: &AuthUser, complaint: &complaint::Model) -> AppResult<()> {
    if complaint.is_owned_by(auth.id()) || auth.has_any_role(&Role::COMPLAINT_DESK) {
        Ok(())
    } else {
        warn!(user_id = auth.id(), complaint_id = complaint.id, "Complaint access denied");
        Err(AppError::Forbidden(
            "You are not allowed to access this complaint".to_string(),
        ))
    }
}

async fn insert_note<C: ConnectionTrait>(
    db: &C,
    complaint_id: i32,
    author_id: i32,
    note: String,
    created_at: NaiveDateTime,
) -> AppResult<complaint_note::Model> {
    Ok(complaint_note::ActiveModel {
        complaint_id: Set(complaint_id),
        note: Set(note),
        author_id: Set(author_id),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

fn newest_first(select: Select<complaint::Entity>) -> Select<complaint::Entity> {
    select
        .order_by_desc(complaint::Column::CreatedAt)
        .order_by_desc(complaint::Column::Id)
}

fn parse_status(raw: &str) -> AppResult<ComplaintStatus> {
    parse_active_enum(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown complaint status: {}", raw)))
}

fn parse_priority(raw: &str) -> AppResult<ComplaintPriority> {
    parse_active_enum(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown complaint priority: {}", raw)))
}

/// File a complaint as the current user
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    tag = "complaints",
    request_body = CreateComplaintRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Complaint created successfully", body = ApiResponse<ComplaintResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn create_complaint(
    State(state): State<AppState>,
    auth: AuthUser,
    Valid(Json(request)): Valid<Json<CreateComplaintRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<ComplaintResponse>>)> {
    let title = request.title.trim();
    let description = request.description.trim();
    let category = request.category.trim();
    if title.is_empty() || description.is_empty() || category.is_empty() {
        return Err(AppError::Validation(
            "Title, description and category must not be blank".to_string(),
        ));
    }

    let created = complaint::ActiveModel {
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        category: Set(category.to_string()),
        priority: Set(request.priority.unwrap_or(ComplaintPriority::Medium)),
        status: Set(ComplaintStatus::Open),
        user_id: Set(auth.id()),
        admin_response: Set(None),
        responded_by: Set(None),
        created_at: Set(Utc::now().naive_utc()),
        updated_at: Set(None),
        resolved_at: Set(None),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Complaint {} filed by user {}", created.id, auth.id());
    let response = ComplaintResponse::new(created, Some(auth.0.name.clone()));
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(response, "Complaint created successfully")),
    ))
}

/// List complaints visible to the caller
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    tag = "complaints",
    params(ComplaintListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Complaints retrieved successfully", body = ApiResponse<Vec<ComplaintResponse>>),
        (status = 400, description = "Unknown status or priority filter", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_complaints(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ComplaintListQuery>,
) -> AppResult<Json<ApiResponse<Vec<ComplaintResponse>>>> {
    let mut select = complaint::Entity::find();

    if auth.has_any_role(&Role::COMPLAINT_DESK) {
        if let Some(user_id) = query.user_id {
            select = select.filter(complaint::Column::UserId.eq(user_id));
        }
    } else {
        select = select.filter(complaint::Column::UserId.eq(auth.id()));
    }
    if let Some(status) = query.status.as_deref() {
        select = select.filter(complaint::Column::Status.eq(parse_status(status)?));
    }
    if let Some(priority) = query.priority.as_deref() {
        select = select.filter(complaint::Column::Priority.eq(parse_priority(priority)?));
    }
    if let Some(category) = query.category.as_deref() {
        select = select.filter(complaint::Column::Category.eq(category));
    }

    let complaints = newest_first(select).all(&state.db).await?;
    debug!("Retrieved {} complaints for user {}", complaints.len(), auth.id());
    Ok(Json(ApiResponse::success(
        to_responses(&state.db, complaints).await?,
        "Complaints retrieved successfully",
    )))
}

/// The caller's own complaints, newest first
#[utoipa::path(
    get,
    path = "/api/v1/complaints/my",
    tag = "complaints",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Complaints retrieved successfully", body = ApiResponse<Vec<ComplaintResponse>>)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_my_complaints(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<ComplaintResponse>>>> {
    let complaints = newest_first(
        complaint::Entity::find().filter(complaint::Column::UserId.eq(auth.id())),
    )
    .all(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(
        to_responses(&state.db, complaints).await?,
        "Complaints retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/complaints/{complaint_id}",
    tag = "complaints",
    params(("complaint_id" = i32, Path, description = "Complaint ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Complaint retrieved successfully", body = ApiResponse<ComplaintResponse>),
        (status = 403, description = "Not the owner and not complaint desk staff", body = ErrorResponse),
        (status = 404, description = "Complaint not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_complaint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(complaint_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ComplaintResponse>>> {
    let complaint = find_complaint(&state.db, complaint_id).await?;
    ensure_can_view(&auth, &complaint)?;
    Ok(Json(ApiResponse::success(
        complaint_detail(&state.db, complaint).await?,
        "Complaint retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/complaints/user/{user_id}",
    tag = "complaints",
    params(("user_id" = i32, Path, description = "Owner's user ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Complaints retrieved successfully", body = ApiResponse<Vec<ComplaintResponse>>),
        (status = 403, description = "Not permitted", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_complaints_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<ComplaintResponse>>>> {
    if auth.id() != user_id {
        auth.require_any(&Role::COMPLAINT_DESK)?;
        find_user(&state.db, user_id).await?;
    }
    let complaints = newest_first(
        complaint::Entity::find().filter(complaint::Column::UserId.eq(user_id)),
    )
    .all(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(
        to_responses(&state.db, complaints).await?,
        "Complaints retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/complaints/status/{status}",
    tag = "complaints",
    params(("status" = String, Path, description = "Complaint status")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Complaints retrieved successfully", body = ApiResponse<Vec<ComplaintResponse>>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_complaints_by_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(status): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<ComplaintResponse>>>> {
    auth.require_any(&Role::COMPLAINT_DESK)?;
    let status = parse_status(&status)?;
    let complaints = newest_first(
        complaint::Entity::find().filter(complaint::Column::Status.eq(status)),
    )
    .all(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(
        to_responses(&state.db, complaints).await?,
        "Complaints retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/complaints/category/{category}",
    tag = "complaints",
    params(("category" = String, Path, description = "Complaint category")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Complaints retrieved successfully", body = ApiResponse<Vec<ComplaintResponse>>),
        (status = 403, description = "Not permitted", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_complaints_by_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<ComplaintResponse>>>> {
    auth.require_any(&Role::COMPLAINT_DESK)?;
    let complaints = newest_first(
        complaint::Entity::find().filter(complaint::Column::Category.eq(category)),
    )
    .all(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(
        to_responses(&state.db, complaints).await?,
        "Complaints retrieved successfully",
    )))
}

/// Move a complaint to any status
///
/// There is no transition graph: the complaint desk may set any status from
/// any status, and the last write wins. The optional note and admin response
/// are recorded on the timeline in the same transaction.
#[utoipa::path(
    put,
    path = "/api/v1/complaints/{complaint_id}/status",
    tag = "complaints",
    params(("complaint_id" = i32, Path, description = "Complaint ID")),
    request_body = UpdateComplaintStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ComplaintResponse>),
        (status = 403, description = "Not permitted", body = ErrorResponse),
        (status = 404, description = "Complaint not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn update_complaint_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(complaint_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateComplaintStatusRequest>>,
) -> AppResult<Json<ApiResponse<ComplaintResponse>>> {
    auth.require_any(&Role::COMPLAINT_DESK)?;

    let txn = state.db.begin().await?;
    let existing = find_complaint(&txn, complaint_id).await?;
    let previous = existing.status;
    let now = Utc::now().naive_utc();

    let mut active: complaint::ActiveModel = existing.clone().into();
    active.status = Set(request.status);
    active.updated_at = Set(Some(now));
    active.resolved_at = Set(existing.resolved_at_after(request.status, now));

    let response = request
        .admin_response
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    if let Some(response) = response {
        active.admin_response = Set(Some(response.to_string()));
        active.responded_by = Set(Some(auth.id()));
    }
    let updated = active.update(&txn).await?;

    if let Some(note) = request.note.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        let text = complaint::status_change_note(request.status, note);
        insert_note(&txn, complaint_id, auth.id(), text, now).await?;
    }
    if let Some(response) = response {
        let text = complaint::admin_response_note(response);
        insert_note(&txn, complaint_id, auth.id(), text, now).await?;
    }

    let detail = complaint_detail(&txn, updated).await?;
    txn.commit().await?;

    info!(
        "Complaint {} moved from {:?} to {:?} by user {}",
        complaint_id, previous, request.status, auth.id()
    );
    Ok(Json(ApiResponse::success(detail, "Complaint status updated successfully")))
}

/// Append a note to the complaint timeline
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{complaint_id}/notes",
    tag = "complaints",
    params(("complaint_id" = i32, Path, description = "Complaint ID")),
    request_body = AddNoteRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Note added", body = ApiResponse<ComplaintResponse>),
        (status = 400, description = "Blank note", body = ErrorResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse),
        (status = 404, description = "Complaint not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn add_complaint_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(complaint_id): Path<i32>,
    Valid(Json(request)): Valid<Json<AddNoteRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<ComplaintResponse>>)> {
    let note = request.note.trim();
    if note.is_empty() {
        return Err(AppError::Validation("Note must not be blank".to_string()));
    }

    let txn = state.db.begin().await?;
    let complaint = find_complaint(&txn, complaint_id).await?;
    ensure_can_view(&auth, &complaint)?;

    let now = Utc::now().naive_utc();
    insert_note(&txn, complaint_id, auth.id(), note.to_string(), now).await?;

    let mut active: complaint::ActiveModel = complaint.into();
    active.updated_at = Set(Some(now));
    let updated = active.update(&txn).await?;

    let detail = complaint_detail(&txn, updated).await?;
    txn.commit().await?;

    debug!("Note added to complaint {} by user {}", complaint_id, auth.id());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(detail, "Note added successfully")),
    ))
}

/// Delete a complaint together with its notes
#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{complaint_id}",
    tag = "complaints",
    params(("complaint_id" = i32, Path, description = "Complaint ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Complaint deleted"),
        (status = 403, description = "Neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "Complaint not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn delete_complaint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(complaint_id): Path<i32>,
) -> AppResult<StatusCode> {
    let complaint = find_complaint(&state.db, complaint_id).await?;
    if !complaint.is_owned_by(auth.id()) {
        auth.require_admin()?;
    }

    let txn = state.db.begin().await?;
    complaint_note::Entity::delete_many()
        .filter(complaint_note::Column::ComplaintId.eq(complaint_id))
        .exec(&txn)
        .await?;
    complaint::Entity::delete_by_id(complaint_id).exec(&txn).await?;
    txn.commit().await?;
    info!("Complaint {} deleted by user {}", complaint_id, auth.id());
    Ok(StatusCode::NO_CONTENT)
}
