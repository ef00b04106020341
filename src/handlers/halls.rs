use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, HALL_STATISTICS_KEY};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDateTime, Utc};
use common::{HallStatistics, HallTypeSummary};
use model::entities::hall::{self, HallType};
use model::parse_active_enum;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating a hall
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateHallRequest {
    /// Short unique code, e.g. `SPH`
    #[validate(length(min = 1, max = 20))]
    pub hall_code: String,
    #[validate(length(min = 1, max = 100))]
    pub hall_name: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub hall_short_name: Option<String>,
    pub hall_type: HallType,
    #[validate(range(min = 1))]
    pub capacity: i32,
    /// Defaults to 0
    pub current_occupancy: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub provost: String,
    #[validate(length(min = 1, max = 100))]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 200))]
    pub office_location: String,
    #[validate(length(min = 1, max = 100))]
    pub office_hours: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Comma-separated list, e.g. `Wi-Fi, Library, Gym`
    pub facilities: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

/// Request body for updating a hall. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateHallRequest {
    #[validate(length(min = 1, max = 20))]
    pub hall_code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub hall_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    pub hall_short_name: Option<String>,
    pub hall_type: Option<HallType>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub current_occupancy: Option<i32>,
    pub provost: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub office_location: Option<String>,
    pub office_hours: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub facilities: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateOccupancyRequest {
    pub current_occupancy: i32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HallListQuery {
    /// Only list halls that have not been deleted
    pub active_only: Option<bool>,
    /// `MALE` or `FEMALE`
    pub hall_type: Option<String>,
}

/// Hall response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HallResponse {
    pub id: i32,
    pub hall_code: String,
    pub hall_name: String,
    pub full_name: String,
    pub hall_short_name: Option<String>,
    pub hall_type: HallType,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub available_seats: i32,
    pub provost: String,
    pub email: String,
    pub phone: String,
    pub office_location: String,
    pub office_hours: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub facilities: Vec<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<hall::Model> for HallResponse {
    fn from(model: hall::Model) -> Self {
        Self {
            available_seats: model.available_seats(),
            facilities: model.facility_list(),
            id: model.id,
            hall_code: model.hall_code,
            hall_name: model.hall_name,
            full_name: model.full_name,
            hall_short_name: model.hall_short_name,
            hall_type: model.hall_type,
            capacity: model.capacity,
            current_occupancy: model.current_occupancy,
            provost: model.provost,
            email: model.email,
            phone: model.phone,
            office_location: model.office_location,
            office_hours: model.office_hours,
            description: model.description,
            image_url: model.image_url,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn to_responses(halls: Vec<hall::Model>) -> Vec<HallResponse> {
    halls.into_iter().map(HallResponse::from).collect()
}

fn parse_hall_type(raw: &str) -> AppResult<HallType> {
    parse_active_enum(raw).ok_or_else(|| AppError::BadRequest(format!("Unknown hall type: {}", raw)))
}

pub(crate) async fn find_hall(db: &DatabaseConnection, hall_id: i32) -> AppResult<hall::Model> {
    hall::Entity::find_by_id(hall_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Hall", hall_id))
}

async fn find_hall_by(
    db: &DatabaseConnection,
    column: hall::Column,
    value: &str,
    what: &str,
) -> AppResult<hall::Model> {
    hall::Entity::find()
        .filter(column.eq(value))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hall not found with {}: {}", what, value)))
}

async fn ensure_unique(
    db: &DatabaseConnection,
    column: hall::Column,
    value: &str,
    what: &str,
) -> AppResult<()> {
    let taken = hall::Entity::find().filter(column.eq(value)).one(db).await?;
    if taken.is_some() {
        warn!("Hall {} already exists: {}", what, value);
        return Err(AppError::Conflict(format!("Hall {} already exists: {}", what, value)));
    }
    Ok(())
}

async fn invalidate_statistics(state: &AppState) {
    trace!("Invalidating cached hall statistics");
    state.statistics_generation.fetch_add(1, Ordering::SeqCst);
    state.cache.invalidate(HALL_STATISTICS_KEY).await;
}

/// Caches statistics computed under generation `seen`. A hall write that
/// lands while they were computed wins, and the entry is dropped again.
async fn cache_statistics(state: &AppState, seen: u64, stats: &HallStatistics) -> bool {
    if state.statistics_generation.load(Ordering::SeqCst) != seen {
        debug!("Hall statistics outdated by a concurrent write, not caching");
        return false;
    }
    state
        .cache
        .insert(
            HALL_STATISTICS_KEY.to_string(),
            CachedData::HallStatistics(stats.clone()),
        )
        .await;
    if state.statistics_generation.load(Ordering::SeqCst) != seen {
        state.cache.invalidate(HALL_STATISTICS_KEY).await;
        return false;
    }
    true
}

#[derive(Debug, FromQueryResult)]
struct HallTypeRow {
    hall_type: String,
    hall_count: i64,
    total_capacity: Option<i64>,
    total_occupancy: Option<i64>,
}

/// Capacity figures across active halls, served from the cache when fresh.
pub(crate) async fn hall_statistics(state: &AppState) -> AppResult<HallStatistics> {
    if let Some(CachedData::HallStatistics(stats)) = state.cache.get(HALL_STATISTICS_KEY).await {
        debug!("Hall statistics served from cache");
        return Ok(stats);
    }

    let seen = state.statistics_generation.load(Ordering::SeqCst);
    let rows = hall::Entity::find()
        .filter(hall::Column::IsActive.eq(true))
        .select_only()
        .column(hall::Column::HallType)
        .column_as(hall::Column::Id.count(), "hall_count")
        .column_as(hall::Column::Capacity.sum(), "total_capacity")
        .column_as(hall::Column::CurrentOccupancy.sum(), "total_occupancy")
        .group_by(hall::Column::HallType)
        .into_model::<HallTypeRow>()
        .all(&state.db)
        .await?;

    let stats = HallStatistics::from_summaries(
        rows.into_iter()
            .map(|row| HallTypeSummary {
                hall_type: row.hall_type,
                hall_count: row.hall_count.max(0) as u64,
                total_capacity: row.total_capacity.unwrap_or(0),
                total_occupancy: row.total_occupancy.unwrap_or(0),
            })
            .collect(),
    );

    if cache_statistics(state, seen, &stats).await {
        debug!("Hall statistics computed and cached");
    }
    Ok(stats)
}

/// List halls
#[utoipa::path(
    get,
    path = "/api/v1/halls",
    tag = "halls",
    params(HallListQuery),
    responses(
        (status = 200, description = "Halls retrieved successfully", body = ApiResponse<Vec<HallResponse>>),
        (status = 400, description = "Unknown hall type", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_halls(
    State(state): State<AppState>,
    Query(query): Query<HallListQuery>,
) -> AppResult<Json<ApiResponse<Vec<HallResponse>>>> {
    let mut select = hall::Entity::find();
    if query.active_only.unwrap_or(false) {
        select = select.filter(hall::Column::IsActive.eq(true));
    }
    if let Some(hall_type) = query.hall_type.as_deref() {
        select = select.filter(hall::Column::HallType.eq(parse_hall_type(hall_type)?));
    }
    let halls = select.order_by_asc(hall::Column::HallName).all(&state.db).await?;
    debug!("Retrieved {} halls", halls.len());
    Ok(Json(ApiResponse::success(to_responses(halls), "Halls retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/active",
    tag = "halls",
    responses(
        (status = 200, description = "Active halls retrieved successfully", body = ApiResponse<Vec<HallResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_active_halls(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<HallResponse>>>> {
    let halls = hall::Entity::find()
        .filter(hall::Column::IsActive.eq(true))
        .order_by_asc(hall::Column::HallName)
        .all(&state.db)
        .await?;
    Ok(Json(ApiResponse::success(
        to_responses(halls),
        "Active halls retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/{hall_id}",
    tag = "halls",
    params(("hall_id" = i32, Path, description = "Hall ID")),
    responses(
        (status = 200, description = "Hall retrieved successfully", body = ApiResponse<HallResponse>),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_hall(
    State(state): State<AppState>,
    Path(hall_id): Path<i32>,
) -> AppResult<Json<ApiResponse<HallResponse>>> {
    let hall = find_hall(&state.db, hall_id).await?;
    Ok(Json(ApiResponse::success(HallResponse::from(hall), "Hall retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/code/{hall_code}",
    tag = "halls",
    params(("hall_code" = String, Path, description = "Hall code")),
    responses(
        (status = 200, description = "Hall retrieved successfully", body = ApiResponse<HallResponse>),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_hall_by_code(
    State(state): State<AppState>,
    Path(hall_code): Path<String>,
) -> AppResult<Json<ApiResponse<HallResponse>>> {
    let hall = find_hall_by(&state.db, hall::Column::HallCode, &hall_code, "code").await?;
    Ok(Json(ApiResponse::success(HallResponse::from(hall), "Hall retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/name/{hall_name}",
    tag = "halls",
    params(("hall_name" = String, Path, description = "Hall name")),
    responses(
        (status = 200, description = "Hall retrieved successfully", body = ApiResponse<HallResponse>),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_hall_by_name(
    State(state): State<AppState>,
    Path(hall_name): Path<String>,
) -> AppResult<Json<ApiResponse<HallResponse>>> {
    let hall = find_hall_by(&state.db, hall::Column::HallName, &hall_name, "name").await?;
    Ok(Json(ApiResponse::success(HallResponse::from(hall), "Hall retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/full-name/{full_name}",
    tag = "halls",
    params(("full_name" = String, Path, description = "Full hall name")),
    responses(
        (status = 200, description = "Hall retrieved successfully", body = ApiResponse<HallResponse>),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_hall_by_full_name(
    State(state): State<AppState>,
    Path(full_name): Path<String>,
) -> AppResult<Json<ApiResponse<HallResponse>>> {
    let hall = find_hall_by(&state.db, hall::Column::FullName, &full_name, "full name").await?;
    Ok(Json(ApiResponse::success(HallResponse::from(hall), "Hall retrieved successfully")))
}

/// Active halls of one type
#[utoipa::path(
    get,
    path = "/api/v1/halls/type/{hall_type}",
    tag = "halls",
    params(("hall_type" = String, Path, description = "MALE or FEMALE")),
    responses(
        (status = 200, description = "Halls retrieved successfully", body = ApiResponse<Vec<HallResponse>>),
        (status = 400, description = "Unknown hall type", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_halls_by_type(
    State(state): State<AppState>,
    Path(hall_type): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<HallResponse>>>> {
    let hall_type = parse_hall_type(&hall_type)?;
    let halls = hall::Entity::find()
        .filter(hall::Column::HallType.eq(hall_type))
        .filter(hall::Column::IsActive.eq(true))
        .order_by_asc(hall::Column::HallName)
        .all(&state.db)
        .await?;
    Ok(Json(ApiResponse::success(to_responses(halls), "Halls retrieved successfully")))
}

/// Create a hall
#[utoipa::path(
    post,
    path = "/api/v1/halls",
    tag = "halls",
    request_body = CreateHallRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Hall created successfully", body = ApiResponse<HallResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Hall code or name already exists", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn create_hall(
    State(state): State<AppState>,
    auth: AuthUser,
    Valid(Json(request)): Valid<Json<CreateHallRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<HallResponse>>)> {
    auth.require_admin()?;
    debug!("Creating hall {} ({})", request.hall_name, request.hall_code);

    ensure_unique(&state.db, hall::Column::HallCode, &request.hall_code, "code").await?;
    ensure_unique(&state.db, hall::Column::HallName, &request.hall_name, "name").await?;

    let occupancy = request.current_occupancy.unwrap_or(0);
    hall::check_occupancy(request.capacity, occupancy)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let now = Utc::now().naive_utc();
    let created = hall::ActiveModel {
        hall_code: Set(request.hall_code),
        hall_name: Set(request.hall_name),
        full_name: Set(request.full_name),
        hall_short_name: Set(request.hall_short_name),
        hall_type: Set(request.hall_type),
        capacity: Set(request.capacity),
        current_occupancy: Set(occupancy),
        provost: Set(request.provost),
        email: Set(request.email),
        phone: Set(request.phone),
        office_location: Set(request.office_location),
        office_hours: Set(request.office_hours),
        description: Set(request.description),
        image_url: Set(request.image_url),
        facilities: Set(request.facilities),
        is_active: Set(request.is_active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    invalidate_statistics(&state).await;
    info!("Hall created successfully with ID: {}, code: {}", created.id, created.hall_code);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(HallResponse::from(created), "Hall created successfully")),
    ))
}

/// Update a hall
#[utoipa::path(
    put,
    path = "/api/v1/halls/{hall_id}",
    tag = "halls",
    params(("hall_id" = i32, Path, description = "Hall ID")),
    request_body = UpdateHallRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Hall updated successfully", body = ApiResponse<HallResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Hall not found", body = ErrorResponse),
        (status = 409, description = "Hall code or name already exists", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn update_hall(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hall_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateHallRequest>>,
) -> AppResult<Json<ApiResponse<HallResponse>>> {
    auth.require_admin()?;
    let existing = find_hall(&state.db, hall_id).await?;

    if let Some(code) = request.hall_code.as_deref() {
        if code != existing.hall_code {
            ensure_unique(&state.db, hall::Column::HallCode, code, "code").await?;
        }
    }
    if let Some(name) = request.hall_name.as_deref() {
        if name != existing.hall_name {
            ensure_unique(&state.db, hall::Column::HallName, name, "name").await?;
        }
    }

    // Capacity and occupancy are checked together against the resulting row.
    let capacity = request.capacity.unwrap_or(existing.capacity);
    let occupancy = request.current_occupancy.unwrap_or(existing.current_occupancy);
    hall::check_occupancy(capacity, occupancy).map_err(|e| AppError::Validation(e.to_string()))?;

    let mut active: hall::ActiveModel = existing.into();
    if let Some(code) = request.hall_code {
        active.hall_code = Set(code);
    }
    if let Some(name) = request.hall_name {
        active.hall_name = Set(name);
    }
    if let Some(full_name) = request.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(short_name) = request.hall_short_name {
        active.hall_short_name = Set(Some(short_name));
    }
    if let Some(hall_type) = request.hall_type {
        active.hall_type = Set(hall_type);
    }
    if let Some(capacity) = request.capacity {
        active.capacity = Set(capacity);
    }
    if request.current_occupancy.is_some() {
        active.current_occupancy = Set(occupancy);
    }
    if let Some(provost) = request.provost {
        active.provost = Set(provost);
    }
    if let Some(email) = request.email {
        active.email = Set(email);
    }
    if let Some(phone) = request.phone {
        active.phone = Set(phone);
    }
    if let Some(location) = request.office_location {
        active.office_location = Set(location);
    }
    if let Some(hours) = request.office_hours {
        active.office_hours = Set(hours);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(image_url) = request.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(facilities) = request.facilities {
        active.facilities = Set(Some(facilities));
    }
    if let Some(is_active) = request.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&state.db).await?;
    invalidate_statistics(&state).await;
    info!("Hall {} updated", updated.id);
    Ok(Json(ApiResponse::success(HallResponse::from(updated), "Hall updated successfully")))
}

/// Deactivate a hall. The row is kept so historic meals still resolve.
#[utoipa::path(
    delete,
    path = "/api/v1/halls/{hall_id}",
    tag = "halls",
    params(("hall_id" = i32, Path, description = "Hall ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Hall deactivated"),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn delete_hall(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hall_id): Path<i32>,
) -> AppResult<StatusCode> {
    auth.require_admin()?;
    let existing = find_hall(&state.db, hall_id).await?;
    let mut active: hall::ActiveModel = existing.into();
    active.is_active = Set(false);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&state.db).await?;

    invalidate_statistics(&state).await;
    info!("Hall {} deactivated", hall_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Set the number of residents
#[utoipa::path(
    put,
    path = "/api/v1/halls/{hall_id}/occupancy",
    tag = "halls",
    params(("hall_id" = i32, Path, description = "Hall ID")),
    request_body = UpdateOccupancyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Occupancy updated", body = ApiResponse<HallResponse>),
        (status = 400, description = "Occupancy negative or above capacity", body = ErrorResponse),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn update_occupancy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(hall_id): Path<i32>,
    Json(request): Json<UpdateOccupancyRequest>,
) -> AppResult<Json<ApiResponse<HallResponse>>> {
    auth.require_admin()?;
    let existing = find_hall(&state.db, hall_id).await?;
    existing
        .check_occupancy(request.current_occupancy)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut active: hall::ActiveModel = existing.into();
    active.current_occupancy = Set(request.current_occupancy);
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = active.update(&state.db).await?;

    invalidate_statistics(&state).await;
    info!("Hall {} occupancy set to {}", hall_id, updated.current_occupancy);
    Ok(Json(ApiResponse::success(
        HallResponse::from(updated),
        "Occupancy updated successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/statistics/capacity",
    tag = "halls",
    responses(
        (status = 200, description = "Total capacity of active halls", body = ApiResponse<i64>)
    )
)]
#[instrument(skip(state))]
pub async fn get_total_capacity(State(state): State<AppState>) -> AppResult<Json<ApiResponse<i64>>> {
    let stats = hall_statistics(&state).await?;
    Ok(Json(ApiResponse::success(stats.total_capacity, "Total capacity retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/statistics/occupancy",
    tag = "halls",
    responses(
        (status = 200, description = "Total occupancy of active halls", body = ApiResponse<i64>)
    )
)]
#[instrument(skip(state))]
pub async fn get_total_occupancy(State(state): State<AppState>) -> AppResult<Json<ApiResponse<i64>>> {
    let stats = hall_statistics(&state).await?;
    Ok(Json(ApiResponse::success(
        stats.total_occupancy,
        "Total occupancy retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/halls/statistics/available",
    tag = "halls",
    responses(
        (status = 200, description = "Free seats across active halls", body = ApiResponse<i64>)
    )
)]
#[instrument(skip(state))]
pub async fn get_available_seats(State(state): State<AppState>) -> AppResult<Json<ApiResponse<i64>>> {
    let stats = hall_statistics(&state).await?;
    Ok(Json(ApiResponse::success(
        stats.available_seats,
        "Available seats retrieved successfully",
    )))
}

/// Per-type breakdown plus overall totals
#[utoipa::path(
    get,
    path = "/api/v1/halls/statistics/summary",
    tag = "halls",
    responses(
        (status = 200, description = "Hall statistics summary", body = ApiResponse<HallStatistics>)
    )
)]
#[instrument(skip(state))]
pub async fn get_hall_summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<HallStatistics>>> {
    let stats = hall_statistics(&state).await?;
    Ok(Json(ApiResponse::success(stats, "Hall summary retrieved successfully")))
}
