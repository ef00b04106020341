use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::halls::find_hall;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use model::entities::{
    hall,
    meal::{self, MealType},
    user::Role,
};
use model::parse_active_enum;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateMealRequest {
    pub hall_id: i32,
    pub meal_type: MealType,
    #[validate(length(min = 1, max = 100))]
    pub meal_name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Non-negative price, as a decimal string
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
    /// Defaults to now
    pub meal_date: Option<NaiveDateTime>,
    /// Defaults to true
    pub is_available: Option<bool>,
}

/// Partial meal update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateMealRequest {
    pub hall_id: Option<i32>,
    pub meal_type: Option<MealType>,
    #[validate(length(min = 1, max = 100))]
    pub meal_name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub meal_date: Option<NaiveDateTime>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MealListQuery {
    pub hall_id: Option<i32>,
    /// `BREAKFAST`, `LUNCH` or `DINNER`
    pub meal_type: Option<String>,
    pub available: Option<bool>,
}

/// Inclusive date range
#[derive(Debug, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    /// First day (YYYY-MM-DD)
    pub start: NaiveDate,
    /// Last day (YYYY-MM-DD)
    pub end: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MealResponse {
    pub id: i32,
    pub hall_id: i32,
    pub hall_name: Option<String>,
    pub hall_code: Option<String>,
    pub meal_type: MealType,
    pub meal_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub meal_date: NaiveDateTime,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MealResponse {
    fn new(model: meal::Model, hall: Option<&hall::Model>) -> Self {
        Self {
            id: model.id,
            hall_id: model.hall_id,
            hall_name: hall.map(|h| h.hall_name.clone()),
            hall_code: hall.map(|h| h.hall_code.clone()),
            meal_type: model.meal_type,
            meal_name: model.meal_name,
            description: model.description,
            price: model.price,
            quantity: model.quantity,
            meal_date: model.meal_date,
            is_available: model.is_available,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Start of `day` and start of the following day. The last representable
/// date has no following day, so its range is left open.
fn day_bounds(day: NaiveDate) -> (NaiveDateTime, Option<NaiveDateTime>) {
    let start = day.and_time(NaiveTime::MIN);
    let end = day.succ_opt().map(|next| next.and_time(NaiveTime::MIN));
    (start, end)
}

fn parse_meal_type(raw: &str) -> AppResult<MealType> {
    parse_active_enum(raw).ok_or_else(|| AppError::BadRequest(format!("Unknown meal type: {}", raw)))
}

fn ensure_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation("Price cannot be negative".to_string()));
    }
    Ok(())
}

async fn load_meals(
    db: &DatabaseConnection,
    select: Select<meal::Entity>,
) -> AppResult<Vec<MealResponse>> {
    let rows = select.find_also_related(hall::Entity).all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(meal, hall)| MealResponse::new(meal, hall.as_ref()))
        .collect())
}

fn newest_first(select: Select<meal::Entity>) -> Select<meal::Entity> {
    select
        .order_by_desc(meal::Column::MealDate)
        .order_by_desc(meal::Column::Id)
}

/// Sorts a day's meals in serving order: breakfast, lunch, dinner.
fn in_serving_order(mut meals: Vec<MealResponse>) -> Vec<MealResponse> {
    meals.sort_by_key(|m| (m.meal_type.serving_order(), m.id));
    meals
}

async fn todays_meals(db: &DatabaseConnection, hall_id: Option<i32>) -> AppResult<Vec<MealResponse>> {
    let (start, end) = day_bounds(Utc::now().date_naive());
    let mut select = meal::Entity::find().filter(meal::Column::MealDate.gte(start));
    if let Some(end) = end {
        select = select.filter(meal::Column::MealDate.lt(end));
    }
    if let Some(hall_id) = hall_id {
        select = select.filter(meal::Column::HallId.eq(hall_id));
    }
    Ok(in_serving_order(load_meals(db, select).await?))
}

async fn hall_must_exist_for_write(db: &DatabaseConnection, hall_id: i32) -> AppResult<()> {
    if hall::Entity::find_by_id(hall_id).one(db).await?.is_none() {
        warn!("Meal references unknown hall {}", hall_id);
        return Err(AppError::BadRequest(format!("Hall not found with id: {}", hall_id)));
    }
    Ok(())
}

/// List meals
#[utoipa::path(
    get,
    path = "/api/v1/meals",
    tag = "meals",
    params(MealListQuery),
    responses(
        (status = 200, description = "Meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>),
        (status = 400, description = "Unknown meal type", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_meals(
    State(state): State<AppState>,
    Query(query): Query<MealListQuery>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    let mut select = meal::Entity::find();
    if let Some(hall_id) = query.hall_id {
        select = select.filter(meal::Column::HallId.eq(hall_id));
    }
    if let Some(meal_type) = query.meal_type.as_deref() {
        select = select.filter(meal::Column::MealType.eq(parse_meal_type(meal_type)?));
    }
    if let Some(available) = query.available {
        select = select.filter(meal::Column::IsAvailable.eq(available));
    }
    let meals = load_meals(&state.db, newest_first(select)).await?;
    debug!("Retrieved {} meals", meals.len());
    Ok(Json(ApiResponse::success(meals, "Meals retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/meals/available",
    tag = "meals",
    responses(
        (status = 200, description = "Available meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_available_meals(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    let select = newest_first(meal::Entity::find().filter(meal::Column::IsAvailable.eq(true)));
    let meals = load_meals(&state.db, select).await?;
    Ok(Json(ApiResponse::success(meals, "Available meals retrieved successfully")))
}

/// Today's meals across all halls, in serving order
#[utoipa::path(
    get,
    path = "/api/v1/meals/today",
    tag = "meals",
    responses(
        (status = 200, description = "Today's meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_todays_meals(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    let meals = todays_meals(&state.db, None).await?;
    Ok(Json(ApiResponse::success(meals, "Today's meals retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/meals/{meal_id}",
    tag = "meals",
    params(("meal_id" = i32, Path, description = "Meal ID")),
    responses(
        (status = 200, description = "Meal retrieved successfully", body = ApiResponse<MealResponse>),
        (status = 404, description = "Meal not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<i32>,
) -> AppResult<Json<ApiResponse<MealResponse>>> {
    let (meal, hall) = meal::Entity::find_by_id(meal_id)
        .find_also_related(hall::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Meal", meal_id))?;
    Ok(Json(ApiResponse::success(
        MealResponse::new(meal, hall.as_ref()),
        "Meal retrieved successfully",
    )))
}

/// Meals of one hall, newest first
#[utoipa::path(
    get,
    path = "/api/v1/meals/hall/{hall_id}",
    tag = "meals",
    params(("hall_id" = i32, Path, description = "Hall ID")),
    responses(
        (status = 200, description = "Meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_meals_by_hall(
    State(state): State<AppState>,
    Path(hall_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    find_hall(&state.db, hall_id).await?;
    let select = newest_first(meal::Entity::find().filter(meal::Column::HallId.eq(hall_id)));
    let meals = load_meals(&state.db, select).await?;
    Ok(Json(ApiResponse::success(meals, "Meals retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/meals/hall/{hall_id}/type/{meal_type}",
    tag = "meals",
    params(
        ("hall_id" = i32, Path, description = "Hall ID"),
        ("meal_type" = String, Path, description = "BREAKFAST, LUNCH or DINNER"),
    ),
    responses(
        (status = 200, description = "Meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>),
        (status = 400, description = "Unknown meal type", body = ErrorResponse),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_meals_by_hall_and_type(
    State(state): State<AppState>,
    Path((hall_id, meal_type)): Path<(i32, String)>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    let meal_type = parse_meal_type(&meal_type)?;
    find_hall(&state.db, hall_id).await?;
    let select = newest_first(
        meal::Entity::find()
            .filter(meal::Column::HallId.eq(hall_id))
            .filter(meal::Column::MealType.eq(meal_type)),
    );
    let meals = load_meals(&state.db, select).await?;
    Ok(Json(ApiResponse::success(meals, "Meals retrieved successfully")))
}

/// Today's meals of one hall, in serving order
#[utoipa::path(
    get,
    path = "/api/v1/meals/hall/{hall_id}/today",
    tag = "meals",
    params(("hall_id" = i32, Path, description = "Hall ID")),
    responses(
        (status = 200, description = "Today's meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todays_meals_by_hall(
    State(state): State<AppState>,
    Path(hall_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    find_hall(&state.db, hall_id).await?;
    let meals = todays_meals(&state.db, Some(hall_id)).await?;
    Ok(Json(ApiResponse::success(meals, "Today's meals retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/meals/hall/{hall_id}/available",
    tag = "meals",
    params(("hall_id" = i32, Path, description = "Hall ID")),
    responses(
        (status = 200, description = "Available meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_available_meals_by_hall(
    State(state): State<AppState>,
    Path(hall_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    find_hall(&state.db, hall_id).await?;
    let select = newest_first(
        meal::Entity::find()
            .filter(meal::Column::HallId.eq(hall_id))
            .filter(meal::Column::IsAvailable.eq(true)),
    );
    let meals = load_meals(&state.db, select).await?;
    Ok(Json(ApiResponse::success(meals, "Available meals retrieved successfully")))
}

/// Meals of one hall served between two days, inclusive
#[utoipa::path(
    get,
    path = "/api/v1/meals/hall/{hall_id}/range",
    tag = "meals",
    params(
        ("hall_id" = i32, Path, description = "Hall ID"),
        DateRangeQuery,
    ),
    responses(
        (status = 200, description = "Meals retrieved successfully", body = ApiResponse<Vec<MealResponse>>),
        (status = 400, description = "Start date after end date", body = ErrorResponse),
        (status = 404, description = "Hall not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_meals_by_hall_in_range(
    State(state): State<AppState>,
    Path(hall_id): Path<i32>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<ApiResponse<Vec<MealResponse>>>> {
    if range.start > range.end {
        return Err(AppError::BadRequest(
            "Start date must not be after end date".to_string(),
        ));
    }
    find_hall(&state.db, hall_id).await?;

    let (from, _) = day_bounds(range.start);
    let (_, until) = day_bounds(range.end);
    let mut select = meal::Entity::find()
        .filter(meal::Column::HallId.eq(hall_id))
        .filter(meal::Column::MealDate.gte(from));
    if let Some(until) = until {
        select = select.filter(meal::Column::MealDate.lt(until));
    }
    let select = select
        .order_by_asc(meal::Column::MealDate)
        .order_by_asc(meal::Column::Id);
    let meals = load_meals(&state.db, select).await?;
    Ok(Json(ApiResponse::success(meals, "Meals retrieved successfully")))
}

/// Add a meal to a hall's menu
#[utoipa::path(
    post,
    path = "/api/v1/meals",
    tag = "meals",
    request_body = CreateMealRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Meal created successfully", body = ApiResponse<MealResponse>),
        (status = 400, description = "Invalid request or unknown hall", body = ErrorResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn create_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Valid(Json(request)): Valid<Json<CreateMealRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<MealResponse>>)> {
    auth.require_any(&Role::CANTEEN)?;
    ensure_price(request.price)?;
    hall_must_exist_for_write(&state.db, request.hall_id).await?;

    let now = Utc::now().naive_utc();
    let created = meal::ActiveModel {
        hall_id: Set(request.hall_id),
        meal_type: Set(request.meal_type),
        meal_name: Set(request.meal_name),
        description: Set(request.description),
        price: Set(request.price),
        quantity: Set(request.quantity),
        meal_date: Set(request.meal_date.unwrap_or(now)),
        is_available: Set(request.is_available.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Meal {} created for hall {}", created.id, created.hall_id);
    let hall = find_hall(&state.db, created.hall_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            MealResponse::new(created, Some(&hall)),
            "Meal created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/meals/{meal_id}",
    tag = "meals",
    params(("meal_id" = i32, Path, description = "Meal ID")),
    request_body = UpdateMealRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Meal updated successfully", body = ApiResponse<MealResponse>),
        (status = 400, description = "Invalid request or unknown hall", body = ErrorResponse),
        (status = 404, description = "Meal not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn update_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meal_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateMealRequest>>,
) -> AppResult<Json<ApiResponse<MealResponse>>> {
    auth.require_any(&Role::CANTEEN)?;
    let existing = meal::Entity::find_by_id(meal_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Meal", meal_id))?;

    let mut active: meal::ActiveModel = existing.into();
    if let Some(hall_id) = request.hall_id {
        hall_must_exist_for_write(&state.db, hall_id).await?;
        active.hall_id = Set(hall_id);
    }
    if let Some(meal_type) = request.meal_type {
        active.meal_type = Set(meal_type);
    }
    if let Some(name) = request.meal_name {
        active.meal_name = Set(name);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = request.price {
        ensure_price(price)?;
        active.price = Set(price);
    }
    if let Some(quantity) = request.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(meal_date) = request.meal_date {
        active.meal_date = Set(meal_date);
    }
    if let Some(is_available) = request.is_available {
        active.is_available = Set(is_available);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&state.db).await?;
    info!("Meal {} updated", updated.id);
    let hall = find_hall(&state.db, updated.hall_id).await?;
    Ok(Json(ApiResponse::success(
        MealResponse::new(updated, Some(&hall)),
        "Meal updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/meals/{meal_id}",
    tag = "meals",
    params(("meal_id" = i32, Path, description = "Meal ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 404, description = "Meal not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn delete_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meal_id): Path<i32>,
) -> AppResult<StatusCode> {
    auth.require_any(&Role::CANTEEN)?;
    let result = meal::Entity::delete_by_id(meal_id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Meal", meal_id));
    }
    info!("Meal {} deleted", meal_id);
    Ok(StatusCode::NO_CONTENT)
}
