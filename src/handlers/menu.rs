//! Dated per-hall menu board, kept separately from the meal catalogue.

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, Utc};
use model::entities::{menu_item, user::Role};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub hall_name: String,
    /// e.g. `Breakfast`, `Lunch`, `Dinner`
    #[validate(length(min = 1, max = 20))]
    pub meal_time: String,
    #[validate(length(min = 1, max = 100))]
    pub item_name: String,
    pub price: Decimal,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateMenuItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub hall_name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub meal_time: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub item_name: Option<String>,
    pub price: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: i32,
    pub hall_name: String,
    pub meal_time: String,
    pub item_name: String,
    pub price: Decimal,
    pub date: NaiveDate,
}

impl From<menu_item::Model> for MenuItemResponse {
    fn from(model: menu_item::Model) -> Self {
        Self {
            id: model.id,
            hall_name: model.hall_name,
            meal_time: model.meal_time,
            item_name: model.item_name,
            price: model.price,
            date: model.date,
        }
    }
}

fn ensure_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation("Price cannot be negative".to_string()));
    }
    Ok(())
}

async fn list(db: &DatabaseConnection, select: Select<menu_item::Entity>) -> AppResult<Vec<MenuItemResponse>> {
    let items = select
        .order_by_desc(menu_item::Column::Date)
        .order_by_asc(menu_item::Column::HallName)
        .order_by_asc(menu_item::Column::MealTime)
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await?;
    Ok(items.into_iter().map(MenuItemResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/menu",
    tag = "menu",
    responses(
        (status = 200, description = "Menu retrieved successfully", body = ApiResponse<Vec<MenuItemResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_menu_items(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MenuItemResponse>>>> {
    let items = list(&state.db, menu_item::Entity::find()).await?;
    Ok(Json(ApiResponse::success(items, "Menu retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/today",
    tag = "menu",
    responses(
        (status = 200, description = "Today's menu retrieved successfully", body = ApiResponse<Vec<MenuItemResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_todays_menu(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MenuItemResponse>>>> {
    let today = Utc::now().date_naive();
    let items = list(
        &state.db,
        menu_item::Entity::find().filter(menu_item::Column::Date.eq(today)),
    )
    .await?;
    Ok(Json(ApiResponse::success(items, "Today's menu retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/hall/{hall_name}",
    tag = "menu",
    params(("hall_name" = String, Path, description = "Hall name")),
    responses(
        (status = 200, description = "Hall menu retrieved successfully", body = ApiResponse<Vec<MenuItemResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_menu_by_hall(
    State(state): State<AppState>,
    Path(hall_name): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<MenuItemResponse>>>> {
    let items = list(
        &state.db,
        menu_item::Entity::find().filter(menu_item::Column::HallName.eq(hall_name)),
    )
    .await?;
    Ok(Json(ApiResponse::success(items, "Hall menu retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/hall/{hall_name}/today",
    tag = "menu",
    params(("hall_name" = String, Path, description = "Hall name")),
    responses(
        (status = 200, description = "Today's hall menu retrieved successfully", body = ApiResponse<Vec<MenuItemResponse>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_todays_menu_by_hall(
    State(state): State<AppState>,
    Path(hall_name): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<MenuItemResponse>>>> {
    let today = Utc::now().date_naive();
    let items = list(
        &state.db,
        menu_item::Entity::find()
            .filter(menu_item::Column::HallName.eq(hall_name))
            .filter(menu_item::Column::Date.eq(today)),
    )
    .await?;
    Ok(Json(ApiResponse::success(items, "Today's hall menu retrieved successfully")))
}

#[utoipa::path(
    post,
    path = "/api/v1/menu",
    tag = "menu",
    request_body = CreateMenuItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Menu item created successfully", body = ApiResponse<MenuItemResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn create_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Valid(Json(request)): Valid<Json<CreateMenuItemRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<MenuItemResponse>>)> {
    auth.require_any(&Role::CANTEEN)?;
    ensure_price(request.price)?;

    let created = menu_item::ActiveModel {
        hall_name: Set(request.hall_name),
        meal_time: Set(request.meal_time),
        item_name: Set(request.item_name),
        price: Set(request.price),
        date: Set(request.date.unwrap_or_else(|| Utc::now().date_naive())),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Menu item {} added for {} on {}", created.id, created.hall_name, created.date);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            MenuItemResponse::from(created),
            "Menu item created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/menu/{item_id}",
    tag = "menu",
    params(("item_id" = i32, Path, description = "Menu item ID")),
    request_body = UpdateMenuItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Menu item updated successfully", body = ApiResponse<MenuItemResponse>),
        (status = 404, description = "Menu item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth, request))]
pub async fn update_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateMenuItemRequest>>,
) -> AppResult<Json<ApiResponse<MenuItemResponse>>> {
    auth.require_any(&Role::CANTEEN)?;
    let existing = menu_item::Entity::find_by_id(item_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item", item_id))?;

    let mut active: menu_item::ActiveModel = existing.into();
    if let Some(hall_name) = request.hall_name {
        active.hall_name = Set(hall_name);
    }
    if let Some(meal_time) = request.meal_time {
        active.meal_time = Set(meal_time);
    }
    if let Some(item_name) = request.item_name {
        active.item_name = Set(item_name);
    }
    if let Some(price) = request.price {
        ensure_price(price)?;
        active.price = Set(price);
    }
    if let Some(date) = request.date {
        active.date = Set(date);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(ApiResponse::success(
        MenuItemResponse::from(updated),
        "Menu item updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/menu/{item_id}",
    tag = "menu",
    params(("item_id" = i32, Path, description = "Menu item ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Menu item deleted"),
        (status = 404, description = "Menu item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<i32>,
) -> AppResult<StatusCode> {
    auth.require_any(&Role::CANTEEN)?;
    let result = menu_item::Entity::delete_by_id(item_id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Menu item", item_id));
    }
    info!("Menu item {} deleted", item_id);
    Ok(StatusCode::NO_CONTENT)
}
