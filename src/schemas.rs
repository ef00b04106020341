use crate::config::Settings;
use crate::handlers::{
    admin::UpdateRoleRequest,
    auth::{LoginRequest, LoginResponse, NavigationResponse, RegisterRequest},
    complaints::{
        AddNoteRequest, ComplaintNoteResponse, ComplaintResponse, CreateComplaintRequest,
        UpdateComplaintStatusRequest,
    },
    halls::{CreateHallRequest, HallResponse, UpdateHallRequest, UpdateOccupancyRequest},
    meals::{CreateMealRequest, MealResponse, UpdateMealRequest},
    menu::{CreateMenuItemRequest, MenuItemResponse, UpdateMenuItemRequest},
    notices::{CreateNoticeRequest, NoticeResponse, UpdateNoticeRequest},
    users::{CreateUserRequest, UpdateUserRequest, UserResponse},
};
use common::{
    DashboardSummary, HallSnapshot, HallStatistics, HallTypeSummary, MealCounts, NavItem,
    StatusCount, UserHallRoleCount,
};
use model::entities::{
    complaint::{ComplaintPriority, ComplaintStatus},
    hall::HallType,
    meal::MealType,
    user::{AccountStatus, Role},
};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::{atomic::AtomicU64, Arc};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
    /// Bumped on every hall write; a statistics computation that started
    /// under an older generation must not stay cached.
    pub statistics_generation: Arc<AtomicU64>,
    /// Loaded runtime settings
    pub settings: Arc<Settings>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    HallStatistics(HallStatistics),
}

/// Cache key for the aggregated hall statistics.
pub const HALL_STATISTICS_KEY: &str = "hall_statistics";

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        crate::handlers::auth::navigation,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::users::get_user_halls,
        crate::handlers::users::get_user_statistics,
        crate::handlers::admin::get_pending_users,
        crate::handlers::admin::get_users_by_status,
        crate::handlers::admin::approve_user,
        crate::handlers::admin::reject_user,
        crate::handlers::admin::suspend_user,
        crate::handlers::admin::activate_user,
        crate::handlers::admin::update_user_role,
        crate::handlers::halls::get_halls,
        crate::handlers::halls::get_active_halls,
        crate::handlers::halls::get_hall,
        crate::handlers::halls::get_hall_by_code,
        crate::handlers::halls::get_hall_by_name,
        crate::handlers::halls::get_hall_by_full_name,
        crate::handlers::halls::get_halls_by_type,
        crate::handlers::halls::create_hall,
        crate::handlers::halls::update_hall,
        crate::handlers::halls::delete_hall,
        crate::handlers::halls::update_occupancy,
        crate::handlers::halls::get_total_capacity,
        crate::handlers::halls::get_total_occupancy,
        crate::handlers::halls::get_available_seats,
        crate::handlers::halls::get_hall_summary,
        crate::handlers::complaints::create_complaint,
        crate::handlers::complaints::get_complaints,
        crate::handlers::complaints::get_my_complaints,
        crate::handlers::complaints::get_complaint,
        crate::handlers::complaints::get_complaints_by_user,
        crate::handlers::complaints::get_complaints_by_status,
        crate::handlers::complaints::get_complaints_by_category,
        crate::handlers::complaints::update_complaint_status,
        crate::handlers::complaints::add_complaint_note,
        crate::handlers::complaints::delete_complaint,
        crate::handlers::meals::get_meals,
        crate::handlers::meals::get_available_meals,
        crate::handlers::meals::get_todays_meals,
        crate::handlers::meals::get_meal,
        crate::handlers::meals::get_meals_by_hall,
        crate::handlers::meals::get_meals_by_hall_and_type,
        crate::handlers::meals::get_todays_meals_by_hall,
        crate::handlers::meals::get_available_meals_by_hall,
        crate::handlers::meals::get_meals_by_hall_in_range,
        crate::handlers::meals::create_meal,
        crate::handlers::meals::update_meal,
        crate::handlers::meals::delete_meal,
        crate::handlers::menu::get_menu_items,
        crate::handlers::menu::get_todays_menu,
        crate::handlers::menu::get_menu_by_hall,
        crate::handlers::menu::get_todays_menu_by_hall,
        crate::handlers::menu::create_menu_item,
        crate::handlers::menu::update_menu_item,
        crate::handlers::menu::delete_menu_item,
        crate::handlers::notices::get_notices,
        crate::handlers::notices::get_notice,
        crate::handlers::notices::create_notice,
        crate::handlers::notices::update_notice,
        crate::handlers::notices::delete_notice,
        crate::handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            ApiResponse<UserResponse>,
            ApiResponse<Vec<UserResponse>>,
            ApiResponse<LoginResponse>,
            ApiResponse<NavigationResponse>,
            ApiResponse<HallResponse>,
            ApiResponse<Vec<HallResponse>>,
            ApiResponse<HallStatistics>,
            ApiResponse<ComplaintResponse>,
            ApiResponse<Vec<ComplaintResponse>>,
            ApiResponse<MealResponse>,
            ApiResponse<Vec<MealResponse>>,
            ApiResponse<MenuItemResponse>,
            ApiResponse<Vec<MenuItemResponse>>,
            ApiResponse<NoticeResponse>,
            ApiResponse<Vec<NoticeResponse>>,
            ApiResponse<DashboardSummary>,
            ErrorResponse,
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            NavigationResponse,
            NavItem,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            UpdateRoleRequest,
            UserHallRoleCount,
            CreateHallRequest,
            UpdateHallRequest,
            UpdateOccupancyRequest,
            HallResponse,
            HallStatistics,
            HallTypeSummary,
            CreateComplaintRequest,
            UpdateComplaintStatusRequest,
            AddNoteRequest,
            ComplaintResponse,
            ComplaintNoteResponse,
            StatusCount,
            CreateMealRequest,
            UpdateMealRequest,
            MealResponse,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            MenuItemResponse,
            CreateNoticeRequest,
            UpdateNoticeRequest,
            NoticeResponse,
            DashboardSummary,
            HallSnapshot,
            MealCounts,
            Role,
            AccountStatus,
            HallType,
            ComplaintPriority,
            ComplaintStatus,
            MealType,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration, login and session endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "admin", description = "Account approval and role management"),
        (name = "halls", description = "Residential hall endpoints"),
        (name = "complaints", description = "Complaint tracking endpoints"),
        (name = "meals", description = "Hall meal endpoints"),
        (name = "menu", description = "Dated menu board endpoints"),
        (name = "notices", description = "Hall notice endpoints"),
        (name = "dashboard", description = "Role-based dashboard endpoints"),
    ),
    info(
        title = "Hall Manager API",
        description = "University hall management API: accounts, halls, complaints and dining",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
