use crate::handlers::{
    admin::{
        activate_user, approve_user, get_pending_users, get_users_by_status, reject_user,
        suspend_user, update_user_role,
    },
    auth::{login, me, navigation, register},
    complaints::{
        add_complaint_note, create_complaint, delete_complaint, get_complaint, get_complaints,
        get_complaints_by_category, get_complaints_by_status, get_complaints_by_user,
        get_my_complaints, update_complaint_status,
    },
    dashboard::get_dashboard,
    halls::{
        create_hall, delete_hall, get_active_halls, get_available_seats, get_hall,
        get_hall_by_code, get_hall_by_full_name, get_hall_by_name, get_hall_summary, get_halls,
        get_halls_by_type, get_total_capacity, get_total_occupancy, update_hall, update_occupancy,
    },
    health::health_check,
    meals::{
        create_meal, delete_meal, get_available_meals, get_available_meals_by_hall, get_meal,
        get_meals, get_meals_by_hall, get_meals_by_hall_and_type, get_meals_by_hall_in_range,
        get_todays_meals, get_todays_meals_by_hall, update_meal,
    },
    menu::{
        create_menu_item, delete_menu_item, get_menu_by_hall, get_menu_items, get_todays_menu,
        get_todays_menu_by_hall, update_menu_item,
    },
    notices::{create_notice, delete_notice, get_notice, get_notices, update_notice},
    users::{
        create_user, delete_user, get_user, get_user_halls, get_user_statistics, get_users,
        update_user,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Authentication
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/navigation", get(navigation))
        // User management
        .route("/api/v1/users", post(create_user).get(get_users))
        .route("/api/v1/users/halls", get(get_user_halls))
        .route("/api/v1/users/statistics", get(get_user_statistics))
        .route(
            "/api/v1/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Account approval
        .route("/api/v1/admin/pending-users", get(get_pending_users))
        .route("/api/v1/admin/users/status/:status", get(get_users_by_status))
        .route("/api/v1/admin/users/:user_id/approve", post(approve_user))
        .route("/api/v1/admin/users/:user_id/reject", post(reject_user))
        .route("/api/v1/admin/users/:user_id/suspend", post(suspend_user))
        .route("/api/v1/admin/users/:user_id/activate", post(activate_user))
        .route("/api/v1/admin/users/:user_id/role", put(update_user_role))
        // Halls
        .route("/api/v1/halls", get(get_halls).post(create_hall))
        .route("/api/v1/halls/active", get(get_active_halls))
        .route("/api/v1/halls/code/:hall_code", get(get_hall_by_code))
        .route("/api/v1/halls/name/:hall_name", get(get_hall_by_name))
        .route("/api/v1/halls/full-name/:full_name", get(get_hall_by_full_name))
        .route("/api/v1/halls/type/:hall_type", get(get_halls_by_type))
        .route("/api/v1/halls/statistics/capacity", get(get_total_capacity))
        .route("/api/v1/halls/statistics/occupancy", get(get_total_occupancy))
        .route("/api/v1/halls/statistics/available", get(get_available_seats))
        .route("/api/v1/halls/statistics/summary", get(get_hall_summary))
        .route(
            "/api/v1/halls/:hall_id",
            get(get_hall).put(update_hall).delete(delete_hall),
        )
        .route("/api/v1/halls/:hall_id/occupancy", put(update_occupancy))
        // Complaints
        .route("/api/v1/complaints", get(get_complaints).post(create_complaint))
        .route("/api/v1/complaints/my", get(get_my_complaints))
        .route("/api/v1/complaints/user/:user_id", get(get_complaints_by_user))
        .route("/api/v1/complaints/status/:status", get(get_complaints_by_status))
        .route("/api/v1/complaints/category/:category", get(get_complaints_by_category))
        .route(
            "/api/v1/complaints/:complaint_id",
            get(get_complaint).delete(delete_complaint),
        )
        .route(
            "/api/v1/complaints/:complaint_id/status",
            put(update_complaint_status),
        )
        .route("/api/v1/complaints/:complaint_id/notes", post(add_complaint_note))
        // Meals
        .route("/api/v1/meals", get(get_meals).post(create_meal))
        .route("/api/v1/meals/available", get(get_available_meals))
        .route("/api/v1/meals/today", get(get_todays_meals))
        .route(
            "/api/v1/meals/:meal_id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
        .route("/api/v1/meals/hall/:hall_id", get(get_meals_by_hall))
        .route(
            "/api/v1/meals/hall/:hall_id/type/:meal_type",
            get(get_meals_by_hall_and_type),
        )
        .route("/api/v1/meals/hall/:hall_id/today", get(get_todays_meals_by_hall))
        .route(
            "/api/v1/meals/hall/:hall_id/available",
            get(get_available_meals_by_hall),
        )
        .route("/api/v1/meals/hall/:hall_id/range", get(get_meals_by_hall_in_range))
        // Menu board
        .route("/api/v1/menu", get(get_menu_items).post(create_menu_item))
        .route("/api/v1/menu/today", get(get_todays_menu))
        .route("/api/v1/menu/hall/:hall_name", get(get_menu_by_hall))
        .route("/api/v1/menu/hall/:hall_name/today", get(get_todays_menu_by_hall))
        .route(
            "/api/v1/menu/:item_id",
            put(update_menu_item).delete(delete_menu_item),
        )
        // Notices
        .route("/api/v1/notices", get(get_notices).post(create_notice))
        .route(
            "/api/v1/notices/:notice_id",
            get(get_notice).put(update_notice).delete(delete_notice),
        )
        // Dashboard
        .route("/api/v1/dashboard", get(get_dashboard))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
