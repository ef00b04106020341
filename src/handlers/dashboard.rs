use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::handlers::halls::hall_statistics;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, response::Json};
use chrono::{Duration, NaiveTime, Utc};
use common::{DashboardSummary, HallSnapshot, MealCounts, StatusCount};
use model::entities::{
    complaint::{self, ComplaintPriority, ComplaintStatus},
    hall, meal,
    user::{self, AccountStatus, Role},
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::{debug, instrument};

#[derive(Debug, FromQueryResult)]
struct StatusRow {
    status: String,
    count: i64,
}

async fn complaint_counts(
    db: &DatabaseConnection,
    owner: Option<i32>,
) -> AppResult<Vec<StatusCount>> {
    let mut select = complaint::Entity::find();
    if let Some(user_id) = owner {
        select = select.filter(complaint::Column::UserId.eq(user_id));
    }
    let rows = select
        .select_only()
        .column(complaint::Column::Status)
        .column_as(complaint::Column::Id.count(), "count")
        .group_by(complaint::Column::Status)
        .order_by_asc(complaint::Column::Status)
        .into_model::<StatusRow>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| StatusCount {
            status: row.status,
            count: row.count.max(0) as u64,
        })
        .collect())
}

async fn hall_snapshot(db: &DatabaseConnection, hall_name: &str) -> AppResult<Option<HallSnapshot>> {
    let hall = hall::Entity::find()
        .filter(hall::Column::HallName.eq(hall_name))
        .one(db)
        .await?;
    Ok(hall.map(|h| HallSnapshot {
        available_seats: h.available_seats(),
        hall_id: h.id,
        hall_name: h.hall_name,
        full_name: h.full_name,
        capacity: h.capacity,
        current_occupancy: h.current_occupancy,
    }))
}

async fn meal_counts(db: &DatabaseConnection) -> AppResult<MealCounts> {
    let start = Utc::now().date_naive().and_time(NaiveTime::MIN);
    let end = start + Duration::days(1);

    let total = meal::Entity::find().count(db).await?;
    let available = meal::Entity::find()
        .filter(meal::Column::IsAvailable.eq(true))
        .count(db)
        .await?;
    let today = meal::Entity::find()
        .filter(meal::Column::MealDate.gte(start))
        .filter(meal::Column::MealDate.lt(end))
        .count(db)
        .await?;

    Ok(MealCounts {
        total,
        available,
        today,
    })
}

/// Role-specific overview for the caller's landing page
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard retrieved successfully", body = ApiResponse<DashboardSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[instrument(skip(state, auth))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let db = &state.db;
    let role = auth.role();
    let mut summary = DashboardSummary::for_role(role.as_str());

    let owner = if auth.has_any_role(&Role::COMPLAINT_DESK) {
        None
    } else {
        Some(auth.id())
    };
    summary.complaint_counts = complaint_counts(db, owner).await?;

    match role {
        Role::Student => {
            if let Some(hall_name) = auth.0.hall_name.as_deref() {
                summary.hall = hall_snapshot(db, hall_name).await?;
            }
        }
        Role::Admin => {
            summary.pending_users = Some(
                user::Entity::find()
                    .filter(user::Column::AccountStatus.eq(AccountStatus::Pending))
                    .count(db)
                    .await?,
            );
            summary.total_users = Some(user::Entity::find().count(db).await?);
            summary.hall_statistics = Some(hall_statistics(&state).await?);
        }
        Role::Staff | Role::Teacher => {
            summary.urgent_open_complaints = Some(
                complaint::Entity::find()
                    .filter(complaint::Column::Priority.eq(ComplaintPriority::Urgent))
                    .filter(
                        complaint::Column::Status
                            .is_in([ComplaintStatus::Open, ComplaintStatus::InProgress]),
                    )
                    .count(db)
                    .await?,
            );
        }
        Role::CanteenManager => {
            summary.meals = Some(meal_counts(db).await?);
        }
    }

    debug!(
        "Dashboard for user {} ({}) with {} complaints",
        auth.id(),
        role.as_str(),
        summary.complaint_total()
    );
    Ok(Json(ApiResponse::success(summary, "Dashboard retrieved successfully")))
}
