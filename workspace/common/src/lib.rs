//! Common transport-layer types shared between the service and its clients.
//! These structs mirror the handlers' response payloads so a client can
//! deserialize API responses without duplicating shapes.

mod dashboard;
mod navigation;
mod statistics;

pub use dashboard::{DashboardSummary, HallSnapshot, MealCounts};
pub use navigation::{NavItem, landing_path, navigation_for_role};
pub use statistics::{HallStatistics, HallTypeSummary, StatusCount, UserHallRoleCount};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by every endpoint of the service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
