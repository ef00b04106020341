use crate::statistics::{HallStatistics, StatusCount};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Seats and occupancy of a single hall, as shown on a student's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HallSnapshot {
    pub hall_id: i32,
    pub hall_name: String,
    pub full_name: String,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub available_seats: i32,
}

/// Meal counters for the canteen dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MealCounts {
    pub total: u64,
    pub available: u64,
    pub today: u64,
}

/// Role-dependent dashboard payload. Sections that do not apply to the
/// caller's role are left out of the JSON entirely.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub role: String,
    /// Complaint counts by status: the caller's own for students, all otherwise.
    pub complaint_counts: Vec<StatusCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<HallSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_statistics: Option<HallStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_users: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgent_open_complaints: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals: Option<MealCounts>,
}

impl DashboardSummary {
    pub fn for_role(role: &str) -> Self {
        Self {
            role: role.to_string(),
            ..Default::default()
        }
    }

    pub fn complaint_total(&self) -> u64 {
        self.complaint_counts.iter().map(|c| c.count).sum()
    }
}
