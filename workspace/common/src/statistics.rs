use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Totals for all active halls of one type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HallTypeSummary {
    /// `MALE` or `FEMALE`
    pub hall_type: String,
    pub hall_count: u64,
    pub total_capacity: i64,
    pub total_occupancy: i64,
}

/// Capacity picture across active halls.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HallStatistics {
    pub total_capacity: i64,
    pub total_occupancy: i64,
    pub available_seats: i64,
    pub by_type: Vec<HallTypeSummary>,
}

impl HallStatistics {
    /// Builds the overall totals from per-type rows.
    pub fn from_summaries(mut by_type: Vec<HallTypeSummary>) -> Self {
        by_type.sort_by(|a, b| a.hall_type.cmp(&b.hall_type));
        let total_capacity: i64 = by_type.iter().map(|s| s.total_capacity).sum();
        let total_occupancy: i64 = by_type.iter().map(|s| s.total_occupancy).sum();
        Self {
            total_capacity,
            total_occupancy,
            available_seats: total_capacity - total_occupancy,
            by_type,
        }
    }
}

/// Number of users for one (hall, role) pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserHallRoleCount {
    pub hall_name: Option<String>,
    pub role: String,
    pub count: u64,
}

/// Number of complaints in one status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}
