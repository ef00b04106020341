use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Residents a hall is built for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HallType {
    #[sea_orm(string_value = "MALE")]
    Male,
    #[sea_orm(string_value = "FEMALE")]
    Female,
}

/// A residential hall of the university.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "halls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub hall_code: String,
    #[sea_orm(unique)]
    pub hall_name: String,
    pub full_name: String,
    pub hall_short_name: Option<String>,
    pub hall_type: HallType,
    pub capacity: i32,
    #[sea_orm(default_value = "0")]
    pub current_occupancy: i32,
    pub provost: String,
    pub email: String,
    pub phone: String,
    pub office_location: String,
    pub office_hours: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Comma-separated list, e.g. "Wi-Fi, Reading Room, Gym".
    pub facilities: Option<String>,
    /// Halls are never hard-deleted; deactivation hides them from listings and totals.
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::meal::Entity")]
    Meal,
}

impl Related<super::meal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Why an occupancy value was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccupancyError {
    Negative,
    ExceedsCapacity { capacity: i32, requested: i32 },
}

impl std::fmt::Display for OccupancyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OccupancyError::Negative => write!(f, "Occupancy cannot be negative"),
            OccupancyError::ExceedsCapacity { capacity, requested } => write!(
                f,
                "Occupancy cannot exceed capacity. Capacity: {}, Requested occupancy: {}",
                capacity, requested
            ),
        }
    }
}

impl Model {
    pub fn available_seats(&self) -> i32 {
        (self.capacity - self.current_occupancy).max(0)
    }

    /// Splits the comma-separated facilities column into trimmed entries.
    pub fn facility_list(&self) -> Vec<String> {
        split_facilities(self.facilities.as_deref())
    }

    pub fn check_occupancy(&self, occupancy: i32) -> Result<(), OccupancyError> {
        check_occupancy(self.capacity, occupancy)
    }
}

/// Occupancy must stay within `0..=capacity`.
pub fn check_occupancy(capacity: i32, occupancy: i32) -> Result<(), OccupancyError> {
    if occupancy < 0 {
        return Err(OccupancyError::Negative);
    }
    if occupancy > capacity {
        return Err(OccupancyError::ExceedsCapacity {
            capacity,
            requested: occupancy,
        });
    }
    Ok(())
}

pub fn split_facilities(raw: Option<&str>) -> Vec<String> {
    raw.map(|facilities| {
        facilities
            .split(',')
            .map(str::trim)
            .filter(|facility| !facility.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hall(capacity: i32, occupancy: i32) -> Model {
        let now = chrono::Utc::now().naive_utc();
        Model {
            id: 1,
            hall_code: "SPH".to_string(),
            hall_name: "Shah Paran Hall".to_string(),
            full_name: "Shah Paran Hall".to_string(),
            hall_short_name: None,
            hall_type: HallType::Male,
            capacity,
            current_occupancy: occupancy,
            provost: "Dr. Karim".to_string(),
            email: "sph@sust.edu".to_string(),
            phone: "0821-000000".to_string(),
            office_location: "Ground floor".to_string(),
            office_hours: "9am-5pm".to_string(),
            description: None,
            image_url: None,
            facilities: Some(" Wi-Fi, Gym,,Reading Room ".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn facilities_are_trimmed_and_empty_entries_dropped() {
        assert_eq!(
            hall(100, 0).facility_list(),
            vec!["Wi-Fi".to_string(), "Gym".to_string(), "Reading Room".to_string()]
        );
        assert!(split_facilities(None).is_empty());
    }

    #[test]
    fn occupancy_bounds() {
        let h = hall(100, 40);
        assert_eq!(h.available_seats(), 60);
        assert!(h.check_occupancy(0).is_ok());
        assert!(h.check_occupancy(100).is_ok());
        assert_eq!(h.check_occupancy(-1), Err(OccupancyError::Negative));
        assert_eq!(
            h.check_occupancy(101),
            Err(OccupancyError::ExceedsCapacity { capacity: 100, requested: 101 })
        );
    }

    #[test]
    fn over_occupied_hall_reports_no_seats() {
        assert_eq!(hall(10, 12).available_seats(), 0);
    }
}
