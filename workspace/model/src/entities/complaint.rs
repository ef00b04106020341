use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintPriority {
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
    #[sea_orm(string_value = "URGENT")]
    Urgent,
}

/// Where a complaint stands. Any status may follow any other; there is no transition graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl ComplaintStatus {
    /// Entering one of these statuses stamps `resolved_at` (once).
    pub fn marks_resolution(&self) -> bool {
        matches!(self, ComplaintStatus::Resolved | ComplaintStatus::Closed)
    }
}

/// A student-submitted issue ticket.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    /// The user who filed the complaint.
    pub user_id: i32,
    pub admin_response: Option<String>,
    /// Id of the admin/staff member who last responded.
    pub responded_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub resolved_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::complaint_note::Entity")]
    ComplaintNote,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::complaint_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComplaintNote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// The `resolved_at` value after moving to `next`: stamped the first time
    /// the complaint reaches a resolving status and never overwritten afterwards.
    pub fn resolved_at_after(&self, next: ComplaintStatus, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.resolved_at {
            Some(existing) => Some(existing),
            None if next.marks_resolution() => Some(now),
            None => None,
        }
    }
}

/// Text recorded on the complaint timeline when its status changes.
pub fn status_change_note(status: ComplaintStatus, note: &str) -> String {
    format!("Status changed to {}: {}", status.to_value(), note)
}

/// Text recorded on the complaint timeline when an admin response is set.
pub fn admin_response_note(response: &str) -> String {
    format!("Admin response added: {}", response)
}
