use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The role a user acts under. Drives route gating and navigation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "STUDENT")]
    Student,
    #[sea_orm(string_value = "STAFF")]
    Staff,
    #[sea_orm(string_value = "TEACHER")]
    Teacher,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "CANTEEN_MANAGER")]
    CanteenManager,
}

impl Role {
    /// Roles that work the complaint desk: they see every complaint and may change its status.
    pub const COMPLAINT_DESK: [Role; 3] = [Role::Admin, Role::Staff, Role::Teacher];

    /// Roles allowed to manage meals and the menu board.
    pub const CANTEEN: [Role; 2] = [Role::Admin, Role::CanteenManager];

    /// Roles allowed to publish hall notices.
    pub const NOTICE_BOARD: [Role; 3] = [Role::Admin, Role::Teacher, Role::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Staff => "STAFF",
            Role::Teacher => "TEACHER",
            Role::Admin => "ADMIN",
            Role::CanteenManager => "CANTEEN_MANAGER",
        }
    }
}

/// Approval state of a registered account. Only admins move it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
}

/// A registered person: student, staff member, teacher, canteen manager or admin.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash, never the raw password.
    pub password_hash: String,
    pub role: Role,
    /// Residential hall the user belongs to, by hall name.
    pub hall_name: Option<String>,
    pub account_status: AccountStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A user can file many complaints.
    #[sea_orm(has_many = "super::complaint::Entity")]
    Complaint,
}

impl Related<super::complaint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complaint.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_approved(&self) -> bool {
        self.account_status == AccountStatus::Approved
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    pub fn belongs_to_hall(&self, hall_name: &str) -> bool {
        self.hall_name.as_deref() == Some(hall_name)
    }
}
