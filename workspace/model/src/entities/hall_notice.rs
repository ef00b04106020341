use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// A notice posted to a hall's board.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "hall_notices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub hall_name: String,
    pub priority: String,
    /// Unpublished notices are only visible to notice-board roles.
    #[sea_orm(default_value = "true")]
    pub published: bool,
    pub attachment_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
