//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the hall management service here:
//! users and their approval state, residential halls, complaints with
//! their note timeline, and the dining side (meals, menu board, notices).

pub mod complaint;
pub mod complaint_note;
pub mod hall;
pub mod hall_notice;
pub mod meal;
pub mod menu_item;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::complaint::Entity as Complaint;
    pub use super::complaint_note::Entity as ComplaintNote;
    pub use super::hall::Entity as Hall;
    pub use super::hall_notice::Entity as HallNotice;
    pub use super::meal::Entity as Meal;
    pub use super::menu_item::Entity as MenuItem;
    pub use super::user::Entity as User;
}
