pub mod admin;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod halls;
pub mod health;
pub mod meals;
pub mod menu;
pub mod notices;
pub mod users;
