pub mod auth;
pub mod error;
pub mod health;
pub mod router;
pub mod tasks;
pub mod users;
