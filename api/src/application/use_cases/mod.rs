pub mod assemble;
pub mod auth;
pub mod tasks;
pub mod users;
