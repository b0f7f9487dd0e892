mod auth_api;
mod common;
mod tasks_api;
mod users_api;
