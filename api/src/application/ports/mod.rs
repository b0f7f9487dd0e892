pub mod store_conflict;
pub mod task_repository;
pub mod user_repository;
