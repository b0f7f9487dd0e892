pub mod assignments;
pub mod paging;
pub mod tasks;
pub mod users;
