//! Test utilities: seeded rows in a fresh memory store.

use chrono::NaiveDate;

use crate::application::ports::task_repository::TaskRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords::hash_password;
use crate::domain::tasks::task::{Task, TaskChanges, TaskStatus};
use crate::domain::users::user::{NewUser, Role, User};
use crate::infrastructure::memory::MemoryStore;

pub const PASSWORD: &str = "Secret@123";

/// Every seeded user has `PASSWORD` as password.
pub async fn seed_user(store: &MemoryStore, first_name: &str, email: &str, role: Role) -> User {
    store
        .create_user(&NewUser {
            first_name: first_name.into(),
            last_name: "Tester".into(),
            email: email.into(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role,
        })
        .await
        .unwrap()
}

pub fn task_fields(title: &str, deadline: Option<NaiveDate>) -> TaskChanges {
    TaskChanges {
        title: title.into(),
        description: format!("Description for {title}"),
        task_status: Some(TaskStatus::ToDo),
        deadline,
    }
}

pub async fn seed_task(
    store: &MemoryStore,
    title: &str,
    deadline: Option<NaiveDate>,
    users: &[i64],
) -> Task {
    store
        .create_task(&task_fields(title, deadline), users)
        .await
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
