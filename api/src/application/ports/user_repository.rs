use async_trait::async_trait;

use crate::domain::assignments::AssignmentDiff;
use crate::domain::paging::PageRequest;
use crate::domain::tasks::task::Task;
use crate::domain::users::user::{NewUser, User, UserChanges, UserFilter};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Users matching the filter ordered by id; `page` of `None` returns all.
    async fn list_users(
        &self,
        filter: &UserFilter,
        page: Option<PageRequest>,
    ) -> anyhow::Result<Vec<User>>;
    /// Tasks assigned to each of the given users, as `(user_id, task)` pairs ordered by task id.
    async fn tasks_for_users(&self, user_ids: &[i64]) -> anyhow::Result<Vec<(i64, Task)>>;
    async fn task_ids_for_user(&self, user_id: i64) -> anyhow::Result<Vec<i64>>;
    /// Updates the profile and applies the assignment diff in one unit of work.
    /// Ids in the diff that name no existing task are skipped.
    async fn update_user(
        &self,
        id: i64,
        changes: &UserChanges,
        tasks: &AssignmentDiff,
    ) -> anyhow::Result<Option<User>>;
    async fn update_password(&self, id: i64, password_hash: &str) -> anyhow::Result<bool>;
    async fn delete_user(&self, id: i64) -> anyhow::Result<bool>;
    async fn ping(&self) -> anyhow::Result<()>;
}
