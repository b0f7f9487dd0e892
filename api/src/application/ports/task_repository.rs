use async_trait::async_trait;

use crate::domain::assignments::AssignmentDiff;
use crate::domain::paging::PageRequest;
use crate::domain::tasks::task::{Task, TaskChanges, TaskFilter, TaskSort, TaskStatus};
use crate::domain::users::user::User;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks matching the filter in `sort` order; `page` of `None` returns all.
    async fn list_tasks(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
        page: Option<PageRequest>,
    ) -> anyhow::Result<Vec<Task>>;
    /// Tasks nobody is assigned to.
    async fn list_unassigned(&self, sort: TaskSort, page: PageRequest) -> anyhow::Result<Vec<Task>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Task>>;
    async fn find_by_title(&self, title: &str) -> anyhow::Result<Option<Task>>;
    /// Assignees of each of the given tasks, as `(task_id, user)` pairs ordered by user id.
    async fn users_for_tasks(&self, task_ids: &[i64]) -> anyhow::Result<Vec<(i64, User)>>;
    async fn user_ids_for_task(&self, task_id: i64) -> anyhow::Result<Vec<i64>>;
    /// Inserts the task and assigns the given users; unknown user ids are skipped.
    async fn create_task(&self, task: &TaskChanges, user_ids: &[i64]) -> anyhow::Result<Task>;
    /// Replaces the task fields and applies the assignment diff in one unit of work.
    async fn update_task(
        &self,
        id: i64,
        changes: &TaskChanges,
        users: &AssignmentDiff,
    ) -> anyhow::Result<Option<Task>>;
    async fn set_status(&self, id: i64, status: TaskStatus) -> anyhow::Result<Option<Task>>;
    async fn attach_user(&self, task_id: i64, user_id: i64) -> anyhow::Result<bool>;
    async fn detach_user(&self, task_id: i64, user_id: i64) -> anyhow::Result<bool>;
    async fn delete_task(&self, id: i64) -> anyhow::Result<bool>;
}
