use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::task_repository::TaskRepository;

pub struct DeleteTask<'a, R: TaskRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TaskRepository + ?Sized> DeleteTask<'a, R> {
    pub async fn execute(&self, id: i64) -> ServiceResult<()> {
        if !self.repo.delete_task(id).await? {
            return Err(ServiceError::TaskNotFound(id));
        }
        tracing::info!(task_id = id, "task_deleted");
        Ok(())
    }
}
