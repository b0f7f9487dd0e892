use crate::application::dto::tasks::TaskDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::task_repository::TaskRepository;
use crate::application::use_cases::assemble::task_dto;
use crate::domain::tasks::task::TaskStatus;

pub struct ChangeStatus<'a, R: TaskRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TaskRepository + ?Sized> ChangeStatus<'a, R> {
    pub async fn execute(&self, id: i64, status: TaskStatus) -> ServiceResult<TaskDto> {
        let task = self
            .repo
            .set_status(id, status)
            .await?
            .ok_or(ServiceError::TaskNotFound(id))?;
        tracing::info!(task_id = id, status = %status, "task_status_changed");
        Ok(task_dto(self.repo, task).await?)
    }
}
