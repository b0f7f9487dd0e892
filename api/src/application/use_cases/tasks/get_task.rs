use crate::application::dto::tasks::TaskDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::task_repository::TaskRepository;
use crate::application::use_cases::assemble::task_dto;

pub struct GetTask<'a, R: TaskRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TaskRepository + ?Sized> GetTask<'a, R> {
    pub async fn by_id(&self, id: i64) -> ServiceResult<TaskDto> {
        let task = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::TaskNotFound(id))?;
        Ok(task_dto(self.repo, task).await?)
    }

    pub async fn by_title(&self, title: &str) -> ServiceResult<TaskDto> {
        let task = self
            .repo
            .find_by_title(title)
            .await?
            .ok_or_else(|| ServiceError::TaskTitleNotFound(title.to_string()))?;
        Ok(task_dto(self.repo, task).await?)
    }
}
