use crate::application::dto::tasks::{TaskDto, TaskWithoutUserDto};
use crate::application::error::ServiceResult;
use crate::application::ports::task_repository::TaskRepository;
use crate::application::use_cases::assemble::task_dtos;
use crate::domain::paging::PageRequest;
use crate::domain::tasks::task::{TaskFilter, TaskSort};

pub struct ListTasks<'a, R: TaskRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TaskRepository + ?Sized> ListTasks<'a, R> {
    /// A `user_id` filter selects tasks; the assignee lists stay complete.
    pub async fn detailed(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
        page: PageRequest,
    ) -> ServiceResult<Vec<TaskDto>> {
        let tasks = self.repo.list_tasks(filter, sort, Some(page)).await?;
        Ok(task_dtos(self.repo, tasks).await?)
    }

    pub async fn basic(
        &self,
        filter: &TaskFilter,
        sort: TaskSort,
    ) -> ServiceResult<Vec<TaskWithoutUserDto>> {
        let tasks = self.repo.list_tasks(filter, sort, None).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    pub async fn unassigned(
        &self,
        sort: TaskSort,
        page: PageRequest,
    ) -> ServiceResult<Vec<TaskWithoutUserDto>> {
        let tasks = self.repo.list_unassigned(sort, page).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }
}
