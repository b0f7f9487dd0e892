use chrono::NaiveDate;

use crate::application::dto::tasks::{TaskDto, TaskWithoutIdDto};
use crate::application::error::{ServiceError, ServiceResult, ValidationErrors};
use crate::application::ports::task_repository::TaskRepository;
use crate::application::use_cases::assemble::task_dto;
use crate::application::validation;
use crate::domain::tasks::task::{TaskChanges, TaskStatus};

/// Field checks shared by creation and full update.
pub(crate) fn validate_task_body(req: &TaskWithoutIdDto, today: NaiveDate) -> ServiceResult<()> {
    let mut errors = ValidationErrors::default();
    validation::not_blank(&mut errors, "title", &req.title, "title cannot be blank");
    validation::not_blank(
        &mut errors,
        "description",
        &req.description,
        "description cannot be blank",
    );
    validation::future_date(&mut errors, "deadline", req.deadline, today);
    errors.into_result()
}

pub struct CreateTask<'a, R: TaskRepository + ?Sized> {
    pub repo: &'a R,
    /// Reference day for the deadline check.
    pub today: NaiveDate,
}

impl<'a, R: TaskRepository + ?Sized> CreateTask<'a, R> {
    pub async fn execute(&self, req: &TaskWithoutIdDto) -> ServiceResult<TaskDto> {
        validate_task_body(req, self.today)?;
        if self.repo.find_by_title(&req.title).await?.is_some() {
            return Err(ServiceError::TitleAlreadyExists(req.title.clone()));
        }
        let fields = TaskChanges {
            title: req.title.clone(),
            description: req.description.clone(),
            task_status: Some(req.task_status.unwrap_or(TaskStatus::ToDo)),
            deadline: req.deadline,
        };
        let user_ids = req.users_ids.clone().unwrap_or_default();
        let task = self
            .repo
            .create_task(&fields, &user_ids)
            .await
            .map_err(|e| {
                ServiceError::from_store(e, |_| ServiceError::TitleAlreadyExists(req.title.clone()))
            })?;
        tracing::info!(task_id = task.id, title = %task.title, "task_created");
        Ok(task_dto(self.repo, task).await?)
    }
}
