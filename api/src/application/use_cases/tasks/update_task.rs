use chrono::NaiveDate;

use crate::application::dto::tasks::{TaskDto, TaskWithoutIdDto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::task_repository::TaskRepository;
use crate::application::use_cases::assemble::task_dto;
use crate::application::use_cases::tasks::create_task::validate_task_body;
use crate::domain::assignments::AssignmentDiff;
use crate::domain::tasks::task::TaskChanges;

pub struct UpdateTask<'a, R: TaskRepository + ?Sized> {
    pub repo: &'a R,
    pub today: NaiveDate,
}

impl<'a, R: TaskRepository + ?Sized> UpdateTask<'a, R> {
    /// Replaces every field. Assignees are diffed only when `usersIds` is sent.
    pub async fn execute(&self, id: i64, req: &TaskWithoutIdDto) -> ServiceResult<TaskDto> {
        validate_task_body(req, self.today)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::TaskNotFound(id))?;
        if existing.title != req.title {
            if let Some(other) = self.repo.find_by_title(&req.title).await? {
                if other.id != id {
                    return Err(ServiceError::TitleAlreadyExists(req.title.clone()));
                }
            }
        }

        let diff = match &req.users_ids {
            Some(wanted) => {
                let assigned = self.repo.user_ids_for_task(id).await?;
                AssignmentDiff::between(&assigned, wanted)
            }
            None => AssignmentDiff::default(),
        };
        let changes = TaskChanges {
            title: req.title.clone(),
            description: req.description.clone(),
            task_status: req.task_status,
            deadline: req.deadline,
        };
        let task = self
            .repo
            .update_task(id, &changes, &diff)
            .await
            .map_err(|e| {
                ServiceError::from_store(e, |_| ServiceError::TitleAlreadyExists(req.title.clone()))
            })?
            .ok_or(ServiceError::TaskNotFound(id))?;
        tracing::info!(
            task_id = id,
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "task_updated"
        );
        Ok(task_dto(self.repo, task).await?)
    }
}
