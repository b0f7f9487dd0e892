use crate::application::dto::tasks::{TaskDto, UserTaskActionRequest};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::task_repository::TaskRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::assemble::task_dto;
use crate::domain::tasks::task::AssignmentAction;

pub struct ModifyAssignment<'a, TR, UR>
where
    TR: TaskRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub tasks: &'a TR,
    pub users: &'a UR,
}

impl<'a, TR, UR> ModifyAssignment<'a, TR, UR>
where
    TR: TaskRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    /// Adding an assigned user or removing an unassigned one is a conflict.
    pub async fn execute(&self, task_id: i64, req: &UserTaskActionRequest) -> ServiceResult<TaskDto> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ServiceError::TaskNotFound(task_id))?;
        let user = self
            .users
            .find_by_id(req.user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(req.user_id))?;
        // The store reports whether the link changed, so concurrent
        // requests for the same pair see exactly one success.
        match req.action {
            AssignmentAction::Add => {
                if !self.tasks.attach_user(task_id, user.id).await? {
                    return Err(ServiceError::UserAlreadyAttached(user.id));
                }
            }
            AssignmentAction::Remove => {
                if !self.tasks.detach_user(task_id, user.id).await? {
                    return Err(ServiceError::UserNotAttached(user.id));
                }
            }
        }
        tracing::info!(task_id, user_id = user.id, action = ?req.action, "task_assignment_changed");
        Ok(task_dto(self.tasks, task).await?)
    }
}
