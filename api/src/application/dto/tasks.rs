use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::users::UserWithoutTaskDto;
use crate::domain::tasks::task::{AssignmentAction, Task, TaskStatus};
use crate::domain::users::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub task_status: Option<TaskStatus>,
    pub deadline: Option<NaiveDate>,
    pub users: Vec<UserWithoutTaskDto>,
}

impl TaskDto {
    pub fn from_parts(task: Task, users: Vec<User>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            task_status: task.task_status,
            deadline: task.deadline,
            users: users.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithoutUserDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub task_status: Option<TaskStatus>,
    pub deadline: Option<NaiveDate>,
}

impl From<Task> for TaskWithoutUserDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            task_status: task.task_status,
            deadline: task.deadline,
        }
    }
}

/// Body of task creation and full update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithoutIdDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub task_status: Option<TaskStatus>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub users_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskActionRequest {
    pub user_id: i64,
    pub action: AssignmentAction,
}
