//! Builds the nested response shapes: users with their tasks, tasks with
//! their assignees. One batched lookup per listing.

use std::collections::HashMap;

use crate::application::dto::tasks::TaskDto;
use crate::application::dto::users::UserDto;
use crate::application::ports::task_repository::TaskRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::tasks::task::Task;
use crate::domain::users::user::User;

pub fn group_by_owner<T>(pairs: Vec<(i64, T)>) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for (owner, item) in pairs {
        grouped.entry(owner).or_default().push(item);
    }
    grouped
}

pub async fn user_dtos<R: UserRepository + ?Sized>(
    repo: &R,
    users: Vec<User>,
) -> anyhow::Result<Vec<UserDto>> {
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let mut tasks = group_by_owner(repo.tasks_for_users(&ids).await?);
    Ok(users
        .into_iter()
        .map(|u| {
            let owned = tasks.remove(&u.id).unwrap_or_default();
            UserDto::from_parts(u, owned)
        })
        .collect())
}

pub async fn user_dto<R: UserRepository + ?Sized>(repo: &R, user: User) -> anyhow::Result<UserDto> {
    let tasks: Vec<Task> = repo
        .tasks_for_users(&[user.id])
        .await?
        .into_iter()
        .map(|(_, t)| t)
        .collect();
    Ok(UserDto::from_parts(user, tasks))
}

pub async fn task_dtos<R: TaskRepository + ?Sized>(
    repo: &R,
    tasks: Vec<Task>,
) -> anyhow::Result<Vec<TaskDto>> {
    let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
    let mut users = group_by_owner(repo.users_for_tasks(&ids).await?);
    Ok(tasks
        .into_iter()
        .map(|t| {
            let assignees = users.remove(&t.id).unwrap_or_default();
            TaskDto::from_parts(t, assignees)
        })
        .collect())
}

pub async fn task_dto<R: TaskRepository + ?Sized>(repo: &R, task: Task) -> anyhow::Result<TaskDto> {
    let users: Vec<User> = repo
        .users_for_tasks(&[task.id])
        .await?
        .into_iter()
        .map(|(_, u)| u)
        .collect();
    Ok(TaskDto::from_parts(task, users))
}
