use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::Deserialize;

use crate::application::access::Capability;
use crate::application::dto::tasks::{
    TaskDto, TaskWithoutIdDto, TaskWithoutUserDto, UserTaskActionRequest,
};
use crate::application::use_cases::tasks::change_status::ChangeStatus;
use crate::application::use_cases::tasks::create_task::CreateTask;
use crate::application::use_cases::tasks::delete_task::DeleteTask;
use crate::application::use_cases::tasks::get_task::GetTask;
use crate::application::use_cases::tasks::list_tasks::ListTasks;
use crate::application::use_cases::tasks::modify_assignment::ModifyAssignment;
use crate::application::use_cases::tasks::update_task::UpdateTask;
use crate::bootstrap::app_context::AppContext;
use crate::domain::paging::PageRequest;
use crate::domain::tasks::task::{SortDirection, TaskFilter, TaskSort, TaskStatus};
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiError, ErrorResponse};

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", post(create_task))
        .route("/detailed", get(list_tasks_detailed))
        .route("/basic", get(list_tasks_basic))
        .route("/unsigned", get(list_unassigned_tasks))
        .route("/titles/:title", get(get_task_by_title))
        .route(
            "/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/:id/status", patch(change_task_status))
        .route("/:id/users", patch(modify_user_assignment))
        .with_state(ctx)
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub user_id: Option<i64>,
    pub status: Option<TaskStatus>,
    pub page: Option<i64>,
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl TaskListQuery {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            user_id: self.user_id,
            status: self.status,
        }
    }

    fn sort(&self) -> TaskSort {
        TaskSort::new(self.sort, self.sort_direction)
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

#[utoipa::path(get, path = "/api/tasks/detailed", tag = "Tasks",
    params(
        ("user_id" = Option<i64>, Query, description = "Only tasks assigned to this user"),
        ("status" = Option<TaskStatus>, Query, description = "Only tasks in this status"),
        ("page" = Option<i64>, Query, description = "One-based page number"),
        ("sort" = Option<bool>, Query, description = "Order by deadline instead of id"),
        ("sort_direction" = Option<SortDirection>, Query, description = "ASC or DESC")
    ),
    responses((status = 200, body = [TaskDto]), (status = 401, body = ErrorResponse)))]
pub async fn list_tasks_detailed(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskDto>>, ApiError> {
    current.require(Capability::View)?;
    let Query(q) = query?;
    let page = PageRequest::from_client_page(q.page, ctx.cfg.page_size);
    let repo = ctx.task_repo();
    let tasks = ListTasks {
        repo: repo.as_ref(),
    }
    .detailed(&q.filter(), q.sort(), page)
    .await?;
    Ok(Json(tasks))
}

#[utoipa::path(get, path = "/api/tasks/basic", tag = "Tasks",
    params(
        ("user_id" = Option<i64>, Query, description = "Only tasks assigned to this user"),
        ("status" = Option<TaskStatus>, Query, description = "Only tasks in this status"),
        ("sort" = Option<bool>, Query, description = "Order by deadline instead of id"),
        ("sort_direction" = Option<SortDirection>, Query, description = "ASC or DESC")
    ),
    responses((status = 200, body = [TaskWithoutUserDto]), (status = 401, body = ErrorResponse)))]
pub async fn list_tasks_basic(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskWithoutUserDto>>, ApiError> {
    current.require(Capability::View)?;
    let Query(q) = query?;
    let repo = ctx.task_repo();
    let tasks = ListTasks {
        repo: repo.as_ref(),
    }
    .basic(&q.filter(), q.sort())
    .await?;
    Ok(Json(tasks))
}

#[utoipa::path(get, path = "/api/tasks/unsigned", tag = "Tasks",
    params(
        ("page" = Option<i64>, Query, description = "One-based page number"),
        ("sort" = Option<bool>, Query, description = "Order by deadline instead of id"),
        ("sort_direction" = Option<SortDirection>, Query, description = "ASC or DESC")
    ),
    responses((status = 200, body = [TaskWithoutUserDto]), (status = 401, body = ErrorResponse)))]
pub async fn list_unassigned_tasks(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskWithoutUserDto>>, ApiError> {
    current.require(Capability::View)?;
    let Query(q) = query?;
    let page = PageRequest::from_client_page(q.page, ctx.cfg.page_size);
    let repo = ctx.task_repo();
    let tasks = ListTasks {
        repo: repo.as_ref(),
    }
    .unassigned(q.sort(), page)
    .await?;
    Ok(Json(tasks))
}

#[utoipa::path(get, path = "/api/tasks/{id}", tag = "Tasks",
    params(("id" = i64, Path, description = "Task ID")),
    responses((status = 200, body = TaskDto), (status = 404, body = ErrorResponse)))]
pub async fn get_task(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    current.require(Capability::View)?;
    let Path(id) = id?;
    let repo = ctx.task_repo();
    let task = GetTask {
        repo: repo.as_ref(),
    }
    .by_id(id)
    .await?;
    Ok(Json(task))
}

#[utoipa::path(get, path = "/api/tasks/titles/{title}", tag = "Tasks",
    params(("title" = String, Path, description = "Exact task title")),
    responses((status = 200, body = TaskDto), (status = 404, body = ErrorResponse)))]
pub async fn get_task_by_title(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    title: Result<Path<String>, PathRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    current.require(Capability::View)?;
    let Path(title) = title?;
    let repo = ctx.task_repo();
    let task = GetTask {
        repo: repo.as_ref(),
    }
    .by_title(&title)
    .await?;
    Ok(Json(task))
}

#[utoipa::path(post, path = "/api/tasks", tag = "Tasks", request_body = TaskWithoutIdDto,
    responses(
        (status = 200, body = TaskDto),
        (status = 400, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ))]
pub async fn create_task(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    payload: Result<Json<TaskWithoutIdDto>, JsonRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    current.require(Capability::Edit)?;
    let Json(req) = payload?;
    let repo = ctx.task_repo();
    let task = CreateTask {
        repo: repo.as_ref(),
        today: today(),
    }
    .execute(&req)
    .await?;
    Ok(Json(task))
}

#[utoipa::path(put, path = "/api/tasks/{id}", tag = "Tasks", request_body = TaskWithoutIdDto,
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, body = TaskDto),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ))]
pub async fn update_task(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskWithoutIdDto>, JsonRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    current.require(Capability::Edit)?;
    let Path(id) = id?;
    let Json(req) = payload?;
    let repo = ctx.task_repo();
    let task = UpdateTask {
        repo: repo.as_ref(),
        today: today(),
    }
    .execute(id, &req)
    .await?;
    Ok(Json(task))
}

#[utoipa::path(patch, path = "/api/tasks/{id}/status", tag = "Tasks", request_body = TaskStatus,
    params(("id" = i64, Path, description = "Task ID")),
    responses((status = 200, body = TaskDto), (status = 404, body = ErrorResponse)))]
pub async fn change_task_status(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskStatus>, JsonRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    current.require(Capability::Edit)?;
    let Path(id) = id?;
    let Json(status) = payload?;
    let repo = ctx.task_repo();
    let task = ChangeStatus {
        repo: repo.as_ref(),
    }
    .execute(id, status)
    .await?;
    Ok(Json(task))
}

#[utoipa::path(patch, path = "/api/tasks/{id}/users", tag = "Tasks", request_body = UserTaskActionRequest,
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, body = TaskDto),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ))]
pub async fn modify_user_assignment(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserTaskActionRequest>, JsonRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    current.require(Capability::Edit)?;
    let Path(id) = id?;
    let Json(req) = payload?;
    let tasks = ctx.task_repo();
    let users = ctx.user_repo();
    let task = ModifyAssignment {
        tasks: tasks.as_ref(),
        users: users.as_ref(),
    }
    .execute(id, &req)
    .await?;
    Ok(Json(task))
}

#[utoipa::path(delete, path = "/api/tasks/{id}", tag = "Tasks",
    params(("id" = i64, Path, description = "Task ID")),
    responses((status = 200), (status = 404, body = ErrorResponse)))]
pub async fn delete_task(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    current.require(Capability::Edit)?;
    let Path(id) = id?;
    let repo = ctx.task_repo();
    DeleteTask {
        repo: repo.as_ref(),
    }
    .execute(id)
    .await?;
    Ok(StatusCode::OK)
}
