use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::{get, patch},
};
use serde::Deserialize;

use crate::application::access::Capability;
use crate::application::dto::users::{
    AdminPasswordUpdateDto, UserDto, UserPasswordUpdateDto, UserWithTaskIdsAndWithoutIdDto,
    UserWithoutTaskDto,
};
use crate::application::use_cases::users::change_password::ChangePassword;
use crate::application::use_cases::users::delete_user::DeleteUser;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::update_profile::UpdateProfile;
use crate::bootstrap::app_context::AppContext;
use crate::domain::paging::PageRequest;
use crate::domain::users::user::UserFilter;
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiError, ErrorResponse};

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", patch(update_user_data))
        .route("/detailed", get(list_users_detailed))
        .route("/basic", get(list_users_basic))
        .route("/current-user", get(get_current_user))
        .route("/emails/:email", get(get_user_by_email))
        .route("/change-password", patch(change_own_password))
        .route("/change-password/admin", patch(change_password_as_admin))
        .route("/:id", get(get_user).delete(delete_user))
        .with_state(ctx)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub page: Option<i64>,
}

impl UserListQuery {
    fn filter(&self) -> UserFilter {
        UserFilter {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[utoipa::path(get, path = "/api/users/detailed", tag = "Users",
    params(
        ("firstName" = Option<String>, Query, description = "Exact first name"),
        ("lastName" = Option<String>, Query, description = "Exact last name"),
        ("page" = Option<i64>, Query, description = "One-based page number")
    ),
    responses((status = 200, body = [UserDto]), (status = 401, body = ErrorResponse)))]
pub async fn list_users_detailed(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    current.require(Capability::View)?;
    let Query(q) = query?;
    let page = PageRequest::from_client_page(q.page, ctx.cfg.page_size);
    let repo = ctx.user_repo();
    let users = ListUsers {
        repo: repo.as_ref(),
    }
    .detailed(&q.filter(), page)
    .await?;
    Ok(Json(users))
}

#[utoipa::path(get, path = "/api/users/basic", tag = "Users",
    params(
        ("firstName" = Option<String>, Query, description = "Exact first name"),
        ("lastName" = Option<String>, Query, description = "Exact last name")
    ),
    responses((status = 200, body = [UserWithoutTaskDto]), (status = 401, body = ErrorResponse)))]
pub async fn list_users_basic(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> Result<Json<Vec<UserWithoutTaskDto>>, ApiError> {
    current.require(Capability::View)?;
    let Query(q) = query?;
    let repo = ctx.user_repo();
    let users = ListUsers {
        repo: repo.as_ref(),
    }
    .basic(&q.filter())
    .await?;
    Ok(Json(users))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses((status = 200, body = UserDto), (status = 404, body = ErrorResponse)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserDto>, ApiError> {
    current.require(Capability::View)?;
    let Path(id) = id?;
    let repo = ctx.user_repo();
    let user = GetUser {
        repo: repo.as_ref(),
    }
    .by_id(id)
    .await?;
    Ok(Json(user))
}

#[utoipa::path(get, path = "/api/users/current-user", tag = "Users",
    responses((status = 200, body = UserDto), (status = 401, body = ErrorResponse)))]
pub async fn get_current_user(
    State(ctx): State<AppContext>,
    current: CurrentUser,
) -> Result<Json<UserDto>, ApiError> {
    let me = current.require(Capability::Edit)?;
    let repo = ctx.user_repo();
    let user = GetUser {
        repo: repo.as_ref(),
    }
    .by_id(me.id)
    .await?;
    Ok(Json(user))
}

#[utoipa::path(get, path = "/api/users/emails/{email}", tag = "Users",
    params(("email" = String, Path, description = "Email address")),
    responses((status = 200, body = UserDto), (status = 404, body = ErrorResponse)))]
pub async fn get_user_by_email(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    email: Result<Path<String>, PathRejection>,
) -> Result<Json<UserDto>, ApiError> {
    current.require(Capability::View)?;
    let Path(email) = email?;
    let repo = ctx.user_repo();
    let user = GetUser {
        repo: repo.as_ref(),
    }
    .by_email(&email)
    .await?;
    Ok(Json(user))
}

#[utoipa::path(patch, path = "/api/users", tag = "Users", request_body = UserWithTaskIdsAndWithoutIdDto,
    responses(
        (status = 200, body = UserDto),
        (status = 400, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ))]
pub async fn update_user_data(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    payload: Result<Json<UserWithTaskIdsAndWithoutIdDto>, JsonRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let me = current.require(Capability::Edit)?;
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    let user = UpdateProfile {
        repo: repo.as_ref(),
    }
    .execute(me, &req)
    .await?;
    Ok(Json(user))
}

#[utoipa::path(patch, path = "/api/users/change-password", tag = "Users", request_body = UserPasswordUpdateDto,
    responses((status = 200, body = String), (status = 400, body = ErrorResponse)))]
pub async fn change_own_password(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    payload: Result<Json<UserPasswordUpdateDto>, JsonRejection>,
) -> Result<String, ApiError> {
    let me = current.require(Capability::Edit)?;
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    ChangePassword {
        repo: repo.as_ref(),
    }
    .by_user(me, &req)
    .await?;
    Ok("Password changed successfully".to_string())
}

#[utoipa::path(patch, path = "/api/users/change-password/admin", tag = "Users", request_body = AdminPasswordUpdateDto,
    responses(
        (status = 200, body = String),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ))]
pub async fn change_password_as_admin(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    payload: Result<Json<AdminPasswordUpdateDto>, JsonRejection>,
) -> Result<String, ApiError> {
    current.require(Capability::Administer)?;
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    ChangePassword {
        repo: repo.as_ref(),
    }
    .by_admin(&req)
    .await?;
    Ok("Password changed successfully".to_string())
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, body = String),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<String, ApiError> {
    current.require(Capability::Administer)?;
    let Path(id) = id?;
    let repo = ctx.user_repo();
    DeleteUser {
        repo: repo.as_ref(),
    }
    .execute(id)
    .await?;
    Ok("User removed successfully".to_string())
}
