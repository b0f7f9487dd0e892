use axum::Router;
use axum::extract::MatchedPath;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::{auth, health, tasks, users};

#[derive(OpenApi)]
#[openapi(
        paths(
            crate::presentation::http::auth::register,
            crate::presentation::http::auth::authenticate,
            crate::presentation::http::auth::me,
            crate::presentation::http::users::list_users_detailed,
            crate::presentation::http::users::list_users_basic,
            crate::presentation::http::users::get_user,
            crate::presentation::http::users::get_current_user,
            crate::presentation::http::users::get_user_by_email,
            crate::presentation::http::users::update_user_data,
            crate::presentation::http::users::change_own_password,
            crate::presentation::http::users::change_password_as_admin,
            crate::presentation::http::users::delete_user,
            crate::presentation::http::tasks::list_tasks_detailed,
            crate::presentation::http::tasks::list_tasks_basic,
            crate::presentation::http::tasks::list_unassigned_tasks,
            crate::presentation::http::tasks::get_task,
            crate::presentation::http::tasks::get_task_by_title,
            crate::presentation::http::tasks::create_task,
            crate::presentation::http::tasks::update_task,
            crate::presentation::http::tasks::change_task_status,
            crate::presentation::http::tasks::modify_user_assignment,
            crate::presentation::http::tasks::delete_task,
            crate::presentation::http::health::health,
        ),
        components(schemas(
            crate::application::dto::users::RegisterRequest,
            crate::application::dto::users::AuthenticateRequest,
            crate::application::dto::users::AuthenticateResponse,
            crate::application::dto::users::UserDto,
            crate::application::dto::users::UserWithoutTaskDto,
            crate::application::dto::users::UserWithTaskIdsAndWithoutIdDto,
            crate::application::dto::users::UserPasswordUpdateDto,
            crate::application::dto::users::AdminPasswordUpdateDto,
            crate::application::dto::tasks::TaskDto,
            crate::application::dto::tasks::TaskWithoutUserDto,
            crate::application::dto::tasks::TaskWithoutIdDto,
            crate::application::dto::tasks::UserTaskActionRequest,
            crate::domain::users::user::Role,
            crate::domain::tasks::task::TaskStatus,
            crate::domain::tasks::task::SortDirection,
            crate::domain::tasks::task::AssignmentAction,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration and tokens"),
            (name = "Users", description = "User accounts"),
            (name = "Tasks", description = "Tasks and assignments"),
            (name = "Health", description = "System health checks")
        )
    )]
pub struct ApiDoc;

/// Every API route plus docs and request tracing. CORS is left to the caller.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", health::routes(ctx.clone()))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api/users", users::routes(ctx.clone()))
        .nest("/api/tasks", tasks::routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
