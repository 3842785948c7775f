use crate::{
    auth::{guard::require_role, AuthenticatedUser},
    error::AppError,
    models::{Role, TaskInput, TaskUpdate},
    services::tasks as service,
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `description` (required): 1 to 1000 characters.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the caller's role is not `user`.
/// - `422 Unprocessable Entity`: If the description fails validation.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    require_role(&user, Role::User)?;
    task_data.validate()?;

    let task = service::create_task(&state, task_data.into_inner(), &user).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves every task, newest first.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = service::list_tasks(&state).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = service::get_task(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates the description of a task.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task`.
/// - `403 Forbidden`: If the caller does not own the task.
/// - `404 Not Found`: If no task has this ID.
#[patch("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task =
        service::update_task(&state, path.into_inner(), task_data.into_inner(), &user).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task and all of its comments.
///
/// ## Responses:
/// - `204 No Content`: The task was deleted.
/// - `403 Forbidden`: If the caller does not own the task.
/// - `404 Not Found`: If no task has this ID.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    service::delete_task(&state, path.into_inner(), &user).await?;
    Ok(HttpResponse::NoContent().finish())
}
