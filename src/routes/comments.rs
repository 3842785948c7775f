use crate::{
    auth::{guard::require_role, AuthenticatedUser},
    error::AppError,
    models::{CommentInput, CommentQuery, CommentUpdate, Role},
    services::comments as service,
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Comments on an existing task. Only `author` accounts may comment.
///
/// ## Responses:
/// - `201 Created`: Returns the new `Comment`.
/// - `403 Forbidden`: If the caller's role is not `author`.
/// - `404 Not Found`: If `task_id` references no task.
#[post("")]
pub async fn create_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    comment_data: web::Json<CommentInput>,
) -> Result<impl Responder, AppError> {
    require_role(&user, Role::Author)?;
    comment_data.validate()?;

    let comment = service::create_comment(&state, comment_data.into_inner(), &user).await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Lists the comments of one task, newest first.
///
/// ## Query Parameters:
/// - `task_id` (required): the task whose comments are listed.
#[get("")]
pub async fn get_comments(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    query: web::Query<CommentQuery>,
) -> Result<impl Responder, AppError> {
    let comments = service::list_comments(&state, query.task_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[get("/{id}")]
pub async fn get_comment(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let comment = service::get_comment(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[patch("/{id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    comment_data: web::Json<CommentUpdate>,
) -> Result<impl Responder, AppError> {
    comment_data.validate()?;

    let comment =
        service::update_comment(&state, path.into_inner(), comment_data.into_inner(), &user)
            .await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[delete("/{id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    service::delete_comment(&state, path.into_inner(), &user).await?;
    Ok(HttpResponse::NoContent().finish())
}
