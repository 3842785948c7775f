use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{UserInput, UserProfile, UserUpdate},
    services::users as service,
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Creates an account on behalf of an authenticated caller.
///
/// No tokens are issued; the new account logs in on its own.
///
/// ## Responses:
/// - `201 Created`: the new account's profile.
/// - `409 Conflict`: the email is already registered.
/// - `404 Not Found`: `task_id` references no task.
#[post("")]
pub async fn create_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;
    let created = service::create_user(&state, user_data.into_inner(), &user).await?;
    Ok(HttpResponse::Created().json(created.profile()))
}

#[get("")]
pub async fn get_users(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profiles: Vec<UserProfile> = service::list_users(&state)
        .await?
        .iter()
        .map(|u| u.profile())
        .collect();
    Ok(HttpResponse::Ok().json(profiles))
}

#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let found = service::get_user(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found.profile()))
}

/// Updates the caller's own account.
///
/// Only `email`, `password` and `task_id` are accepted; any other field,
/// `role` included, is rejected with `400 Bad Request`.
#[patch("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    update_data: web::Json<UserUpdate>,
) -> Result<impl Responder, AppError> {
    update_data.validate()?;
    let updated =
        service::update_user(&state, path.into_inner(), update_data.into_inner(), &user).await?;
    Ok(HttpResponse::Ok().json(updated.profile()))
}

#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    service::delete_user(&state, path.into_inner(), &user).await?;
    Ok(HttpResponse::NoContent().finish())
}
