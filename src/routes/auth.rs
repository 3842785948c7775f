use crate::{
    auth::{LoginRequest, RefreshRequest, RegisterRequest},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates the account and returns its profile with a fresh token pair.
/// A taken email answers `409 Conflict`.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let RegisterRequest {
        email,
        password,
        role,
    } = register_data.into_inner();

    let response = state.auth.register(&email, &password, role).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Login user
///
/// Unknown email and wrong password are indistinguishable to the client.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let response = state
        .auth
        .login(&login_data.email, &login_data.password)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Exchange a refresh token for a new token pair.
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    refresh_data: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    refresh_data.validate()?;

    let tokens = state.auth.refresh(&refresh_data.refresh_token).await?;
    Ok(HttpResponse::Ok().json(tokens))
}
