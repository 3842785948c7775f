//! HTTP surface. `config` is mounted under `/api` by the binary and by the
//! integration tests; `/health` lives outside it.

pub mod auth;
pub mod comments;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::{error, web};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Malformed or non-whitelisted JSON bodies answer 400 in the usual error shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::Deserialize(e) => e.to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(message).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login)
                .service(auth::refresh),
        )
        .service(
            web::scope("/users")
                .wrap(AuthMiddleware)
                .service(users::create_user)
                .service(users::get_users)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::create_task)
                .service(tasks::get_tasks)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        )
        .service(
            web::scope("/comments")
                .wrap(AuthMiddleware)
                .service(comments::create_comment)
                .service(comments::get_comments)
                .service(comments::get_comment)
                .service(comments::update_comment)
                .service(comments::delete_comment),
        );
}
