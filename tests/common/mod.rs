#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use taskcomments::auth::AuthResponse;
use taskcomments::routes::{self, health};
use taskcomments::store::MemoryStore;
use taskcomments::{AppState, Config};

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some("integration_access_secret".to_string()),
        "JWT_REFRESH_SECRET" => Some("integration_refresh_secret".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        "APP_ENV" => Some("test".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), &test_config())
}

/// The full application, as `main` mounts it, over a fresh in-memory store.
pub async fn init_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let _ = env_logger::builder().is_test(true).try_init();
    test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await
}

/// Sends `req` and returns the status with the parsed JSON body (`Null` when empty).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> (StatusCode, Value) {
    let resp = match app.call(req).await {
        Ok(resp) => resp,
        // errors raised by middleware surface here instead of as a response
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let bytes = actix_web::body::to_bytes(resp.into_body())
                .await
                .unwrap_or_default();
            return (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null));
        }
    };
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            panic!(
                "response is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, body)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
    role: &str,
) -> AuthResponse {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": password, "role": role }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    serde_json::from_value(body).expect("AuthResponse body")
}
