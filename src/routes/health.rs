use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

/// Health check endpoint
///
/// Reports uptime, environment and whether the store answers. Always 200;
/// a failed store ping shows up as `"database": "error"`.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    let database = match state.users.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            log::error!("health check: store ping failed: {}", e);
            "error"
        }
    };

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "uptime": state.started_at.elapsed().as_secs(),
        "database": database,
        "environment": state.environment,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::state;
    use actix_web::test;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(state()))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "connected");
        assert!(json["timestamp"].is_string());
        assert!(json["uptime"].is_u64());
    }
}
