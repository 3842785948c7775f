use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskcomments::routes::{self, health};
use taskcomments::store::{MemoryStore, PgStore};
use taskcomments::{AppState, Config};

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn build_state(config: &Config) -> io::Result<AppState> {
    match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .map_err(|e| startup_error("Failed to connect to database", e))?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| startup_error("Failed to run migrations", e))?;
            log::info!("using PostgreSQL store");
            Ok(AppState::new(Arc::new(PgStore::new(pool)), config))
        }
        None => {
            log::warn!("DATABASE_URL is not set; data lives in memory and is lost on exit");
            Ok(AppState::new(Arc::new(MemoryStore::new()), config))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let state = web::Data::new(build_state(&config).await?);

    log::info!(
        "Starting server at {} ({})",
        config.server_url(),
        config.environment
    );
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
