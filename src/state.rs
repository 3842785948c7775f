//! Shared application state, registered once as `web::Data<AppState>` and
//! read-only while requests are served.

use std::sync::Arc;
use std::time::Instant;

use crate::auth::{AuthService, PasswordHasher, TokenService};
use crate::config::Config;
use crate::store::{CommentStore, TaskStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub comments: Arc<dyn CommentStore>,
    pub auth: AuthService,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
    pub environment: String,
    pub started_at: Instant,
}

impl AppState {
    /// Builds the state around one store that serves users, tasks and comments.
    /// Signing keys are derived here, once.
    pub fn new<S>(store: Arc<S>, config: &Config) -> Self
    where
        S: UserStore + TaskStore + CommentStore + 'static,
    {
        let tokens = TokenService::from_config(&config.auth);
        let hasher = PasswordHasher::new(config.auth.bcrypt_cost);
        let users: Arc<dyn UserStore> = store.clone();

        Self {
            auth: AuthService::new(users.clone(), tokens.clone(), hasher),
            users,
            tasks: store.clone(),
            comments: store,
            tokens,
            hasher,
            environment: config.environment.clone(),
            started_at: Instant::now(),
        }
    }
}
