//! Registration and login.

use std::sync::Arc;

use super::password::PasswordHasher;
use super::token::TokenService;
use super::AuthResponse;
use crate::error::AppError;
use crate::models::{NewUser, Role};
use crate::store::UserStore;

/// Credential flows (register, login) and the session refresh flow.
#[derive(Clone)]
pub struct AuthService {
    pub(super) users: Arc<dyn UserStore>,
    pub(super) tokens: TokenService,
    hasher: PasswordHasher,
    /// Verified against when the email is unknown, so both login failures
    /// cost one bcrypt verification at the configured cost.
    decoy_hash: Option<String>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService, hasher: PasswordHasher) -> Self {
        let decoy_hash = match hasher.hash("decoy-password-for-unknown-accounts") {
            Ok(hash) => Some(hash),
            Err(e) => {
                log::error!("could not prepare decoy password hash: {}", e);
                None
            }
        };
        Self {
            users,
            tokens,
            hasher,
            decoy_hash,
        }
    }

    /// Creates an account and signs the caller in.
    ///
    /// A taken email is `DuplicateEmail`. The store enforces uniqueness too,
    /// so two concurrent registrations cannot both succeed.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthResponse, AppError> {
        if self.users.find_by_email(email).await?.is_some() {
            log::warn!("registration rejected: {} is already registered", email);
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(NewUser {
                email: email.to_string(),
                password_hash,
                role,
                task_id: None,
            })
            .await?;

        let tokens = self.tokens.issue_pair(&user)?;
        log::info!("registered user {} with role {}", user.id, user.role);

        Ok(AuthResponse {
            user: user.profile(),
            tokens,
        })
    }

    /// Checks credentials and issues a token pair.
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials` error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                if let Some(decoy) = &self.decoy_hash {
                    let _ = self.hasher.verify(password, decoy);
                }
                log::warn!("failed login for {}", email);
                return Err(AppError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            log::warn!("failed login for {}", email);
            return Err(AppError::InvalidCredentials);
        }

        let tokens = self.tokens.issue_pair(&user)?;
        log::info!("user {} logged in", user.id);

        Ok(AuthResponse {
            user: user.profile(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
