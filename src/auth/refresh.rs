//! Session refresh: verify, reload, reissue.

use super::credentials::AuthService;
use super::token::{TokenKind, TokenPair};
use crate::error::AppError;

impl AuthService {
    /// Exchanges a refresh token for a brand-new access/refresh pair.
    ///
    /// The account is reloaded from the store and the new pair carries its
    /// current email and role, not the ones embedded in the old token. A
    /// deleted account yields `InvalidToken`, the same as a bad signature.
    ///
    /// Earlier refresh tokens are not revoked and stay usable until they
    /// expire.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;

        let user = match self.users.find_by_id(claims.sub).await? {
            Some(user) => user,
            None => {
                log::warn!("refresh rejected: user {} no longer exists", claims.sub);
                return Err(AppError::InvalidToken);
            }
        };

        let tokens = self.tokens.issue_pair(&user)?;
        log::info!("refreshed session of user {}", user.id);
        Ok(tokens)
    }
}
