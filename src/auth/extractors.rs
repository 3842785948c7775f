use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use super::token::Claims;
use crate::error::AppError;
use crate::models::Role;

/// Identity of the caller, decoded from its access token.
///
/// Built from the `Claims` that `AuthMiddleware` stores in the request
/// extensions and handed explicitly to every operation that needs to know who
/// is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(claims.into())),
            None => {
                // Only reachable on a route not wrapped by AuthMiddleware.
                let err = AppError::Unauthenticated("Authentication required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
