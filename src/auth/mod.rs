pub mod credentials;
pub mod extractors;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod refresh;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Role, UserProfile};

// Re-export necessary items
pub use credentials::AuthService;
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenKind, TokenPair, TokenService};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    /// Email address for the new account. Compared case-sensitively.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
    /// Either `author` or `user`.
    pub role: Role,
}

/// Body of the token refresh request.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Response structure after successful registration or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let empty_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "secret1".to_string(),
            role: Role::User,
        };
        assert!(valid_register.validate().is_ok());

        let short_password_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "12345".to_string(),
            role: Role::Author,
        };
        assert!(short_password_register.validate().is_err());

        let unknown_role = serde_json::from_value::<RegisterRequest>(serde_json::json!({
            "email": "test@example.com",
            "password": "secret1",
            "role": "admin"
        }));
        assert!(unknown_role.is_err());
    }

    #[test]
    fn test_auth_response_wire_shape() {
        let response = AuthResponse {
            user: UserProfile {
                id: Uuid::nil(),
                email: "a@x.com".to_string(),
                role: Role::User,
            },
            tokens: TokenPair {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["user"]["email"], "a@x.com");
        assert_eq!(json["user"]["role"], "user");
        assert_eq!(json["access_token"], "access");
        assert_eq!(json["refresh_token"], "refresh");
        assert!(json["user"].get("password").is_none());
    }
}
