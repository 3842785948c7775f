use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::auth::guard::Owned;

/// Role attached to an account.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May write comments, may not create tasks.
    Author,
    /// May create tasks, may not write comments.
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Author => write!(f, "author"),
            Role::User => write!(f, "user"),
        }
    }
}

/// An account as stored.
///
/// The password hash is never serialized, so a `User` can be returned from
/// handlers directly.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Optional task this account is attached to.
    pub task_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public identity returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// An account about to be inserted. Holds the hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub task_id: Option<Uuid>,
}

/// Payload of the administrative user-create endpoint.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: Role,
    pub task_id: Option<Uuid>,
}

/// Self-service update payload.
///
/// Only these fields can change through an update; role, id and timestamps
/// are rejected at deserialization.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub task_id: Option<Uuid>,
}

impl User {
    pub fn new(input: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            task_id: input.task_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl Owned for User {
    fn owner_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample_user() -> User {
        User::new(NewUser {
            email: "test@example.com".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            role: Role::Author,
            task_id: None,
        })
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["role"], "author");
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"author\"").unwrap(),
            Role::Author
        );
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
        assert_eq!(Role::Author.to_string(), "author");
    }

    #[test]
    fn test_user_input_validation() {
        let input = UserInput {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            role: Role::User,
            task_id: None,
        };
        assert!(input.validate().is_ok());

        let input = UserInput {
            email: "invalid-email".to_string(),
            password: "password123".to_string(),
            role: Role::User,
            task_id: None,
        };
        assert!(input.validate().is_err());

        let input = UserInput {
            email: "test@example.com".to_string(),
            password: "short".to_string(),
            role: Role::User,
            task_id: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_rejects_role_field() {
        let result = serde_json::from_value::<UserUpdate>(serde_json::json!({
            "role": "author"
        }));
        assert!(result.is_err());

        let update: UserUpdate =
            serde_json::from_value(serde_json::json!({ "email": "new@example.com" })).unwrap();
        assert_eq!(update.email.as_deref(), Some("new@example.com"));
        assert!(update.password.is_none());
    }
}
