//! Role and ownership predicates of the authorization gate.
//!
//! Authentication happens in [`AuthMiddleware`](super::AuthMiddleware); by the
//! time these run the caller is an [`AuthenticatedUser`]. Handlers call
//! [`require_role`] first thing, and services call [`require_owner`] after
//! loading the resource they are about to mutate. No role bypasses the
//! ownership check.

use uuid::Uuid;

use super::extractors::AuthenticatedUser;
use crate::error::AppError;
use crate::models::Role;

/// A resource with an immutable creator.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Rejects with `Forbidden` unless the caller has exactly `role`.
pub fn require_role(user: &AuthenticatedUser, role: Role) -> Result<(), AppError> {
    if user.role == role {
        return Ok(());
    }
    log::warn!(
        "user {} with role {} denied an operation requiring role {}",
        user.id,
        user.role,
        role
    );
    Err(AppError::Forbidden(format!(
        "This operation requires the '{}' role",
        role
    )))
}

/// Rejects with `Forbidden` unless the caller created `resource`.
pub fn require_owner<R: Owned>(resource: &R, user: &AuthenticatedUser) -> Result<(), AppError> {
    if resource.owner_id() == user.id {
        return Ok(());
    }
    log::warn!(
        "user {} denied access to a resource owned by {}",
        user.id,
        resource.owner_id()
    );
    Err(AppError::Forbidden(
        "You can only modify resources you created".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        owner: Uuid,
    }

    impl Owned for Note {
        fn owner_id(&self) -> Uuid {
            self.owner
        }
    }

    fn caller(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "caller@example.com".to_string(),
            role,
        }
    }

    #[test_log::test]
    fn test_require_role() {
        assert!(require_role(&caller(Role::User), Role::User).is_ok());
        assert!(require_role(&caller(Role::Author), Role::Author).is_ok());
        assert!(matches!(
            require_role(&caller(Role::Author), Role::User),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            require_role(&caller(Role::User), Role::Author),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test_log::test]
    fn test_require_owner_applies_to_every_role() {
        for role in [Role::Author, Role::User] {
            let user = caller(role);
            let own = Note { owner: user.id };
            let foreign = Note {
                owner: Uuid::new_v4(),
            };

            assert!(require_owner(&own, &user).is_ok());
            assert!(matches!(
                require_owner(&foreign, &user),
                Err(AppError::Forbidden(_))
            ));
        }
    }
}
