use uuid::Uuid;

use crate::auth::guard::require_owner;
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{NewUser, User, UserInput, UserUpdate};
use crate::state::AppState;

async fn ensure_email_free(state: &AppState, email: &str) -> Result<(), AppError> {
    if state.users.find_by_email(email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }
    Ok(())
}

async fn ensure_task_exists(state: &AppState, task_id: Option<Uuid>) -> Result<(), AppError> {
    if let Some(task_id) = task_id {
        if state.tasks.find_task_by_id(task_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Task {} not found", task_id)));
        }
    }
    Ok(())
}

/// Administrative account creation. Issues no tokens.
pub async fn create_user(
    state: &AppState,
    input: UserInput,
    caller: &AuthenticatedUser,
) -> Result<User, AppError> {
    ensure_email_free(state, &input.email).await?;
    ensure_task_exists(state, input.task_id).await?;

    let password_hash = state.hasher.hash(&input.password)?;
    let user = state
        .users
        .create(NewUser {
            email: input.email,
            password_hash,
            role: input.role,
            task_id: input.task_id,
        })
        .await?;
    log::info!("user {} created account {}", caller.id, user.id);
    Ok(user)
}

pub async fn list_users(state: &AppState) -> Result<Vec<User>, AppError> {
    state.users.list().await
}

pub async fn get_user(state: &AppState, id: Uuid) -> Result<User, AppError> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

/// Self-service update of the whitelisted account fields.
///
/// A changed email is checked for uniqueness, a new password is hashed.
/// Role, id and timestamps cannot be changed here.
pub async fn update_user(
    state: &AppState,
    id: Uuid,
    update: UserUpdate,
    caller: &AuthenticatedUser,
) -> Result<User, AppError> {
    let mut user = get_user(state, id).await?;
    require_owner(&user, caller)?;

    if let Some(email) = update.email {
        if email != user.email {
            ensure_email_free(state, &email).await?;
            user.email = email;
        }
    }
    if let Some(password) = update.password {
        user.password_hash = state.hasher.hash(&password)?;
    }
    if update.task_id.is_some() {
        ensure_task_exists(state, update.task_id).await?;
        user.task_id = update.task_id;
    }

    let user = state.users.save(user).await?;
    log::info!("user {} updated their account", user.id);
    Ok(user)
}

/// Deletes the caller's own account and everything it created.
pub async fn delete_user(
    state: &AppState,
    id: Uuid,
    caller: &AuthenticatedUser,
) -> Result<(), AppError> {
    let user = get_user(state, id).await?;
    require_owner(&user, caller)?;

    if !state.users.delete(id).await? {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }
    log::info!("user {} deleted their account", id);
    Ok(())
}
