use uuid::Uuid;

use crate::auth::guard::require_owner;
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};
use crate::state::AppState;

pub async fn create_task(
    state: &AppState,
    input: TaskInput,
    caller: &AuthenticatedUser,
) -> Result<Task, AppError> {
    let task = state.tasks.create_task(Task::new(input, caller.id)).await?;
    log::info!("user {} created task {}", caller.id, task.id);
    Ok(task)
}

pub async fn list_tasks(state: &AppState) -> Result<Vec<Task>, AppError> {
    state.tasks.list_tasks().await
}

pub async fn get_task(state: &AppState, id: Uuid) -> Result<Task, AppError> {
    state
        .tasks
        .find_task_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))
}

/// Applies `update` to a task the caller owns. Only the description is mutable.
pub async fn update_task(
    state: &AppState,
    id: Uuid,
    update: TaskUpdate,
    caller: &AuthenticatedUser,
) -> Result<Task, AppError> {
    let mut task = get_task(state, id).await?;
    require_owner(&task, caller)?;

    if let Some(description) = update.description {
        task.description = description;
    }
    state.tasks.save_task(task).await
}

/// Deletes a task the caller owns, together with its comments.
pub async fn delete_task(
    state: &AppState,
    id: Uuid,
    caller: &AuthenticatedUser,
) -> Result<(), AppError> {
    let task = get_task(state, id).await?;
    require_owner(&task, caller)?;

    if !state.tasks.delete_task(id).await? {
        return Err(AppError::NotFound(format!("Task {} not found", id)));
    }
    log::info!("user {} deleted task {}", caller.id, id);
    Ok(())
}
