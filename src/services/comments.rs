use uuid::Uuid;

use crate::auth::guard::require_owner;
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{Comment, CommentInput, CommentUpdate};
use crate::state::AppState;

async fn ensure_task_exists(state: &AppState, task_id: Uuid) -> Result<(), AppError> {
    match state.tasks.find_task_by_id(task_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("Task {} not found", task_id))),
    }
}

/// Attaches a new comment written by `caller` to an existing task.
pub async fn create_comment(
    state: &AppState,
    input: CommentInput,
    caller: &AuthenticatedUser,
) -> Result<Comment, AppError> {
    ensure_task_exists(state, input.task_id).await?;

    let comment = state
        .comments
        .create_comment(Comment::new(input, caller.id))
        .await?;
    log::info!(
        "user {} commented on task {} ({})",
        caller.id,
        comment.task_id,
        comment.id
    );
    Ok(comment)
}

pub async fn list_comments(state: &AppState, task_id: Uuid) -> Result<Vec<Comment>, AppError> {
    ensure_task_exists(state, task_id).await?;
    state.comments.list_comments_for_task(task_id).await
}

pub async fn get_comment(state: &AppState, id: Uuid) -> Result<Comment, AppError> {
    state
        .comments
        .find_comment_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))
}

/// Edits a comment. Only its author may do so, regardless of role.
pub async fn update_comment(
    state: &AppState,
    id: Uuid,
    update: CommentUpdate,
    caller: &AuthenticatedUser,
) -> Result<Comment, AppError> {
    let mut comment = get_comment(state, id).await?;
    require_owner(&comment, caller)?;

    if let Some(text) = update.text {
        comment.text = text;
    }
    state.comments.save_comment(comment).await
}

/// Deletes a comment. Only its author may do so, regardless of role.
pub async fn delete_comment(
    state: &AppState,
    id: Uuid,
    caller: &AuthenticatedUser,
) -> Result<(), AppError> {
    let comment = get_comment(state, id).await?;
    require_owner(&comment, caller)?;

    if !state.comments.delete_comment(id).await? {
        return Err(AppError::NotFound(format!("Comment {} not found", id)));
    }
    log::info!("user {} deleted comment {}", caller.id, id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, TaskInput};
    use crate::services::tasks::create_task;
    use crate::services::test_support::{account, state};

    #[actix_rt::test]
    async fn test_comment_on_missing_task() {
        let state = state();
        let author = account(&state, "author@x.com", Role::Author).await;

        let input = CommentInput {
            task_id: Uuid::new_v4(),
            text: "hello".to_string(),
        };
        assert!(matches!(
            create_comment(&state, input, &author).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            list_comments(&state, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_only_the_author_edits_or_deletes() {
        let state = state();
        let owner = account(&state, "owner@x.com", Role::User).await;
        let author = account(&state, "author@x.com", Role::Author).await;
        let other_author = account(&state, "other@x.com", Role::Author).await;

        let task = create_task(
            &state,
            TaskInput {
                description: "task".to_string(),
            },
            &owner,
        )
        .await
        .unwrap();
        let comment = create_comment(
            &state,
            CommentInput {
                task_id: task.id,
                text: "first".to_string(),
            },
            &author,
        )
        .await
        .unwrap();

        // neither another author nor the task owner may touch it
        for intruder in [&other_author, &owner] {
            let update = CommentUpdate {
                text: Some("edited".to_string()),
            };
            assert!(matches!(
                update_comment(&state, comment.id, update, intruder).await,
                Err(AppError::Forbidden(_))
            ));
            assert!(matches!(
                delete_comment(&state, comment.id, intruder).await,
                Err(AppError::Forbidden(_))
            ));
        }

        let update = CommentUpdate {
            text: Some("edited".to_string()),
        };
        let edited = update_comment(&state, comment.id, update, &author)
            .await
            .unwrap();
        assert_eq!(edited.text, "edited");
        assert_eq!(edited.user_id, author.id);

        delete_comment(&state, comment.id, &author).await.unwrap();
        assert!(list_comments(&state, task.id).await.unwrap().is_empty());
    }
}
