use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CommentStore, TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{Comment, NewUser, Task, User};

const USER_COLUMNS: &str = "id, email, password_hash, role, task_id, created_at, updated_at";
const TASK_COLUMNS: &str = "id, user_id, description, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, task_id, user_id, text, created_at, updated_at";

/// PostgreSQL-backed store. Uniqueness and cascades are enforced by the
/// schema in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let user = User::new(user);
        // a unique violation on users.email maps to AppError::DuplicateEmail
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, email, password_hash, role, task_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.task_id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        let saved = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET email = $2, password_hash = $3, role = $4, task_id = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.task_id)
        .fetch_optional(&self.pool)
        .await?;
        saved.ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn create_task(&self, task: Task) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, user_id, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.id)
        .bind(task.user_id)
        .bind(&task.description)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks ORDER BY created_at DESC",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn save_task(&self, task: Task) -> Result<Task, AppError> {
        // user_id is deliberately absent from the SET list
        let saved = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET description = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.id)
        .bind(&task.description)
        .fetch_optional(&self.pool)
        .await?;
        saved.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn find_comment_by_id(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments WHERE id = $1",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, AppError> {
        let created = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (id, task_id, user_id, text, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            COMMENT_COLUMNS
        ))
        .bind(comment.id)
        .bind(comment.task_id)
        .bind(comment.user_id)
        .bind(&comment.text)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn list_comments_for_task(&self, task_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments WHERE task_id = $1 ORDER BY created_at DESC",
            COMMENT_COLUMNS
        ))
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn save_comment(&self, comment: Comment) -> Result<Comment, AppError> {
        let saved = sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET text = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            COMMENT_COLUMNS
        ))
        .bind(comment.id)
        .bind(&comment.text)
        .fetch_optional(&self.pool)
        .await?;
        saved.ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
