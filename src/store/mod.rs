//! Persistence collaborators.
//!
//! The auth core and the CRUD services only talk to these traits. Two
//! implementations exist: [`PgStore`] on PostgreSQL and [`MemoryStore`], which
//! keeps everything in process and backs the tests and the database-less mode.
//!
//! Both enforce email uniqueness themselves: `create` and `save` return
//! `AppError::DuplicateEmail` when another account already uses the email,
//! whatever pre-checks the caller made.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Comment, NewUser, Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    /// Persists every mutable field of `user` and bumps `updated_at`.
    async fn save(&self, user: User) -> Result<User, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    /// Deletes the account together with the tasks and comments it created.
    /// Returns `false` when no such account exists.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    /// Cheap round-trip used by the health probe.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;
    async fn create_task(&self, task: Task) -> Result<Task, AppError>;
    /// All tasks, newest first.
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;
    async fn save_task(&self, task: Task) -> Result<Task, AppError>;
    /// Deletes the task and its comments. Returns `false` when no such task exists.
    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_comment_by_id(&self, id: Uuid) -> Result<Option<Comment>, AppError>;
    async fn create_comment(&self, comment: Comment) -> Result<Comment, AppError>;
    /// Comments of one task, newest first.
    async fn list_comments_for_task(&self, task_id: Uuid) -> Result<Vec<Comment>, AppError>;
    async fn save_comment(&self, comment: Comment) -> Result<Comment, AppError>;
    async fn delete_comment(&self, id: Uuid) -> Result<bool, AppError>;
}
