use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CommentStore, TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{Comment, NewUser, Task, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    tasks: HashMap<Uuid, Task>,
    comments: HashMap<Uuid, Comment>,
}

/// In-process store with the same constraints as the PostgreSQL schema:
/// unique emails, tasks cascading to comments, accounts cascading to what
/// they created.
///
/// A single lock guards all tables, so the uniqueness check and the insert
/// happen atomically.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<Utc>,
{
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        let user = User::new(user);
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, mut user: User) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(AppError::NotFound("User not found".into()));
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AppError::DuplicateEmail);
        }
        user.updated_at = Utc::now();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = self.tables.read().await.users.values().cloned().collect();
        Ok(newest_first(users, |u: &User| u.created_at))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        let owned_tasks: Vec<Uuid> = tables
            .tasks
            .values()
            .filter(|t| t.user_id == id)
            .map(|t| t.id)
            .collect();
        tables.tasks.retain(|_, t| t.user_id != id);
        tables
            .comments
            .retain(|_, c| c.user_id != id && !owned_tasks.contains(&c.task_id));
        for user in tables.users.values_mut() {
            if user.task_id.map_or(false, |t| owned_tasks.contains(&t)) {
                user.task_id = None;
            }
        }
        Ok(true)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn create_task(&self, task: Task) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&task.user_id) {
            return Err(AppError::NotFound("User not found".into()));
        }
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = self.tables.read().await.tasks.values().cloned().collect();
        Ok(newest_first(tasks, |t: &Task| t.created_at))
    }

    async fn save_task(&self, mut task: Task) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        match tables.tasks.get_mut(&task.id) {
            Some(stored) => {
                task.updated_at = Utc::now();
                stored.description = task.description.clone();
                stored.updated_at = task.updated_at;
                Ok(stored.clone())
            }
            None => Err(AppError::NotFound("Task not found".into())),
        }
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.tasks.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, c| c.task_id != id);
        for user in tables.users.values_mut() {
            if user.task_id == Some(id) {
                user.task_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn find_comment_by_id(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.tasks.contains_key(&comment.task_id) {
            return Err(AppError::NotFound("Task not found".into()));
        }
        if !tables.users.contains_key(&comment.user_id) {
            return Err(AppError::NotFound("User not found".into()));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_comments_for_task(&self, task_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let comments = self
            .tables
            .read()
            .await
            .comments
            .values()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect();
        Ok(newest_first(comments, |c: &Comment| c.created_at))
    }

    async fn save_comment(&self, comment: Comment) -> Result<Comment, AppError> {
        let mut tables = self.tables.write().await;
        match tables.comments.get_mut(&comment.id) {
            Some(stored) => {
                stored.text = comment.text;
                stored.updated_at = Utc::now();
                Ok(stored.clone())
            }
            None => Err(AppError::NotFound("Comment not found".into())),
        }
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }
}
