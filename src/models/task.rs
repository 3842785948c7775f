use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::auth::guard::Owned;

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TaskInput {
    /// The task text. Must be between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
}

/// Partial update of a task. `user_id` is not part of it: a task's owner never changes.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// Identifier of the account that created the task.
    pub user_id: Uuid,
    pub description: String,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` owned by `user_id`, stamped with the current time.
    pub fn new(input: TaskInput, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Task {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}
