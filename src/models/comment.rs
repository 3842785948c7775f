use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::auth::guard::Owned;

/// A comment attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    /// Task the comment belongs to. Deleting the task deletes the comment.
    pub task_id: Uuid,
    /// Account that wrote the comment; the only account allowed to edit or delete it.
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CommentInput {
    #[serde(alias = "taskId")]
    pub task_id: Uuid,
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CommentUpdate {
    #[validate(length(min = 1, max = 1000))]
    pub text: Option<String>,
}

/// Query string of the comment listing endpoint.
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    #[serde(alias = "taskId")]
    pub task_id: Uuid,
}

impl Comment {
    pub fn new(input: CommentInput, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            task_id: input.task_id,
            user_id,
            text: input.text,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}
