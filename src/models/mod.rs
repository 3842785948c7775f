pub mod comment;
pub mod task;
pub mod user;

pub use comment::{Comment, CommentInput, CommentQuery, CommentUpdate};
pub use task::{Task, TaskInput, TaskUpdate};
pub use user::{NewUser, Role, User, UserInput, UserProfile, UserUpdate};
