//! Entity operations behind the HTTP handlers.
//!
//! Every operation that mutates an owned resource receives the caller as an
//! explicit `AuthenticatedUser` and checks ownership after loading the
//! resource.

pub mod comments;
pub mod tasks;
pub mod users;
