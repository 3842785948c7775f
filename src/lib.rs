#![doc = "The `taskcomments` library crate."]
#![doc = ""]
#![doc = "Accounts, tasks and task comments behind role-gated REST endpoints. The"]
#![doc = "`auth` module holds the password hasher, the token service, the credential"]
#![doc = "and refresh flows and the authorization gate; `services` holds the entity"]
#![doc = "operations and `store` the persistence collaborators they run against."]
#![doc = "The binary (`main.rs`) wires configuration, store and routes together."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;
