//! Core types for todoshare.
//!
//! This crate provides the pieces shared by the Google provider and the server:
//! - task, task list and contact types
//! - the task-sharing model (`sharing`) and task search (`search`)
//! - the `SessionStore` capability and a `Clock` for token expiry
//! - mock fixtures standing in for a real contacts provider

pub mod clock;
pub mod contact;
pub mod error;
pub mod fixtures;
pub mod outcome;
pub mod search;
pub mod settings;
pub mod sharing;
pub mod store;
pub mod task;

pub use clock::{Clock, ManualClock, SystemClock};
pub use contact::{Contact, Permission, SharedUser};
pub use error::{CoreError, CoreResult};
pub use outcome::{Outcome, Update};
pub use settings::IntegrationSettings;
pub use store::{FileStore, MemoryStore, SessionStore};
pub use task::{Attachment, Task, TaskList, Workspace};
