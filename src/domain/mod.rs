// src/domain/mod.rs
pub mod curriculum;
pub mod error;
pub mod question;
pub mod route;
pub mod session;

pub use error::{ApiError, DomainError, RouteError, StorageError};
pub use question::QuestionForm;
pub use route::{Route, View};
pub use session::{AuthStatus, SessionState};
