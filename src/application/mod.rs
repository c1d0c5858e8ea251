// src/application/mod.rs
pub mod auth;
pub mod router;
pub mod store;

pub use auth::AuthService;
pub use router::{Location, Navigation, Router};
pub use store::{Mutation, SessionStore};
