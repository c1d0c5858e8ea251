// src/infrastructure/mod.rs
pub mod api;
pub mod config;
pub mod http;
pub mod storage;

pub use api::ApiClient;
pub use config::Config;
pub use http::ReqwestTransport;
pub use storage::{FileStorage, MemoryStorage};
