// src/ports/mod.rs
pub mod navigator;
pub mod storage;
pub mod transport;

pub use navigator::Navigator;
pub use storage::Storage;
pub use transport::{ApiRequest, FormPart, Method, RawResponse, RequestBody, Transport};
