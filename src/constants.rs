// src/constants.rs
//
// Application-wide constants shared by the router, the store and the API client.

/// Storage key holding the raw bearer token.
///
/// Used in: `application/store.rs`, `application/router.rs`
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialised user profile.
///
/// Used in: `application/store.rs`
pub const USER_KEY: &str = "user";

/// Where unauthenticated navigation and 401 responses end up.
pub const LOGIN_PATH: &str = "/login";

/// API root used when neither the config file nor the environment name one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the API root.
pub const API_URL_ENV: &str = "MISTAKEBOOK_API_URL";

/// Per-request timeout in milliseconds. No retries are made after it expires.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Shown when a login fails without a server-supplied message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
