// src/ports/navigator.rs

/// Target of forced redirects issued outside normal navigation.
pub trait Navigator: Send + Sync {
    /// Full reload at `path`. Navigation guards do not run.
    fn hard_redirect(&self, path: &str);
}
