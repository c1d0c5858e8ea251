// src/app.rs
use crate::application::{AuthService, Navigation, Router, SessionStore};
use crate::domain::RouteError;
use crate::infrastructure::{ApiClient, Config, FileStorage, ReqwestTransport};
use crate::ports::{Storage, Transport};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Wires the store, the router and the API client together.
///
/// The router doubles as the API client's navigator so a 401 lands on `/login`.
pub struct App {
    pub session: Arc<SessionStore>,
    pub router: Arc<Router>,
    pub api: ApiClient,
}

impl App {
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn Storage>) -> Self {
        let session = Arc::new(SessionStore::restore(storage));
        let router = Arc::new(Router::default());
        let api = ApiClient::new(transport, session.clone(), router.clone());
        Self {
            session,
            router,
            api,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let storage_path = config.storage_path()?;
        debug!(?storage_path, base_url = %config.api.base_url, "Initialising client");

        let transport = ReqwestTransport::new(&config.api.base_url, config.api.timeout())?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(FileStorage::new(storage_path)),
        ))
    }

    pub fn auth(&self) -> AuthService<ApiClient> {
        AuthService::new(self.api.clone(), self.session.clone())
    }

    /// Guarded navigation against the persisted token.
    pub fn navigate(&self, path: &str) -> Result<Navigation, RouteError> {
        self.router.push(path, self.session.storage())
    }
}
