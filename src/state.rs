//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    auth::AuthProvider, catalog::Catalog, config::Config, session::SessionStore,
    simulation::Pipeline,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Bundled problem catalog
    pub catalog: Catalog,

    /// Live practice sessions
    pub sessions: SessionStore,

    /// Generator, executor and sampler shared by every session
    pub pipeline: Pipeline,

    /// Auth collaborator
    pub auth: Arc<dyn AuthProvider>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        catalog: Catalog,
        pipeline: Pipeline,
        auth: Arc<dyn AuthProvider>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                sessions: SessionStore::new(),
                pipeline,
                auth,
                config,
            }),
        }
    }

    /// Get a reference to the problem catalog
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Get a reference to the simulated pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }

    /// Get a reference to the auth provider
    pub fn auth(&self) -> &dyn AuthProvider {
        self.inner.auth.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
