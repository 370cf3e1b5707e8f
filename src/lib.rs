// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Incident Admin: administrative client for the urban incident platform
//!
//! This crate provides a typed REST client, observable state stores and an
//! auth-gated router for administering citizen incident reports and the
//! catalogs (categories, cities, statuses) used to classify them.

pub mod config;
pub mod error;
pub mod icons;
pub mod models;
pub mod router;
pub mod services;
pub mod stores;
pub mod time_utils;

use config::Config;
use error::AppError;
use router::{BrowserLocation, Router, SessionExpiryRedirect};
use services::ApiClient;
use std::sync::Arc;
use stores::{AuthStore, CatalogsStore, IncidentsStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub location: BrowserLocation,
    pub api: ApiClient,
    pub auth: Arc<AuthStore>,
    pub catalogs: CatalogsStore,
    pub incidents: IncidentsStore,
    pub router: Router,
}

impl AppState {
    /// Wire the HTTP client, stores and router for `config`.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let location = BrowserLocation::new();
        let on_auth_failure = Arc::new(SessionExpiryRedirect::new(
            location.clone(),
            config.admin_path_prefix.clone(),
        ));
        let api = ApiClient::new(&config, on_auth_failure)?;

        let auth = Arc::new(AuthStore::new(api.clone()));
        let catalogs = CatalogsStore::new(api.clone());
        let incidents = IncidentsStore::new(api.clone(), config.description_encoding);
        let router = Router::new(auth.clone(), location.clone());

        Ok(Self {
            config,
            location,
            api,
            auth,
            catalogs,
            incidents,
            router,
        })
    }
}
