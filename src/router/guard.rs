// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation guard: auth and role checks run before every transition.

use super::location::Location;
use super::routes::{RouteRecord, DASHBOARD_PATH, HOME_PATH, LOGIN_PATH};
use crate::stores::AuthStore;
use std::sync::Arc;

/// Application name used in document titles.
pub const APP_NAME: &str = "Gestión de Incidentes";

/// Title used when a route has none.
pub const DEFAULT_TITLE: &str = "Gestión de Incidentes Urbanos";

/// Document title for a route title.
pub fn document_title(route_title: Option<&str>) -> String {
    match route_title {
        Some(title) => format!("{} | {}", title, APP_NAME),
        None => DEFAULT_TITLE.to_string(),
    }
}

/// Guard verdict for one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(Location),
}

pub struct NavigationGuard {
    auth: Arc<AuthStore>,
}

impl NavigationGuard {
    pub fn new(auth: Arc<AuthStore>) -> Self {
        Self { auth }
    }

    /// Decide whether navigation to `to` (matched as `route`) may proceed.
    ///
    /// Auth-required routes verify the session with the server every time.
    /// Guest-only routes send authenticated users to the dashboard.
    pub async fn before_each(&self, to: &Location, route: &RouteRecord) -> GuardDecision {
        if route.meta.requires_auth {
            if !self.auth.check_auth().await {
                tracing::info!(to = %to, "Not authenticated, redirecting to login");
                return GuardDecision::Redirect(
                    Location::new(LOGIN_PATH).with_query("redirect", to.full_path()),
                );
            }

            if let Some(role) = route.meta.role {
                if self.auth.role() != Some(role) {
                    tracing::info!(to = %to, "Role mismatch, redirecting home");
                    return GuardDecision::Redirect(Location::new(HOME_PATH));
                }
            }
        }

        if route.meta.guest && self.auth.is_authenticated() {
            return GuardDecision::Redirect(Location::new(DASHBOARD_PATH));
        }

        GuardDecision::Proceed
    }
}
