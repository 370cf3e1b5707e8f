// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side navigation with auth-gated routes.

pub mod guard;
pub mod location;
pub mod routes;

pub use guard::{document_title, GuardDecision, NavigationGuard};
pub use location::{BrowserLocation, Location, Page, SessionExpiryRedirect};
pub use routes::{resolve, Resolution, RouteMeta, RouteName, RouteRecord};

use crate::error::{AppError, Result};
use crate::stores::AuthStore;
use std::sync::Arc;

/// Redirects followed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 10;

pub struct Router {
    guard: NavigationGuard,
    location: BrowserLocation,
    max_redirects: usize,
}

impl Router {
    pub fn new(auth: Arc<AuthStore>, location: BrowserLocation) -> Self {
        Self {
            guard: NavigationGuard::new(auth),
            location,
            max_redirects: MAX_REDIRECTS,
        }
    }

    /// Override the redirect limit.
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Currently displayed page.
    pub fn current(&self) -> Page {
        self.location.current()
    }

    pub fn location(&self) -> &BrowserLocation {
        &self.location
    }

    /// Navigate to `full_path`, following table and guard redirects.
    ///
    /// Table redirects keep the query string. Returns the page finally
    /// displayed.
    pub async fn push(&self, full_path: &str) -> Result<Page> {
        let mut target = Location::parse(full_path);

        // One pass per redirect, plus the pass that lands.
        for _ in 0..=self.max_redirects {
            let route = match resolve(&target.path) {
                Resolution::Matched(route) => route,
                Resolution::Redirect(to) => {
                    tracing::debug!(from = %target, to, "Route redirect");
                    target = Location {
                        path: to.to_string(),
                        query: target.query,
                    };
                    continue;
                }
            };

            let title = document_title(route.meta.title);
            self.location.set_title(title.clone());

            match self.guard.before_each(&target, route).await {
                GuardDecision::Proceed => {
                    let page = Page {
                        location: Location {
                            path: route.path.to_string(),
                            query: target.query,
                        },
                        route: Some(route.name),
                        title,
                    };
                    tracing::info!(path = %page.location, route = ?route.name, "Navigated");
                    self.location.set(page.clone());
                    return Ok(page);
                }
                GuardDecision::Redirect(next) => {
                    target = next;
                }
            }
        }

        tracing::warn!(path = full_path, "Too many redirects");
        Err(AppError::NavigationLoop(full_path.to_string()))
    }
}
