// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current page location, shared between the router and the HTTP layer.

use super::guard::document_title;
use super::routes::{RouteName, LOGIN_PATH};
use crate::services::AuthFailureHandler;
use std::sync::Arc;
use tokio::sync::watch;

/// A path plus decoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Parse `path?key=value&...`, percent-decoding the query.
    pub fn parse(full_path: &str) -> Self {
        let (path, query) = match full_path.split_once('?') {
            Some((path, query)) => (path, query),
            None => (full_path, ""),
        };

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// First value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path with the encoded query string.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_path())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// What is currently displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub location: Location,
    /// Matched route, `None` before the first navigation
    pub route: Option<RouteName>,
    /// Document title
    pub title: String,
}

/// Shared, observable page location (the browser's address bar).
#[derive(Clone)]
pub struct BrowserLocation {
    page: Arc<watch::Sender<Page>>,
}

impl Default for BrowserLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserLocation {
    pub fn new() -> Self {
        Self {
            page: Arc::new(watch::Sender::new(Page {
                location: Location::new("/"),
                route: None,
                title: document_title(None),
            })),
        }
    }

    pub fn current(&self) -> Page {
        self.page.borrow().clone()
    }

    pub fn path(&self) -> String {
        self.page.borrow().location.path.clone()
    }

    pub fn title(&self) -> String {
        self.page.borrow().title.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Page> {
        self.page.subscribe()
    }

    pub(crate) fn set_title(&self, title: String) {
        self.page.send_if_modified(|page| {
            if page.title == title {
                return false;
            }
            page.title = title;
            true
        });
    }

    pub(crate) fn set(&self, page: Page) {
        self.page.send_replace(page);
    }
}

/// Auth failure handler that sends the user back to the login page when
/// their session expires inside the admin area.
///
/// The navigation bypasses the guard, like a full page load.
pub struct SessionExpiryRedirect {
    location: BrowserLocation,
    admin_prefix: String,
}

impl SessionExpiryRedirect {
    pub fn new(location: BrowserLocation, admin_prefix: impl Into<String>) -> Self {
        Self {
            location,
            admin_prefix: admin_prefix.into(),
        }
    }
}

impl AuthFailureHandler for SessionExpiryRedirect {
    fn on_auth_failure(&self, status: u16) {
        let path = self.location.path();
        if !path.starts_with(&self.admin_prefix) || path.contains(LOGIN_PATH) {
            return;
        }

        tracing::warn!(status, from = %path, "Session expired, forcing login page");
        self.location.set(Page {
            location: Location::new(LOGIN_PATH),
            route: Some(RouteName::Login),
            title: document_title(RouteName::Login.record().meta.title),
        });
    }
}
