// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST client for the incident platform API.
//!
//! Handles:
//! - Cookie session transport (the session cookie set by `/auth/signin`
//!   is replayed on every later request)
//! - JSON request and response bodies
//! - Auth failure notification (401/403) through [`AuthFailureHandler`]

use crate::config::Config;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Callback invoked when a response reports an authentication failure.
///
/// Runs before the error is returned to the caller; it cannot swallow the
/// failure.
pub trait AuthFailureHandler: Send + Sync {
    fn on_auth_failure(&self, status: u16);
}

/// Handler that does nothing.
pub struct IgnoreAuthFailures;

impl AuthFailureHandler for IgnoreAuthFailures {
    fn on_auth_failure(&self, _status: u16) {}
}

/// Shared API client. Cloning shares the connection pool and cookie jar.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    on_auth_failure: Arc<dyn AuthFailureHandler>,
}

impl ApiClient {
    /// Create a client for the configured API origin.
    pub fn new(
        config: &Config,
        on_auth_failure: Arc<dyn AuthFailureHandler>,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            on_auth_failure,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// POST a JSON body, ignoring the response body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    /// PATCH a JSON body, ignoring the response body.
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let response = self
            .http
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(self.failure(response).await)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            return Err(self.failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("JSON parse error: {}", e)))
    }

    async fn failure(&self, response: reqwest::Response) -> AppError {
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        let err = AppError::from_status(status, &body);
        if err.is_auth_failure() {
            tracing::warn!(status, path = %url, "API authentication failure");
            self.on_auth_failure.on_auth_failure(status);
        } else {
            tracing::debug!(status, path = %url, "API request failed");
        }
        err
    }
}
