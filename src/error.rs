// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.

use serde::Deserialize;

/// Error returned by API calls, store actions and navigation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response decode error: {0}")]
    Decode(String),

    #[error("{}", AppError::ACCESS_DENIED)]
    AccessDenied,

    #[error("Navigation redirect loop: {0}")]
    NavigationLoop(String),
}

impl AppError {
    /// Message shown when a non-admin account logs in.
    pub const ACCESS_DENIED: &'static str = "Acceso denegado: Solo administradores pueden acceder.";

    /// Build the error for a non-success HTTP response.
    ///
    /// 401 and 403 become `Unauthorized`; everything else keeps the
    /// backend's `{message}` when the body is an error envelope.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 || status == 403 {
            return AppError::Unauthorized { status };
        }

        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|envelope| envelope.message.into_text())
            .unwrap_or_else(|_| body.to_string());

        AppError::Api { status, message }
    }

    /// True for 401/403 failures.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized { status } | AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error envelope returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: ApiErrorMessage,
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
}

/// Validation failures arrive as a list of messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorMessage {
    Single(String),
    Many(Vec<String>),
}

impl ApiErrorMessage {
    fn into_text(self) -> String {
        match self {
            ApiErrorMessage::Single(msg) => msg,
            ApiErrorMessage::Many(msgs) => msgs.join("; "),
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, AppError>;
