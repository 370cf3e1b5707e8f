// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication store: current admin session.
//!
//! The backend keeps the session in a cookie; this store only mirrors the
//! profile of the logged-in user. Admin-only access is enforced here as a
//! convenience, the backend remains the security boundary.

use super::{track_with, ActionState};
use crate::error::{AppError, Result};
use crate::models::{LoginDto, Role, User};
use crate::services::ApiClient;
use tokio::sync::watch;

/// Generic login failure message.
pub const LOGIN_FAILED: &str = "Error al iniciar sesión. Verifique sus credenciales.";

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Username of the logged-in user, empty when logged out.
    pub fn username(&self) -> &str {
        self.user.as_ref().map(|u| u.username.as_str()).unwrap_or("")
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

impl ActionState for AuthState {
    fn loading_mut(&mut self) -> &mut bool {
        &mut self.is_loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

pub struct AuthStore {
    api: ApiClient,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: watch::Sender::new(AuthState::default()),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role()
    }

    /// Sign in and load the profile. Non-admin accounts are logged out
    /// again and rejected with [`AppError::AccessDenied`].
    pub async fn login(&self, credentials: &LoginDto) -> Result<()> {
        track_with(&self.state, login_error_message, async {
            self.api.post("/auth/signin", credentials).await?;
            self.fetch_user_profile().await?;

            if !self.is_admin() {
                tracing::warn!(email = %credentials.email, "Non-admin login rejected");
                self.logout().await;
                return Err(AppError::AccessDenied);
            }

            tracing::info!(username = %self.state.borrow().username(), "Admin logged in");
            Ok(())
        })
        .await
    }

    /// Load the current user's profile. Clears the user on failure.
    pub async fn fetch_user_profile(&self) -> Result<()> {
        match self.api.get::<User>("/users/me").await {
            Ok(user) => {
                self.state.send_modify(|s| s.user = Some(user));
                Ok(())
            }
            Err(err) => {
                self.state.send_modify(|s| s.user = None);
                Err(err)
            }
        }
    }

    /// Clear the local session. Never fails.
    pub async fn logout(&self) {
        self.state.send_modify(|s| {
            s.user = None;
            s.error = None;
        });
        tracing::info!("Logged out");
    }

    /// True only when the profile loads and belongs to an admin.
    pub async fn check_auth(&self) -> bool {
        match self.fetch_user_profile().await {
            Ok(()) => self.is_authenticated() && self.is_admin(),
            Err(err) => {
                tracing::debug!(error = %err, "Session check failed");
                false
            }
        }
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}

fn login_error_message(err: &AppError) -> String {
    match err {
        AppError::AccessDenied => AppError::ACCESS_DENIED.to_string(),
        _ => LOGIN_FAILED.to_string(),
    }
}
