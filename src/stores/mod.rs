// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Observable state stores.
//!
//! Each store owns one slice of client state and publishes a fresh snapshot
//! through a `tokio::sync::watch` channel whenever an action mutates it.
//! Presentation code reads `state()` or holds a `subscribe()` receiver.
//!
//! Every action has the same shape: set the loading flag and clear the
//! error, await the API, reconcile the result, then clear the loading flag
//! and record a fixed human-readable message on failure. The original error
//! is always returned to the caller.

pub mod auth;
pub mod catalogs;
pub mod incidents;

pub use auth::{AuthState, AuthStore};
pub use catalogs::{CatalogEntry, CatalogsState, CatalogsStore};
pub use incidents::{IncidentsState, IncidentsStore};

use crate::error::{AppError, Result};
use std::future::Future;
use tokio::sync::watch;

/// Loading/error bookkeeping shared by every store state.
pub trait ActionState {
    fn loading_mut(&mut self) -> &mut bool;
    fn error_mut(&mut self) -> &mut Option<String>;
}

/// Run one store action with loading/error bookkeeping.
pub(crate) async fn track<S, T, F>(
    state: &watch::Sender<S>,
    message: &'static str,
    action: F,
) -> Result<T>
where
    S: ActionState,
    F: Future<Output = Result<T>>,
{
    track_with(state, |_| message.to_string(), action).await
}

/// Like [`track`], with the error message chosen from the failure.
pub(crate) async fn track_with<S, T, F, M>(
    state: &watch::Sender<S>,
    message: M,
    action: F,
) -> Result<T>
where
    S: ActionState,
    F: Future<Output = Result<T>>,
    M: FnOnce(&AppError) -> String,
{
    state.send_modify(|s| {
        *s.loading_mut() = true;
        *s.error_mut() = None;
    });

    let result = action.await;

    state.send_modify(|s| {
        *s.loading_mut() = false;
        if let Err(err) = &result {
            let msg = message(err);
            tracing::warn!(error = %err, "{}", msg);
            *s.error_mut() = Some(msg);
        }
    });

    result
}
