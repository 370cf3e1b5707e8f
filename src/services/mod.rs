// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - transport layer.

pub mod api;

pub use api::{ApiClient, AuthFailureHandler, IgnoreAuthFailures};
