// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Incident Admin console
//!
//! Boots the admin client against the configured API, navigates to the
//! requested page and, for admin pages, loads the data that page shows.

use anyhow::Context;
use incident_admin::{config::Config, models::stats::total_incidents, router::RouteName, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting Incident Admin");

    let app = AppState::new(config).context("Failed to initialize client")?;

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let page = app.router.push(&path).await?;
    tracing::info!(
        path = %page.location,
        title = %page.title,
        user = %app.auth.state().username(),
        "Page ready"
    );

    match page.route {
        Some(RouteName::AdminDashboard) | Some(RouteName::AdminIncidents) => {
            app.catalogs.fetch_all_catalogs().await?;
            app.incidents.fetch_all_incidents().await?;
            let catalogs = app.catalogs.state();
            tracing::info!(
                incidents = app.incidents.state().incidents.len(),
                categories = catalogs.categories.len(),
                cities = catalogs.cities.len(),
                statuses = catalogs.statuses.len(),
                "Dashboard data loaded"
            );

            if let Some(city) = catalogs.cities.first() {
                app.incidents.fetch_city_stats(city.city_id).await?;
                tracing::info!(
                    city = %city.name,
                    incidents = total_incidents(&app.incidents.state().city_stats),
                    "City stats loaded"
                );
            }
        }
        Some(RouteName::AdminCategories) => app.catalogs.fetch_categories().await?,
        Some(RouteName::AdminCities) => app.catalogs.fetch_cities().await?,
        Some(RouteName::AdminStatuses) => app.catalogs.fetch_statuses().await?,
        _ => {}
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("incident_admin=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
