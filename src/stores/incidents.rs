// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Incident store: incident list, selected detail and per-city stats.

use super::{track, ActionState};
use crate::config::DescriptionEncoding;
use crate::error::Result;
use crate::models::{CityStats, Incident, IncidentDetail, UpdateIncidentDto, UpdateIncidentStatusDto};
use crate::services::ApiClient;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use tokio::sync::watch;

/// Snapshot of the incident state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentsState {
    pub incidents: Vec<Incident>,
    pub selected_incident: Option<IncidentDetail>,
    pub city_stats: Vec<CityStats>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ActionState for IncidentsState {
    fn loading_mut(&mut self) -> &mut bool {
        &mut self.is_loading
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

pub struct IncidentsStore {
    api: ApiClient,
    encoding: DescriptionEncoding,
    state: watch::Sender<IncidentsState>,
}

impl IncidentsStore {
    pub fn new(api: ApiClient, encoding: DescriptionEncoding) -> Self {
        Self {
            api,
            encoding,
            state: watch::Sender::new(IncidentsState::default()),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> IncidentsState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<IncidentsState> {
        self.state.subscribe()
    }

    pub async fn fetch_all_incidents(&self) -> Result<()> {
        track(&self.state, "Error al cargar los incidentes", async {
            let mut incidents: Vec<Incident> = self.api.get("/incidents").await?;
            for incident in &mut incidents {
                incident.description = decode_description(&incident.description, self.encoding);
            }
            tracing::debug!(count = incidents.len(), "Fetched incidents");
            self.state.send_modify(|s| s.incidents = incidents);
            Ok(())
        })
        .await
    }

    /// Load one incident, make it the selected incident and return it.
    pub async fn fetch_incident_by_id(&self, id: u64) -> Result<IncidentDetail> {
        track(&self.state, "Error al cargar el detalle del incidente", async {
            let mut detail: IncidentDetail = self.api.get(&format!("/incidents/{}", id)).await?;
            detail.description = decode_description(&detail.description, self.encoding);
            self.state
                .send_modify(|s| s.selected_incident = Some(detail.clone()));
            Ok(detail)
        })
        .await
    }

    pub async fn fetch_city_stats(&self, city_id: u64) -> Result<()> {
        track(
            &self.state,
            "Error al cargar las estadísticas de la ciudad",
            async {
                let stats: Vec<CityStats> = self
                    .api
                    .get(&format!("/incidents/city-stats/{}", city_id))
                    .await?;
                tracing::debug!(city_id, rows = stats.len(), "Fetched city stats");
                self.state.send_modify(|s| s.city_stats = stats);
                Ok(())
            },
        )
        .await
    }

    /// Patch an incident, then re-fetch the list.
    pub async fn update_incident(&self, id: u64, data: &UpdateIncidentDto) -> Result<()> {
        track(&self.state, "Error al actualizar el incidente", async {
            self.api.patch(&format!("/incidents/{}", id), data).await?;
            self.fetch_all_incidents().await
        })
        .await
    }

    /// Change only the status of an incident, then re-fetch the list.
    pub async fn update_incident_status(&self, id: u64, status_id: u64) -> Result<()> {
        track(
            &self.state,
            "Error al actualizar el estado del incidente",
            async {
                let body = UpdateIncidentStatusDto { status_id };
                self.api
                    .patch(&format!("/incidents/{}/status", id), &body)
                    .await?;
                tracing::info!(incident_id = id, status_id, "Incident status changed");
                self.fetch_all_incidents().await
            },
        )
        .await
    }

    /// Delete an incident and drop it from the local list.
    pub async fn delete_incident(&self, id: u64) -> Result<()> {
        track(&self.state, "Error al eliminar el incidente", async {
            self.api.delete(&format!("/incidents/{}", id)).await?;
            self.state
                .send_modify(|s| s.incidents.retain(|i| i.incident_id != id));
            tracing::info!(incident_id = id, "Incident deleted");
            Ok(())
        })
        .await
    }

    pub fn clear_selected_incident(&self) {
        self.state.send_modify(|s| s.selected_incident = None);
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}

/// Standard alphabet, padding optional.
const DESCRIPTION_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode an incident description according to the wire encoding.
///
/// ASCII whitespace is ignored and padding is optional. Base64 values that
/// do not decode to UTF-8 text are kept as received.
pub fn decode_description(raw: &str, encoding: DescriptionEncoding) -> String {
    if encoding == DescriptionEncoding::Plain || raw.is_empty() {
        return raw.to_string();
    }

    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let decoded = DESCRIPTION_ENGINE
        .decode(compact)
        .map_err(|e| e.to_string())
        .and_then(|bytes| String::from_utf8(bytes).map_err(|e| e.to_string()));

    match decoded {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode base64 description");
            raw.to_string()
        }
    }
}
