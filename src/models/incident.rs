// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Citizen incident reports.

use serde::{Deserialize, Serialize};

use crate::models::{Category, City, Status};

/// Reporter summary embedded in incident payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReporter {
    pub username: String,
}

/// Incident as returned by list endpoints. Relations are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub incident_id: u64,
    pub category_id: u64,
    pub status_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Free-form address reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_ref: Option<String>,
    /// Report timestamp (ISO 8601)
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<IncidentReporter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
}

/// Incident with its category and status relations loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentDetail {
    pub incident_id: u64,
    pub category_id: u64,
    pub status_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_ref: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<IncidentReporter>,
    pub category: Category,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
}

impl From<IncidentDetail> for Incident {
    fn from(detail: IncidentDetail) -> Self {
        Self {
            incident_id: detail.incident_id,
            category_id: detail.category_id,
            status_id: detail.status_id,
            city_id: detail.city_id,
            latitude: detail.latitude,
            longitude: detail.longitude,
            description: detail.description,
            photo_url: detail.photo_url,
            address_ref: detail.address_ref,
            created_at: detail.created_at,
            user: detail.user,
            category: Some(detail.category),
            status: Some(detail.status),
            city: detail.city,
        }
    }
}

/// Partial update for `PATCH /incidents/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIncidentDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_ref: Option<String>,
}

/// Body for `PATCH /incidents/:id/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateIncidentStatusDto {
    pub status_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail_json() -> serde_json::Value {
        json!({
            "incident_id": 42,
            "category_id": 3,
            "status_id": 1,
            "city_id": 2,
            "latitude": -0.1807,
            "longitude": -78.4678,
            "description": "TMOhbXBhcmEgYXBhZ2FkYQ==",
            "created_at": "2025-05-10T08:30:00.000Z",
            "user": { "username": "vecino" },
            "category": { "category_id": 3, "name": "Alumbrado Público", "description": "" },
            "status": { "status_id": 1, "name": "Pendiente", "description": "Sin atender" }
        })
    }

    #[test]
    fn detail_requires_relations() {
        let mut value = detail_json();
        assert!(serde_json::from_value::<IncidentDetail>(value.clone()).is_ok());

        value.as_object_mut().unwrap().remove("status");
        assert!(serde_json::from_value::<IncidentDetail>(value.clone()).is_err());

        // The list form tolerates missing relations
        let incident: Incident = serde_json::from_value(value).unwrap();
        assert!(incident.status.is_none());
        assert_eq!(incident.user.unwrap().username, "vecino");
    }

    #[test]
    fn detail_converts_to_list_form() {
        let detail: IncidentDetail = serde_json::from_value(detail_json()).unwrap();
        let incident = Incident::from(detail);
        assert_eq!(incident.category.unwrap().category_id, 3);
        assert_eq!(incident.city_id, Some(2));
    }

    #[test]
    fn status_update_body() {
        let body = serde_json::to_value(UpdateIncidentStatusDto { status_id: 4 }).unwrap();
        assert_eq!(body, json!({ "status_id": 4 }));

        let patch = UpdateIncidentDto {
            description: Some("Bache profundo".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            json!({ "description": "Bache profundo" })
        );
    }
}
