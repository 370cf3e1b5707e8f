// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reference catalogs used to classify incidents: categories, cities and
//! statuses, plus their create/update payloads.

use serde::{Deserialize, Serialize};

/// Denormalized incident count (`_count`) computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncidentCount {
    pub incidents: u64,
}

/// Incident category (garbage, lighting, roads...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<IncidentCount>,
}

/// City an incident belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub city_id: u64,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<IncidentCount>,
}

/// Workflow status of an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub status_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<IncidentCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCategoryDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCityDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCityDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Statuses always carry a description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStatusDto {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
