// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-city incident statistics.

use serde::{Deserialize, Serialize};

use crate::models::IncidentCount;

/// Incident count for one category, scoped to a city.
///
/// Returned as a list by `GET /incidents/city-stats/:cityId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub category_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "_count")]
    pub count: IncidentCount,
}

impl CityStats {
    pub fn incidents(&self) -> u64 {
        self.count.incidents
    }
}

/// Total incidents across a city's stats rows.
pub fn total_incidents(stats: &[CityStats]) -> u64 {
    stats.iter().map(CityStats::incidents).sum()
}
