// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models mirrored from the incident platform API.

pub mod catalog;
pub mod incident;
pub mod stats;
pub mod user;

pub use catalog::{
    Category, City, CreateCategoryDto, CreateCityDto, CreateStatusDto, IncidentCount, Status,
    UpdateCategoryDto, UpdateCityDto, UpdateStatusDto,
};
pub use incident::{
    Incident, IncidentDetail, IncidentReporter, UpdateIncidentDto, UpdateIncidentStatusDto,
};
pub use stats::CityStats;
pub use user::{LoginDto, Role, User};
