// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route table.

use crate::models::Role;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Named routes of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Login,
    AdminDashboard,
    AdminIncidents,
    AdminCities,
    AdminCategories,
    AdminStatuses,
    AdminProfile,
}

/// Per-route navigation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
    /// Needs a verified session
    pub requires_auth: bool,
    /// Role the session must have
    pub role: Option<Role>,
    /// Only for logged-out users
    pub guest: bool,
}

impl RouteMeta {
    const fn public(title: &'static str) -> Self {
        Self {
            title: Some(title),
            requires_auth: false,
            role: None,
            guest: false,
        }
    }

    const fn guest(title: &'static str) -> Self {
        Self {
            title: Some(title),
            requires_auth: false,
            role: None,
            guest: true,
        }
    }

    const fn admin(title: &'static str) -> Self {
        Self {
            title: Some(title),
            requires_auth: true,
            role: Some(Role::Admin),
            guest: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub name: RouteName,
    pub path: &'static str,
    pub meta: RouteMeta,
}

static ROUTES: [RouteRecord; 8] = [
    RouteRecord {
        name: RouteName::Home,
        path: HOME_PATH,
        meta: RouteMeta::public("Reporte urbano"),
    },
    RouteRecord {
        name: RouteName::Login,
        path: LOGIN_PATH,
        meta: RouteMeta::guest("Iniciar Sesión"),
    },
    RouteRecord {
        name: RouteName::AdminDashboard,
        path: DASHBOARD_PATH,
        meta: RouteMeta::admin("Dashboard"),
    },
    RouteRecord {
        name: RouteName::AdminIncidents,
        path: "/admin/incidents",
        meta: RouteMeta::admin("Gestión de Incidentes"),
    },
    RouteRecord {
        name: RouteName::AdminCities,
        path: "/admin/cities",
        meta: RouteMeta::admin("Gestión de Ciudades"),
    },
    RouteRecord {
        name: RouteName::AdminCategories,
        path: "/admin/categories",
        meta: RouteMeta::admin("Gestión de Categorías"),
    },
    RouteRecord {
        name: RouteName::AdminStatuses,
        path: "/admin/statuses",
        meta: RouteMeta::admin("Gestión de Estados"),
    },
    RouteRecord {
        name: RouteName::AdminProfile,
        path: "/admin/profile",
        meta: RouteMeta::admin("Mi Perfil"),
    },
];

/// Static redirects applied before matching.
static REDIRECTS: [(&str, &str); 1] = [("/admin", DASHBOARD_PATH)];

impl RouteName {
    pub fn record(self) -> &'static RouteRecord {
        ROUTES
            .iter()
            .find(|route| route.name == self)
            .unwrap_or(&ROUTES[0])
    }

    pub fn path(self) -> &'static str {
        self.record().path
    }
}

/// Outcome of matching a path against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(&'static RouteRecord),
    Redirect(&'static str),
}

/// Match a path (without query). Trailing slashes and ASCII case are
/// ignored; unknown paths redirect home.
pub fn resolve(path: &str) -> Resolution {
    let normalized = match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    };

    if let Some((_, target)) = REDIRECTS
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(normalized))
    {
        return Resolution::Redirect(*target);
    }

    ROUTES
        .iter()
        .find(|route| route.path.eq_ignore_ascii_case(normalized))
        .map(Resolution::Matched)
        .unwrap_or(Resolution::Redirect(HOME_PATH))
}
