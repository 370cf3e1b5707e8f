// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Category icon selection.
//!
//! Category names are free text managed by admins, so icons are chosen by
//! keyword: the name is lowercased, stripped of accents and matched against
//! an ordered keyword table. The first keyword contained in the name wins.

/// Where the icon is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconKind {
    /// Incident cards and popups
    #[default]
    Card,
    /// Stats panel
    Local,
    /// Form options
    Option,
    /// Map markers
    Marker,
}

/// Asset paths for one category family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSet {
    pub card: &'static str,
    pub local: &'static str,
    pub option: &'static str,
    pub marker: &'static str,
}

impl IconSet {
    pub fn get(&self, kind: IconKind) -> &'static str {
        match kind {
            IconKind::Card => self.card,
            IconKind::Local => self.local,
            IconKind::Option => self.option,
            IconKind::Marker => self.marker,
        }
    }
}

const GARBAGE: IconSet = IconSet {
    card: "icons/garbage.svg",
    local: "icons/local_basura.svg",
    option: "icons/garbage_option.svg",
    marker: "icons/local_basura.svg",
};

const LIGHTING: IconSet = IconSet {
    card: "icons/light.svg",
    local: "icons/local_luz.svg",
    option: "icons/light_option.svg",
    marker: "icons/local_luz.svg",
};

const ROAD: IconSet = IconSet {
    card: "icons/road.svg",
    local: "icons/local_via.svg",
    option: "icons/road_option.svg",
    marker: "icons/local_via.svg",
};

const TRAFFIC: IconSet = IconSet {
    card: "icons/traffic-lights-fill.svg",
    local: "icons/local_semaforo.svg",
    option: "icons/traffic_lights_option.svg",
    marker: "icons/local_semaforo.svg",
};

const BUILDING: IconSet = IconSet {
    card: "icons/building.svg",
    local: "icons/local_edificio.svg",
    option: "icons/building.svg",
    marker: "icons/local_edificio.svg",
};

/// Fallback for names matching no keyword.
pub const DEFAULT_ICONS: IconSet = IconSet {
    card: "icons/building.svg",
    local: "icons/local_edificio.svg",
    option: "icons/other_option.svg",
    marker: "icons/local_edificio.svg",
};

/// Keyword table, in match order.
static KEYWORDS: [(&str, &IconSet); 18] = [
    ("basura", &GARBAGE),
    ("garbage", &GARBAGE),
    ("limpieza", &GARBAGE),
    ("residuo", &GARBAGE),
    ("alumbrado", &LIGHTING),
    ("luz", &LIGHTING),
    ("light", &LIGHTING),
    ("publico", &LIGHTING),
    ("via", &ROAD),
    ("vias", &ROAD),
    ("calzada", &ROAD),
    ("road", &ROAD),
    ("semaforo", &TRAFFIC),
    ("senalizacion", &TRAFFIC),
    ("traffic", &TRAFFIC),
    ("otro", &BUILDING),
    ("edificio", &BUILDING),
    ("building", &BUILDING),
];

/// Icon set for a category name.
pub fn icon_set(category_name: &str) -> &'static IconSet {
    let normalized = normalize(category_name);
    KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, icons)| *icons)
        .unwrap_or(&DEFAULT_ICONS)
}

/// Icon path for a category name and display kind.
pub fn icon_for(category_name: &str, kind: IconKind) -> &'static str {
    icon_set(category_name).get(kind)
}

pub fn card_icon(category_name: &str) -> &'static str {
    icon_for(category_name, IconKind::Card)
}

pub fn marker_icon(category_name: &str) -> &'static str {
    icon_for(category_name, IconKind::Marker)
}

pub fn local_icon(category_name: &str) -> &'static str {
    icon_for(category_name, IconKind::Local)
}

pub fn option_icon(category_name: &str) -> &'static str {
    icon_for(category_name, IconKind::Option)
}

/// Lowercase and fold accented Latin letters to their base letter.
fn normalize(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
