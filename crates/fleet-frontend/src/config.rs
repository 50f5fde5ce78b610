//! # Frontend Configuration
//!
//! Build-time configuration for the map and logging. Values are read with
//! `option_env!` so a deployment can bake them into the WASM bundle, e.g.
//! `FLEET_MAP_ZOOM=14 cargo build --target wasm32-unknown-unknown`.

use std::str::FromStr;

/// Frontend configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    /// Initial map view and tiles
    pub map: MapConfig,

    /// Console log level
    pub log_level: log::Level,
}

/// Leaflet map configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u32,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Springfield, IL
        Self {
            center_lat: 39.7817,
            center_lng: -89.6501,
            zoom: 12,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            log_level: log::Level::Debug,
        }
    }
}

impl FrontendConfig {
    /// Load configuration captured from the build environment
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "FLEET_MAP_CENTER_LAT" => option_env!("FLEET_MAP_CENTER_LAT"),
            "FLEET_MAP_CENTER_LNG" => option_env!("FLEET_MAP_CENTER_LNG"),
            "FLEET_MAP_ZOOM" => option_env!("FLEET_MAP_ZOOM"),
            "FLEET_TILE_URL" => option_env!("FLEET_TILE_URL"),
            "FLEET_LOG_LEVEL" => option_env!("FLEET_LOG_LEVEL"),
            _ => None,
        })
    }

    /// Build from an arbitrary key lookup. Unparsable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<&'static str>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse().ok());

        Self {
            map: MapConfig {
                center_lat: parsed("FLEET_MAP_CENTER_LAT").unwrap_or(defaults.map.center_lat),
                center_lng: parsed("FLEET_MAP_CENTER_LNG").unwrap_or(defaults.map.center_lng),
                zoom: lookup("FLEET_MAP_ZOOM")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.map.zoom),
                tile_url: lookup("FLEET_TILE_URL")
                    .map(str::to_string)
                    .unwrap_or(defaults.map.tile_url),
                attribution: defaults.map.attribution,
            },
            log_level: lookup("FLEET_LOG_LEVEL")
                .and_then(|v| log::Level::from_str(v.trim()).ok())
                .unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = FrontendConfig::from_lookup(|_| None);
        assert_eq!(config, FrontendConfig::default());
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = FrontendConfig::from_lookup(|key| match key {
            "FLEET_MAP_CENTER_LAT" => Some("51.5072"),
            "FLEET_MAP_CENTER_LNG" => Some("not-a-number"),
            "FLEET_MAP_ZOOM" => Some(" 15 "),
            "FLEET_LOG_LEVEL" => Some("warn"),
            _ => None,
        });
        assert!((config.map.center_lat - 51.5072).abs() < f64::EPSILON);
        assert!((config.map.center_lng - MapConfig::default().center_lng).abs() < f64::EPSILON);
        assert_eq!(config.map.zoom, 15);
        assert_eq!(config.log_level, log::Level::Warn);
    }
}
