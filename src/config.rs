//! Map view configuration.
//!
//! Every field has a default, so a host may send a partial JSON document
//! and only override what it cares about.

use serde::{Deserialize, Serialize};

use crate::alert::LatLng;
use crate::error::ViewError;

const RED: &str = "#FF0000";
const BLUE: &str = "#0000FF";
const RED_DOT_ICON: &str = "http://www.google.com/intl/en_us/mapfiles/ms/micons/red-dot.png";
const BLUE_DOT_ICON: &str = "http://www.google.com/intl/en_us/mapfiles/ms/micons/blue-dot.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationStyle {
    Small,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: u32,
    pub z_index: u32,
}

impl PolygonStyle {
    fn unselected() -> Self {
        Self {
            fill_color: RED.to_string(),
            fill_opacity: 0.1,
            stroke_color: RED.to_string(),
            stroke_opacity: 1.0,
            stroke_weight: 2,
            z_index: 100,
        }
    }

    fn selected() -> Self {
        Self {
            fill_color: BLUE.to_string(),
            fill_opacity: 0.2,
            stroke_color: BLUE.to_string(),
            z_index: 200,
            ..Self::unselected()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub icon: String,
    pub z_index: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Element id the host looks up before calling setup.
    pub container_id: String,
    pub width_px: u32,
    pub height_px: u32,
    pub center: LatLng,
    pub zoom: u8,
    pub map_type: MapType,
    pub map_type_control: bool,
    pub scale_control: bool,
    pub navigation_control: bool,
    pub navigation_style: NavigationStyle,
    pub polygon_style: PolygonStyle,
    pub selected_polygon_style: PolygonStyle,
    pub marker_style: MarkerStyle,
    pub selected_marker_style: MarkerStyle,
    /// Delay before the lone alert of a single-result view is selected.
    pub auto_select_delay_ms: u32,
    pub log_level: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            width_px: 700,
            height_px: 400,
            center: LatLng(40.044437, -97.734375),
            zoom: 3,
            map_type: MapType::Roadmap,
            map_type_control: true,
            scale_control: true,
            navigation_control: true,
            navigation_style: NavigationStyle::Small,
            polygon_style: PolygonStyle::unselected(),
            selected_polygon_style: PolygonStyle::selected(),
            marker_style: MarkerStyle {
                icon: RED_DOT_ICON.to_string(),
                z_index: 100,
            },
            selected_marker_style: MarkerStyle {
                icon: BLUE_DOT_ICON.to_string(),
                z_index: 200,
            },
            auto_select_delay_ms: 500,
            log_level: "info".to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &[u8]) -> Result<Self, ViewError> {
        serde_json::from_slice(json).map_err(ViewError::InvalidConfig)
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_alert_page() {
        let config = MapConfig::default();
        assert_eq!(config.container_id, "map");
        assert_eq!((config.width_px, config.height_px), (700, 400));
        assert_eq!(config.zoom, 3);
        assert_eq!(config.auto_select_delay_ms, 500);
        assert_eq!(config.polygon_style.fill_color, "#FF0000");
        assert_eq!(config.selected_polygon_style.fill_color, "#0000FF");
        assert!(config.polygon_style.z_index < config.selected_polygon_style.z_index);
        assert!(config.marker_style.z_index < config.selected_marker_style.z_index);
    }

    #[test]
    fn partial_document_merges_over_defaults() {
        let config = MapConfig::from_json(br#"{"zoom": 6, "autoSelectDelayMs": 250, "logLevel": "debug"}"#)
            .unwrap();
        assert_eq!(config.zoom, 6);
        assert_eq!(config.auto_select_delay_ms, 250);
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
        assert_eq!(config.container_id, "map");
        assert_eq!(config.map_type, MapType::Roadmap);
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = MapConfig {
            log_level: "chatty".to_string(),
            ..MapConfig::default()
        };
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(matches!(
            MapConfig::from_json(br#"{"zoom": "far"}"#),
            Err(ViewError::InvalidConfig(_))
        ));
    }
}
