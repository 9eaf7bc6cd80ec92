//! Alert records as supplied by the host page.

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// Position of an alert in the host's input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub u32);

impl AlertId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for AlertId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `[latitude, longitude]` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

impl LatLng {
    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lng(self) -> f64 {
        self.1
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    #[serde(default)]
    pub polygons: Option<Vec<Vec<LatLng>>>,
    #[serde(default)]
    pub centroid: Option<LatLng>,
    #[serde(default)]
    pub info_window_content: Option<String>,
}

impl AlertRecord {
    /// Popup markup, treating an empty string as no content.
    pub fn info_content(&self) -> Option<&str> {
        self.info_window_content
            .as_deref()
            .filter(|content| !content.is_empty())
    }
}

pub fn decode_alerts(json: &[u8]) -> Result<Vec<AlertRecord>, ViewError> {
    serde_json::from_slice(json).map_err(ViewError::InvalidAlerts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_host_shape() {
        let alerts = decode_alerts(
            br#"[
                {"polygons": [[[1.0, 2.0], [3.0, 4.0], [5.0, 2.0]]], "centroid": [3.0, 3.0],
                 "infoWindowContent": "<b>Flood</b>", "severity": "Severe"},
                {"centroid": [40, -100]}
            ]"#,
        )
        .unwrap();

        assert_eq!(alerts.len(), 2);
        let polygons = alerts[0].polygons.as_ref().unwrap();
        assert_eq!(polygons[0][1], LatLng(3.0, 4.0));
        assert_eq!(alerts[0].info_content(), Some("<b>Flood</b>"));
        assert_eq!(alerts[1].centroid, Some(LatLng(40.0, -100.0)));
        assert!(alerts[1].polygons.is_none());
    }

    #[test]
    fn empty_info_content_counts_as_absent() {
        let alerts = decode_alerts(br#"[{"centroid": [1, 1], "infoWindowContent": ""}]"#).unwrap();
        assert_eq!(alerts[0].info_content(), None);
    }

    #[test]
    fn rejects_malformed_points() {
        let err = decode_alerts(br#"[{"centroid": [1]}]"#).unwrap_err();
        assert!(matches!(err, ViewError::InvalidAlerts(_)));
    }
}
