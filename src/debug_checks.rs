//! Debug-only integrity checks for detecting corrupted state early.
//! All functions are no-ops in release builds.

use crate::bounds::Bounds;
use crate::view::AlertMapView;

/// Check bounds ordering and coordinate sanity
#[allow(unused_variables)]
pub fn check_bounds_integrity(bounds: &Bounds) {
    #[cfg(debug_assertions)]
    {
        if bounds.is_empty() {
            return;
        }

        // Check 1: All extents are finite
        debug_assert!(
            bounds.min_lat.is_finite()
                && bounds.min_lng.is_finite()
                && bounds.max_lat.is_finite()
                && bounds.max_lng.is_finite(),
            "Bounds have non-finite extents: ({}, {}) -> ({}, {})",
            bounds.min_lat,
            bounds.min_lng,
            bounds.max_lat,
            bounds.max_lng
        );

        // Check 2: Corners are ordered on both axes
        debug_assert!(
            bounds.min_lat <= bounds.max_lat,
            "Bounds latitude inverted: {} > {}",
            bounds.min_lat,
            bounds.max_lat
        );
        debug_assert!(
            bounds.min_lng <= bounds.max_lng,
            "Bounds longitude inverted: {} > {}",
            bounds.min_lng,
            bounds.max_lng
        );
    }
}

/// Check selection and handle consistency across all rendered alerts
#[allow(unused_variables)]
pub fn check_view_integrity(view: &AlertMapView) {
    #[cfg(debug_assertions)]
    {
        check_bounds_integrity(view.bounds());

        // Check 1: At most one alert looks selected, and it is the selection
        let mut highlighted = None;
        for (idx, alert) in view.alerts().iter().enumerate() {
            if alert.appearance == crate::view::Appearance::Selected {
                debug_assert!(
                    highlighted.is_none(),
                    "Alerts {:?} and {} are both highlighted",
                    highlighted,
                    idx
                );
                highlighted = Some(idx);
            }
        }
        debug_assert_eq!(
            highlighted,
            view.selected().map(|id| id.index()),
            "Highlighted alert does not match the selection"
        );

        // Check 2: Only the selected alert may hold an open popup
        for (idx, alert) in view.alerts().iter().enumerate() {
            if alert.popup.is_some() {
                debug_assert_eq!(
                    Some(idx),
                    highlighted,
                    "Alert {} has an open popup but is not selected",
                    idx
                );
                debug_assert!(
                    alert.marker.is_some(),
                    "Alert {} has a popup with no marker to anchor it",
                    idx
                );
            }
        }

        // Check 3: Drawn geometry came from finite input
        for (idx, alert) in view.alerts().iter().enumerate() {
            if let Some(centroid) = alert.record.centroid {
                debug_assert!(
                    centroid.is_finite(),
                    "Alert {} has non-finite centroid: {:?}",
                    idx,
                    centroid
                );
            }
        }

        // Check 4: Handle ids are never shared between alerts
        let mut markers: Vec<u32> = view.alerts().iter().filter_map(|a| a.marker).map(|m| m.0).collect();
        let marker_count = markers.len();
        markers.sort_unstable();
        markers.dedup();
        debug_assert_eq!(markers.len(), marker_count, "Marker handle reused across alerts");

        let mut polygons: Vec<u32> = view
            .alerts()
            .iter()
            .flat_map(|a| a.polygons.iter().map(|p| p.0))
            .collect();
        let polygon_count = polygons.len();
        polygons.sort_unstable();
        polygons.dedup();
        debug_assert_eq!(polygons.len(), polygon_count, "Polygon handle reused across alerts");
    }
}
