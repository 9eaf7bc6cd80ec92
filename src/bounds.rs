//! Running geographic extent of everything drawn on the map.

use crate::alert::LatLng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
    points_seen: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Seeded to impossible extremes so the first point sets every field.
    pub const fn new() -> Self {
        Self {
            min_lat: 90.0,
            min_lng: 180.0,
            max_lat: -90.0,
            max_lng: -180.0,
            points_seen: 0,
        }
    }

    pub fn points_seen(&self) -> usize {
        self.points_seen
    }

    pub fn is_empty(&self) -> bool {
        self.points_seen == 0
    }

    pub fn south_west(&self) -> LatLng {
        LatLng(self.min_lat, self.min_lng)
    }

    pub fn north_east(&self) -> LatLng {
        LatLng(self.max_lat, self.max_lng)
    }

    /// Both corners, or `None` when no point was ever visited.
    pub fn corners(&self) -> Option<(LatLng, LatLng)> {
        if self.is_empty() {
            None
        } else {
            Some((self.south_west(), self.north_east()))
        }
    }
}

/// Tighten `bounds` so it covers `point`.
pub fn compute_bounds(bounds: &mut Bounds, point: LatLng) {
    bounds.min_lat = bounds.min_lat.min(point.lat());
    bounds.min_lng = bounds.min_lng.min(point.lng());
    bounds.max_lat = bounds.max_lat.max(point.lat());
    bounds.max_lng = bounds.max_lng.max(point.lng());
    bounds.points_seen += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_collapses_to_that_point() {
        let mut bounds = Bounds::new();
        compute_bounds(&mut bounds, LatLng(40.0, -100.0));
        assert_eq!(bounds.corners(), Some((LatLng(40.0, -100.0), LatLng(40.0, -100.0))));
    }

    #[test]
    fn covers_every_visited_point() {
        let mut bounds = Bounds::new();
        for point in [LatLng(10.0, 20.0), LatLng(-5.0, 30.0), LatLng(15.0, -40.0)] {
            compute_bounds(&mut bounds, point);
        }
        assert_eq!(bounds.south_west(), LatLng(-5.0, -40.0));
        assert_eq!(bounds.north_east(), LatLng(15.0, 30.0));
        assert_eq!(bounds.points_seen(), 3);
    }

    #[test]
    fn seed_value_point_still_counts() {
        // A point sitting on the seed extreme must still mark the bounds as used.
        let mut bounds = Bounds::new();
        compute_bounds(&mut bounds, LatLng(90.0, 180.0));
        assert!(!bounds.is_empty());
        assert!(bounds.min_lat <= bounds.max_lat && bounds.min_lng <= bounds.max_lng);
    }

    #[test]
    fn untouched_bounds_have_no_corners() {
        assert_eq!(Bounds::new().corners(), None);
    }
}
