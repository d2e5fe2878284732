//! Geographic primitives.

use serde::{Deserialize, Serialize};

/// A WGS84 point. Validity means both components are finite; NaN and
/// infinities come straight from bad client input and are rejected before
/// any provider call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_coordinate_is_valid() {
        assert!(Coordinate::new(12.97, 77.59).is_valid());
        assert!(Coordinate::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        assert!(!Coordinate::new(f64::NAN, 77.59).is_valid());
        assert!(!Coordinate::new(12.97, f64::INFINITY).is_valid());
    }
}
