use serde::{Deserialize, Serialize};

/// Extent of the periodic (toroidal) plane.
///
/// Valid positions satisfy `0 <= x < width` and `0 <= y < height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl Bounds {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Wraps a single coordinate into `[0, extent)`.
    #[inline]
    #[must_use]
    pub fn wrap_coord(value: f64, extent: f64) -> f64 {
        let wrapped = value.rem_euclid(extent);
        // rem_euclid rounds tiny negative inputs up to `extent` itself.
        if wrapped >= extent {
            0.0
        } else {
            wrapped
        }
    }

    /// Wraps a point into the domain so that leaving one edge re-enters the opposite one.
    #[inline]
    #[must_use]
    pub fn wrap(&self, x: f64, y: f64) -> (f64, f64) {
        (
            Self::wrap_coord(x, self.width),
            Self::wrap_coord(y, self.height),
        )
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}
