//! Path samples and the pressure model.
//!
//! Pressure is not measured; it is inferred from how far the pointer moved
//! since the previous sample.  Slow strokes read as heavy, fast strokes as
//! light, and the result is low-pass filtered so the ribbon width changes
//! smoothly.

// ════════════════════════════════════════════════════════════════════════════
// Pressure model constants
// ════════════════════════════════════════════════════════════════════════════

/// Travel distance (in surface units) at which the raw signal reaches zero.
pub const VELOCITY_SCALE: f64 = 18.0;

/// Floor added to the raw signal before filtering.
pub const MIN_PRESSURE: f64 = 0.02;

/// Filter strength.  The new sample contributes `1 / DAMP` of the result.
pub const DAMP: f64 = 5.0;
const DAMP_INV: f64 = 1.0 / DAMP;
const DAMP1: f64 = DAMP - 1.0;

/// Travel distance assumed for the first sample of a path.
pub const FIRST_POINT_DISTANCE: f64 = 30.0;

// ════════════════════════════════════════════════════════════════════════════
// PathPoint
// ════════════════════════════════════════════════════════════════════════════

/// One sample of a gesture's centerline.
///
/// `pressure` is nominally in 0.0–1.0 but is not clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathPoint {
    pub x:        f64,
    pub y:        f64,
    pub pressure: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        PathPoint { x, y, pressure }
    }

    /// Euclidean distance to `(x, y)`.
    pub fn dist_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pressure for a new sample given the distance `v` travelled since the
/// previous sample and that sample's pressure `old_p` (0 for the first).
///
/// ```rust
/// use ribbon_geom::pressure_from_velocity;
/// // Standing still from rest: (0.02 + 1) / 5
/// assert!((pressure_from_velocity(0.0, 0.0) - 0.204).abs() < 1e-12);
/// ```
pub fn pressure_from_velocity(v: f64, old_p: f64) -> f64 {
    let raw = MIN_PRESSURE + (1.0 - v / VELOCITY_SCALE).max(0.0);
    (raw + DAMP1 * old_p) * DAMP_INV
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
