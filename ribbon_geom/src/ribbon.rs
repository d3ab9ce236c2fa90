//! One gesture: its path buffer, thickness, and compiled quad strip.
//!
//! A [`Ribbon`] owns three parallel fixed-size arrays (path, quads, cross
//! flags) that are sized once at construction and indexed by the logical
//! counters `point_count` / `poly_count`.  Clearing resets the counters;
//! nothing is ever reallocated.

use std::f64::consts::PI;

use tracing::trace;

use crate::path::{pressure_from_velocity, PathPoint, FIRST_POINT_DISTANCE};
use crate::quad::{CrossFlags, Quad};

// ════════════════════════════════════════════════════════════════════════════
// Constants
// ════════════════════════════════════════════════════════════════════════════

/// Maximum number of path points (and quads) per ribbon.
pub const CAPACITY: usize = 600;

pub const INITIAL_THICKNESS: f64 = 20.0;
pub const MIN_THICKNESS:     f64 = 2.0;
pub const MAX_THICKNESS:     f64 = 96.0;

/// Smoothing kernel: neighbours weigh 1, the center `SMOOTH_WEIGHT`.
const SMOOTH_WEIGHT: f64 = 18.0;
const SMOOTH_SCALE:  f64 = 1.0 / (SMOOTH_WEIGHT + 2.0);

/// Exponent of the tail taper.
const TAPER_POW: f64 = 0.4;
/// Smallest half-width an interior rail pair may have.
const MIN_RADIUS: f64 = 0.618;
/// Stand-in length for a zero-length first segment.
const MIN_SEGMENT: f64 = 0.0001;

// ════════════════════════════════════════════════════════════════════════════
// Ribbon
// ════════════════════════════════════════════════════════════════════════════

/// One user-drawn stroke and its tapered polygon strip.
#[derive(Clone, Debug)]
pub struct Ribbon {
    path:        Box<[PathPoint]>,
    point_count: usize,

    polygons:    Box<[Quad]>,
    crosses:     Box<[CrossFlags]>,
    poly_count:  usize,

    thickness:   f64,
    exists:      bool,
    /// Head-to-tail displacement, re-applied to the point that wraps around
    /// during [`Ribbon::advance`].
    wrap_delta:  (f64, f64),

    width:       i32,
    height:      i32,
}

impl Ribbon {
    /// A cleared ribbon whose geometry wraps on a `width` × `height` surface.
    pub fn new(width: i32, height: i32) -> Self {
        Ribbon {
            path:        vec![PathPoint::default(); CAPACITY].into_boxed_slice(),
            point_count: 0,
            polygons:    vec![Quad::default(); CAPACITY].into_boxed_slice(),
            crosses:     vec![CrossFlags::NONE; CAPACITY].into_boxed_slice(),
            poly_count:  0,
            thickness:   INITIAL_THICKNESS,
            exists:      false,
            wrap_delta:  (0.0, 0.0),
            width:       width.max(1),
            height:      height.max(1),
        }
    }

    // ── bookkeeping ──────────────────────────────────────────────────────

    /// Forget the path and restore the initial thickness.  The compiled
    /// strip is kept; see [`Ribbon::clear_polys`].
    pub fn clear(&mut self) {
        self.point_count = 0;
        self.exists = false;
        self.thickness = INITIAL_THICKNESS;
    }

    pub fn clear_polys(&mut self) {
        self.poly_count = 0;
    }

    /// Distance from the last path point to `(x, y)`, or
    /// [`FIRST_POINT_DISTANCE`] when the path is empty.
    pub fn dist_to_last(&self, x: f64, y: f64) -> f64 {
        match self.last_point() {
            Some(p) => p.dist_to(x, y),
            None    => FIRST_POINT_DISTANCE,
        }
    }

    /// Append a sample.  Silently dropped once the path is full.
    pub fn add_point(&mut self, x: f64, y: f64) {
        if self.point_count >= CAPACITY {
            trace!(x, y, "ribbon full, point dropped");
            return;
        }

        let v = self.dist_to_last(x, y);
        let old_p = self.last_point().map_or(0.0, |p| p.pressure);
        let pressure = pressure_from_velocity(v, old_p);
        self.path[self.point_count] = PathPoint::new(x, y, pressure);
        self.point_count += 1;

        if self.point_count > 1 {
            self.exists = true;
            let first = self.path[0];
            let last  = self.path[self.point_count - 1];
            self.wrap_delta = (last.x - first.x, last.y - first.y);
        }
    }

    /// Overwrite pressures with a raised-sine profile: thin at both ends,
    /// full weight in the middle.
    pub fn apply_sine_pressures(&mut self) {
        if self.point_count < 2 { return; }
        let step = 1.0 / (self.point_count - 1) as f64 * PI * 2.0;
        let mut t = 0.0_f64;
        for p in &mut self.path[..self.point_count] {
            p.pressure = ((1.0 - t.cos()) * 0.5).sqrt();
            t += step;
        }
    }

    /// One left-to-right pass of a (1, 18, 1) weighted average over the
    /// interior points.  The first point and the last two are left alone.
    ///
    /// The sweep is in place: each point sees its already-smoothed left
    /// neighbour and its original right neighbour.
    pub fn smooth(&mut self) {
        let end = self.point_count.saturating_sub(2);
        for i in 1..end {
            let lower = self.path[i - 1];
            let upper = self.path[i + 1];
            let center = &mut self.path[i];
            center.x = (lower.x + SMOOTH_WEIGHT * center.x + upper.x) * SMOOTH_SCALE;
            center.y = (lower.y + SMOOTH_WEIGHT * center.y + upper.y) * SMOOTH_SCALE;
        }
    }

    // ── thickness ────────────────────────────────────────────────────────

    /// Clamp into `[MIN_THICKNESS, MAX_THICKNESS]`.  Non-finite values are
    /// ignored.
    pub fn set_thickness(&mut self, t: f64) {
        if !t.is_finite() {
            trace!(t, "non-finite thickness ignored");
            return;
        }
        self.thickness = t.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    pub fn adjust_thickness(&mut self, delta: f64) {
        self.set_thickness(self.thickness + delta);
    }

    // ── geometry ─────────────────────────────────────────────────────────

    /// Rebuild the quad strip from the current path.
    ///
    /// Emits one quad per path segment: `point_count - 2` body quads whose
    /// rails straddle each interior point, then a degenerate end cap that
    /// collapses onto the last point.  Body quads are shifted as a whole so
    /// that their first vertex lands inside the surface; the end cap is not.
    pub fn compile(&mut self) {
        if !self.exists { return; }
        self.clear_polys();

        let n_seg     = self.point_count - 1;
        let last_poly = n_seg - 1;
        let taper_inv = 1.0 / (n_seg.saturating_sub(1).max(1)) as f64;
        let thickness = self.thickness;
        let (w, h)    = (self.width, self.height);

        // First rail pair, perpendicular to segment 0→1.
        let p0 = self.path[0];
        let p1 = self.path[1];
        let radius0 = p0.pressure * thickness;
        let dx01 = p1.x - p0.x;
        let dy01 = p1.y - p0.y;
        let mut hp01 = (dx01 * dx01 + dy01 * dy01).sqrt();
        if hp01 == 0.0 {
            hp01 = MIN_SEGMENT;
        }
        let co01 = radius0 * dx01 / hp01;
        let si01 = radius0 * dy01 / hp01;
        let mut a = (p0.x - si01, p0.y + co01);
        let mut b = (p0.x + si01, p0.y - co01);

        for i in 1..n_seg {
            let taper = ((last_poly - i) as f64 * taper_inv).powf(TAPER_POW);
            let prev = self.path[i - 1];
            let cur  = self.path[i];
            let next = self.path[i + 1];
            let radius1 = (taper * cur.pressure * thickness).max(MIN_RADIUS);

            // Normal from the chord prev→next.
            let dx02 = next.x - prev.x;
            let dy02 = next.y - prev.y;
            let mut hp02 = (dx02 * dx02 + dy02 * dy02).sqrt();
            if hp02 != 0.0 {
                hp02 = radius1 / hp02;
            }
            let co02 = dx02 * hp02;
            let si02 = dy02 * hp02;
            let c = (cur.x + si02, cur.y - co02);
            let d = (cur.x - si02, cur.y + co02);

            // Wrap the first vertex into the surface and carry the same
            // shift through the other three.  Advanced paths drift without
            // bound, so this runs in i64 and only the result is narrowed.
            let ax = floor_wide(a.0);
            let ay = floor_wide(a.1);
            let sx = wrap_coord(ax, w as i64) - ax;
            let sy = wrap_coord(ay, h as i64) - ay;
            let xs = [a.0, b.0, c.0, d.0].map(|v| narrow(floor_wide(v).saturating_add(sx)));
            let ys = [a.1, b.1, c.1, d.1].map(|v| narrow(floor_wide(v).saturating_add(sy)));

            let quad = Quad::new(xs, ys);
            self.push_quad(quad);

            a = d;
            b = c;
        }

        // End cap.
        let tail = self.path[n_seg];
        let (tx, ty) = (floor_i(tail.x), floor_i(tail.y));
        let cap = Quad::new(
            [floor_i(a.0), floor_i(b.0), tx, tx],
            [floor_i(a.1), floor_i(b.1), ty, ty],
        );
        self.push_quad(cap);
    }

    /// Move the ribbon one step along its own path: every position shifts one
    /// slot toward the tail, and the vacated head slot is refilled from the
    /// tail, offset back by the wrap delta.  Pressures stay with their slots.
    pub fn advance(&mut self) {
        if !self.exists || self.point_count == 0 { return; }

        let last = self.point_count - 1;
        for i in (1..=last).rev() {
            self.path[i].x = self.path[i - 1].x;
            self.path[i].y = self.path[i - 1].y;
        }
        let (jx, jy) = self.wrap_delta;
        self.path[0].x = self.path[last].x - jx;
        self.path[0].y = self.path[last].y - jy;
        self.compile();
    }

    fn push_quad(&mut self, quad: Quad) {
        self.crosses[self.poly_count] = CrossFlags::of(&quad, self.width, self.height);
        self.polygons[self.poly_count] = quad;
        self.poly_count += 1;
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn points(&self)      -> &[PathPoint]  { &self.path[..self.point_count] }
    pub fn quads(&self)       -> &[Quad]       { &self.polygons[..self.poly_count] }
    pub fn cross_flags(&self) -> &[CrossFlags] { &self.crosses[..self.poly_count] }
    pub fn point_count(&self) -> usize         { self.point_count }
    pub fn poly_count(&self)  -> usize         { self.poly_count }
    pub fn exists(&self)      -> bool          { self.exists }
    pub fn thickness(&self)   -> f64           { self.thickness }
    pub fn wrap_delta(&self)  -> (f64, f64)    { self.wrap_delta }
    pub fn surface_size(&self) -> (i32, i32)   { (self.width, self.height) }

    pub fn last_point(&self) -> Option<PathPoint> {
        self.points().last().copied()
    }

    /// Compiled quads paired with their cross flags.
    pub fn strip(&self) -> impl Iterator<Item = (&Quad, CrossFlags)> + '_ {
        self.quads().iter().zip(self.cross_flags().iter().copied())
    }
}

fn floor_i(v: f64) -> i32 {
    v.floor() as i32
}

fn floor_wide(v: f64) -> i64 {
    v.floor() as i64
}

fn narrow(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Map `v` into the surface along one axis.  Negative multiples of `m` map
/// to `m`, not 0.
pub(crate) fn wrap_coord(v: i64, m: i64) -> i64 {
    if v < 0 { m - (v.unsigned_abs() % m as u64) as i64 } else { v % m }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
