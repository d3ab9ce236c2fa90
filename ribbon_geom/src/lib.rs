//! # ribbon_geom
//!
//! The geometry engine behind a kinetic, self-repeating line.  A pointer
//! stroke is captured as a fixed-capacity path of [`PathPoint`]s whose
//! pressure is derived from drawing speed, compiled into a tapered strip of
//! integer [`Quad`]s, and then perpetually advanced end-over-end.
//!
//! ## Quick start
//!
//! ```rust
//! use ribbon_geom::Ribbon;
//!
//! let mut r = Ribbon::new(800, 600);
//! for i in 0..6 {
//!     r.add_point(100.0 + 10.0 * i as f64, 300.0);
//! }
//! r.smooth();
//! r.compile();
//! assert_eq!(r.poly_count(), r.point_count() - 1);
//!
//! // One animation frame: the head wraps around to the tail.
//! r.advance();
//! ```
//!
//! ## Pieces
//!
//! | Item | Role |
//! |---|---|
//! | [`PathPoint`] | centerline sample with pressure |
//! | [`pressure_from_velocity`] | inverse-velocity low-pass filter |
//! | [`Quad`] | one drawable quadrilateral, integer vertices |
//! | [`CrossFlags`] | which screen edges a quad comes near |
//! | [`Ribbon`] | one gesture: path buffer, thickness, compiled strip |
//!
//! Storage is allocated once per [`Ribbon`] and reused forever; no call on a
//! ribbon allocates after construction.

pub mod path;
pub mod quad;
pub mod ribbon;

pub use path::{pressure_from_velocity, PathPoint};
pub use quad::{CrossFlags, Quad};
pub use ribbon::{Ribbon, CAPACITY, INITIAL_THICKNESS, MAX_THICKNESS, MIN_THICKNESS};
