//! # yellowtail
//!
//! Interactive kinetic-line sketchpad.  Click, drag, and release to draw a
//! stroke; on release it becomes a tapered ribbon that repeats itself
//! end-over-end, wrapping around the window edges.  Up to 36 strokes cycle
//! at once, each with its own period (its length).
//!
//! ## Controls
//!
//! | Input | Action |
//! |---|---|
//! | Left drag | Draw a new gesture (reuses the oldest slot) |
//! | `+` / `=` | Thicken the most recent gesture |
//! | `-` | Thin the most recent gesture |
//! | `Space` | Clear everything |
//! | `P` | Pause / resume |
//! | `Escape` | Quit |
//!
//! ## Layers
//!
//! * [`input`] — pointer/key events and the sources that produce them.
//! * [`canvas`] — software framebuffer that fills quads.
//! * [`visualizer`] — the `minifb` window.
//! * [`app`] — configuration, per-frame state, and the run loop.

pub mod app;
pub mod canvas;
pub mod error;
pub mod input;
pub mod visualizer;

pub use app::{run, run_headless, AppConfig, AppState};
pub use error::AppError;
