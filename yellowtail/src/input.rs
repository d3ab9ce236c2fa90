//! Input events — from the window or from a script.
//!
//! The frame loop only sees [`InputEvent`]s.  It does not care whether they
//! came from a live `minifb` window or a canned [`ScriptedSource`].

use std::collections::VecDeque;

// ════════════════════════════════════════════════════════════════════════════
// InputEvent
// ════════════════════════════════════════════════════════════════════════════

/// One pointer or key event, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown { x: f64, y: f64 },
    /// Pointer moved while the button is held.
    PointerDrag { x: f64, y: f64 },
    /// Primary button released.
    PointerUp,
    /// A command key, as the character it types.
    Key(char),
    /// Leave the run loop.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// InputSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver the input for one frame.
pub trait InputSource {
    /// Append this frame's events to `out`.
    fn poll(&mut self, out: &mut Vec<InputEvent>);
}

// ════════════════════════════════════════════════════════════════════════════
// PointerTracker — sampled mouse state → edge events
// ════════════════════════════════════════════════════════════════════════════

/// Turns per-frame mouse samples into down / drag / up events.
///
/// A drag is reported only when the position changed since the previous
/// sample.  Samples with no position (pointer outside the window) keep the
/// button state but report no movement.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<(f64, f64)>,
}

impl PointerTracker {
    pub fn new() -> Self { Self::default() }

    pub fn is_down(&self) -> bool { self.down }

    pub fn sample(&mut self, pos: Option<(f64, f64)>, down: bool, out: &mut Vec<InputEvent>) {
        match (self.down, down) {
            (false, true) => {
                if let Some((x, y)) = pos {
                    out.push(InputEvent::PointerDown { x, y });
                    self.down = true;
                }
            }
            (true, true) => {
                if let Some((x, y)) = pos {
                    if self.last != Some((x, y)) {
                        out.push(InputEvent::PointerDrag { x, y });
                    }
                }
            }
            (true, false) => {
                out.push(InputEvent::PointerUp);
                self.down = false;
            }
            (false, false) => {}
        }
        if pos.is_some() {
            self.last = pos;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource — canned input, one batch per frame
// ════════════════════════════════════════════════════════════════════════════

/// Replays a fixed list of per-frame event batches.  Once exhausted it
/// delivers nothing.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedSource {
    pub fn new() -> Self { Self::default() }

    /// Queue a batch for the next unscripted frame.
    pub fn frame(mut self, events: Vec<InputEvent>) -> Self {
        self.frames.push_back(events);
        self
    }

    /// Queue `n` frames with no input.
    pub fn idle(mut self, n: usize) -> Self {
        for _ in 0..n { self.frames.push_back(Vec::new()); }
        self
    }

    /// Queue a whole stroke: down at the first point, one drag per frame
    /// through the rest, then release.
    pub fn stroke(mut self, points: &[(f64, f64)]) -> Self {
        let Some((&(x0, y0), rest)) = points.split_first() else { return self };
        self.frames.push_back(vec![InputEvent::PointerDown { x: x0, y: y0 }]);
        for &(x, y) in rest {
            self.frames.push_back(vec![InputEvent::PointerDrag { x, y }]);
        }
        self.frames.push_back(vec![InputEvent::PointerUp]);
        self
    }

    pub fn remaining(&self) -> usize { self.frames.len() }
}

impl InputSource for ScriptedSource {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        if let Some(batch) = self.frames.pop_front() {
            out.extend(batch);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_press_drag_release() {
        let mut t = PointerTracker::new();
        let mut out = Vec::new();
        t.sample(Some((10.0, 10.0)), false, &mut out);
        assert!(out.is_empty());
        t.sample(Some((10.0, 10.0)), true, &mut out);
        t.sample(Some((10.0, 10.0)), true, &mut out);   // no movement
        t.sample(Some((14.0, 10.0)), true, &mut out);
        t.sample(Some((14.0, 10.0)), false, &mut out);
        assert_eq!(out, vec![
            InputEvent::PointerDown { x: 10.0, y: 10.0 },
            InputEvent::PointerDrag { x: 14.0, y: 10.0 },
            InputEvent::PointerUp,
        ]);
        assert!(!t.is_down());
    }

    #[test]
    fn tracker_press_outside_window_waits() {
        let mut t = PointerTracker::new();
        let mut out = Vec::new();
        t.sample(None, true, &mut out);
        assert!(out.is_empty());
        assert!(!t.is_down());
        t.sample(Some((3.0, 4.0)), true, &mut out);
        assert_eq!(out, vec![InputEvent::PointerDown { x: 3.0, y: 4.0 }]);
    }

    #[test]
    fn tracker_release_outside_window() {
        let mut t = PointerTracker::new();
        let mut out = Vec::new();
        t.sample(Some((3.0, 4.0)), true, &mut out);
        t.sample(None, true, &mut out);
        t.sample(None, false, &mut out);
        assert_eq!(out.last(), Some(&InputEvent::PointerUp));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn scripted_stroke_frames() {
        let mut s = ScriptedSource::new()
            .stroke(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)])
            .frame(vec![InputEvent::Key('p')])
            .idle(2);
        assert_eq!(s.remaining(), 7);
        let mut out = Vec::new();
        s.poll(&mut out);
        assert_eq!(out, vec![InputEvent::PointerDown { x: 0.0, y: 0.0 }]);
        out.clear();
        for _ in 0..3 { s.poll(&mut out); }
        assert_eq!(out.last(), Some(&InputEvent::PointerUp));
        out.clear();
        s.poll(&mut out);
        assert_eq!(out, vec![InputEvent::Key('p')]);
        for _ in 0..5 { s.poll(&mut out); }
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn scripted_empty_stroke_is_ignored() {
        let s = ScriptedSource::new().stroke(&[]);
        assert_eq!(s.remaining(), 0);
    }
}
