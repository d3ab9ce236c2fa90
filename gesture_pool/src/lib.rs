//! # gesture_pool
//!
//! A fixed pool of [`Ribbon`]s driven by pointer and key input.  Each
//! pointer-down claims the next slot round-robin (overwriting whatever was
//! there); drags extend the claimed ribbon; every frame, every ribbon that
//! is not being drawn right now advances one step.
//!
//! ## Key commands
//!
//! | Key | Command |
//! |---|---|
//! | `+` / `=` | thicken the active ribbon |
//! | `-` | thin the active ribbon |
//! | `Space` | clear every ribbon |
//! | `p` | pause / resume animation |
//!
//! ## Rendering
//!
//! [`GestureDirector::render`] hands every compiled quad to a [`QuadSink`].
//! Quads flagged near a vertical edge are emitted twice more, shifted by
//! ± the surface width; quads near a horizontal edge, by ± the height.
//! Quads near both are not given diagonal copies.

use ribbon_geom::{CrossFlags, Quad, Ribbon};
use tracing::debug;

pub use ribbon_geom;

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

pub const DEFAULT_POOL_SIZE: usize = 36;
pub const DEFAULT_MIN_MOVE:  f64   = 3.0;

/// Construction parameters for a [`GestureDirector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectorConfig {
    /// Number of ribbon slots; 0 is treated as 1.
    pub pool_size: usize,
    /// A drag must travel more than this to add a point.
    pub min_move:  f64,
    /// Surface the ribbons wrap on.
    pub width:     i32,
    pub height:    i32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        DirectorConfig {
            pool_size: DEFAULT_POOL_SIZE,
            min_move:  DEFAULT_MIN_MOVE,
            width:     1024,
            height:    768,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeyCommand
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Thicken,
    Thin,
    ClearAll,
    ToggleUpdate,
}

impl KeyCommand {
    pub fn from_key(key: char) -> Option<KeyCommand> {
        match key {
            '+' | '=' => Some(KeyCommand::Thicken),
            '-'       => Some(KeyCommand::Thin),
            ' '       => Some(KeyCommand::ClearAll),
            'p'       => Some(KeyCommand::ToggleUpdate),
            _         => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// QuadSink — the rendering seam
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can fill quads with a constant colour.
///
/// Quads may lie partly or wholly outside `surface_size()`; sinks clip.
pub trait QuadSink {
    fn surface_size(&self) -> (i32, i32);
    fn fill_quad(&mut self, quad: &Quad);
}

/// Emit `quad` plus its wrap duplicates.
pub fn emit_wrapped<S: QuadSink + ?Sized>(sink: &mut S, quad: &Quad, flags: CrossFlags, w: i32, h: i32) {
    sink.fill_quad(quad);
    if flags.horizontal() {
        sink.fill_quad(&quad.translated(w, 0));
        sink.fill_quad(&quad.translated(-w, 0));
    }
    if flags.vertical() {
        sink.fill_quad(&quad.translated(0, h));
        sink.fill_quad(&quad.translated(0, -h));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureDirector
// ════════════════════════════════════════════════════════════════════════════

/// Owns the ribbon pool and routes input to it.
#[derive(Debug)]
pub struct GestureDirector {
    ribbons:        Vec<Ribbon>,
    /// Slot claimed by the most recent pointer-down.
    active:         Option<usize>,
    pointer_held:   bool,
    update_enabled: bool,
    min_move:       f64,
}

impl GestureDirector {
    pub fn new(cfg: DirectorConfig) -> Self {
        let pool_size = cfg.pool_size.max(1);
        let ribbons = (0..pool_size)
            .map(|_| Ribbon::new(cfg.width, cfg.height))
            .collect();
        debug!(pool_size, width = cfg.width, height = cfg.height, "gesture pool allocated");
        GestureDirector {
            ribbons,
            active:         None,
            pointer_held:   false,
            update_enabled: true,
            min_move:       cfg.min_move,
        }
    }

    // ── pointer ──────────────────────────────────────────────────────────

    /// Claim the next slot and start a new gesture there.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let slot = self.active.map_or(0, |i| (i + 1) % self.ribbons.len());
        self.active = Some(slot);
        self.pointer_held = true;

        let r = &mut self.ribbons[slot];
        r.clear();
        r.clear_polys();
        r.add_point(x, y);
        debug!(slot, x, y, "gesture started");
    }

    /// Extend the active gesture if the pointer moved far enough.
    pub fn pointer_drag(&mut self, x: f64, y: f64) {
        let Some(slot) = self.active else { return };
        let r = &mut self.ribbons[slot];
        if r.dist_to_last(x, y) > self.min_move {
            r.add_point(x, y);
            r.smooth();
            r.compile();
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
        if let Some(slot) = self.active {
            debug!(slot, points = self.ribbons[slot].point_count(), "gesture released");
        }
    }

    // ── keys ─────────────────────────────────────────────────────────────

    /// Apply the command bound to `key`, if any.  Returns whether the key
    /// was recognised.
    pub fn key_press(&mut self, key: char) -> bool {
        match KeyCommand::from_key(key) {
            Some(cmd) => { self.apply(cmd); true }
            None      => false,
        }
    }

    pub fn apply(&mut self, cmd: KeyCommand) {
        match cmd {
            KeyCommand::Thicken      => self.adjust_active_thickness(1.0),
            KeyCommand::Thin         => self.adjust_active_thickness(-1.0),
            KeyCommand::ClearAll     => self.clear_all(),
            KeyCommand::ToggleUpdate => {
                self.update_enabled = !self.update_enabled;
                debug!(update_enabled = self.update_enabled, "animation toggled");
            }
        }
    }

    fn adjust_active_thickness(&mut self, delta: f64) {
        let Some(slot) = self.active else { return };
        let r = &mut self.ribbons[slot];
        r.adjust_thickness(delta);
        r.compile();
        debug!(slot, thickness = r.thickness(), "thickness changed");
    }

    /// Reset every slot.  The round-robin position is kept.
    pub fn clear_all(&mut self) {
        for r in &mut self.ribbons {
            r.clear();
        }
        debug!("all gestures cleared");
    }

    // ── per frame ────────────────────────────────────────────────────────

    /// True while slot `index` is the one under the pointer.  Such a ribbon
    /// is frozen so it can be drawn.
    pub fn is_receiving_input(&self, index: usize) -> bool {
        self.pointer_held && self.active == Some(index)
    }

    /// Advance every existing ribbon that is not being drawn.
    pub fn update(&mut self) {
        if !self.update_enabled { return; }
        for i in 0..self.ribbons.len() {
            if self.ribbons[i].exists() && !self.is_receiving_input(i) {
                self.ribbons[i].advance();
            }
        }
    }

    /// Emit every existing ribbon's strip into `sink`.
    pub fn render<S: QuadSink + ?Sized>(&self, sink: &mut S) {
        let (w, h) = sink.surface_size();
        for r in self.ribbons.iter().filter(|r| r.exists()) {
            for (quad, flags) in r.strip() {
                emit_wrapped(sink, quad, flags, w, h);
            }
        }
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn ribbon(&self, index: usize) -> Option<&Ribbon> { self.ribbons.get(index) }
    pub fn ribbons(&self)        -> &[Ribbon]      { &self.ribbons }
    pub fn pool_size(&self)      -> usize          { self.ribbons.len() }
    pub fn active_index(&self)   -> Option<usize>  { self.active }
    pub fn pointer_held(&self)   -> bool           { self.pointer_held }
    pub fn update_enabled(&self) -> bool           { self.update_enabled }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every quad it is asked to fill.
    struct Recorder {
        size:  (i32, i32),
        quads: Vec<Quad>,
    }

    impl Recorder {
        fn new(w: i32, h: i32) -> Self { Recorder { size: (w, h), quads: Vec::new() } }
    }

    impl QuadSink for Recorder {
        fn surface_size(&self) -> (i32, i32) { self.size }
        fn fill_quad(&mut self, quad: &Quad) { self.quads.push(*quad); }
    }

    fn director(pool_size: usize) -> GestureDirector {
        GestureDirector::new(DirectorConfig { pool_size, width: 800, height: 600, ..Default::default() })
    }

    fn stroke(d: &mut GestureDirector, x0: f64, y: f64, n: usize) {
        d.pointer_down(x0, y);
        for i in 1..n { d.pointer_drag(x0 + 10.0 * i as f64, y); }
        d.pointer_up();
    }

    #[test]
    fn round_robin_slots() {
        let mut d = director(2);
        assert_eq!(d.active_index(), None);
        d.pointer_down(10.0, 10.0);
        assert_eq!(d.active_index(), Some(0));
        d.pointer_down(20.0, 20.0);
        assert_eq!(d.active_index(), Some(1));
        d.pointer_down(30.0, 30.0);
        assert_eq!(d.active_index(), Some(0));
    }

    #[test]
    fn reclaimed_slot_starts_over() {
        let mut d = director(2);
        stroke(&mut d, 100.0, 100.0, 6);
        stroke(&mut d, 100.0, 200.0, 4);
        assert_eq!(d.ribbon(0).map(|r| r.point_count()), Some(6));
        d.pointer_down(400.0, 400.0);
        let r = d.ribbon(0).unwrap();
        assert_eq!(r.point_count(), 1);
        assert!(!r.exists());
        assert_eq!(r.poly_count(), 0);
        assert_eq!(r.points()[0].x, 400.0);
    }

    #[test]
    fn zero_pool_is_one() {
        let mut d = director(0);
        assert_eq!(d.pool_size(), 1);
        d.pointer_down(1.0, 1.0);
        d.pointer_down(2.0, 2.0);
        assert_eq!(d.active_index(), Some(0));
    }

    #[test]
    fn drag_without_gesture_is_ignored() {
        let mut d = director(3);
        d.pointer_drag(50.0, 50.0);
        assert!(d.ribbons().iter().all(|r| r.point_count() == 0));
    }

    #[test]
    fn small_moves_are_filtered() {
        let mut d = director(3);
        d.pointer_down(100.0, 100.0);
        d.pointer_drag(102.0, 100.0);
        d.pointer_drag(103.0, 100.0);
        assert_eq!(d.ribbon(0).unwrap().point_count(), 1);
        d.pointer_drag(103.5, 100.0);
        assert_eq!(d.ribbon(0).unwrap().point_count(), 2);
        assert_eq!(d.ribbon(0).unwrap().poly_count(), 1);
    }

    #[test]
    fn thickness_keys_clamp() {
        let mut d = director(1);
        stroke(&mut d, 100.0, 100.0, 4);
        assert!(d.key_press('+'));
        assert_eq!(d.ribbon(0).unwrap().thickness(), 21.0);
        assert!(d.key_press('='));
        assert_eq!(d.ribbon(0).unwrap().thickness(), 22.0);
        for _ in 0..200 { d.key_press('+'); }
        assert_eq!(d.ribbon(0).unwrap().thickness(), 96.0);
        for _ in 0..200 { d.key_press('-'); }
        assert_eq!(d.ribbon(0).unwrap().thickness(), 2.0);
    }

    #[test]
    fn thickness_without_gesture_is_noop() {
        let mut d = director(2);
        d.key_press('+');
        assert!(d.ribbons().iter().all(|r| r.thickness() == 20.0));
    }

    #[test]
    fn space_clears_everything() {
        let mut d = director(3);
        stroke(&mut d, 100.0, 100.0, 5);
        stroke(&mut d, 100.0, 200.0, 5);
        d.key_press(' ');
        assert!(d.ribbons().iter().all(|r| !r.exists() && r.point_count() == 0));
        // Round-robin continues from where it was.
        d.pointer_down(0.0, 0.0);
        assert_eq!(d.active_index(), Some(2));
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut d = director(1);
        assert!(!d.key_press('x'));
        assert!(d.update_enabled());
    }

    #[test]
    fn pause_stops_advancing() {
        let mut d = director(2);
        stroke(&mut d, 100.0, 100.0, 5);
        d.key_press('p');
        assert!(!d.update_enabled());
        let before = d.ribbon(0).unwrap().points().to_vec();
        d.update();
        assert_eq!(d.ribbon(0).unwrap().points(), &before[..]);
        d.key_press('p');
        d.update();
        assert_ne!(d.ribbon(0).unwrap().points(), &before[..]);
    }

    #[test]
    fn held_gesture_freezes_others_cycle() {
        let mut d = director(3);
        stroke(&mut d, 100.0, 100.0, 5);

        // Start drawing in slot 1 and hold.
        d.pointer_down(300.0, 300.0);
        d.pointer_drag(310.0, 300.0);
        d.pointer_drag(320.0, 300.0);
        assert!(d.is_receiving_input(1));
        assert!(!d.is_receiving_input(0));

        let idle = d.ribbon(0).unwrap().points().to_vec();
        let live = d.ribbon(1).unwrap().points().to_vec();
        d.update();
        assert_ne!(d.ribbon(0).unwrap().points(), &idle[..]);
        assert_eq!(d.ribbon(1).unwrap().points(), &live[..]);

        // Once released, the fresh gesture cycles too.
        d.pointer_up();
        assert!(!d.is_receiving_input(1));
        d.update();
        assert_ne!(d.ribbon(1).unwrap().points(), &live[..]);
    }

    #[test]
    fn render_center_ribbon_once_per_quad() {
        let mut d = director(2);
        stroke(&mut d, 380.0, 300.0, 5);
        let mut rec = Recorder::new(800, 600);
        d.render(&mut rec);
        assert_eq!(rec.quads.len(), 4);
        assert_eq!(rec.quads, d.ribbon(0).unwrap().quads());
    }

    #[test]
    fn render_skips_nonexistent() {
        let mut d = director(2);
        d.pointer_down(100.0, 100.0);
        let mut rec = Recorder::new(800, 600);
        d.render(&mut rec);
        assert!(rec.quads.is_empty());
    }

    #[test]
    fn render_duplicates_edge_quads() {
        let mut d = director(1);
        stroke(&mut d, 5.0, 300.0, 4);
        let r = d.ribbon(0).unwrap();
        let expected: usize = r.cross_flags().iter()
            .map(|f| 1 + if f.horizontal() { 2 } else { 0 } + if f.vertical() { 2 } else { 0 })
            .sum();
        let mut rec = Recorder::new(800, 600);
        d.render(&mut rec);
        assert_eq!(rec.quads.len(), expected);

        let q0 = r.quads()[0];
        assert!(r.cross_flags()[0].contains(CrossFlags::LEFT));
        assert_eq!(rec.quads[0], q0);
        assert_eq!(rec.quads[1], q0.translated(800, 0));
        assert_eq!(rec.quads[2], q0.translated(-800, 0));
    }

    #[test]
    fn emit_wrapped_corner_gets_four_copies() {
        let q = Quad::new([5, 6, 7, 8], [5, 6, 7, 8]);
        let mut rec = Recorder::new(800, 600);
        emit_wrapped(&mut rec, &q, CrossFlags::LEFT | CrossFlags::TOP, 800, 600);
        assert_eq!(rec.quads.len(), 5);
        assert!(!rec.quads.contains(&q.translated(800, 600)));
    }
}
