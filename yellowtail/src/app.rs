//! Top-level application state and run loop.
//!
//! `AppState` owns the [`GestureDirector`] and turns [`InputEvent`]s into
//! pool operations.  [`run`] drives it against a window at the configured
//! frame rate; [`run_headless`] drives it against a bare [`Canvas`].

use std::fs;
use std::path::Path;

use gesture_pool::{DirectorConfig, GestureDirector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::error::AppError;
use crate::input::{InputEvent, InputSource};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.  Every field is optional in the
/// JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub width:        u32,
    pub height:       u32,
    /// Number of gesture slots.
    pub pool_size:    usize,
    /// Minimum pointer travel between recorded points.
    pub min_move:     f64,
    pub fps:          u32,
    /// 0xAARRGGBB
    pub background:   u32,
    pub ink:          u32,
    pub start_paused: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:        1024,
            height:       768,
            pool_size:    gesture_pool::DEFAULT_POOL_SIZE,
            min_move:     gesture_pool::DEFAULT_MIN_MOVE,
            fps:          60,
            background:   0xFFFFFFFF,
            ink:          0xFF1E1E1E,
            start_paused: false,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file.  The result is validated.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json(&text)?;
        info!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self, AppError> {
        let cfg: AppConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.width == 0 || self.height == 0 {
            return Err(AppError::InvalidConfig(format!(
                "window must be non-empty, got {}x{}", self.width, self.height
            )));
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(AppError::InvalidConfig("window dimensions too large".into()));
        }
        if self.pool_size == 0 {
            return Err(AppError::InvalidConfig("pool_size must be at least 1".into()));
        }
        if self.fps == 0 {
            return Err(AppError::InvalidConfig("fps must be at least 1".into()));
        }
        Ok(())
    }

    pub fn director_config(&self) -> DirectorConfig {
        DirectorConfig {
            pool_size: self.pool_size,
            min_move:  self.min_move,
            width:     self.width as i32,
            height:    self.height as i32,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    director:   GestureDirector,
    background: u32,
    frame:      u64,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let mut director = GestureDirector::new(cfg.director_config());
        if cfg.start_paused {
            director.key_press('p');
        }
        AppState {
            director,
            background: cfg.background,
            frame: 0,
        }
    }

    /// Route one event.  Returns false when the app should stop.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => self.director.pointer_down(x, y),
            InputEvent::PointerDrag { x, y } => self.director.pointer_drag(x, y),
            InputEvent::PointerUp            => self.director.pointer_up(),
            InputEvent::Key(k) => {
                if !self.director.key_press(k) {
                    debug!(key = ?k, "unbound key");
                }
            }
            InputEvent::Quit => return false,
        }
        true
    }

    /// Per-frame logic.
    pub fn tick(&mut self) {
        self.director.update();
        self.frame += 1;
    }

    /// Clear `canvas` and draw every ribbon.
    pub fn render(&self, canvas: &mut Canvas) {
        canvas.clear(self.background);
        self.director.render(canvas);
    }

    pub fn director(&self) -> &GestureDirector { &self.director }
    pub fn frame(&self)    -> u64              { self.frame }
}

// ════════════════════════════════════════════════════════════════════════════
// Run loops
// ════════════════════════════════════════════════════════════════════════════

/// Poll, route, update for one frame.  Returns false when the app should stop.
fn step<S: InputSource + ?Sized>(app: &mut AppState, source: &mut S, events: &mut Vec<InputEvent>) -> bool {
    events.clear();
    source.poll(events);
    for ev in events.drain(..) {
        if !app.handle_input(ev) {
            return false;
        }
    }
    app.tick();
    true
}

/// Open the window and run until it closes or Escape is pressed.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    cfg.validate()?;

    let mut vis    = Visualizer::new(&cfg)?;
    let mut app    = AppState::new(&cfg);
    let mut events = Vec::with_capacity(16);

    while vis.is_open() {
        if !step(&mut app, &mut vis, &mut events) { break; }
        app.render(vis.canvas_mut());
        vis.present()?;
    }

    info!(frames = app.frame(), "window closed");
    Ok(())
}

/// Run up to `frames` frames against an off-screen canvas.  Stops early on
/// [`InputEvent::Quit`].  Returns the final state and the last frame drawn.
pub fn run_headless<S: InputSource>(
    cfg: &AppConfig,
    mut source: S,
    frames: usize,
) -> Result<(AppState, Canvas), AppError> {
    cfg.validate()?;

    let mut app    = AppState::new(cfg);
    let mut canvas = Canvas::new(cfg.width as usize, cfg.height as usize, cfg.ink);
    let mut events = Vec::with_capacity(16);

    for _ in 0..frames {
        if !step(&mut app, &mut source, &mut events) { break; }
        app.render(&mut canvas);
    }
    Ok((app, canvas))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
