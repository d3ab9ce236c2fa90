//! The `minifb` window: polls pointer and keys, presents the [`Canvas`].

use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::info;

use crate::app::AppConfig;
use crate::canvas::Canvas;
use crate::error::AppError;
use crate::input::{InputEvent, InputSource, PointerTracker};

pub const WINDOW_TITLE: &str = "Yellowtail — kinetic gestures";

pub struct Visualizer {
    window:  Window,
    canvas:  Canvas,
    pointer: PointerTracker,
}

impl Visualizer {
    pub fn new(cfg: &AppConfig) -> Result<Self, AppError> {
        let (w, h) = (cfg.width as usize, cfg.height as usize);
        let mut window = Window::new(
            WINDOW_TITLE,
            w, h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_micros(1_000_000 / cfg.fps as u64)));
        info!(width = w, height = h, fps = cfg.fps, "window opened");

        Ok(Visualizer {
            window,
            canvas:  Canvas::new(w, h, cfg.ink),
            pointer: PointerTracker::new(),
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn canvas_mut(&mut self) -> &mut Canvas { &mut self.canvas }

    /// Push the canvas to the screen.
    pub fn present(&mut self) -> Result<(), AppError> {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.window.update_with_buffer(self.canvas.pixels(), w, h)?;
        Ok(())
    }
}

impl InputSource for Visualizer {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        if !self.window.is_open() {
            out.push(InputEvent::Quit);
            return;
        }

        let pos = self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x as f64, y as f64));
        let down = self.window.get_mouse_down(MouseButton::Left);
        self.pointer.sample(pos, down, out);

        let shift = self.window.is_key_down(Key::LeftShift)
                 || self.window.is_key_down(Key::RightShift);
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            if let Some(ev) = key_event(key, shift) {
                out.push(ev);
            }
        }
    }
}

/// Map a window key to the event it stands for.
fn key_event(key: Key, shift: bool) -> Option<InputEvent> {
    let ch = match key {
        Key::Escape               => return Some(InputEvent::Quit),
        Key::Equal if shift       => '+',
        Key::Equal                => '=',
        Key::NumPadPlus           => '+',
        Key::Minus | Key::NumPadMinus => '-',
        Key::Space                => ' ',
        Key::P                    => 'p',
        _                         => return None,
    };
    Some(InputEvent::Key(ch))
}
