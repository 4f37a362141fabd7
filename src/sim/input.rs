//! Input event translation
//!
//! The presentation layer forwards raw pointer and key events here as they
//! arrive; once per frame the driver takes a `TickInput` snapshot. Held keys
//! persist across snapshots, one-shot actions and pointer moves do not.

use glam::Vec2;

use super::geometry::Aabb;
use super::paddle::Direction;
use super::tick::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    /// Launch
    Space,
    /// Extra ball
    KeyB,
    /// Pause toggle
    Escape,
    /// Restart
    KeyR,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" | "KeyA" => Key::ArrowLeft,
            "ArrowRight" | "KeyD" => Key::ArrowRight,
            "Space" => Key::Space,
            "KeyB" => Key::KeyB,
            "Escape" => Key::Escape,
            "KeyR" => Key::KeyR,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    /// Pointer events outside this box are ignored
    arena: Aabb,
    left_held: bool,
    right_held: bool,
    pointer_x: Option<f32>,
    launch: bool,
    extra_ball: bool,
    pause: bool,
    restart: bool,
}

impl InputState {
    pub fn new(arena: Aabb) -> Self {
        Self {
            arena,
            left_held: false,
            right_held: false,
            pointer_x: None,
            launch: false,
            extra_ball: false,
            pause: false,
            restart: false,
        }
    }

    /// Pointer moved to (x, y) in arena coordinates
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) {
        if self.arena.contains_point(Vec2::new(x, y)) {
            self.pointer_x = Some(x);
        }
    }

    pub fn on_pointer_button(&mut self, pressed: bool, position: Vec2) {
        if pressed && self.arena.contains_point(position) {
            self.launch = true;
        }
    }

    pub fn on_key_down(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => self.left_held = true,
            Key::ArrowRight => self.right_held = true,
            Key::Space => self.launch = true,
            Key::KeyB => self.extra_ball = true,
            Key::Escape => self.pause = true,
            Key::KeyR => self.restart = true,
            Key::Other => {}
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => self.left_held = false,
            Key::ArrowRight => self.right_held = false,
            _ => {}
        }
    }

    /// Input for the next tick; clears one-shot actions and the pointer target
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            pointer_x: self.pointer_x.take(),
            direction: Direction::from_keys(self.left_held, self.right_held),
            launch: std::mem::take(&mut self.launch),
            extra_ball: std::mem::take(&mut self.extra_ball),
            pause: std::mem::take(&mut self.pause),
            restart: std::mem::take(&mut self.restart),
        }
    }
}
