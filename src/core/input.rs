//! Input state for the headless frame loop
//!
//! The frame loop owns an `InputSystem` and asks an `InputSource` to fill it at the
//! start of every frame. The scene then reads pressed keys for player movement and
//! consumes the accumulated mouse delta to orbit the third-person camera.

use std::collections::HashSet;

/// Keys the scene reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    /// Move up
    R,
    /// Move down
    F,
}

/// Configuration for InputSystem behavior
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mouse sensitivity in degrees per pixel
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.15,
        }
    }
}

/// InputSystem tracks keyboard and mouse state between frames
#[derive(Debug, Clone)]
pub struct InputSystem {
    pressed_keys: HashSet<Key>,
    mouse_delta: (f32, f32),
    mouse_sensitivity: f32,
}

impl InputSystem {
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.pressed_keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed_keys.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    /// Accumulate cursor movement in pixels since the last frame
    pub fn on_mouse_move(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Drain the mouse delta as (yaw, pitch) radians
    pub fn take_rotation(&mut self) -> (f32, f32) {
        let (dx, dy) = std::mem::take(&mut self.mouse_delta);
        (
            (self.mouse_sensitivity * dx).to_radians(),
            (self.mouse_sensitivity * dy).to_radians(),
        )
    }

    /// Check if a specific key is currently pressed
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// True if any of W/A/S/D is held
    pub fn is_moving(&self) -> bool {
        [Key::W, Key::A, Key::S, Key::D]
            .iter()
            .any(|k| self.pressed_keys.contains(k))
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f32) {
        self.mouse_sensitivity = sensitivity;
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Fills the input state at the start of each frame
pub trait InputSource {
    fn poll(&mut self, frame: u64, input: &mut InputSystem);
}

impl<F> InputSource for F
where
    F: FnMut(u64, &mut InputSystem),
{
    fn poll(&mut self, frame: u64, input: &mut InputSystem) {
        self(frame, input)
    }
}

/// Input source that never presses anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _frame: u64, _input: &mut InputSystem) {}
}
