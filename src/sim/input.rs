//! Logical input actions and the pressed-state map
//!
//! Input adapters (keyboard, touch joystick, on-screen buttons) write into
//! `InputState`; the update step only ever sees a `TickInput` snapshot.

use serde::{Deserialize, Serialize};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];

    fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Jump => 2,
        }
    }

    /// Map a DOM `KeyboardEvent.code` to an action; unknown codes are ignored
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Action::MoveRight),
            "Space" | "ArrowUp" | "KeyW" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Read-only view of which actions are held
pub trait ActionSource {
    fn is_pressed(&self, action: Action) -> bool;
}

/// Joystick deflection (px) below which neither direction is held
pub const JOYSTICK_DEAD_ZONE: f32 = 10.0;

/// Pressed/released flag per action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: [bool; 3],
    /// Jump pressed since the last tick, even if already released
    jump_queued: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        if action == Action::Jump && pressed && !self.is_pressed(Action::Jump) {
            self.jump_queued = true;
        }
        self.pressed[action.index()] = pressed;
    }

    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    /// Apply a key event by code. Returns true if the code is a game key.
    pub fn apply_key(&mut self, code: &str, pressed: bool) -> bool {
        match Action::from_key_code(code) {
            Some(action) => {
                self.set(action, pressed);
                true
            }
            None => false,
        }
    }

    /// Translate horizontal joystick deflection into left/right presses
    pub fn apply_joystick(&mut self, dx: f32, dead_zone: f32) {
        self.set(Action::MoveRight, dx > dead_zone);
        self.set(Action::MoveLeft, dx < -dead_zone);
    }

    /// Release everything (focus loss, teardown)
    pub fn release_all(&mut self) {
        self.pressed = [false; 3];
        self.jump_queued = false;
    }

    /// Snapshot for the next tick. A jump tapped and released between two
    /// ticks still reads as pressed once.
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut input = TickInput::sample(self);
        input.jump |= self.jump_queued;
        self.jump_queued = false;
        input
    }
}

impl ActionSource for InputState {
    fn is_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TickInput {
    /// Snapshot an action source
    pub fn sample(source: &impl ActionSource) -> Self {
        Self {
            left: source.is_pressed(Action::MoveLeft),
            right: source.is_pressed(Action::MoveRight),
            jump: source.is_pressed(Action::Jump),
        }
    }

    /// -1, 0 or 1; both directions held cancel out
    pub fn direction(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Action::from_key_code("ArrowLeft"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_code("KeyD"), Some(Action::MoveRight));
        assert_eq!(Action::from_key_code("Space"), Some(Action::Jump));
        assert_eq!(Action::from_key_code("ArrowUp"), Some(Action::Jump));
        assert_eq!(Action::from_key_code("Escape"), None);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut input = InputState::new();
        assert!(!input.apply_key("F5", true));
        assert_eq!(input, InputState::new());

        assert!(input.apply_key("ArrowRight", true));
        assert!(input.is_pressed(Action::MoveRight));
        input.apply_key("ArrowRight", false);
        assert!(!input.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_joystick() {
        let mut input = InputState::new();
        input.apply_joystick(25.0, JOYSTICK_DEAD_ZONE);
        assert!(input.is_pressed(Action::MoveRight));
        assert!(!input.is_pressed(Action::MoveLeft));

        input.apply_joystick(-12.0, JOYSTICK_DEAD_ZONE);
        assert!(input.is_pressed(Action::MoveLeft));
        assert!(!input.is_pressed(Action::MoveRight));

        input.apply_joystick(5.0, JOYSTICK_DEAD_ZONE);
        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(!input.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_jump_tap_between_ticks_is_kept() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));

        assert!(input.take_tick_input().jump);
        assert!(!input.take_tick_input().jump);
    }

    #[test]
    fn test_held_jump_reads_every_tick() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        assert!(input.take_tick_input().jump);
        // Repeated keydown while held does not queue again
        input.apply_key("Space", true);
        assert!(input.take_tick_input().jump);
        input.release(Action::Jump);
        assert!(!input.take_tick_input().jump);
    }

    #[test]
    fn test_release_all_drops_queued_jump() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.release_all();
        assert!(!input.take_tick_input().jump);
    }

    #[test]
    fn test_sample_and_direction() {
        let mut input = InputState::new();
        input.press(Action::MoveLeft);
        input.press(Action::Jump);
        let tick = TickInput::sample(&input);
        assert!(tick.left && tick.jump && !tick.right);
        assert_eq!(tick.direction(), -1);

        input.press(Action::MoveRight);
        assert_eq!(TickInput::sample(&input).direction(), 0);

        input.release_all();
        assert_eq!(TickInput::sample(&input), TickInput::default());
    }
}
