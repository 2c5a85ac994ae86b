//! Keyboard input tracking
//!
//! Key events arrive asynchronously between frames; the simulation wants one
//! [`TickInput`] per tick. Held actions are sampled as-is, while fire is a
//! latched rising edge so holding the key does not auto-fire.

use crate::sim::TickInput;

/// A game action bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

impl Action {
    /// Map a `KeyboardEvent.code` to an action (two bindings each)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::RotateLeft),
            "ArrowRight" | "KeyD" => Some(Action::RotateRight),
            "ArrowUp" | "KeyW" => Some(Action::Thrust),
            "Space" | "KeyJ" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Tracks which bound keys are down and whether fire was newly pressed
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Physical keys currently held, by code
    held: Vec<(&'static str, Action)>,
    fire_pending: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is bound (so the caller
    /// can suppress the browser default, e.g. page scroll on Space).
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_key_code(code) else {
            return false;
        };
        if self.held.iter().any(|(c, _)| *c == code) {
            // Auto-repeat
            return true;
        }
        if action == Action::Fire && !self.is_held(Action::Fire) {
            self.fire_pending = true;
        }
        if let Some(code) = Self::intern(code) {
            self.held.push((code, action));
        }
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        let before = self.held.len();
        self.held.retain(|(c, _)| *c != code);
        before != self.held.len()
    }

    /// Drop all held keys and any unconsumed fire press (focus loss, restart)
    pub fn clear(&mut self) {
        self.held.clear();
        self.fire_pending = false;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.iter().any(|(_, a)| *a == action)
    }

    /// Produce input for one tick, consuming a pending fire press
    pub fn sample(&mut self) -> TickInput {
        let fire = std::mem::take(&mut self.fire_pending);
        TickInput {
            rotate_left: self.is_held(Action::RotateLeft),
            rotate_right: self.is_held(Action::RotateRight),
            thrust: self.is_held(Action::Thrust),
            fire,
        }
    }

    /// Static copy of a bound key code so held keys need no allocation
    fn intern(code: &str) -> Option<&'static str> {
        const CODES: [&str; 8] = [
            "ArrowLeft",
            "KeyA",
            "ArrowRight",
            "KeyD",
            "ArrowUp",
            "KeyW",
            "Space",
            "KeyJ",
        ];
        CODES.iter().copied().find(|c| *c == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key_code("ArrowLeft"), Some(Action::RotateLeft));
        assert_eq!(Action::from_key_code("KeyD"), Some(Action::RotateRight));
        assert_eq!(Action::from_key_code("KeyW"), Some(Action::Thrust));
        assert_eq!(Action::from_key_code("Space"), Some(Action::Fire));
        assert_eq!(Action::from_key_code("KeyQ"), None);
        assert_eq!(Action::from_key_code(""), None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputTracker::new();
        assert!(!input.key_down("Escape"));
        assert!(!input.key_up("Escape"));
        assert_eq!(input.sample(), TickInput::default());
    }

    #[test]
    fn test_held_actions() {
        let mut input = InputTracker::new();
        input.key_down("ArrowUp");
        input.key_down("KeyA");

        let sample = input.sample();
        assert!(sample.thrust);
        assert!(sample.rotate_left);
        assert!(!sample.rotate_right);
        // Still held next tick
        assert!(input.sample().thrust);

        input.key_up("ArrowUp");
        assert!(!input.sample().thrust);
    }

    #[test]
    fn test_either_binding_keeps_action_held() {
        let mut input = InputTracker::new();
        input.key_down("ArrowRight");
        input.key_down("KeyD");
        input.key_up("ArrowRight");
        assert!(input.sample().rotate_right);
        input.key_up("KeyD");
        assert!(!input.sample().rotate_right);
    }

    #[test]
    fn test_holding_fire_fires_once() {
        let mut input = InputTracker::new();
        input.key_down("Space");
        assert!(input.sample().fire);

        // Browser auto-repeat keydowns while held
        input.key_down("Space");
        input.key_down("Space");
        assert!(!input.sample().fire);
        assert!(!input.sample().fire);

        input.key_up("Space");
        input.key_down("Space");
        assert!(input.sample().fire);
    }

    #[test]
    fn test_tap_between_samples_still_fires() {
        let mut input = InputTracker::new();
        input.key_down("Space");
        input.key_up("Space");
        assert!(input.sample().fire);
        assert!(!input.sample().fire);
    }

    #[test]
    fn test_second_fire_binding_while_held_does_not_refire() {
        let mut input = InputTracker::new();
        input.key_down("Space");
        assert!(input.sample().fire);
        input.key_down("KeyJ");
        assert!(!input.sample().fire);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut input = InputTracker::new();
        input.key_down("ArrowUp");
        input.key_down("Space");
        input.clear();
        assert_eq!(input.sample(), TickInput::default());
    }
}
