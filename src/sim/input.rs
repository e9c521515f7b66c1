//! Held-key snapshots and jump edge detection

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Logical keys currently held down, as reported by the platform layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Jump went down since the last sample, even if already released
    pub jump_latched: bool,
}

impl KeySnapshot {
    /// Record a key going down (`held = true`) or up
    pub fn set(&mut self, action: KeyAction, held: bool) {
        match action {
            KeyAction::MoveLeft => self.left = held,
            KeyAction::MoveRight => self.right = held,
            KeyAction::Jump => {
                // Auto-repeat keydowns arrive while already held
                if held && !self.jump {
                    self.jump_latched = true;
                }
                self.jump = held;
            }
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left is held
    pub left: bool,
    /// Move right is held
    pub right: bool,
    /// Jump went from released to held since the previous tick
    pub jump_pressed: bool,
}

/// Turns held-key snapshots into per-tick input
///
/// Holding jump yields a single `jump_pressed` on the first sampled tick; the
/// key has to be released and pressed again to produce another. A press that
/// is released before the next sample still counts once.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    jump_was_held: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the current key state for the next tick, consuming any latched
    /// jump press
    pub fn sample(&mut self, keys: &mut KeySnapshot) -> TickInput {
        let jump_pressed = keys.jump_latched || (keys.jump && !self.jump_was_held);
        keys.jump_latched = false;
        self.jump_was_held = keys.jump;
        TickInput {
            left: keys.left,
            right: keys.right,
            jump_pressed,
        }
    }

    /// Forget the previously held jump state
    pub fn reset(&mut self) {
        self.jump_was_held = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_fires_once_per_press() {
        let mut tracker = InputTracker::new();
        let mut keys = KeySnapshot::default();
        keys.set(KeyAction::Jump, true);

        assert!(tracker.sample(&mut keys).jump_pressed);
        // Still held on the following ticks, auto-repeat included
        assert!(!tracker.sample(&mut keys).jump_pressed);
        keys.set(KeyAction::Jump, true);
        assert!(!tracker.sample(&mut keys).jump_pressed);

        // Release, then press again
        keys.set(KeyAction::Jump, false);
        assert!(!tracker.sample(&mut keys).jump_pressed);
        keys.set(KeyAction::Jump, true);
        assert!(tracker.sample(&mut keys).jump_pressed);
    }

    #[test]
    fn test_tap_between_samples_still_jumps() {
        let mut tracker = InputTracker::new();
        let mut keys = KeySnapshot::default();
        assert!(!tracker.sample(&mut keys).jump_pressed);

        // Down and up before the next frame
        keys.set(KeyAction::Jump, true);
        keys.set(KeyAction::Jump, false);
        assert!(tracker.sample(&mut keys).jump_pressed);
        assert!(!tracker.sample(&mut keys).jump_pressed);

        // Two separate taps while the previous press was still held
        keys.set(KeyAction::Jump, true);
        assert!(tracker.sample(&mut keys).jump_pressed);
        keys.set(KeyAction::Jump, false);
        keys.set(KeyAction::Jump, true);
        assert!(tracker.sample(&mut keys).jump_pressed);
    }

    #[test]
    fn test_movement_passes_through() {
        let mut tracker = InputTracker::new();
        let mut keys = KeySnapshot {
            left: true,
            right: true,
            ..Default::default()
        };
        let input = tracker.sample(&mut keys);
        assert!(input.left);
        assert!(input.right);
        assert!(!input.jump_pressed);
    }

    #[test]
    fn test_snapshot_set() {
        let mut keys = KeySnapshot::default();
        keys.set(KeyAction::MoveRight, true);
        keys.set(KeyAction::Jump, true);
        keys.set(KeyAction::Jump, false);
        assert_eq!(
            keys,
            KeySnapshot {
                left: false,
                right: true,
                jump: false,
                jump_latched: true,
            }
        );
    }

    #[test]
    fn test_reset_rearms_jump() {
        let mut tracker = InputTracker::new();
        let mut held = KeySnapshot {
            jump: true,
            ..Default::default()
        };
        tracker.sample(&mut held);
        tracker.reset();
        assert!(tracker.sample(&mut held).jump_pressed);
    }
}
