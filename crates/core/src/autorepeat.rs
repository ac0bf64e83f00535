//! Autorepeat controller - turns held keys into discrete commands.
//!
//! Left, right and down repeat while held: the first frame of a hold fires
//! immediately and arms the initial delay (170ms sideways, 50ms down); every
//! later expiry fires again and re-arms the 50ms repeat rate. Releasing a key
//! zeroes its timer so the next press starts over.
//!
//! Rotate, hard drop and pause fire once per physical press. A latch set on
//! press is only cleared by the matching release, so host key-repeat events do
//! not re-trigger them.
//!
//! The controller never touches the board. It is driven purely by the elapsed
//! milliseconds passed to [`AutorepeatController::update`], so tests can feed
//! synthetic frame deltas.

use arrayvec::ArrayVec;

use crate::types::{Command, InputKey, ARR_MS, DAS_MS, SOFT_DROP_DAS_MS};

/// Countdown for one repeating direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RepeatTimer {
    held: bool,
    /// Milliseconds until the next fire; 0 means "not fired yet this hold".
    remaining_ms: u32,
}

impl RepeatTimer {
    fn release(&mut self) {
        self.held = false;
        self.remaining_ms = 0;
    }

    /// Advance by `elapsed_ms`; true when the command fires this frame.
    fn step(&mut self, elapsed_ms: u32, initial_ms: u32, repeat_ms: u32) -> bool {
        if !self.held {
            self.remaining_ms = 0;
            return false;
        }
        if self.remaining_ms == 0 {
            self.remaining_ms = initial_ms;
            return true;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.remaining_ms = repeat_ms;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone)]
pub struct AutorepeatController {
    left: RepeatTimer,
    right: RepeatTimer,
    down: RepeatTimer,
    rotate_latched: bool,
    hard_drop_latched: bool,
    pause_latched: bool,
    das_ms: u32,
    arr_ms: u32,
    soft_drop_das_ms: u32,
    /// Synthetic release after this long without key activity (terminals that
    /// never report key-up). `None` trusts release events.
    key_release_timeout_ms: Option<u32>,
    idle_ms: u32,
}

impl AutorepeatController {
    pub fn new() -> Self {
        Self::with_config(DAS_MS, ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            left: RepeatTimer::default(),
            right: RepeatTimer::default(),
            down: RepeatTimer::default(),
            rotate_latched: false,
            hard_drop_latched: false,
            pause_latched: false,
            das_ms,
            arr_ms,
            soft_drop_das_ms: SOFT_DROP_DAS_MS,
            key_release_timeout_ms: None,
            idle_ms: 0,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<u32> {
        self.key_release_timeout_ms
    }

    /// Register a key-down (or host repeat) event.
    ///
    /// Returns the one-shot command for rotate/hard-drop/pause on the first
    /// press after a release. Movement keys only mark themselves held; their
    /// commands come from [`update`](Self::update).
    pub fn press(&mut self, key: InputKey) -> Option<Command> {
        // Only movement refreshes the idle clock, so a one-shot key tapped
        // during a stale hold cannot keep that hold alive.
        if matches!(key, InputKey::Left | InputKey::Right | InputKey::Down) {
            self.idle_ms = 0;
        }
        match key {
            InputKey::Left => {
                self.left.held = true;
                None
            }
            InputKey::Right => {
                self.right.held = true;
                None
            }
            InputKey::Down => {
                self.down.held = true;
                None
            }
            InputKey::Rotate => latch(&mut self.rotate_latched, Command::Rotate),
            InputKey::HardDrop => latch(&mut self.hard_drop_latched, Command::HardDrop),
            InputKey::Pause => latch(&mut self.pause_latched, Command::TogglePause),
        }
    }

    /// Register a key-up event.
    pub fn release(&mut self, key: InputKey) {
        match key {
            InputKey::Left => self.left.release(),
            InputKey::Right => self.right.release(),
            InputKey::Down => self.down.release(),
            InputKey::Rotate => self.rotate_latched = false,
            InputKey::HardDrop => self.hard_drop_latched = false,
            InputKey::Pause => self.pause_latched = false,
        }
    }

    pub fn is_held(&self, key: InputKey) -> bool {
        match key {
            InputKey::Left => self.left.held,
            InputKey::Right => self.right.held,
            InputKey::Down => self.down.held,
            InputKey::Rotate => self.rotate_latched,
            InputKey::HardDrop => self.hard_drop_latched,
            InputKey::Pause => self.pause_latched,
        }
    }

    fn any_active(&self) -> bool {
        self.left.held
            || self.right.held
            || self.down.held
            || self.rotate_latched
            || self.hard_drop_latched
            || self.pause_latched
    }

    /// Advance all repeat timers by `elapsed_ms`.
    ///
    /// Each direction fires at most once per call, in left, right, down order.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, 3> {
        let mut commands = ArrayVec::new();

        self.expire_idle(elapsed_ms);

        if self.left.step(elapsed_ms, self.das_ms, self.arr_ms) {
            commands.push(Command::MoveLeft);
        }
        if self.right.step(elapsed_ms, self.das_ms, self.arr_ms) {
            commands.push(Command::MoveRight);
        }
        if self.down.step(elapsed_ms, self.soft_drop_das_ms, self.arr_ms) {
            commands.push(Command::SoftDrop);
        }

        commands
    }

    /// Count `elapsed_ms` towards the key-release timeout, releasing
    /// everything once it runs out. Returns true when keys were released.
    ///
    /// [`update`](Self::update) calls this itself; hosts call it directly on
    /// frames where no commands may fire (e.g. while paused).
    pub fn expire_idle(&mut self, elapsed_ms: u32) -> bool {
        let Some(timeout) = self.key_release_timeout_ms else {
            return false;
        };
        if !self.any_active() {
            self.idle_ms = 0;
            return false;
        }
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > timeout {
            log::trace!("no key activity for {}ms, releasing held keys", self.idle_ms);
            self.reset();
            return true;
        }
        false
    }

    /// Release every key and clear every latch.
    pub fn reset(&mut self) {
        self.left.release();
        self.right.release();
        self.down.release();
        self.rotate_latched = false;
        self.hard_drop_latched = false;
        self.pause_latched = false;
        self.idle_ms = 0;
    }
}

fn latch(flag: &mut bool, command: Command) -> Option<Command> {
    if *flag {
        return None;
    }
    *flag = true;
    Some(command)
}

impl Default for AutorepeatController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hold `key` for `total_ms` in frames of `frame_ms`, counting fired commands.
    fn hold_for(key: InputKey, total_ms: u32, frame_ms: u32) -> usize {
        let mut c = AutorepeatController::new();
        c.press(key);
        let mut fired = c.update(0).len();
        let mut t = 0;
        while t < total_ms {
            t += frame_ms;
            fired += c.update(frame_ms).len();
        }
        fired
    }

    #[test]
    fn test_first_frame_fires_immediately() {
        let mut c = AutorepeatController::new();
        c.press(InputKey::Left);
        assert_eq!(c.update(16).as_slice(), &[Command::MoveLeft]);
    }

    #[test]
    fn test_horizontal_initial_delay_then_repeat() {
        assert_eq!(hold_for(InputKey::Left, 169, 1), 1);
        assert_eq!(hold_for(InputKey::Left, 170, 10), 2);
        assert_eq!(hold_for(InputKey::Right, 219, 1), 2);
        assert_eq!(hold_for(InputKey::Right, 220, 10), 3);
        assert_eq!(hold_for(InputKey::Left, 400, 10), 6);
    }

    #[test]
    fn test_down_uses_repeat_rate_from_the_start() {
        assert_eq!(hold_for(InputKey::Down, 49, 1), 1);
        assert_eq!(hold_for(InputKey::Down, 50, 10), 2);
        assert_eq!(hold_for(InputKey::Down, 200, 10), 5);
    }

    #[test]
    fn test_release_rearms_initial_delay() {
        let mut c = AutorepeatController::new();
        c.press(InputKey::Left);
        assert_eq!(c.update(0).len(), 1);
        assert!(c.update(100).is_empty());

        c.release(InputKey::Left);
        assert!(c.update(100).is_empty());

        c.press(InputKey::Left);
        assert_eq!(c.update(16).as_slice(), &[Command::MoveLeft]);
        assert!(c.update(100).is_empty(), "initial delay applies again");
    }

    #[test]
    fn test_repeat_press_while_held_does_not_restart() {
        let mut c = AutorepeatController::new();
        c.press(InputKey::Right);
        assert_eq!(c.update(0).len(), 1);
        assert!(c.update(160).is_empty());
        c.press(InputKey::Right);
        assert_eq!(c.update(10).as_slice(), &[Command::MoveRight]);
    }

    #[test]
    fn test_one_shot_keys_are_latched_until_release() {
        let mut c = AutorepeatController::new();
        assert_eq!(c.press(InputKey::HardDrop), Some(Command::HardDrop));
        assert_eq!(c.press(InputKey::HardDrop), None);
        assert_eq!(c.press(InputKey::Rotate), Some(Command::Rotate));
        assert_eq!(c.press(InputKey::Rotate), None);

        c.release(InputKey::HardDrop);
        assert_eq!(c.press(InputKey::HardDrop), Some(Command::HardDrop));
        assert_eq!(c.press(InputKey::Rotate), None);
        assert!(c.update(1000).is_empty(), "one-shot keys never autorepeat");
    }

    #[test]
    fn test_simultaneous_directions_fire_in_order() {
        let mut c = AutorepeatController::new();
        c.press(InputKey::Left);
        c.press(InputKey::Right);
        c.press(InputKey::Down);
        assert_eq!(
            c.update(0).as_slice(),
            &[Command::MoveLeft, Command::MoveRight, Command::SoftDrop]
        );
    }

    #[test]
    fn test_release_timeout_releases_stale_keys() {
        let mut c = AutorepeatController::new().with_key_release_timeout_ms(Some(150));
        c.press(InputKey::Left);
        assert_eq!(c.press(InputKey::HardDrop), Some(Command::HardDrop));
        assert_eq!(c.update(0).len(), 1);
        assert!(c.update(100).is_empty());

        // Past the timeout without any key activity.
        assert!(c.update(60).is_empty());
        assert!(!c.is_held(InputKey::Left));
        assert_eq!(c.press(InputKey::HardDrop), Some(Command::HardDrop));
    }

    #[test]
    fn test_one_shot_key_does_not_extend_release_timeout() {
        let mut c = AutorepeatController::new().with_key_release_timeout_ms(Some(150));
        c.press(InputKey::Left);
        assert_eq!(c.update(0).as_slice(), &[Command::MoveLeft]);
        assert!(c.update(140).is_empty());

        // Left never gets a key-up; a rotate tap must not keep it alive.
        assert_eq!(c.press(InputKey::Rotate), Some(Command::Rotate));
        assert!(c.update(20).is_empty());
        assert!(!c.is_held(InputKey::Left));
    }

    #[test]
    fn test_movement_press_extends_release_timeout() {
        let mut c = AutorepeatController::new().with_key_release_timeout_ms(Some(150));
        c.press(InputKey::Left);
        c.update(0);
        c.update(140);

        // Host key-repeat for the held direction counts as activity.
        c.press(InputKey::Left);
        c.update(20);
        assert!(c.is_held(InputKey::Left));
    }

    #[test]
    fn test_reset_stops_repeats() {
        let mut c = AutorepeatController::with_config(100, 25);
        c.press(InputKey::Left);
        assert!(!c.update(0).is_empty());
        c.reset();
        assert!(c.update(200).is_empty());
    }
}
