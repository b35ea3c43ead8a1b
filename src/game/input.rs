use std::time::{Duration, Instant};

use log::{debug, info};

use super::{Direction, GameSession, GameState};
use crate::config::Params;

/// The four logical keys the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Key {
    const ALL: [Key; 4] = [Key::LeftUp, Key::LeftDown, Key::RightUp, Key::RightDown];

    fn index(self) -> usize {
        match self {
            Key::LeftUp => 0,
            Key::LeftDown => 1,
            Key::RightUp => 2,
            Key::RightDown => 3,
        }
    }
}

/// Instantaneous pressed state of the four keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keys {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl Direction {
    /// Both or neither pressed cancels out.
    pub fn from_keys(up: bool, down: bool) -> Direction {
        match (up, down) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::Idle,
        }
    }
}

/// How long a key counts as held after its last press when the terminal
/// does not report releases. The first press waits out the OS auto-repeat
/// delay; once repeats arrive the window shrinks to the repeat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hold {
    pub first: Duration,
    pub repeat: Duration,
}

impl Default for Hold {
    fn default() -> Self {
        Self {
            first: Duration::from_millis(Params::KEY_FIRST_HOLD_MS),
            repeat: Duration::from_millis(Params::KEY_REPEAT_HOLD_MS),
        }
    }
}

/// Pressed/released bookkeeping for terminals.
///
/// With release reporting the terminal tells us when a key goes up. Without
/// it, `hold` is set and a key stays down until its deadline passes with no
/// press or repeat for it. The first release event seen turns the deadlines
/// off for good.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Per key: held, and until when if releases are not reported.
    pressed: [Option<Instant>; 4],
    hold: Option<Hold>,
}

impl KeyTracker {
    pub fn new(hold: Option<Hold>) -> Self {
        Self {
            pressed: [None; 4],
            hold,
        }
    }

    /// Press or repeat. Returns true if the key was up before.
    ///
    /// Terminals without release reporting also send repeats as presses, so
    /// a press on a key that is already down counts as a repeat.
    pub fn press(&mut self, key: Key, now: Instant) -> bool {
        let slot = &mut self.pressed[key.index()];
        let was_up = slot.is_none();
        let window = match self.hold {
            Some(hold) if was_up => hold.first,
            Some(hold) => hold.repeat,
            None => Duration::ZERO,
        };
        *slot = Some(now + window);
        was_up
    }

    /// Returns true if the key was down before.
    pub fn release(&mut self, key: Key) -> bool {
        if self.hold.take().is_some() {
            debug!("key release reported, hold timeout disabled");
        }
        self.pressed[key.index()].take().is_some()
    }

    /// Drop keys whose hold window ran out. Returns true if any did.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.hold.is_none() {
            return false;
        }
        let mut changed = false;
        for slot in self.pressed.iter_mut() {
            if let Some(deadline) = *slot {
                if now >= deadline {
                    *slot = None;
                    changed = true;
                }
            }
        }
        changed
    }

    pub fn clear(&mut self) {
        self.pressed = [None; 4];
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.pressed[key.index()].is_some()
    }

    pub fn keys(&self) -> Keys {
        let [left_up, left_down, right_up, right_down] = Key::ALL.map(|k| self.is_down(k));
        Keys {
            left_up,
            left_down,
            right_up,
            right_down,
        }
    }
}

impl GameSession {
    /// Re-derive both paddle directions from the current key state.
    ///
    /// Outside of play, any moving paddle starts the point: the ball heads
    /// away from the half it sits in and takes its vertical direction from
    /// the left paddle, or the right one if the left is idle. Returns true
    /// when play started.
    pub fn sample_input(&mut self, keys: Keys) -> bool {
        let left = Direction::from_keys(keys.left_up, keys.left_down);
        let right = Direction::from_keys(keys.right_up, keys.right_down);
        if left != self.left.direction || right != self.right.direction {
            debug!("directions left {:?} right {:?}", left, right);
        }
        self.left.direction = left;
        self.right.direction = right;

        if self.state == GameState::Playing || !(left.is_moving() || right.is_moving()) {
            return false;
        }

        self.state = GameState::Playing;
        self.ball.dir_x = if self.ball.left > self.field.width / 2.0 {
            -1.0
        } else {
            1.0
        };
        self.ball.dir_y = if left.is_moving() {
            left.sign()
        } else {
            right.sign()
        };
        info!(
            "serve: ball heading {} and {}",
            if self.ball.dir_x < 0.0 { "left" } else { "right" },
            if self.ball.dir_y < 0.0 { "up" } else { "down" }
        );
        true
    }
}
