//! Keyboard adapters: raw key events in, latest direction and speed out.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::consts::{HIGH_SPEED, LOW_SPEED, SPEED_HOLD_TIMEOUT};
use crate::geometry::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Turn(Direction),
    Accelerate,
    /// Start or restart a game
    Commit,
    Quit,
}

/// Keys the game cares about; anything else maps to `None`.
pub fn classify(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Key::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Key::Turn(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Key::Turn(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Key::Turn(Direction::Right)),
        KeyCode::Char(' ') => Some(Key::Accelerate),
        KeyCode::Enter => Some(Key::Commit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Latest accepted heading. Reversals and repeats of the current value
/// are swallowed, so every emission is a real change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionSignal {
    current: Direction,
}

impl Default for DirectionSignal {
    fn default() -> Self {
        DirectionSignal {
            current: Direction::Left,
        }
    }
}

impl DirectionSignal {
    pub fn press(&mut self, dir: Direction) -> Option<Direction> {
        if dir == self.current || dir == self.current.opposite() {
            return None;
        }
        self.current = dir;
        Some(dir)
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn reset(&mut self) {
        *self = DirectionSignal::default();
    }
}

/// HIGH while the accelerate key is held, LOW otherwise.
///
/// Terminals without the keyboard enhancement protocol never send key
/// releases; there the press is treated as held until auto-repeat stops
/// refreshing it for `SPEED_HOLD_TIMEOUT`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeedSignal {
    pressed_at: Option<Instant>,
    reports_release: bool,
}

impl SpeedSignal {
    pub fn new(reports_release: bool) -> Self {
        SpeedSignal {
            pressed_at: None,
            reports_release,
        }
    }

    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
    }

    pub fn release(&mut self) {
        self.pressed_at = None;
    }

    pub fn sample(&self, now: Instant) -> f64 {
        match self.pressed_at {
            Some(at)
                if self.reports_release
                    || now.saturating_duration_since(at) < SPEED_HOLD_TIMEOUT =>
            {
                HIGH_SPEED
            }
            _ => LOW_SPEED,
        }
    }

    pub fn reset(&mut self) {
        self.pressed_at = None;
    }
}

/// Both signals, fed from key events and sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    pub direction: DirectionSignal,
    pub speed: SpeedSignal,
}

impl Controls {
    pub fn new(reports_release: bool) -> Self {
        Controls {
            direction: DirectionSignal::default(),
            speed: SpeedSignal::new(reports_release),
        }
    }

    /// Caches a steering or speed event. Other keys are left to the caller.
    pub fn apply(&mut self, event: &KeyEvent, now: Instant) {
        match (classify(event.code), event.kind) {
            (Some(Key::Turn(dir)), KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.direction.press(dir);
            }
            (Some(Key::Accelerate), KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.speed.press(now);
            }
            (Some(Key::Accelerate), KeyEventKind::Release) => self.speed.release(),
            _ => {}
        }
    }

    /// Latest direction and speed.
    pub fn sample(&self, now: Instant) -> (Direction, f64) {
        (self.direction.current(), self.speed.sample(now))
    }

    pub fn reset(&mut self) {
        self.direction.reset();
        self.speed.reset();
    }
}
