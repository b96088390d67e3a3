//! Points, directions and rectangles in arena space.
//!
//! The arena uses screen orientation: x grows to the right, y grows
//! downwards, so `Up` decreases y.

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Moves `dist` units along `dir`.
    pub fn translate(&self, dir: Direction, dist: f64) -> Point {
        let delta = PosDelta::from(dir);
        Point {
            x: self.x + delta.x * dist,
            y: self.y + delta.y * dist,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for the same direction or its opposite.
    pub fn is_parallel(&self, other: Direction) -> bool {
        *self == other || self.opposite() == other
    }
}

/// Unit step for a direction.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PosDelta {
    x: f64,
    y: f64,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0.0, y: -1.0 },
            Direction::Down => PosDelta { x: 0.0, y: 1.0 },
            Direction::Left => PosDelta { x: -1.0, y: 0.0 },
            Direction::Right => PosDelta { x: 1.0, y: 0.0 },
        }
    }
}

/// Axis-aligned box, `top <= bottom` in screen orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Grows the box by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Nearest point of the box to `p`.
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(self.left, self.right),
            y: p.y.clamp(self.top, self.bottom),
        }
    }
}

/// Playing field bounds. Food spawns in `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Arena {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Inclusive on all four edges.
pub fn point_in_rect(p: Point, rect: &Rect) -> bool {
    p.x >= rect.left && p.x <= rect.right && p.y >= rect.top && p.y <= rect.bottom
}
