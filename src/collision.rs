//! Food pickup and the two game-ending checks.
//!
//! `detect_edge` and `detect_self` answer "is it still safe", so `true`
//! means the game goes on.

use crate::body::footprint;
use crate::consts::{BODY_WIDTH, FOOD_RADIUS, HALF_BODY_WIDTH};
use crate::engine::SnakeState;
use crate::geometry::{distance, point_in_rect, Arena, Direction};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Edge,
    SelfHit,
}

impl Collision {
    pub fn describe(&self) -> &'static str {
        match self {
            Collision::Edge => "hit the wall",
            Collision::SelfHit => "bit its own tail",
        }
    }
}

pub fn detect_food(state: &SnakeState) -> bool {
    distance(state.position, state.food) <= FOOD_RADIUS
}

/// False once the head's leading edge reaches the arena boundary it is
/// heading toward.
pub fn detect_edge(state: &SnakeState, arena: &Arena) -> bool {
    let pos = state.position;
    match state.direction {
        Direction::Up => pos.y > HALF_BODY_WIDTH,
        Direction::Down => pos.y < arena.height - HALF_BODY_WIDTH,
        Direction::Left => pos.x > HALF_BODY_WIDTH,
        Direction::Right => pos.x < arena.width - HALF_BODY_WIDTH,
    }
}

/// False when the head sits inside the padded box of any segment past the
/// first two that runs across the current heading.
pub fn detect_self(state: &SnakeState) -> bool {
    let head = state.position;
    !state.body.joints(head).any(|(idx, seg, start)| {
        if idx < 2 || seg.direction.is_parallel(state.direction) {
            return false;
        }
        let zone = footprint(start, seg.direction, seg.len + BODY_WIDTH).expand(HALF_BODY_WIDTH);
        point_in_rect(head, &zone)
    })
}

/// Termination predicate. `None` while both checks report safe.
pub fn check(state: &SnakeState, arena: &Arena) -> Option<Collision> {
    if !detect_edge(state, arena) {
        Some(Collision::Edge)
    } else if !detect_self(state) {
        Some(Collision::SelfHit)
    } else {
        None
    }
}
