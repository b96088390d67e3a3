use rand::Rng;

use crate::geometry::{Arena, Point};

/// Uniformly random point inside the arena. The snake's body is not
/// avoided, food may land on it.
pub fn spawn_food(arena: &Arena, rng: &mut impl Rng) -> Point {
    Point {
        x: rng.gen_range(0.0..arena.width),
        y: rng.gen_range(0.0..arena.height),
    }
}
