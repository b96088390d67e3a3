//! Per-tick state transition.

use log::debug;
use rand::Rng;

use crate::body::{Body, Segment};
use crate::collision::{self, Collision};
use crate::consts::INIT_LEN;
use crate::food::spawn_food;
use crate::geometry::{Arena, Direction, Point};

/// Everything the simulation knows about one snake at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeState {
    /// Direction travelled on the tick that produced this state
    pub direction: Direction,
    /// Centre of the head
    pub position: Point,
    pub body: Body,
    pub food: Point,
}

/// The sampled inputs for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    /// Seconds since the previous tick
    pub delay: f64,
    pub speed: f64,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Halted(Collision),
}

/// Result of one step: the new state and whether it is the last one.
#[derive(Debug)]
pub struct Tick {
    pub state: SnakeState,
    pub outcome: Outcome,
}

impl Default for SnakeState {
    /// Starting layout in the default arena with the food in a corner.
    fn default() -> Self {
        let arena = Arena::default();
        SnakeState {
            direction: Direction::Left,
            position: arena.center(),
            body: Body::new(Segment::new(Direction::Right, INIT_LEN)),
            food: Point::new(0.0, 0.0),
        }
    }
}

impl SnakeState {
    /// Head in the middle of the arena heading left, trailing one straight
    /// segment off to the right.
    pub fn initial(arena: &Arena, rng: &mut impl Rng) -> Self {
        SnakeState {
            position: arena.center(),
            food: spawn_food(arena, rng),
            ..SnakeState::default()
        }
    }

    /// Length gained from food so far.
    pub fn score(&self) -> f64 {
        self.body.total_len() - INIT_LEN
    }

    /// Advances one tick. The previous state is consumed; the body is
    /// reused rather than rebuilt.
    pub fn step(self, input: TickInput, arena: &Arena, rng: &mut impl Rng) -> Tick {
        let step = input.delay * input.speed;
        let ate = collision::detect_food(&self);

        let SnakeState {
            direction: prev_direction,
            position,
            mut body,
            mut food,
        } = self;

        if ate {
            body.grow_tail();
            food = spawn_food(arena, rng);
            debug!(
                "Food eaten, length now {:.1}, next food at ({:.1}, {:.1})",
                body.total_len(),
                food.x,
                food.y
            );
        }

        let position = position.translate(input.direction, step);
        body.advance_head(input.direction, step, input.direction == prev_direction);
        body.retract_tail(step);

        let state = SnakeState {
            direction: input.direction,
            position,
            body,
            food,
        };
        let outcome = match collision::check(&state, arena) {
            Some(collision) => Outcome::Halted(collision),
            None => Outcome::Running,
        };

        Tick { state, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BODY_WIDTH, HALF_BODY_WIDTH, HIGH_SPEED, LOW_SPEED, PER_FOOD_INCRE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    impl Default for TickInput {
        fn default() -> Self {
            TickInput {
                delay: 0.0,
                speed: LOW_SPEED,
                direction: Direction::Left,
            }
        }
    }

    fn input(delay: f64, speed: f64, direction: Direction) -> TickInput {
        TickInput {
            delay,
            speed,
            direction,
        }
    }

    /// Initial state with the food parked far from the head.
    fn fresh(arena: &Arena, rng: &mut StdRng) -> SnakeState {
        let mut state = SnakeState::initial(arena, rng);
        state.food = Point::new(1.0, 1.0);
        state
    }

    #[test]
    fn test_initial_configuration() {
        let arena = Arena::default();
        let state = SnakeState::initial(&arena, &mut StdRng::seed_from_u64(1));
        assert_eq!(state.direction, Direction::Left);
        assert_eq!(state.position, arena.center());
        assert_eq!(
            state.body.segments().copied().collect::<Vec<_>>(),
            vec![Segment::new(Direction::Right, INIT_LEN)]
        );
        assert_eq!(state.score(), 0.0);
    }

    #[test]
    fn test_straight_tick_moves_head_and_keeps_length() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(3);
        let state = fresh(&arena, &mut rng);

        let tick = state.step(input(0.1, LOW_SPEED, Direction::Left), &arena, &mut rng);
        assert_eq!(tick.outcome, Outcome::Running);
        assert_eq!(tick.state.position, Point::new(290.0, 200.0));
        assert_eq!(tick.state.body.segment_count(), 1);
        assert_eq!(tick.state.body.total_len(), INIT_LEN);
    }

    #[test]
    fn test_length_conserved_through_turns() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = fresh(&arena, &mut rng);

        let route = [
            Direction::Left,
            Direction::Up,
            Direction::Up,
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
        ];
        for dir in route {
            let before = state.body.total_len();
            let tick = state.step(input(1.0 / 60.0, HIGH_SPEED, dir), &arena, &mut rng);
            assert!((tick.state.body.total_len() - before).abs() < 1e-9);
            assert_eq!(tick.state.direction, dir);
            state = tick.state;
        }
        assert!(state.body.segment_count() > 1);
    }

    #[test]
    fn test_turn_splits_head_segment() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(9);
        let state = fresh(&arena, &mut rng);

        let tick = state.step(input(0.05, LOW_SPEED, Direction::Up), &arena, &mut rng);
        let segments: Vec<Segment> = tick.state.body.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Segment::new(Direction::Down, 5.0 + BODY_WIDTH),
                Segment::new(Direction::Right, INIT_LEN - BODY_WIDTH - 5.0),
            ]
        );
        assert_eq!(tick.state.position, Point::new(300.0, 195.0));
    }

    #[test]
    fn test_food_pickup_grows_and_respawns() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = SnakeState::initial(&arena, &mut rng);
        let food = Point::new(state.position.x - 4.0, state.position.y + 3.0);
        state.food = food;

        let before = state.body.total_len();
        let tick = state.step(input(0.02, LOW_SPEED, Direction::Left), &arena, &mut rng);
        assert_eq!(tick.state.body.total_len(), before + PER_FOOD_INCRE);
        assert_ne!(tick.state.food, food);
        assert_eq!(tick.state.score(), PER_FOOD_INCRE);
    }

    #[test]
    fn test_zero_delay_tick_is_stationary() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(13);
        let state = fresh(&arena, &mut rng);
        let expected = state.clone();

        let tick = state.step(TickInput::default(), &arena, &mut rng);
        assert_eq!(tick.state, expected);
        assert_eq!(tick.outcome, Outcome::Running);
    }

    #[test]
    fn test_halts_at_right_boundary() {
        let arena = Arena {
            width: 200.0,
            height: 100.0,
        };
        let mut rng = StdRng::seed_from_u64(17);
        let state = SnakeState {
            direction: Direction::Right,
            position: Point::new(200.0 - HALF_BODY_WIDTH - 1.0, 50.0),
            body: Body::new(Segment::new(Direction::Left, 60.0)),
            food: Point::new(10.0, 10.0),
        };
        let tick = state.step(input(0.01, LOW_SPEED, Direction::Right), &arena, &mut rng);
        assert_eq!(tick.outcome, Outcome::Halted(Collision::Edge));
        assert_eq!(tick.state.position, Point::new(200.0 - HALF_BODY_WIDTH, 50.0));
    }

    #[test]
    fn test_halts_on_self_collision() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(19);
        // Heading up toward a run of body lying across y = 80.
        let state = SnakeState {
            direction: Direction::Up,
            position: Point::new(100.0, 92.0),
            body: Body::from_segments([
                Segment::new(Direction::Down, 38.0),
                Segment::new(Direction::Right, 40.0),
                Segment::new(Direction::Up, 40.0),
                Segment::new(Direction::Left, 60.0),
            ]),
            food: Point::new(500.0, 300.0),
        };
        let tick = state.step(input(0.02, LOW_SPEED, Direction::Up), &arena, &mut rng);
        assert_eq!(tick.state.position, Point::new(100.0, 90.0));
        assert_eq!(tick.outcome, Outcome::Halted(Collision::SelfHit));
    }

    #[test]
    fn test_large_delay_retracts_several_segments() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(23);
        let state = SnakeState {
            direction: Direction::Left,
            position: Point::new(300.0, 200.0),
            body: Body::from_segments([
                Segment::new(Direction::Right, 60.0),
                Segment::new(Direction::Up, 25.0),
                Segment::new(Direction::Left, 15.0),
            ]),
            food: Point::new(500.0, 300.0),
        };
        let tick = state.step(input(0.5, LOW_SPEED, Direction::Left), &arena, &mut rng);
        let segments: Vec<Segment> = tick.state.body.segments().copied().collect();
        assert_eq!(segments, vec![Segment::new(Direction::Right, 100.0)]);
    }
}
