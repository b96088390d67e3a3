//! Drives the engine: measures time between ticks, samples the input
//! signals and threads the state from one tick to the next.

use std::time::Instant;

use log::info;
use rand::Rng;

use crate::engine::{Outcome, SnakeState, TickInput};
use crate::geometry::Arena;
use crate::input::Controls;

/// Elapsed time between ticks. The first tick after a reset sees no time
/// pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ticker {
    last: Option<Instant>,
}

impl Ticker {
    pub fn delay(&mut self, now: Instant) -> f64 {
        let delay = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);
        delay
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// One run of the game, from the initial configuration until a collision.
#[derive(Debug)]
pub struct Session {
    pub state: SnakeState,
    pub controls: Controls,
    pub outcome: Outcome,
    ticker: Ticker,
    arena: Arena,
}

impl Session {
    pub fn new(arena: Arena, controls: Controls, rng: &mut impl Rng) -> Self {
        Session {
            state: SnakeState::initial(&arena, rng),
            controls,
            outcome: Outcome::Running,
            ticker: Ticker::default(),
            arena,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Runs one tick with whatever direction and speed are current. Once
    /// halted the state is frozen and the halting outcome is repeated.
    pub fn tick(&mut self, now: Instant, rng: &mut impl Rng) -> Outcome {
        if let Outcome::Halted(_) = self.outcome {
            return self.outcome;
        }

        let delay = self.ticker.delay(now);
        let (direction, speed) = self.controls.sample(now);
        let input = TickInput {
            delay,
            speed,
            direction,
        };

        let tick = std::mem::take(&mut self.state).step(input, &self.arena, rng);
        self.state = tick.state;
        self.outcome = tick.outcome;

        if let Outcome::Halted(collision) = self.outcome {
            info!(
                "Game over: snake {} with score {} ({} segments)",
                collision.describe(),
                self.state.score().ceil(),
                self.state.body.segment_count()
            );
        }
        self.outcome
    }

    /// Drops the current run entirely and starts over.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        self.state = SnakeState::initial(&self.arena, rng);
        self.controls.reset();
        self.ticker.reset();
        self.outcome = Outcome::Running;
        info!("Restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Collision;
    use crate::consts::{HALF_BODY_WIDTH, INIT_LEN, LOW_SPEED};
    use crate::geometry::{Direction, Point};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn session(arena: Arena, rng: &mut StdRng) -> Session {
        let mut session = Session::new(arena, Controls::new(true), rng);
        session.state.food = Point::new(1.0, 1.0);
        session
    }

    #[test]
    fn test_first_tick_has_no_delay() {
        let mut ticker = Ticker::default();
        let start = Instant::now();
        assert_eq!(ticker.delay(start), 0.0);
        assert_eq!(ticker.delay(start + Duration::from_millis(250)), 0.25);
        ticker.reset();
        assert_eq!(ticker.delay(start + Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn test_tick_samples_latest_direction() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = session(Arena::default(), &mut rng);
        let start = Instant::now();

        session.tick(start, &mut rng);
        assert_eq!(session.state.position, Point::new(300.0, 200.0));

        // Only the last accepted heading before the tick counts.
        session.controls.direction.press(Direction::Up);
        session.controls.direction.press(Direction::Left);
        session.controls.direction.press(Direction::Down);
        session.tick(start + Duration::from_millis(100), &mut rng);

        assert_eq!(session.state.direction, Direction::Down);
        assert_eq!(session.state.position, Point::new(300.0, 210.0));
    }

    #[test]
    fn test_two_turns_between_ticks_can_reverse() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = session(Arena::default(), &mut rng);
        let start = Instant::now();
        session.tick(start, &mut rng);

        // The signal filters against its own last value, not the snake's
        // heading, so Up then Right lands as a reversal on the next tick.
        // The engine still turns cleanly and keeps the length.
        session.controls.direction.press(Direction::Up);
        session.controls.direction.press(Direction::Right);
        let outcome = session.tick(start + Duration::from_millis(100), &mut rng);

        assert_eq!(outcome, Outcome::Running);
        assert_eq!(session.state.direction, Direction::Right);
        assert_eq!(session.state.position, Point::new(310.0, 200.0));
        assert_eq!(session.state.body.total_len(), INIT_LEN);
    }

    #[test]
    fn test_halt_freezes_session() {
        let arena = Arena {
            width: 200.0,
            height: 100.0,
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = session(arena, &mut rng);
        let start = Instant::now();

        session.tick(start, &mut rng);
        // 100 - HALF_BODY_WIDTH units to the left wall at low speed.
        let to_wall = (100.0 - HALF_BODY_WIDTH) / LOW_SPEED;
        let outcome = session.tick(start + Duration::from_secs_f64(to_wall + 0.01), &mut rng);
        assert_eq!(outcome, Outcome::Halted(Collision::Edge));

        let terminal = session.state.clone();
        let again = session.tick(start + Duration::from_secs(5), &mut rng);
        assert_eq!(again, Outcome::Halted(Collision::Edge));
        assert_eq!(session.state, terminal);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = session(arena, &mut rng);
        let original = session.state.clone();
        let start = Instant::now();

        session.controls.direction.press(Direction::Down);
        session.tick(start, &mut rng);
        session.tick(start + Duration::from_millis(300), &mut rng);
        assert_ne!(session.state.position, original.position);

        session.restart(&mut rng);
        session.restart(&mut rng);

        assert_eq!(session.state.direction, original.direction);
        assert_eq!(session.state.position, original.position);
        assert_eq!(session.state.body, original.body);
        assert_eq!(session.outcome, Outcome::Running);
        assert_eq!(session.controls.direction.current(), Direction::Left);

        // Fresh timing as well: the next tick does not move.
        session.state.food = Point::new(1.0, 1.0);
        session.tick(start + Duration::from_secs(10), &mut rng);
        assert_eq!(session.state.position, original.position);
    }
}
