use crossterm::{
    cursor::Show,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{prelude::*, widgets::*};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Write};
use std::time::Instant;

mod body;
mod collision;
mod consts;
mod engine;
mod food;
mod geometry;
mod input;
mod render;
mod scheduler;

use engine::Outcome;
use geometry::Arena;
use input::{classify, Controls, Key};
use render::{display_score, speed_label, View};
use scheduler::Session;

fn main() -> Result<(), io::Error> {
    // Set up logging before anything else
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(consts::LOG_FILE)?,
    )
    .map_err(io::Error::other)?;

    info!("Starting Snekline");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let reports_release = matches!(supports_keyboard_enhancement(), Ok(true));
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        info!("Terminal reports key releases");
    } else {
        warn!("No key release events, speed key falls back to auto-repeat timing");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = Game::new(Arena::default(), reports_release, StdRng::from_entropy());
    let result = run(&mut terminal, &mut game);

    // Cleanup terminal, also when the loop failed
    let restored = restore_terminal(terminal.backend_mut(), reports_release);
    if let Err(e) = &restored {
        error!("Error restoring terminal: {}", e);
    }

    info!("Exiting Snekline");
    result.and(restored)
}

/// Runs every restore step even when an earlier one fails, then reports the
/// first failure.
fn restore_terminal(out: &mut impl Write, reports_release: bool) -> io::Result<()> {
    let flags = if reports_release {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show);
    flags.and(raw).and(screen)
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> io::Result<()> {
    let tick_rate = consts::tick_interval();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| game.render(f))?;

        // Wait for input no longer than the time left until the next tick
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                game.handle_input(key, Instant::now());
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            game.update(last_tick);
        }

        if let GameState::Exit = game.state {
            return Ok(());
        }
    }
}

#[derive(Debug)]
enum GameState {
    ReadyToStart,
    Playing(Session),
    /// Holds the finished session so its last frame stays on screen
    GameOver(Session),
    Exit,
}

struct Game {
    state: GameState,
    arena: Arena,
    reports_release: bool,
    rng: StdRng,
}

impl Game {
    fn new(arena: Arena, reports_release: bool, rng: StdRng) -> Self {
        Game {
            state: GameState::ReadyToStart,
            arena,
            reports_release,
            rng,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let score_text = match &self.state {
            GameState::Playing(session) | GameState::GameOver(session) => format!(
                "SNEKLINE    Score: {}    Speed: {}",
                display_score(&session.state),
                speed_label(session.controls.speed.sample(Instant::now()))
            ),
            _ => "SNEKLINE".to_string(),
        };

        let size = frame.area();
        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + score
                Constraint::Min(0),    // Arena
            ])
            .split(size);

        frame.render_widget(
            Paragraph::new(score_text)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        match &self.state {
            GameState::ReadyToStart => {
                frame.render_widget(
                    Paragraph::new("Arrows/WASD steer, hold SPACE to speed up\nPress ENTER to start")
                        .alignment(Alignment::Center)
                        .block(Block::default().borders(Borders::ALL)),
                    layout[1],
                );
            }
            GameState::Playing(session) => {
                let block = Block::default().title("Playing").borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);

                frame.render_widget(block, layout[1]);
                frame.render_widget(
                    View {
                        state: &session.state,
                        arena: session.arena(),
                    },
                    inner_area,
                );
            }
            GameState::GameOver(session) => {
                let block = Block::default().borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);

                frame.render_widget(block, layout[1]);
                frame.render_widget(
                    View {
                        state: &session.state,
                        arena: session.arena(),
                    },
                    inner_area,
                );

                let reason = match session.outcome {
                    Outcome::Halted(collision) => collision.describe(),
                    Outcome::Running => "stopped",
                };
                frame.render_widget(
                    Paragraph::new(format!(
                        "GAME OVER\nThe snake {}\nFinal Score: {}\nPress ENTER to play again",
                        reason,
                        display_score(&session.state)
                    ))
                    .alignment(Alignment::Center),
                    inner_area,
                );
            }
            GameState::Exit => {}
        }
    }

    fn handle_input(&mut self, key: KeyEvent, now: Instant) {
        let pressed = matches!(key.kind, KeyEventKind::Press);

        self.state = match std::mem::replace(&mut self.state, GameState::Exit) {
            _ if pressed && classify(key.code) == Some(Key::Quit) => GameState::Exit,
            GameState::ReadyToStart if pressed && classify(key.code) == Some(Key::Commit) => {
                info!("Game started");
                GameState::Playing(Session::new(
                    self.arena,
                    Controls::new(self.reports_release),
                    &mut self.rng,
                ))
            }
            GameState::Playing(mut session) | GameState::GameOver(mut session)
                if pressed && classify(key.code) == Some(Key::Commit) =>
            {
                session.restart(&mut self.rng);
                GameState::Playing(session)
            }
            GameState::Playing(mut session) => {
                session.controls.apply(&key, now);
                GameState::Playing(session)
            }
            other => other,
        };
    }

    fn update(&mut self, now: Instant) {
        self.state = match std::mem::replace(&mut self.state, GameState::Exit) {
            GameState::Playing(mut session) => match session.tick(now, &mut self.rng) {
                Outcome::Running => GameState::Playing(session),
                Outcome::Halted(_) => GameState::GameOver(session),
            },
            other => other,
        };
    }
}
