//! Draws a snake state onto a terminal buffer.
//!
//! Each terminal cell stands for a small box of arena space; a cell is
//! painted when that box touches the body, the head or the food.

use ratatui::prelude::*;

use crate::body::footprint;
use crate::consts::{BODY_WIDTH, FOOD_RADIUS, HIGH_SPEED, INIT_LEN};
use crate::engine::SnakeState;
use crate::geometry::{self, distance, Arena, Point};

const HEAD_SYMBOL: &str = "●";
const FOOD_SYMBOL: &str = "♦";

/// A snake state in its arena, ready to hand to `Frame::render_widget`.
pub struct View<'a> {
    pub state: &'a SnakeState,
    pub arena: &'a Arena,
}

impl View<'_> {
    /// The arena-space box behind terminal cell `(col, row)` of `area`.
    fn cell_box(&self, area: Rect, col: u16, row: u16) -> geometry::Rect {
        let cell_w = self.arena.width / f64::from(area.width);
        let cell_h = self.arena.height / f64::from(area.height);
        geometry::Rect {
            left: f64::from(col) * cell_w,
            top: f64::from(row) * cell_h,
            right: f64::from(col + 1) * cell_w,
            bottom: f64::from(row + 1) * cell_h,
        }
    }

    /// Body rectangles head first; every segment past the head also covers
    /// the corner it turns out of.
    fn body_rects(&self) -> Vec<geometry::Rect> {
        self.state
            .body
            .joints(self.state.position)
            .map(|(idx, seg, start)| {
                let span = if idx == 0 { seg.len } else { seg.len + BODY_WIDTH };
                footprint(start, seg.direction, span)
            })
            .collect()
    }
}

fn touches_disc(cell: &geometry::Rect, center: Point, radius: f64) -> bool {
    distance(cell.clamp(center), center) <= radius
}

impl Widget for View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let body = self.body_rects();

        for row in 0..area.height {
            for col in 0..area.width {
                let cell = self.cell_box(area, col, row);
                let target = &mut buf[(area.x + col, area.y + row)];

                if body.iter().any(|rect| rect.intersects(&cell)) {
                    target.set_symbol(" ").set_bg(Color::Green);
                }
                if touches_disc(&cell, self.state.position, FOOD_RADIUS) {
                    target.set_symbol(HEAD_SYMBOL).set_fg(Color::Red);
                }
                if touches_disc(&cell, self.state.food, FOOD_RADIUS) {
                    target.set_symbol(FOOD_SYMBOL).set_fg(Color::LightRed);
                }
            }
        }
    }
}

/// Score as shown to the player: length gained, rounded up.
pub fn display_score(state: &SnakeState) -> u32 {
    (state.body.total_len() - INIT_LEN).ceil().max(0.0) as u32
}

pub fn speed_label(speed: f64) -> &'static str {
    if speed >= HIGH_SPEED {
        "HIGH"
    } else {
        "LOW"
    }
}
