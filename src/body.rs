//! The snake's body as a polyline of straight segments, stored head first.
//!
//! The head segment carries one extra body width that the corner it came
//! out of overlaps, so walking outward from the head position subtracts
//! that width once before stepping to the next joint.

use std::collections::VecDeque;

use crate::consts::{BODY_WIDTH, HALF_BODY_WIDTH, PER_FOOD_INCRE};
use crate::geometry::{Direction, Point, Rect};

/// A straight run of body. `direction` points from the head-ward end
/// toward the tail-ward end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub direction: Direction,
    pub len: f64,
}

impl Segment {
    pub fn new(direction: Direction, len: f64) -> Self {
        Segment { direction, len }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    segments: VecDeque<Segment>,
}

impl Body {
    pub fn new(first: Segment) -> Self {
        Body::from_segments([first])
    }

    /// Builds a body from head-first segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let segments: VecDeque<Segment> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "a body needs at least one segment");
        Body { segments }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Sum of all segment lengths; only food changes it.
    pub fn total_len(&self) -> f64 {
        self.segments.iter().map(|s| s.len).sum()
    }

    /// Every segment paired with the point it starts from, walking outward
    /// from the head position.
    pub fn joints(&self, head: Point) -> impl Iterator<Item = (usize, &Segment, Point)> {
        self.segments
            .iter()
            .enumerate()
            .scan(head, |start, (idx, seg)| {
                let here = *start;
                let reach = if idx == 0 { seg.len - BODY_WIDTH } else { seg.len };
                *start = here.translate(seg.direction, reach);
                Some((idx, seg, here))
            })
    }

    /// Food growth: the tail-most segment gets longer.
    pub fn grow_tail(&mut self) {
        if let Some(tail) = self.segments.back_mut() {
            tail.len += PER_FOOD_INCRE;
        }
    }

    /// Adds `step` of length at the head while travelling `direction`.
    ///
    /// A turn (any change, including an outright reversal) opens a new head
    /// segment of `step + BODY_WIDTH` and takes that body width back from the
    /// previous head, so the total only grows by `step`.
    pub fn advance_head(&mut self, direction: Direction, step: f64, same_direction: bool) {
        if same_direction {
            self.segments[0].len += step;
            return;
        }

        let old_head = &mut self.segments[0];
        old_head.len -= BODY_WIDTH;
        assert!(
            old_head.len >= 0.0,
            "turn left the previous head segment with negative length {}",
            old_head.len
        );
        if old_head.len == 0.0 {
            self.segments.pop_front();
        }

        self.segments
            .push_front(Segment::new(direction.opposite(), step + BODY_WIDTH));
    }

    /// Removes `step` of length from the tail, dropping whole segments
    /// while they are shorter than what is left to remove.
    pub fn retract_tail(&mut self, step: f64) {
        let mut rest = step;
        loop {
            let Some(tail) = self.segments.back_mut() else {
                panic!("retracting {step} consumed the whole body");
            };
            if tail.len > rest {
                tail.len -= rest;
                break;
            }
            let consumed = tail.len;
            self.segments.pop_back();
            if consumed == rest {
                break;
            }
            rest -= consumed;
        }
        assert!(
            !self.segments.is_empty(),
            "retracting {step} consumed the whole body"
        );
    }
}

/// The rectangle covered by a run of body starting at `start` and heading
/// `dir`. `span` is measured from half a body width behind `start`.
pub fn footprint(start: Point, dir: Direction, span: f64) -> Rect {
    let near = start.translate(dir.opposite(), HALF_BODY_WIDTH);
    let far = near.translate(dir, span);
    let rect = Rect {
        left: near.x.min(far.x),
        top: near.y.min(far.y),
        right: near.x.max(far.x),
        bottom: near.y.max(far.y),
    };
    match dir {
        Direction::Left | Direction::Right => Rect {
            top: rect.top - HALF_BODY_WIDTH,
            bottom: rect.bottom + HALF_BODY_WIDTH,
            ..rect
        },
        Direction::Up | Direction::Down => Rect {
            left: rect.left - HALF_BODY_WIDTH,
            right: rect.right + HALF_BODY_WIDTH,
            ..rect
        },
    }
}
