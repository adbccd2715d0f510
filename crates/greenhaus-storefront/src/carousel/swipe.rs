//! Pointer gesture tracking.
//!
//! Moving more than `swipe_move_px` marks the gesture as a swipe so the view
//! can apply a live drag offset. Releasing past `swipe_commit_px` navigates:
//! a leftward drag (negative distance) goes to the next item, a rightward
//! one to the previous item. Leaving the element never navigates.

use tokio::time::Instant;

use super::{Carousel, Direction};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeState {
    pub start_x: f64,
    /// Signed horizontal distance from `start_x`.
    pub distance: f64,
    pub is_swiping: bool,
    /// Survives release so the view can swallow the click that ends a drag.
    pub has_moved: bool,
    engaged: bool,
}

impl SwipeState {
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    fn release(&mut self) {
        self.distance = 0.0;
        self.is_swiping = false;
        self.engaged = false;
    }
}

impl Carousel {
    pub fn pointer_down(&mut self, x: f64) {
        self.swipe = SwipeState {
            start_x: x,
            engaged: true,
            ..SwipeState::default()
        };
    }

    pub fn pointer_move(&mut self, x: f64) {
        if !self.swipe.engaged {
            return;
        }
        self.swipe.distance = x - self.swipe.start_x;
        if self.swipe.distance.abs() > f64::from(self.config.swipe_move_px) {
            self.swipe.has_moved = true;
            self.swipe.is_swiping = true;
        }
    }

    /// Ends the gesture, navigating when the drag passed the commit
    /// threshold. Returns the direction of a navigation that started.
    pub fn pointer_up(&mut self, now: Instant) -> Option<Direction> {
        let engaged = self.swipe.engaged;
        let distance = self.swipe.distance;
        self.swipe.release();

        if !engaged || distance.abs() <= f64::from(self.config.swipe_commit_px) {
            return None;
        }

        let direction = if distance < 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        };
        let started = match direction {
            Direction::Next => self.go_to_next(now),
            Direction::Prev => self.go_to_previous(now),
        };
        started.then_some(direction)
    }

    pub fn pointer_leave(&mut self) {
        self.swipe.release();
    }

    /// Live horizontal offset for the renderer; zero unless swiping.
    #[must_use]
    pub fn drag_offset(&self) -> f64 {
        if self.swipe.is_swiping {
            self.swipe.distance
        } else {
            0.0
        }
    }
}
