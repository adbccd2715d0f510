//! Product image carousel navigation.
//!
//! [`Carousel`] is a clock-explicit state machine: every operation takes the
//! current [`Instant`] and timers are plain deadlines stored on the machine.
//! [`Carousel::poll`] fires whatever is due and [`Carousel::next_deadline`]
//! tells a driver when to call it next. [`CarouselDriver`] is the tokio
//! driver that owns a carousel for a mounted view.
//!
//! States are `idle` and `transitioning`. A navigation request while
//! transitioning is dropped, not queued.

mod driver;
mod swipe;

use greenhaus_core::CarouselConfig;
use thiserror::Error;
use tokio::time::Instant;

pub use driver::{CarouselCommand, CarouselDriver};
pub use swipe::SwipeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Prev => write!(f, "prev"),
        }
    }
}

/// Navigation failures are logged and reset the carousel to idle; only
/// [`CarouselError::DriverClosed`] reaches callers, from the driver handle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("carousel has no items")]
    Empty,

    #[error("carousel driver has shut down")]
    DriverClosed,
}

/// Where a pending transition lands once its delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Step(Direction),
    Index(usize),
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    at: Instant,
    target: Target,
}

/// Read-only view state handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub active_index: usize,
    pub item_count: usize,
    pub current_image: Option<String>,
    pub previous_image: Option<String>,
    pub direction: Option<Direction>,
    pub is_transitioning: bool,
    pub is_auto_playing: bool,
    pub is_image_loading: bool,
    pub drag_offset: f64,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    items: Vec<String>,
    config: CarouselConfig,
    active_index: usize,
    direction: Option<Direction>,
    is_transitioning: bool,
    autoplay_enabled: bool,
    is_auto_playing: bool,
    previous_image: Option<String>,
    is_image_loading: bool,
    swipe: SwipeState,
    pending_advance: Option<PendingAdvance>,
    /// Single resume handle; a new manual navigation replaces it.
    autoplay_resume_at: Option<Instant>,
    next_autoplay_at: Option<Instant>,
}

impl Carousel {
    /// Creates an idle carousel at index 0 with autoplay running.
    #[must_use]
    pub fn new(items: Vec<String>, config: CarouselConfig, now: Instant) -> Self {
        let mut carousel = Self {
            items,
            config,
            active_index: 0,
            direction: None,
            is_transitioning: false,
            autoplay_enabled: true,
            is_auto_playing: true,
            previous_image: None,
            is_image_loading: false,
            swipe: SwipeState::default(),
            pending_advance: None,
            autoplay_resume_at: None,
            next_autoplay_at: None,
        };
        carousel.schedule_autoplay(now);
        carousel
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.items.get(self.active_index).map(String::as_str)
    }

    #[must_use]
    pub fn previous_image(&self) -> Option<&str> {
        self.previous_image.as_deref()
    }

    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    #[must_use]
    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    #[must_use]
    pub fn is_image_loading(&self) -> bool {
        self.is_image_loading
    }

    #[must_use]
    pub fn swipe(&self) -> &SwipeState {
        &self.swipe
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            active_index: self.active_index,
            item_count: self.items.len(),
            current_image: self.current_image().map(str::to_owned),
            previous_image: self.previous_image.clone(),
            direction: self.direction,
            is_transitioning: self.is_transitioning,
            is_auto_playing: self.is_auto_playing,
            is_image_loading: self.is_image_loading,
            drag_offset: self.drag_offset(),
        }
    }

    /// Starts a transition to the following item. Returns `false` when the
    /// request was dropped.
    pub fn go_to_next(&mut self, now: Instant) -> bool {
        self.navigate(Direction::Next, Target::Step(Direction::Next), now, true)
    }

    /// Starts a transition to the preceding item, wrapping from the first
    /// to the last.
    pub fn go_to_previous(&mut self, now: Instant) -> bool {
        self.navigate(Direction::Prev, Target::Step(Direction::Prev), now, true)
    }

    /// Jumps to `index`. The direction is a plain comparison with the active
    /// index, not the shortest way around.
    pub fn go_to_index(&mut self, index: usize, now: Instant) -> bool {
        if index == self.active_index {
            return false;
        }
        let direction = if index > self.active_index {
            Direction::Next
        } else {
            Direction::Prev
        };
        self.navigate(direction, Target::Index(index), now, true)
    }

    /// Fires every deadline that is due at `now`. Returns `true` if any
    /// state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(pending) = self.pending_advance.filter(|p| p.at <= now) {
            self.pending_advance = None;
            if let Err(e) = self.advance(pending.target) {
                self.recover(&e);
            }
            changed = true;
        }

        if self.autoplay_resume_at.is_some_and(|at| at <= now) {
            self.autoplay_resume_at = None;
            if self.autoplay_enabled {
                tracing::debug!("resuming carousel autoplay");
                self.is_auto_playing = true;
                self.schedule_autoplay(now);
                changed = true;
            }
        }

        if self.is_auto_playing && self.next_autoplay_at.is_some_and(|at| at <= now) {
            self.schedule_autoplay(now);
            changed |= self.navigate(Direction::Next, Target::Step(Direction::Next), now, false);
        }

        changed
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let autoplay = self.next_autoplay_at.filter(|_| self.is_auto_playing);
        [
            self.pending_advance.map(|p| p.at),
            self.autoplay_resume_at,
            autoplay,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn image_loaded(&mut self) {
        self.is_image_loading = false;
    }

    pub fn image_failed(&mut self) {
        tracing::warn!(
            index = self.active_index,
            image = self.current_image().unwrap_or_default(),
            "carousel image failed to load"
        );
        self.is_image_loading = false;
    }

    /// Replaces the item list, resetting to index 0 and idle.
    pub fn set_items(&mut self, items: Vec<String>, now: Instant) {
        self.items = items;
        self.active_index = 0;
        self.direction = None;
        self.is_transitioning = false;
        self.is_image_loading = false;
        self.previous_image = None;
        self.pending_advance = None;
        self.swipe = SwipeState::default();
        if self.is_auto_playing {
            self.schedule_autoplay(now);
        }
    }

    /// Turns autoplay on or off. Disabling also cancels a pending resume.
    pub fn set_autoplay(&mut self, enabled: bool, now: Instant) {
        self.autoplay_enabled = enabled;
        if enabled {
            if !self.is_auto_playing && self.autoplay_resume_at.is_none() {
                self.is_auto_playing = true;
                self.schedule_autoplay(now);
            }
        } else {
            self.is_auto_playing = false;
            self.autoplay_resume_at = None;
            self.next_autoplay_at = None;
        }
    }

    fn navigate(&mut self, direction: Direction, target: Target, now: Instant, manual: bool) -> bool {
        if self.items.len() <= 1 || self.is_transitioning {
            return false;
        }
        match self.begin_transition(direction, target, now) {
            Ok(()) => {
                if manual {
                    self.suspend_autoplay(now);
                }
                true
            }
            Err(e) => {
                self.recover(&e);
                false
            }
        }
    }

    fn begin_transition(
        &mut self,
        direction: Direction,
        target: Target,
        now: Instant,
    ) -> Result<(), CarouselError> {
        let len = self.items.len();
        if let Target::Index(index) = target {
            if index >= len {
                return Err(CarouselError::IndexOutOfRange { index, len });
            }
        }
        let current = self
            .items
            .get(self.active_index)
            .ok_or(CarouselError::IndexOutOfRange {
                index: self.active_index,
                len,
            })?;

        self.previous_image = Some(current.clone());
        self.direction = Some(direction);
        self.is_transitioning = true;
        self.is_image_loading = true;
        self.pending_advance = Some(PendingAdvance {
            at: now + self.config.transition_delay,
            target,
        });
        tracing::trace!(%direction, from = self.active_index, "carousel transition started");
        Ok(())
    }

    fn advance(&mut self, target: Target) -> Result<(), CarouselError> {
        let len = self.items.len();
        if len == 0 {
            return Err(CarouselError::Empty);
        }
        self.active_index = match target {
            Target::Step(Direction::Next) => (self.active_index + 1) % len,
            Target::Step(Direction::Prev) => (self.active_index + len - 1) % len,
            Target::Index(index) if index < len => index,
            Target::Index(index) => return Err(CarouselError::IndexOutOfRange { index, len }),
        };
        self.is_transitioning = false;
        Ok(())
    }

    fn suspend_autoplay(&mut self, now: Instant) {
        if !self.autoplay_enabled {
            return;
        }
        self.is_auto_playing = false;
        self.next_autoplay_at = None;
        self.autoplay_resume_at = Some(now + self.config.autoplay_cooldown);
    }

    fn schedule_autoplay(&mut self, now: Instant) {
        self.next_autoplay_at = Some(now + self.config.autoplay_interval);
    }

    /// Forces the machine back to idle after a failed step.
    fn recover(&mut self, error: &CarouselError) {
        tracing::error!(
            error = %error,
            index = self.active_index,
            len = self.items.len(),
            "carousel navigation failed; resetting to idle"
        );
        self.is_transitioning = false;
        self.is_image_loading = false;
        self.pending_advance = None;
        if self.active_index >= self.items.len() {
            self.active_index = 0;
        }
    }
}

#[cfg(test)]
#[path = "../carousel_test.rs"]
mod tests;
