//! Tokio driver that owns a [`Carousel`] for the lifetime of a view.
//!
//! Commands arrive over an `mpsc` channel, snapshots go out over a `watch`
//! channel, and the task sleeps until the carousel's next deadline. Dropping
//! the [`CarouselDriver`] aborts the task, which cancels every pending timer
//! along with it.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{Carousel, CarouselError, Snapshot};

const COMMAND_BUFFER: usize = 32;

/// View events forwarded to the carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselCommand {
    Next,
    Previous,
    GoTo(usize),
    PointerDown(f64),
    PointerMove(f64),
    PointerUp,
    PointerLeave,
    ImageLoaded,
    ImageFailed,
    SetItems(Vec<String>),
    SetAutoplay(bool),
}

pub struct CarouselDriver {
    commands: mpsc::Sender<CarouselCommand>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl CarouselDriver {
    /// Spawns the driver task. Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(carousel: Carousel) -> Self {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let (tx, snapshots) = watch::channel(carousel.snapshot());
        let task = tokio::spawn(run(carousel, rx, tx));

        Self {
            commands,
            snapshots,
            task,
        }
    }

    /// # Errors
    ///
    /// Returns [`CarouselError::DriverClosed`] if the driver task has exited.
    pub async fn send(&self, command: CarouselCommand) -> Result<(), CarouselError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CarouselError::DriverClosed)
    }

    /// # Errors
    ///
    /// Returns [`CarouselError::DriverClosed`] if the driver task has exited.
    pub async fn go_to_next(&self) -> Result<(), CarouselError> {
        self.send(CarouselCommand::Next).await
    }

    /// # Errors
    ///
    /// Returns [`CarouselError::DriverClosed`] if the driver task has exited.
    pub async fn go_to_previous(&self) -> Result<(), CarouselError> {
        self.send(CarouselCommand::Previous).await
    }

    /// # Errors
    ///
    /// Returns [`CarouselError::DriverClosed`] if the driver task has exited.
    pub async fn go_to_index(&self, index: usize) -> Result<(), CarouselError> {
        self.send(CarouselCommand::GoTo(index)).await
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Stops the task and cancels its timers.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for CarouselDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut carousel: Carousel,
    mut commands: mpsc::Receiver<CarouselCommand>,
    snapshots: watch::Sender<Snapshot>,
) {
    tracing::debug!(items = carousel.len(), "carousel driver started");

    loop {
        let deadline = carousel.next_deadline();

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                apply(&mut carousel, command, Instant::now());
            }
            () = sleep_until(deadline) => {
                carousel.poll(Instant::now());
            }
        }

        let next = carousel.snapshot();
        snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    tracing::debug!("carousel driver stopped");
}

fn apply(carousel: &mut Carousel, command: CarouselCommand, now: Instant) {
    match command {
        CarouselCommand::Next => {
            carousel.go_to_next(now);
        }
        CarouselCommand::Previous => {
            carousel.go_to_previous(now);
        }
        CarouselCommand::GoTo(index) => {
            carousel.go_to_index(index, now);
        }
        CarouselCommand::PointerDown(x) => carousel.pointer_down(x),
        CarouselCommand::PointerMove(x) => carousel.pointer_move(x),
        CarouselCommand::PointerUp => {
            carousel.pointer_up(now);
        }
        CarouselCommand::PointerLeave => carousel.pointer_leave(),
        CarouselCommand::ImageLoaded => carousel.image_loaded(),
        CarouselCommand::ImageFailed => carousel.image_failed(),
        CarouselCommand::SetItems(items) => carousel.set_items(items, now),
        CarouselCommand::SetAutoplay(enabled) => carousel.set_autoplay(enabled, now),
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
