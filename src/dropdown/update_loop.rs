//! Time-boxed repositioning loop
//!
//! Scroll and resize events only record an interaction timestamp. The loop
//! repositions once per frame until no interaction has happened for the
//! settle window, so layout is read at frame rate instead of on every event.
//!
//! The loop is a plain state machine: the host asks for [`UpdateLoop::deadline`],
//! sleeps until then (see [`wait_for_frame`]) and calls [`UpdateLoop::tick`].
//! Tearing the widget down sets a cancellation flag that the next tick
//! observes.

use std::time::{Duration, Instant};

use crate::config::TimingConfig;

/// Outcome of a single loop tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still inside the settle window: reposition now
    Reposition,
    /// Settle window elapsed; the loop stopped
    Settled,
    /// Loop is not running
    Idle,
    /// Widget was torn down; the loop stopped without repositioning
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct UpdateLoop {
    frame_interval: Duration,
    settle_window: Duration,
    last_interaction: Option<Instant>,
    next_frame: Option<Instant>,
    running: bool,
    destroyed: bool,
}

impl UpdateLoop {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            frame_interval: timing.frame_interval(),
            settle_window: timing.settle_window(),
            last_interaction: None,
            next_frame: None,
            running: false,
            destroyed: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// When the next tick is due, if the loop is running
    pub fn deadline(&self) -> Option<Instant> {
        if self.running {
            self.next_frame
        } else {
            None
        }
    }

    /// Record a scroll/resize interaction. Returns true if this started the loop.
    pub fn interact(&mut self, now: Instant) -> bool {
        if self.destroyed {
            return false;
        }

        self.last_interaction = Some(now);

        if self.running {
            return false;
        }

        tracing::debug!("Update loop started");
        self.running = true;
        self.next_frame = Some(now);
        true
    }

    /// Advance the loop. On [`Tick::Reposition`] the caller repositions and
    /// the next frame is scheduled one interval later.
    pub fn tick(&mut self, now: Instant) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        if self.destroyed {
            self.stop();
            return Tick::Cancelled;
        }

        let recent = self
            .last_interaction
            .is_some_and(|last| now.saturating_duration_since(last) < self.settle_window);

        if recent {
            self.next_frame = Some(now + self.frame_interval);
            Tick::Reposition
        } else {
            tracing::debug!("Update loop settled");
            self.stop();
            Tick::Settled
        }
    }

    /// Cancel the loop for good; later interactions are ignored
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.next_frame = None;
    }
}

/// Sleep until the given frame deadline; never completes for `None`
///
/// Meant for a `tokio::select!` branch in the host event loop.
pub async fn wait_for_frame(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
