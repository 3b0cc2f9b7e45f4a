#![forbid(unsafe_code)]

//! Deferred recenter-anchor signal.
//!
//! When an element is captured, the renderer should slide its anchor to the
//! grab point after a short hold. The signal is armed on capture and polled
//! with [`AnchorTimer::poll`] from the host's tick; there is no thread.
//!
//! Each arm bumps a generation counter and hands it to the caller, who must
//! present it to [`AnchorTimer::poll`] and [`AnchorTimer::fire_now`]. A
//! holder of an older generation never sees a later drag's signal, and
//! cancelling clears the pending entry outright.

use web_time::{Duration, Instant};

use crate::registry::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAnchor {
    element: ElementId,
    deadline: Instant,
    generation: u64,
}

/// One-shot, cancellable, deadline-polled timer.
#[derive(Debug, Clone)]
pub struct AnchorTimer {
    delay: Duration,
    pending: Option<PendingAnchor>,
    generation: u64,
}

impl AnchorTimer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Arm for `element`, replacing anything outstanding. Returns the new
    /// generation.
    pub fn arm(&mut self, element: ElementId, now: Instant) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingAnchor {
            element,
            deadline: now + self.delay,
            generation: self.generation,
        });
        self.generation
    }

    /// Drop the pending signal. Returns whether one was outstanding.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Fire if the deadline has passed and `generation` is the one being
    /// waited on. Fires at most once per arm.
    pub fn poll(&mut self, now: Instant, generation: u64) -> Option<ElementId> {
        let pending = self.pending?;
        if pending.generation != generation || now < pending.deadline {
            return None;
        }
        self.pending = None;
        Some(pending.element)
    }

    /// Fire immediately regardless of the deadline.
    pub fn fire_now(&mut self, generation: u64) -> Option<ElementId> {
        let pending = self.pending?;
        if pending.generation != generation {
            return None;
        }
        self.pending = None;
        Some(pending.element)
    }
}

impl Default for AnchorTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_ANCHOR_DELAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use collage_core::slot::Slot;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_250: Duration = Duration::from_millis(250);

    fn element() -> ElementId {
        Registry::new().get(Slot::TopRight).id()
    }

    #[test]
    fn fires_after_delay() {
        let mut timer = AnchorTimer::new(Duration::from_millis(200));
        let t = Instant::now();
        let generation = timer.arm(element(), t);

        assert!(timer.poll(t + MS_100, generation).is_none());
        assert_eq!(timer.poll(t + MS_250, generation), Some(element()));
        assert!(!timer.is_pending());
    }

    #[test]
    fn fires_at_most_once() {
        let mut timer = AnchorTimer::new(Duration::from_millis(200));
        let t = Instant::now();
        let generation = timer.arm(element(), t);
        assert!(timer.poll(t + MS_250, generation).is_some());
        assert!(timer.poll(t + Duration::from_secs(1), generation).is_none());
    }

    #[test]
    fn cancel_clears() {
        let mut timer = AnchorTimer::new(Duration::from_millis(200));
        let t = Instant::now();
        let generation = timer.arm(element(), t);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(timer.poll(t + MS_250, generation).is_none());
    }

    #[test]
    fn rearm_supersedes_previous() {
        let mut timer = AnchorTimer::new(Duration::from_millis(200));
        let t = Instant::now();
        let first = timer.arm(element(), t);
        let second = timer.arm(element(), t + MS_100);
        assert!(second > first);

        // Old deadline has passed, new one has not.
        assert!(timer.poll(t + MS_250, second).is_none());
        assert!(timer.poll(t + Duration::from_millis(300), second).is_some());
    }

    #[test]
    fn stale_generation_never_fires() {
        let mut timer = AnchorTimer::new(Duration::from_millis(200));
        let t = Instant::now();
        let stale = timer.arm(element(), t);
        let current = timer.arm(element(), t);

        assert!(timer.poll(t + MS_250, stale).is_none());
        assert!(timer.fire_now(stale).is_none());
        assert!(timer.is_pending());
        assert_eq!(timer.fire_now(current), Some(element()));
    }

    #[test]
    fn fire_now_takes_pending() {
        let mut timer = AnchorTimer::default();
        let t = Instant::now();
        let generation = timer.arm(element(), t);
        assert_eq!(timer.fire_now(generation), Some(element()));
        assert_eq!(timer.fire_now(generation), None);
        assert!(timer.poll(t + MS_250, generation).is_none());
    }

    #[test]
    fn zero_delay_fires_on_first_poll() {
        let mut timer = AnchorTimer::new(Duration::ZERO);
        let t = Instant::now();
        let generation = timer.arm(element(), t);
        assert!(timer.poll(t, generation).is_some());
    }
}
