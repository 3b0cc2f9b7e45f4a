#![forbid(unsafe_code)]

//! Drag session lifecycle.
//!
//! ```text
//! Idle -> Captured -> Dragging -> Idle
//!            \------> Idle (release/cancel before the slop is crossed)
//! ```
//!
//! The session owns the pointer state for the single active drag and the
//! recenter-anchor timer. It knows nothing about slots beyond the one the
//! element was captured from; the board feeds its [`SessionEffect`]s to the
//! reorder engine and the renderer.
//!
//! # Invariants
//!
//! 1. At most one element is captured at a time. A second pointer-down while
//!    active is a [`SessionNoopReason::ActiveDragAlreadyInProgress`].
//! 2. Placeholders are never captured.
//! 3. `Captured -> Dragging` happens only once the Manhattan displacement
//!    from the pointer-down origin is strictly greater than the touch slop.
//! 4. The anchor timer is pending only while `Captured`. Leaving that state
//!    by any edge clears it.
//! 5. `transition_id` strictly increases across transitions.

use collage_core::event::exceeds_drag_threshold;
use collage_core::geometry::Point;
use collage_core::slot::Slot;
use web_time::{Duration, Instant};

use crate::anchor::AnchorTimer;
use crate::config::{DEFAULT_ANCHOR_DELAY_MS, DEFAULT_TOUCH_SLOP};
use crate::registry::{Element, ElementId};

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Captured {
        element: ElementId,
        slot: Slot,
        origin: Point,
        current: Point,
        /// Element center at pointer-down.
        grab_center: Point,
        /// Generation of the anchor timer armed by this capture.
        anchor_generation: u64,
        anchor_fired: bool,
    },
    Dragging {
        element: ElementId,
        origin: Point,
        current: Point,
        grab_center: Point,
    },
}

impl DragState {
    /// Element held by the session, if any.
    #[must_use]
    pub const fn element(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Captured { element, .. } | Self::Dragging { element, .. } => Some(*element),
        }
    }
}

/// Why an input left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    NotDraggable,
    ThresholdNotReached,
}

/// Effect emitted by one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    Captured {
        element: ElementId,
        slot: Slot,
        origin: Point,
    },
    /// The slop was crossed. `recenter` is set when the anchor signal had
    /// not fired yet and was fired early by this move.
    DragStarted {
        element: ElementId,
        center: Point,
        recenter: bool,
    },
    DragUpdated {
        element: ElementId,
        center: Point,
    },
    AnchorRecenter {
        element: ElementId,
    },
    /// Pointer-up. `tap` is set for a short press that never dragged.
    Released {
        element: ElementId,
        tap: bool,
    },
    Canceled {
        element: ElementId,
    },
    Noop {
        reason: SessionNoopReason,
    },
}

/// One state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: SessionEffect,
}

/// Single-pointer drag lifecycle with an injected clock.
#[derive(Debug, Clone)]
pub struct DragSession {
    state: DragState,
    touch_slop: u32,
    anchor: AnchorTimer,
    transition_counter: u64,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOUCH_SLOP,
            Duration::from_millis(DEFAULT_ANCHOR_DELAY_MS),
        )
    }
}

impl DragSession {
    #[must_use]
    pub const fn new(touch_slop: u32, anchor_delay: Duration) -> Self {
        Self {
            state: DragState::Idle,
            touch_slop,
            anchor: AnchorTimer::new(anchor_delay),
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn touch_slop(&self) -> u32 {
        self.touch_slop
    }

    #[must_use]
    pub const fn anchor(&self) -> &AnchorTimer {
        &self.anchor
    }

    /// Captured or dragging.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer-down on `element`, whose center is `grab_center`.
    pub fn pointer_down(
        &mut self,
        element: &Element,
        position: Point,
        grab_center: Point,
        now: Instant,
    ) -> SessionTransition {
        let from = self.state;
        let effect = match self.state {
            DragState::Idle if element.is_draggable() => {
                let anchor_generation = self.anchor.arm(element.id(), now);
                self.state = DragState::Captured {
                    element: element.id(),
                    slot: element.slot(),
                    origin: position,
                    current: position,
                    grab_center,
                    anchor_generation,
                    anchor_fired: false,
                };
                SessionEffect::Captured {
                    element: element.id(),
                    slot: element.slot(),
                    origin: position,
                }
            }
            DragState::Idle => SessionEffect::Noop {
                reason: SessionNoopReason::NotDraggable,
            },
            DragState::Captured { .. } | DragState::Dragging { .. } => SessionEffect::Noop {
                reason: SessionNoopReason::ActiveDragAlreadyInProgress,
            },
        };
        self.transition(from, effect)
    }

    pub fn pointer_move(&mut self, position: Point) -> SessionTransition {
        let from = self.state;
        let effect = match self.state {
            DragState::Idle => SessionEffect::Noop {
                reason: SessionNoopReason::IdleWithoutActiveDrag,
            },
            DragState::Captured {
                element,
                slot,
                origin,
                grab_center,
                anchor_generation,
                anchor_fired,
                ..
            } => {
                if exceeds_drag_threshold(origin, position, self.touch_slop) {
                    let recenter = self.anchor.fire_now(anchor_generation).is_some();
                    self.state = DragState::Dragging {
                        element,
                        origin,
                        current: position,
                        grab_center,
                    };
                    SessionEffect::DragStarted {
                        element,
                        center: dragged_center(grab_center, origin, position),
                        recenter,
                    }
                } else {
                    self.state = DragState::Captured {
                        element,
                        slot,
                        origin,
                        current: position,
                        grab_center,
                        anchor_generation,
                        anchor_fired,
                    };
                    SessionEffect::Noop {
                        reason: SessionNoopReason::ThresholdNotReached,
                    }
                }
            }
            DragState::Dragging {
                element,
                origin,
                grab_center,
                ..
            } => {
                self.state = DragState::Dragging {
                    element,
                    origin,
                    current: position,
                    grab_center,
                };
                SessionEffect::DragUpdated {
                    element,
                    center: dragged_center(grab_center, origin, position),
                }
            }
        };
        self.transition(from, effect)
    }

    pub fn pointer_up(&mut self) -> SessionTransition {
        let from = self.state;
        self.anchor.cancel();
        let effect = match self.state {
            DragState::Idle => SessionEffect::Noop {
                reason: SessionNoopReason::IdleWithoutActiveDrag,
            },
            DragState::Captured {
                element,
                anchor_fired,
                ..
            } => {
                self.state = DragState::Idle;
                SessionEffect::Released {
                    element,
                    tap: !anchor_fired,
                }
            }
            DragState::Dragging { element, .. } => {
                self.state = DragState::Idle;
                SessionEffect::Released {
                    element,
                    tap: false,
                }
            }
        };
        self.transition(from, effect)
    }

    /// Abort the active drag. Committed slot changes are kept.
    pub fn cancel(&mut self) -> SessionTransition {
        let from = self.state;
        self.anchor.cancel();
        let effect = match self.state.element() {
            None => SessionEffect::Noop {
                reason: SessionNoopReason::IdleWithoutActiveDrag,
            },
            Some(element) => {
                self.state = DragState::Idle;
                SessionEffect::Canceled { element }
            }
        };
        self.transition(from, effect)
    }

    /// Poll the anchor timer. Returns a transition only when it fires.
    pub fn tick(&mut self, now: Instant) -> Option<SessionTransition> {
        let DragState::Captured {
            element,
            slot,
            origin,
            current,
            grab_center,
            anchor_generation,
            ..
        } = self.state
        else {
            return None;
        };
        let fired = self.anchor.poll(now, anchor_generation)?;
        debug_assert_eq!(fired, element);
        let from = self.state;
        self.state = DragState::Captured {
            element,
            slot,
            origin,
            current,
            grab_center,
            anchor_generation,
            anchor_fired: true,
        };
        Some(self.transition(from, SessionEffect::AnchorRecenter { element: fired }))
    }

    fn transition(&mut self, from: DragState, effect: SessionEffect) -> SessionTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        SessionTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        }
    }
}

/// Element center that keeps the grab offset under the pointer.
fn dragged_center(grab_center: Point, origin: Point, pointer: Point) -> Point {
    let (dx, dy) = origin.delta_to(pointer);
    grab_center.offset(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Content, Registry};

    const MS_100: Duration = Duration::from_millis(100);
    const MS_250: Duration = Duration::from_millis(250);

    fn board_registry() -> Registry {
        let mut registry = Registry::new();
        registry.set_content(Slot::TopLeftLarge, Some(Content::new("a")));
        registry.set_content(Slot::TopRight, Some(Content::new("b")));
        registry
    }

    fn session() -> DragSession {
        DragSession::new(5, Duration::from_millis(200))
    }

    #[test]
    fn down_on_occupied_captures_and_arms() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        let tr = s.pointer_down(
            registry.get(Slot::TopRight),
            Point::new(700, 100),
            Point::new(749, 151),
            t,
        );
        assert_eq!(tr.from, DragState::Idle);
        assert!(matches!(tr.effect, SessionEffect::Captured { slot: Slot::TopRight, .. }));
        assert!(s.is_active());
        assert!(s.anchor().is_pending());
    }

    #[test]
    fn down_on_placeholder_is_ignored() {
        let registry = board_registry();
        let mut s = session();
        let tr = s.pointer_down(
            registry.get(Slot::BottomLeft),
            Point::new(50, 700),
            Point::new(114, 710),
            Instant::now(),
        );
        assert_eq!(
            tr.effect,
            SessionEffect::Noop {
                reason: SessionNoopReason::NotDraggable
            }
        );
        assert!(!s.is_active());
        assert!(!s.anchor().is_pending());
    }

    #[test]
    fn second_down_while_active_is_rejected() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        let tr = s.pointer_down(
            registry.get(Slot::TopLeftLarge),
            Point::new(10, 10),
            Point::new(300, 300),
            t,
        );
        assert_eq!(
            tr.effect,
            SessionEffect::Noop {
                reason: SessionNoopReason::ActiveDragAlreadyInProgress
            }
        );
        assert_eq!(s.state().element(), Some(registry.get(Slot::TopRight).id()));
    }

    #[test]
    fn slop_is_strict_manhattan() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopLeftLarge), Point::new(100, 100), Point::new(300, 300), t);

        // |3| + |2| == 5: not past the slop.
        let tr = s.pointer_move(Point::new(103, 102));
        assert_eq!(
            tr.effect,
            SessionEffect::Noop {
                reason: SessionNoopReason::ThresholdNotReached
            }
        );
        assert!(!s.is_dragging());

        let tr = s.pointer_move(Point::new(103, 103));
        assert!(matches!(
            tr.effect,
            SessionEffect::DragStarted {
                center: Point { x: 303, y: 303 },
                recenter: true,
                ..
            }
        ));
        assert!(s.is_dragging());
        assert!(!s.anchor().is_pending());
    }

    #[test]
    fn drag_updates_track_grab_offset() {
        let registry = board_registry();
        let mut s = session();
        s.pointer_down(
            registry.get(Slot::TopLeftLarge),
            Point::new(100, 100),
            Point::new(300, 300),
            Instant::now(),
        );
        s.pointer_move(Point::new(150, 100));
        let tr = s.pointer_move(Point::new(550, -50));
        assert!(matches!(
            tr.effect,
            SessionEffect::DragUpdated {
                center: Point { x: 750, y: 150 },
                ..
            }
        ));
    }

    #[test]
    fn short_press_release_is_tap() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        let tr = s.pointer_up();
        assert!(matches!(tr.effect, SessionEffect::Released { tap: true, .. }));
        assert_eq!(tr.to, DragState::Idle);
    }

    #[test]
    fn pointer_up_cancels_anchor_timer() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        s.pointer_up();
        assert!(!s.anchor().is_pending());
        assert!(s.tick(t + MS_250).is_none());

        // A later capture gets its own, later deadline.
        s.pointer_down(registry.get(Slot::TopLeftLarge), Point::new(10, 10), Point::new(300, 300), t + MS_100);
        assert!(s.tick(t + MS_250).is_none());
        let tr = s.tick(t + Duration::from_millis(300));
        assert!(matches!(tr.map(|t| t.effect), Some(SessionEffect::AnchorRecenter { .. })));
    }

    #[test]
    fn each_capture_holds_its_own_anchor_generation() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        let DragState::Captured { anchor_generation: first, .. } = s.state() else {
            panic!("expected Captured, got {:?}", s.state());
        };
        s.cancel();
        s.pointer_down(registry.get(Slot::TopLeftLarge), Point::new(10, 10), Point::new(300, 300), t);
        let DragState::Captured { anchor_generation: second, .. } = s.state() else {
            panic!("expected Captured, got {:?}", s.state());
        };
        assert!(second > first);
        let tr = s.tick(t + MS_250).map(|t| t.effect);
        assert_eq!(
            tr,
            Some(SessionEffect::AnchorRecenter {
                element: registry.get(Slot::TopLeftLarge).id()
            })
        );
    }

    #[test]
    fn long_hold_release_is_not_tap() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        assert!(s.tick(t + MS_100).is_none());
        assert!(s.tick(t + MS_250).is_some());
        assert!(s.tick(t + Duration::from_millis(400)).is_none());
        let tr = s.pointer_up();
        assert!(matches!(tr.effect, SessionEffect::Released { tap: false, .. }));
    }

    #[test]
    fn drag_start_after_anchor_fired_does_not_recenter_again() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        s.tick(t + MS_250);
        let tr = s.pointer_move(Point::new(600, 100));
        assert!(matches!(tr.effect, SessionEffect::DragStarted { recenter: false, .. }));
    }

    #[test]
    fn release_after_drag_is_not_tap() {
        let registry = board_registry();
        let mut s = session();
        s.pointer_down(
            registry.get(Slot::TopRight),
            Point::new(700, 100),
            Point::new(749, 151),
            Instant::now(),
        );
        s.pointer_move(Point::new(600, 100));
        let tr = s.pointer_up();
        assert!(matches!(tr.effect, SessionEffect::Released { tap: false, .. }));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        let tr = s.cancel();
        assert!(matches!(tr.effect, SessionEffect::Canceled { .. }));
        assert!(!s.is_active());
        assert!(s.tick(t + MS_250).is_none());

        let tr = s.cancel();
        assert_eq!(
            tr.effect,
            SessionEffect::Noop {
                reason: SessionNoopReason::IdleWithoutActiveDrag
            }
        );
    }

    #[test]
    fn idle_inputs_are_noops() {
        let mut s = session();
        for tr in [s.pointer_move(Point::new(1, 1)), s.pointer_up()] {
            assert_eq!(
                tr.effect,
                SessionEffect::Noop {
                    reason: SessionNoopReason::IdleWithoutActiveDrag
                }
            );
        }
        assert!(s.tick(Instant::now()).is_none());
    }

    #[test]
    fn transition_ids_increase() {
        let registry = board_registry();
        let mut s = session();
        let t = Instant::now();
        let a = s.pointer_down(registry.get(Slot::TopRight), Point::new(700, 100), Point::new(749, 151), t);
        let b = s.pointer_move(Point::new(600, 100));
        let c = s.pointer_up();
        assert!(a.transition_id < b.transition_id);
        assert!(b.transition_id < c.transition_id);
    }
}
