#![forbid(unsafe_code)]

//! The collage board: one registry, one drag session, one grid.
//!
//! The host feeds pointer input and clock ticks in; each call returns the
//! [`BoardEvent`]s the renderer must act on, in order. All work is
//! synchronous and runs to completion before the call returns.
//!
//! # Invariants
//!
//! 1. The registry is mutated only by the reorder engine during a drag and
//!    by compaction on content removal.
//! 2. Occupied slots always form a prefix of the slot order when content is
//!    managed through [`CollageBoard::assign_content`],
//!    [`CollageBoard::append_content`], and [`CollageBoard::remove_content`].
//! 3. A dragged element's on-screen footprint never leaves the container.

use collage_core::event::PointerEvent;
use collage_core::geometry::{Point, Rect};
use collage_core::slot::{Slot, SlotSet};
use collage_layout::{EdgeScales, GridMetrics, SlotLayout, classify, edge_scales, layout_all};
use tracing::{debug, debug_span, info, trace};
use web_time::Instant;

use crate::config::{BoardConfig, ConfigError};
use crate::registry::{Content, ElementId, Registry};
use crate::reorder::{ReorderKind, ReorderOutcome, reorder};
use crate::session::{DragSession, DragState, SessionEffect};

/// Instruction for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardEvent {
    /// Draw this element above the others.
    RaiseToFront { element: ElementId },
    /// These slots changed occupant.
    SlotsChanged { slots: SlotSet },
    /// Slide the captured element's anchor under the pointer.
    AnchorRecenterRequested { element: ElementId },
    /// The dragged element's unscaled rect and the scale it is drawn at.
    DragMoved {
        element: ElementId,
        rect: Rect,
        scale: f32,
    },
    /// Animate `element` to its slot's resting layout.
    Settle {
        element: ElementId,
        slot: Slot,
        layout: SlotLayout,
    },
    /// A short press on an occupied slot, for the click layer.
    Tap { slot: Slot },
}

/// Draggable 7-slot collage.
#[derive(Debug, Clone)]
pub struct CollageBoard {
    config: BoardConfig,
    metrics: GridMetrics,
    layouts: [SlotLayout; Slot::COUNT],
    registry: Registry,
    session: DragSession,
}

impl CollageBoard {
    /// Board at its natural height for `container_width`.
    pub fn new(config: BoardConfig, container_width: i32) -> Result<Self, ConfigError> {
        let config = config.validated();
        let height = natural_height(&config, container_width);
        Self::with_size(config, container_width, height)
    }

    /// Board with an explicit container size.
    pub fn with_size(
        config: BoardConfig,
        container_width: i32,
        container_height: i32,
    ) -> Result<Self, ConfigError> {
        let config = config.validated();
        let metrics = GridMetrics::new(
            container_width,
            container_height,
            config.device_width_for(container_width),
            config.spacing,
        )?;
        let mut board = Self {
            session: DragSession::new(config.touch_slop, config.anchor_delay()),
            layouts: layout_all(&metrics),
            registry: Registry::new(),
            metrics,
            config,
        };
        board.push_settles(SlotSet::all(), &mut Vec::new());
        Ok(board)
    }

    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub const fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn session(&self) -> &DragSession {
        &self.session
    }

    /// Resting layout of `slot`.
    #[must_use]
    pub const fn current_rect(&self, slot: Slot) -> SlotLayout {
        self.layouts[slot.index()]
    }

    /// Top-left of `slot`'s unscaled rect.
    #[must_use]
    pub const fn origin_of(&self, slot: Slot) -> Point {
        self.layouts[slot.index()].origin()
    }

    #[must_use]
    pub fn edge_scales(&self) -> EdgeScales {
        edge_scales(&self.metrics)
    }

    /// Scale the dragged element is currently drawn at, `None` when no drag
    /// is in progress.
    #[must_use]
    pub fn drag_scale(&self) -> Option<f32> {
        match self.session.state() {
            DragState::Dragging { element, .. } => Some(self.registry.element(element).scale()),
            _ => None,
        }
    }

    #[must_use]
    pub fn occupied_slots(&self) -> Vec<Slot> {
        self.registry.occupied_slots()
    }

    /// Re-measure. Every element not under the pointer settles into its new
    /// layout.
    pub fn resize(
        &mut self,
        container_width: i32,
        container_height: i32,
    ) -> Result<Vec<BoardEvent>, ConfigError> {
        self.metrics = GridMetrics::new(
            container_width,
            container_height,
            self.config.device_width_for(container_width),
            self.config.spacing,
        )?;
        self.layouts = layout_all(&self.metrics);
        if let DragState::Dragging { element, .. } = self.session.state() {
            let center = self.registry.element(element).center();
            let scale = self.initial_drag_scale(self.registry.slot_of(element));
            self.registry.set_pose(element, center, scale);
        }
        debug!(
            width = container_width,
            height = container_height,
            "collage.board.resized"
        );
        let mut events = Vec::new();
        self.push_settles(SlotSet::all(), &mut events);
        Ok(events)
    }

    // --- Pointer input ----------------------------------------------------

    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> Vec<BoardEvent> {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position.x, position.y, now),
            PointerEvent::Move { position } => self.pointer_move(position.x, position.y, now),
            PointerEvent::Up => self.pointer_up(now),
            PointerEvent::Cancel => self.gesture_cancelled(now),
        }
    }

    pub fn pointer_down(&mut self, x: i32, y: i32, now: Instant) -> Vec<BoardEvent> {
        if self.session.is_active() {
            trace!(x, y, "collage.pointer_down.ignored");
            return Vec::new();
        }
        let position = Point::new(x, y);
        let slot = classify(position, self.metrics.container_width());
        let element = self.registry.get(slot);
        let grab_center = self.layouts[slot.index()].center();
        let events = vec![BoardEvent::RaiseToFront {
            element: element.id(),
        }];
        let transition = self.session.pointer_down(element, position, grab_center, now);
        match transition.effect {
            SessionEffect::Captured { element, slot, .. } => {
                debug!(element = element.index(), slot = slot.name(), "collage.drag.captured");
            }
            effect => {
                trace!(slot = slot.name(), ?effect, "collage.drag.not_captured");
            }
        }
        events
    }

    pub fn pointer_move(&mut self, x: i32, y: i32, now: Instant) -> Vec<BoardEvent> {
        let mut events = self.tick(now);
        let Some(element) = self.session.state().element() else {
            return events;
        };
        let _span = self.drag_span(element).entered();
        let transition = self.session.pointer_move(Point::new(x, y));
        match transition.effect {
            SessionEffect::DragStarted {
                element,
                center,
                recenter,
            } => {
                debug!(element = element.index(), "collage.drag.started");
                let scale = self.initial_drag_scale(self.registry.slot_of(element));
                self.registry.set_pose(element, center, scale);
                if recenter {
                    events.push(BoardEvent::AnchorRecenterRequested { element });
                }
                self.drag_to(element, center, &mut events);
            }
            SessionEffect::DragUpdated { element, center } => {
                self.drag_to(element, center, &mut events);
            }
            _ => {}
        }
        events
    }

    pub fn pointer_up(&mut self, now: Instant) -> Vec<BoardEvent> {
        let mut events = self.tick(now);
        let Some(element) = self.session.state().element() else {
            return events;
        };
        let _span = self.drag_span(element).entered();
        let transition = self.session.pointer_up();
        if let SessionEffect::Released { element, tap } = transition.effect {
            let slot = self.registry.slot_of(element);
            debug!(element = element.index(), slot = slot.name(), tap, "collage.drag.released");
            if tap {
                events.push(BoardEvent::Tap { slot });
            }
            events.push(self.settle(element));
        }
        events
    }

    /// The gesture layer gave up the pointer stream. Slot changes already
    /// committed are kept.
    pub fn gesture_cancelled(&mut self, _now: Instant) -> Vec<BoardEvent> {
        let Some(element) = self.session.state().element() else {
            return Vec::new();
        };
        let _span = self.drag_span(element).entered();
        let transition = self.session.cancel();
        match transition.effect {
            SessionEffect::Canceled { element } => {
                debug!(element = element.index(), "collage.drag.canceled");
                vec![self.settle(element)]
            }
            _ => Vec::new(),
        }
    }

    /// Poll the recenter-anchor timer.
    pub fn tick(&mut self, now: Instant) -> Vec<BoardEvent> {
        match self.session.tick(now).map(|t| t.effect) {
            Some(SessionEffect::AnchorRecenter { element }) => {
                debug!(element = element.index(), "collage.drag.anchor_fired");
                vec![BoardEvent::AnchorRecenterRequested { element }]
            }
            _ => Vec::new(),
        }
    }

    // --- Content ----------------------------------------------------------

    /// Put `content` on the board.
    ///
    /// An occupied `slot` has its content replaced. Otherwise the content
    /// goes to the first placeholder, keeping occupied slots a prefix.
    /// Returns the slot that received it.
    pub fn assign_content(&mut self, slot: Slot, content: impl Into<Content>) -> Slot {
        let target = if self.registry.is_occupied(slot) {
            slot
        } else {
            self.registry.first_placeholder().unwrap_or(slot)
        };
        let content = content.into();
        info!(
            requested = slot.name(),
            slot = target.name(),
            content = content.as_str(),
            "collage.content.assigned"
        );
        self.registry.set_content(target, Some(content));
        target
    }

    /// Put `content` in the first placeholder. `None` when the board is full.
    pub fn append_content(&mut self, content: impl Into<Content>) -> Option<Slot> {
        let target = self.registry.first_placeholder()?;
        Some(self.assign_content(target, content))
    }

    /// Empty `slot` and shift later occupied slots back to close the gap.
    pub fn remove_content(&mut self, slot: Slot) -> Vec<BoardEvent> {
        let removed = self.registry.get(slot).id();
        if self.registry.is_occupied(slot) {
            let mut events = Vec::new();
            let was_dragged = self.session.state().element() == Some(removed);
            if was_dragged {
                self.session.cancel();
            }
            self.registry.set_content(slot, None);
            let affected = self.registry.compact_from(slot);
            info!(
                slot = slot.name(),
                shifted = affected.bits(),
                "collage.content.removed"
            );
            if !affected.is_empty() {
                events.push(BoardEvent::SlotsChanged { slots: affected });
                self.push_settles(affected, &mut events);
            } else if was_dragged {
                events.push(self.settle(removed));
            }
            events
        } else {
            trace!(slot = slot.name(), "collage.content.remove_placeholder");
            Vec::new()
        }
    }

    // --- Internals --------------------------------------------------------

    fn drag_span(&self, element: ElementId) -> tracing::Span {
        debug_span!(
            "collage.drag",
            element = element.index(),
            slot = self.registry.slot_of(element).name()
        )
    }

    fn drag_to(&mut self, element: ElementId, center: Point, events: &mut Vec<BoardEvent>) {
        let half = self.metrics.side_length() / 2;
        let bounds = self.metrics.bounds();
        let center = Point::new(
            center.x.clamp(bounds.left, bounds.right),
            center.y.clamp(bounds.top, bounds.bottom),
        );
        let footprint = Rect::around(center, half)
            .scaled_about_center(self.registry.element(element).scale())
            .clamp_within(&bounds);
        let center = footprint.center();

        let outcome = reorder(
            &mut self.registry,
            element,
            center,
            self.metrics.container_width(),
        );
        let mut scale = self.registry.element(element).scale();
        if let ReorderOutcome::Reordered { kind, to, affected, .. } = outcome {
            if kind == ReorderKind::Swap {
                scale = self.layouts[to.index()].scale;
            }
            events.push(BoardEvent::SlotsChanged { slots: affected });
            self.push_settles(affected, events);
        }
        self.registry.set_pose(element, center, scale);
        events.push(BoardEvent::DragMoved {
            element,
            rect: Rect::around(center, half),
            scale,
        });
    }

    /// Scale a drag starts at. Small cells keep their own; the large cell
    /// shrinks to the smallest cell's so it can be carried into any slot.
    fn initial_drag_scale(&self, slot: Slot) -> f32 {
        if slot.is_large() {
            self.layouts
                .iter()
                .map(|layout| layout.scale)
                .fold(f32::INFINITY, f32::min)
        } else {
            self.layouts[slot.index()].scale
        }
    }

    fn settle(&mut self, element: ElementId) -> BoardEvent {
        let slot = self.registry.slot_of(element);
        let layout = self.layouts[slot.index()];
        self.registry.set_pose(element, layout.center(), layout.scale);
        BoardEvent::Settle {
            element,
            slot,
            layout,
        }
    }

    /// Settle every element in `slots` except the one being dragged.
    fn push_settles(&mut self, slots: SlotSet, events: &mut Vec<BoardEvent>) {
        let dragged = match self.session.state() {
            DragState::Dragging { element, .. } => Some(element),
            _ => None,
        };
        for slot in slots.slots() {
            let element = self.registry.get(slot).id();
            if Some(element) != dragged {
                events.push(self.settle(element));
            }
        }
    }
}

fn natural_height(config: &BoardConfig, container_width: i32) -> i32 {
    let s = config.spacing;
    let every = container_width.saturating_sub(s.saturating_mul(4)) / 3;
    let every_bottom = config
        .device_width_for(container_width)
        .saturating_sub(s.saturating_mul(5))
        / 4;
    s.saturating_mul(4)
        .saturating_add(every_bottom)
        .saturating_add(every.saturating_mul(2))
}
