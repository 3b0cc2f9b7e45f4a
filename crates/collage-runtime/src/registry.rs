#![forbid(unsafe_code)]

//! Slot registry: the bijection between the seven slots and the seven
//! elements that occupy them.
//!
//! Two arrays mirror each other. `by_slot[s]` names the element sitting in
//! slot `s`, and `elements[e].slot` names the slot of element `e`. Every
//! mutation goes through an adjacent or pairwise swap, so the arrays can
//! never disagree.
//!
//! # Invariants
//!
//! 1. Each slot holds exactly one element and each element sits in exactly
//!    one slot.
//! 2. `by_slot[s] == e` iff `elements[e].slot == s`.
//! 3. A fresh registry places element `i` at slot `i`, all placeholders.
//!
//! # Failure Modes
//!
//! Breaking the bijection is unreachable through the public API. [`Registry::verify`]
//! reports it as [`RegistryCorruption`] and every mutation checks it with
//! `debug_assert!`.

use std::fmt;

use collage_core::geometry::Point;
use collage_core::slot::{Slot, SlotSet};

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// Stable identity of one of the seven collage elements.
///
/// Identities never change. What moves is the slot an element sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u8);

impl ElementId {
    const fn from_index(index: usize) -> Self {
        Self(index as u8)
    }

    /// Position in `0..Slot::COUNT`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Opaque handle to the picture shown by an element (a path or URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Content(String);

impl Content {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Content {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Content {
    fn from(source: String) -> Self {
        Self(source)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One collage cell. Without content it is a placeholder and cannot be
/// dragged, nor displaced by a swap.
///
/// `center` and `scale` are where the element was last drawn: its slot's
/// resting layout, or the pointer-driven pose while it is dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    slot: Slot,
    content: Option<Content>,
    center: Point,
    scale: f32,
}

impl Element {
    const fn placeholder(id: ElementId, slot: Slot) -> Self {
        Self {
            id,
            slot,
            content: None,
            center: Point::new(0, 0),
            scale: 1.0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    #[must_use]
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Last known center in container space.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Scale the element is currently drawn at.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Occupied elements are draggable; placeholders are not.
    #[inline]
    #[must_use]
    pub const fn is_draggable(&self) -> bool {
        self.content.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.content.is_none()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The slot/element bijection no longer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryCorruption {
    /// `by_slot[slot]` names an element that thinks it lives elsewhere.
    SlotMismatch {
        slot: Slot,
        element: ElementId,
        recorded: Slot,
    },
    /// One element is listed under two slots.
    DuplicateElement {
        element: ElementId,
        first: Slot,
        second: Slot,
    },
}

impl fmt::Display for RegistryCorruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotMismatch {
                slot,
                element,
                recorded,
            } => write!(
                f,
                "slot {slot} holds {element}, which records slot {recorded}"
            ),
            Self::DuplicateElement {
                element,
                first,
                second,
            } => write!(f, "{element} occupies both {first} and {second}"),
        }
    }
}

impl std::error::Error for RegistryCorruption {}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Slot-indexed element table with O(1) lookup in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    by_slot: [ElementId; Slot::COUNT],
    elements: [Element; Slot::COUNT],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Seven placeholders, element `i` at slot `i`.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            by_slot: [ElementId(0); Slot::COUNT],
            elements: std::array::from_fn(|i| {
                Element::placeholder(ElementId::from_index(i), Slot::TopLeftLarge)
            }),
        };
        for slot in Slot::ALL {
            registry.assign(ElementId::from_index(slot.index()), slot);
        }
        debug_assert!(registry.verify().is_ok());
        registry
    }

    /// Element currently in `slot`.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: Slot) -> &Element {
        &self.elements[self.by_slot[slot.index()].index()]
    }

    /// Element by identity.
    #[inline]
    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// Slot currently holding `id`.
    #[inline]
    #[must_use]
    pub fn slot_of(&self, id: ElementId) -> Slot {
        self.elements[id.index()].slot
    }

    #[inline]
    #[must_use]
    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.get(slot).is_draggable()
    }

    /// Elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> + '_ {
        Slot::ALL.into_iter().map(|slot| self.get(slot))
    }

    /// Occupied slots in slot order.
    #[must_use]
    pub fn occupied_slots(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|&slot| self.is_occupied(slot))
            .collect()
    }

    /// First placeholder in slot order, if any.
    #[must_use]
    pub fn first_placeholder(&self) -> Option<Slot> {
        Slot::ALL.into_iter().find(|&slot| !self.is_occupied(slot))
    }

    /// Raw placement used while building a registry. Does not detect
    /// duplicates; [`Registry::verify`] does.
    pub(crate) fn assign(&mut self, element: ElementId, slot: Slot) {
        self.by_slot[slot.index()] = element;
        self.elements[element.index()].slot = slot;
    }

    /// Exchange the elements at `a` and `b`. Returns the slots that changed
    /// occupant, empty when `a == b`.
    pub fn swap(&mut self, a: Slot, b: Slot) -> SlotSet {
        if a == b {
            return SlotSet::empty();
        }
        self.swap_raw(a, b);
        debug_assert!(self.verify().is_ok());
        SlotSet::of(a) | SlotSet::of(b)
    }

    /// Walk the element at `from` to `to` through adjacent swaps.
    ///
    /// Every element strictly between the two, plus the one at `to`, moves
    /// one slot back toward `from`. Works in either direction.
    pub fn shift_chain(&mut self, from: Slot, to: Slot) -> SlotSet {
        if from == to {
            return SlotSet::empty();
        }
        let forward = from < to;
        let mut at = from;
        while at != to {
            let step = if forward { at.next() } else { at.prev() };
            let Some(step) = step else { break };
            self.swap_raw(at, step);
            at = step;
        }
        debug_assert!(self.verify().is_ok());
        SlotSet::span(from, to)
    }

    /// Record where `id` is drawn. Does not touch slot assignment.
    pub(crate) fn set_pose(&mut self, id: ElementId, center: Point, scale: f32) {
        let element = &mut self.elements[id.index()];
        element.center = center;
        element.scale = scale;
    }

    /// Replace the content of the element in `slot`, returning the old one.
    pub(crate) fn set_content(&mut self, slot: Slot, content: Option<Content>) -> Option<Content> {
        let id = self.by_slot[slot.index()];
        std::mem::replace(&mut self.elements[id.index()].content, content)
    }

    /// Close the gap left by a placeholder at `slot`.
    ///
    /// Each occupied element after `slot` steps back one position until the
    /// first placeholder. The emptied element ends at the last position that
    /// was occupied. Returns the slots whose occupant changed.
    pub(crate) fn compact_from(&mut self, slot: Slot) -> SlotSet {
        let mut affected = SlotSet::empty();
        let mut gap = slot;
        while let Some(next) = gap.next() {
            if !self.is_occupied(next) {
                break;
            }
            self.swap_raw(gap, next);
            affected |= SlotSet::of(gap) | SlotSet::of(next);
            gap = next;
        }
        debug_assert!(self.verify().is_ok());
        affected
    }

    /// Check the bijection.
    pub fn verify(&self) -> Result<(), RegistryCorruption> {
        let mut seen: [Option<Slot>; Slot::COUNT] = [None; Slot::COUNT];
        for slot in Slot::ALL {
            let element = self.by_slot[slot.index()];
            if let Some(first) = seen[element.index()] {
                return Err(RegistryCorruption::DuplicateElement {
                    element,
                    first,
                    second: slot,
                });
            }
            seen[element.index()] = Some(slot);
            let recorded = self.elements[element.index()].slot;
            if recorded != slot {
                return Err(RegistryCorruption::SlotMismatch {
                    slot,
                    element,
                    recorded,
                });
            }
        }
        Ok(())
    }

    fn swap_raw(&mut self, a: Slot, b: Slot) {
        self.by_slot.swap(a.index(), b.index());
        let (ea, eb) = (self.by_slot[a.index()], self.by_slot[b.index()]);
        self.elements[ea.index()].slot = a;
        self.elements[eb.index()].slot = b;
    }
}
