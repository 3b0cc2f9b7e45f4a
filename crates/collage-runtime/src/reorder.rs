#![forbid(unsafe_code)]

//! Reorder engine: decides whether a dragged element's current center
//! should displace another element, and commits the move.
//!
//! The decision is driven by the dragged element's *current* slot and the
//! position of its center relative to thirds (`w = width / 3`) and quarters
//! (`q = width / 4`) of the measured width:
//!
//! - From the large cell, a hit on another occupied slot runs a forward
//!   chain-shift: the large element walks to the target and everything in
//!   between steps back one slot.
//! - From any other slot, a hit on the large cell runs a reverse chain-shift
//!   and a hit on a small cell runs a pairwise swap.
//!
//! # Invariants
//!
//! 1. Placeholders are never displaced as targets. A hit on a placeholder
//!    is a [`ReorderNoop::PlaceholderTarget`].
//! 2. Every commit leaves the registry a bijection.
//! 3. The decision is a pure function of `(current slot, center, width)`.
//!
//! # Failure Modes
//!
//! None surface. Regions without a candidate come back as a [`ReorderNoop`].

use collage_core::geometry::Point;
use collage_core::slot::{Slot, SlotSet};
use tracing::{debug, trace};

use crate::registry::{ElementId, Registry};

/// What a region lookup produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Target(Slot),
    /// The center-bottom region below the large cell. Never assigned a slot.
    Unresolved,
    NoTarget,
}

/// Shape of a committed reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderKind {
    Swap,
    ForwardChain,
    ReverseChain,
}

/// Why a reorder step changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderNoop {
    NoCandidate,
    UnresolvedRegion,
    PlaceholderTarget { target: Slot },
    AlreadyInSlot,
}

/// Result of one reorder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    Reordered {
        kind: ReorderKind,
        from: Slot,
        to: Slot,
        affected: SlotSet,
    },
    Noop {
        reason: ReorderNoop,
    },
}

impl ReorderOutcome {
    #[must_use]
    pub const fn is_reordered(&self) -> bool {
        matches!(self, Self::Reordered { .. })
    }

    /// Slots whose occupant changed; empty for a no-op.
    #[must_use]
    pub const fn affected(&self) -> SlotSet {
        match self {
            Self::Reordered { affected, .. } => *affected,
            Self::Noop { .. } => SlotSet::empty(),
        }
    }
}

/// Region lookup for an element currently in `current` whose center is at
/// `center`, inside a container `width` pixels wide.
#[must_use]
pub const fn candidate(current: Slot, center: Point, width: i32) -> Candidate {
    let w = width / 3;
    let q = width / 4;
    let (cx, cy) = (center.x, center.y);
    match current {
        Slot::TopLeftLarge => {
            if cx > 2 * w {
                if cy < w {
                    Candidate::Target(Slot::TopRight)
                } else if cy < 2 * w {
                    Candidate::Target(Slot::RightMiddle)
                } else {
                    Candidate::Target(Slot::RightBottom)
                }
            } else if cy > 2 * w {
                if cx < w {
                    Candidate::Target(Slot::BottomLeft)
                } else if cx < 2 * w {
                    Candidate::Unresolved
                } else {
                    Candidate::Target(Slot::RightBottom)
                }
            } else {
                Candidate::NoTarget
            }
        }
        Slot::TopRight => {
            if cx < 2 * w {
                Candidate::Target(Slot::TopLeftLarge)
            } else if cy > w {
                Candidate::Target(Slot::RightMiddle)
            } else {
                Candidate::NoTarget
            }
        }
        Slot::RightMiddle => {
            if cx < 2 * w && cy < 2 * w {
                Candidate::Target(Slot::TopLeftLarge)
            } else if cy < w {
                Candidate::Target(Slot::TopRight)
            } else if cy > 2 * w {
                Candidate::Target(Slot::RightBottom)
            } else {
                Candidate::NoTarget
            }
        }
        Slot::RightBottom => {
            if cx < 2 * w && cy < 2 * w {
                Candidate::Target(Slot::TopLeftLarge)
            } else if cx < 2 * w {
                Candidate::Target(Slot::BottomMid1)
            } else if cy < 2 * w {
                Candidate::Target(Slot::RightMiddle)
            } else {
                Candidate::NoTarget
            }
        }
        Slot::BottomMid1 | Slot::BottomMid2 => {
            if cy < 2 * w {
                if cx < 2 * w {
                    Candidate::Target(Slot::TopLeftLarge)
                } else if cy < w {
                    Candidate::Target(Slot::TopRight)
                } else {
                    Candidate::Target(Slot::RightMiddle)
                }
            } else if cx < q {
                Candidate::Target(Slot::BottomLeft)
            } else if cx < 2 * q {
                Candidate::Target(Slot::BottomMid1)
            } else if cx < 3 * q {
                Candidate::Target(Slot::BottomMid2)
            } else {
                Candidate::Target(Slot::RightBottom)
            }
        }
        Slot::BottomLeft => {
            if q <= cx && cx < 2 * q {
                Candidate::Target(Slot::BottomMid1)
            } else if 2 * q <= cx && cx < 3 * q {
                Candidate::Target(Slot::BottomMid2)
            } else if cy < 2 * w {
                Candidate::Target(Slot::TopLeftLarge)
            } else {
                Candidate::NoTarget
            }
        }
    }
}

/// Run one reorder step for `dragged`, whose center is at `center`.
///
/// On success the dragged element occupies the target slot.
pub fn reorder(
    registry: &mut Registry,
    dragged: ElementId,
    center: Point,
    width: i32,
) -> ReorderOutcome {
    let current = registry.slot_of(dragged);
    let target = match candidate(current, center, width) {
        Candidate::Target(target) => target,
        Candidate::Unresolved => return noop(dragged, current, ReorderNoop::UnresolvedRegion),
        Candidate::NoTarget => return noop(dragged, current, ReorderNoop::NoCandidate),
    };
    if target == current {
        return noop(dragged, current, ReorderNoop::AlreadyInSlot);
    }
    if !registry.is_occupied(target) {
        return noop(dragged, current, ReorderNoop::PlaceholderTarget { target });
    }

    let kind = if current.is_large() {
        ReorderKind::ForwardChain
    } else if target.is_large() {
        ReorderKind::ReverseChain
    } else {
        ReorderKind::Swap
    };
    let affected = match kind {
        ReorderKind::Swap => registry.swap(target, current),
        ReorderKind::ForwardChain | ReorderKind::ReverseChain => {
            registry.shift_chain(current, target)
        }
    };
    debug!(
        element = dragged.index(),
        from = current.name(),
        to = target.name(),
        ?kind,
        affected = affected.bits(),
        "collage.reorder.commit"
    );
    ReorderOutcome::Reordered {
        kind,
        from: current,
        to: target,
        affected,
    }
}

fn noop(dragged: ElementId, current: Slot, reason: ReorderNoop) -> ReorderOutcome {
    trace!(
        element = dragged.index(),
        slot = current.name(),
        ?reason,
        "collage.reorder.noop"
    );
    ReorderOutcome::Noop { reason }
}
