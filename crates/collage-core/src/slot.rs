#![forbid(unsafe_code)]

//! The seven fixed slots of the collage grid.
//!
//! ```text
//! +-----------------+--------+
//! |                 | TopRight
//! |  TopLeftLarge   +--------+
//! |                 | RightMiddle
//! +-----+-----+-----+--------+
//! | BL  | BM1 | BM2 | RightBottom
//! +-----+-----+-----+--------+
//! ```
//!
//! # Invariants
//!
//! 1. Slot order is total and fixed:
//!    `TopLeftLarge < TopRight < RightMiddle < RightBottom < BottomMid1 < BottomMid2 < BottomLeft`.
//!    Chain-shifts walk this order, never the on-screen left-to-right order.
//! 2. `Slot::from_index(s.index()) == Some(s)` for every slot.
//! 3. [`SlotSet`] only ever contains bits for the seven known slots.

use std::fmt;

use bitflags::bitflags;

/// One of the seven fixed grid positions.
///
/// The discriminant doubles as the slot's position in the shift order, but
/// callers should use [`Slot::index`], [`Slot::next`], and [`Slot::prev`]
/// rather than casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Slot {
    /// The large 2×2 cell in the top-left corner.
    TopLeftLarge = 0,
    /// Top cell of the right column.
    TopRight = 1,
    /// Middle cell of the right column.
    RightMiddle = 2,
    /// Bottom-right corner; aligned with the bottom row's quarter grid.
    RightBottom = 3,
    /// Second cell from the left in the bottom row.
    BottomMid1 = 4,
    /// Third cell from the left in the bottom row.
    BottomMid2 = 5,
    /// Bottom-left corner.
    BottomLeft = 6,
}

impl Slot {
    /// Number of slots in the grid.
    pub const COUNT: usize = 7;

    /// Every slot, in shift order.
    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::TopLeftLarge,
        Slot::TopRight,
        Slot::RightMiddle,
        Slot::RightBottom,
        Slot::BottomMid1,
        Slot::BottomMid2,
        Slot::BottomLeft,
    ];

    /// Position of this slot in the shift order (0..7).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot at the given shift-order position.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Slot> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// The slot that follows this one in shift order.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Option<Slot> {
        Self::from_index(self.index() + 1)
    }

    /// The slot that precedes this one in shift order.
    #[inline]
    #[must_use]
    pub const fn prev(self) -> Option<Slot> {
        match self.index().checked_sub(1) {
            Some(i) => Self::from_index(i),
            None => None,
        }
    }

    /// Whether this is the large top-left cell.
    #[inline]
    #[must_use]
    pub const fn is_large(self) -> bool {
        matches!(self, Slot::TopLeftLarge)
    }

    /// Whether this slot is measured on the bottom quarter grid.
    ///
    /// `RightBottom` sits in the right column but takes its size and horizontal
    /// alignment from the bottom row.
    #[inline]
    #[must_use]
    pub const fn uses_quarter_grid(self) -> bool {
        matches!(
            self,
            Slot::RightBottom | Slot::BottomMid1 | Slot::BottomMid2 | Slot::BottomLeft
        )
    }

    /// Slots from `from` to `to` inclusive, in ascending shift order.
    ///
    /// The bounds may be given in either order.
    pub fn range(from: Slot, to: Slot) -> impl DoubleEndedIterator<Item = Slot> + Clone {
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        (lo.index()..=hi.index()).filter_map(Slot::from_index)
    }

    /// Stable snake_case name, used in logs and config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Slot::TopLeftLarge => "top_left_large",
            Slot::TopRight => "top_right",
            Slot::RightMiddle => "right_middle",
            Slot::RightBottom => "right_bottom",
            Slot::BottomMid1 => "bottom_mid_1",
            Slot::BottomMid2 => "bottom_mid_2",
            Slot::BottomLeft => "bottom_left",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of slots, used to report which cells moved after a commit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SlotSet: u8 {
        const TOP_LEFT_LARGE = 1 << 0;
        const TOP_RIGHT      = 1 << 1;
        const RIGHT_MIDDLE   = 1 << 2;
        const RIGHT_BOTTOM   = 1 << 3;
        const BOTTOM_MID_1   = 1 << 4;
        const BOTTOM_MID_2   = 1 << 5;
        const BOTTOM_LEFT    = 1 << 6;
    }
}

impl SlotSet {
    /// Set holding a single slot.
    #[inline]
    #[must_use]
    pub const fn of(slot: Slot) -> Self {
        Self::from_bits_truncate(1u8 << slot.index())
    }

    /// Every slot between `a` and `b` inclusive.
    #[must_use]
    pub fn span(a: Slot, b: Slot) -> Self {
        Slot::range(a, b).fold(Self::empty(), |set, slot| set | Self::of(slot))
    }

    /// Whether `slot` is in the set.
    #[inline]
    #[must_use]
    pub const fn has(self, slot: Slot) -> bool {
        self.contains(Self::of(slot))
    }

    /// Add `slot` to the set.
    #[inline]
    pub fn add(&mut self, slot: Slot) {
        self.insert(Self::of(slot));
    }

    /// Slots in the set, in shift order.
    pub fn slots(self) -> impl Iterator<Item = Slot> {
        Slot::ALL.into_iter().filter(move |slot| self.has(*slot))
    }
}

impl From<Slot> for SlotSet {
    fn from(slot: Slot) -> Self {
        Self::of(slot)
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, slot| set | Self::of(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
            assert_eq!(Slot::from_index(i), Some(*slot));
        }
        assert_eq!(Slot::from_index(Slot::COUNT), None);
    }

    #[test]
    fn order_matches_shift_order() {
        let mut sorted = Slot::ALL;
        sorted.sort();
        assert_eq!(sorted, Slot::ALL);
        assert!(Slot::TopLeftLarge < Slot::TopRight);
        assert!(Slot::RightBottom < Slot::BottomMid1);
        assert!(Slot::BottomMid2 < Slot::BottomLeft);
    }

    #[test]
    fn next_and_prev_stop_at_ends() {
        assert_eq!(Slot::TopLeftLarge.prev(), None);
        assert_eq!(Slot::TopLeftLarge.next(), Some(Slot::TopRight));
        assert_eq!(Slot::BottomLeft.next(), None);
        assert_eq!(Slot::BottomLeft.prev(), Some(Slot::BottomMid2));
    }

    #[test]
    fn range_is_inclusive_and_order_agnostic() {
        let up: Vec<_> = Slot::range(Slot::TopRight, Slot::RightBottom).collect();
        assert_eq!(up, vec![Slot::TopRight, Slot::RightMiddle, Slot::RightBottom]);
        let down: Vec<_> = Slot::range(Slot::RightBottom, Slot::TopRight).collect();
        assert_eq!(up, down);
        assert_eq!(Slot::range(Slot::BottomLeft, Slot::BottomLeft).count(), 1);
    }

    #[test]
    fn quarter_grid_membership() {
        assert!(!Slot::TopLeftLarge.uses_quarter_grid());
        assert!(!Slot::TopRight.uses_quarter_grid());
        assert!(!Slot::RightMiddle.uses_quarter_grid());
        assert!(Slot::RightBottom.uses_quarter_grid());
        assert!(Slot::BottomLeft.uses_quarter_grid());
    }

    #[test]
    fn display_uses_snake_case_name() {
        assert_eq!(Slot::BottomMid1.to_string(), "bottom_mid_1");
        assert_eq!(format!("{}", Slot::TopLeftLarge), "top_left_large");
    }

    #[test]
    fn slot_set_span_and_iteration() {
        let set = SlotSet::span(Slot::TopLeftLarge, Slot::RightBottom);
        assert_eq!(
            set.slots().collect::<Vec<_>>(),
            vec![
                Slot::TopLeftLarge,
                Slot::TopRight,
                Slot::RightMiddle,
                Slot::RightBottom
            ]
        );
        assert!(set.has(Slot::RightMiddle));
        assert!(!set.has(Slot::BottomLeft));
    }

    #[test]
    fn slot_set_of_matches_named_flags() {
        assert_eq!(SlotSet::of(Slot::TopLeftLarge), SlotSet::TOP_LEFT_LARGE);
        assert_eq!(SlotSet::of(Slot::BottomLeft), SlotSet::BOTTOM_LEFT);
        assert_eq!(SlotSet::all().slots().count(), Slot::COUNT);
    }

    #[test]
    fn slot_set_collects_and_adds() {
        let mut set: SlotSet = [Slot::TopRight, Slot::BottomMid2].into_iter().collect();
        set.add(Slot::TopRight);
        set.add(Slot::BottomLeft);
        assert_eq!(set.slots().count(), 3);
        assert!(SlotSet::default().is_empty());
    }
}
