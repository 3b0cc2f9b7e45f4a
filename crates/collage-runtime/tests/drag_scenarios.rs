//! End-to-end drag scenarios on a 900px-wide board with default settings.
//!
//! Geometry at this width (spacing 4): thirds of 300, quarters of 225, the
//! large cell centered at (300, 300), natural height 824.

use collage_core::event::PointerEvent;
use collage_core::slot::{Slot, SlotSet};
use collage_runtime::{BoardConfig, BoardEvent, CollageBoard, Duration, ElementId, Instant};

const FRAME: Duration = Duration::from_millis(16);

fn board_with(count: usize) -> CollageBoard {
    let mut board = CollageBoard::new(BoardConfig::default(), 900).expect("valid board");
    for i in 0..count {
        board.append_content(format!("photo-{i}.jpg"));
    }
    board
}

fn ids(board: &CollageBoard) -> Vec<ElementId> {
    board.registry().iter().map(|e| e.id()).collect()
}

/// Feed a stream one frame apart and collect every event.
fn play(board: &mut CollageBoard, start: Instant, stream: &[PointerEvent]) -> Vec<BoardEvent> {
    let mut now = start;
    let mut out = Vec::new();
    for event in stream {
        out.extend(board.handle(*event, now));
        now += FRAME;
    }
    out
}

#[test]
fn large_cell_dragged_to_top_right_swaps_the_pair() {
    let mut board = board_with(7);
    let before = ids(&board);

    let events = play(
        &mut board,
        Instant::now(),
        &[
            PointerEvent::down(300, 300),
            PointerEvent::moved(750, 150),
            PointerEvent::Up,
        ],
    );

    let after = ids(&board);
    assert_eq!(after[0], before[1]);
    assert_eq!(after[1], before[0]);
    assert_eq!(&after[2..], &before[2..]);
    assert!(events.contains(&BoardEvent::SlotsChanged {
        slots: SlotSet::TOP_LEFT_LARGE | SlotSet::TOP_RIGHT
    }));
}

#[test]
fn large_cell_dragged_to_right_bottom_rotates_first_four() {
    let mut board = board_with(7);
    let before = ids(&board);

    play(
        &mut board,
        Instant::now(),
        &[
            PointerEvent::down(300, 300),
            PointerEvent::moved(320, 320),
            PointerEvent::moved(750, 700),
            PointerEvent::Up,
        ],
    );

    let after = ids(&board);
    assert_eq!(
        &after[..4],
        &[before[1], before[2], before[3], before[0]]
    );
    assert_eq!(&after[4..], &before[4..]);
}

#[test]
fn bottom_cell_dragged_into_large_cell_reverse_shifts() {
    let mut board = board_with(7);
    let before = ids(&board);
    let mid2 = board.current_rect(Slot::BottomMid2).center();

    play(
        &mut board,
        Instant::now(),
        &[
            PointerEvent::down(mid2.x, mid2.y),
            PointerEvent::moved(300, 300),
            PointerEvent::Up,
        ],
    );

    let after = ids(&board);
    assert_eq!(after[0], before[5]);
    assert_eq!(&after[1..6], &before[0..5]);
    assert_eq!(after[6], before[6]);
}

#[test]
fn placeholders_are_never_swap_targets() {
    // Only the large cell and top-right are occupied.
    let mut board = board_with(2);
    let before = ids(&board);

    let events = play(
        &mut board,
        Instant::now(),
        &[
            PointerEvent::down(300, 300),
            PointerEvent::moved(750, 700),
            PointerEvent::moved(100, 700),
            PointerEvent::moved(750, 450),
            PointerEvent::Up,
        ],
    );

    assert_eq!(ids(&board), before);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, BoardEvent::SlotsChanged { .. }))
    );
}

#[test]
fn deleting_a_middle_picture_compacts_the_rest() {
    let mut board = board_with(5);
    let before = ids(&board);

    let events = board.remove_content(Slot::RightMiddle);

    let after = ids(&board);
    assert_eq!(&after[..4], &[before[0], before[1], before[3], before[4]]);
    assert_eq!(after[4], before[2]);
    assert!(board.registry().get(Slot::BottomMid1).is_placeholder());
    assert_eq!(
        board.occupied_slots(),
        vec![
            Slot::TopLeftLarge,
            Slot::TopRight,
            Slot::RightMiddle,
            Slot::RightBottom
        ]
    );
    let settled: Vec<Slot> = events
        .iter()
        .filter_map(|e| match e {
            BoardEvent::Settle { slot, .. } => Some(*slot),
            _ => None,
        })
        .collect();
    assert_eq!(
        settled,
        vec![Slot::RightMiddle, Slot::RightBottom, Slot::BottomMid1]
    );
}

#[test]
fn releasing_before_the_hold_cancels_the_anchor() {
    let mut board = board_with(3);
    let t = Instant::now();

    board.pointer_down(750, 150, t);
    let up = board.pointer_up(t + Duration::from_millis(50));
    assert!(matches!(up[0], BoardEvent::Tap { slot: Slot::TopRight }));

    for ms in [150, 200, 250, 1_000] {
        assert!(board.tick(t + Duration::from_millis(ms)).is_empty());
    }
}

#[test]
fn repeated_moves_in_a_committed_region_do_not_thrash() {
    let mut board = board_with(7);
    let events = play(
        &mut board,
        Instant::now(),
        &[
            PointerEvent::down(300, 300),
            PointerEvent::moved(750, 150),
            PointerEvent::moved(760, 160),
            PointerEvent::moved(770, 140),
            PointerEvent::Up,
        ],
    );
    let commits = events
        .iter()
        .filter(|e| matches!(e, BoardEvent::SlotsChanged { .. }))
        .count();
    assert_eq!(commits, 1);
}

#[test]
fn custom_slop_delays_drag_start() {
    let config = BoardConfig::default().with_touch_slop(40);
    let mut board = CollageBoard::new(config, 900).expect("valid board");
    board.append_content("a");
    let t = Instant::now();
    board.pointer_down(300, 300, t);
    assert!(board.pointer_move(320, 320, t).is_empty());
    assert!(!board.session().is_dragging());
    assert!(!board.pointer_move(321, 320, t).is_empty());
    assert!(board.session().is_dragging());
}
