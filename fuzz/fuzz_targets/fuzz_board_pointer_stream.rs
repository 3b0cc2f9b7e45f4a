#![no_main]

use arbitrary::Arbitrary;
use collage_core::slot::Slot;
use collage_runtime::{BoardConfig, CollageBoard, Duration, Instant};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Down { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Up,
    Cancel,
    Tick { ms: u16 },
    Append,
    Remove { slot: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    width: i32,
    spacing: u8,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    // Out-of-range widths must be rejected, never panic.
    let width = input.width;
    let config = BoardConfig::default().with_spacing(i32::from(input.spacing % 16));
    let Ok(mut board) = CollageBoard::new(config, width) else {
        return;
    };

    let mut now = Instant::now();
    let mut picture = 0u32;
    for step in input.steps.iter().take(512) {
        now += Duration::from_millis(4);
        match *step {
            Step::Down { x, y } => {
                board.pointer_down(x, y, now);
            }
            Step::Move { x, y } => {
                board.pointer_move(x, y, now);
            }
            Step::Up => {
                board.pointer_up(now);
            }
            Step::Cancel => {
                board.gesture_cancelled(now);
            }
            Step::Tick { ms } => {
                now += Duration::from_millis(u64::from(ms));
                board.tick(now);
            }
            Step::Append => {
                picture += 1;
                board.append_content(format!("p{picture}"));
            }
            Step::Remove { slot } => {
                if let Some(slot) = Slot::from_index(usize::from(slot) % Slot::COUNT) {
                    board.remove_content(slot);
                }
            }
        }

        // Post-conditions that must always hold:
        board.registry().verify().expect("slot/element bijection broken");
        let occupied = board.occupied_slots();
        assert_eq!(
            occupied.as_slice(),
            &Slot::ALL[..occupied.len()],
            "occupied slots not a prefix"
        );
    }
});
