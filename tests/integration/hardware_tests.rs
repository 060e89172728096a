//! Full panel wiring: DoorController → HardwareAdapter → pins, with the
//! blink generator fired by hand in place of the esp_timer.

use std::sync::Arc;

use doorctl::adapters::hardware::HardwareAdapter;
use doorctl::app::commands::DoorCommand;
use doorctl::app::service::DoorController;
use doorctl::config::DoorConfig;
use doorctl::drivers::blink::{BlinkGenerator, MotionIndicators};
use doorctl::fsm::DoorState;

use super::mock_panel::{CollectingSink, SharedPin};

struct Board {
    red: SharedPin,
    red_2: SharedPin,
    green: SharedPin,
    green_2: SharedPin,
    bridge_a: SharedPin,
    bridge_b: SharedPin,
}

impl Board {
    fn new() -> Self {
        Self {
            red: SharedPin::default(),
            red_2: SharedPin::default(),
            green: SharedPin::default(),
            green_2: SharedPin::default(),
            bridge_a: SharedPin::default(),
            bridge_b: SharedPin::default(),
        }
    }

    fn wire(&self) -> (Arc<BlinkGenerator<SharedPin>>, HardwareAdapter<SharedPin>) {
        let blink = Arc::new(BlinkGenerator::new(MotionIndicators::new(self.red.clone(), self.red_2.clone())));
        let panel = HardwareAdapter::new(
            self.green.clone(),
            self.green_2.clone(),
            self.bridge_a.clone(),
            self.bridge_b.clone(),
            Arc::clone(&blink),
        );
        (blink, panel)
    }
}

#[test]
fn timer_fires_at_rest_leave_closed_panel_steady() {
    let board = Board::new();
    let (blink, mut panel) = board.wire();
    let mut sink = CollectingSink::new();
    let mut door = DoorController::new(DoorConfig::default(), blink.signal());
    door.start(&mut panel, &mut sink);

    for i in 0..7 {
        blink.on_timer();
        assert!(board.red.is_high(), "fire {i} touched the closed red LED");
        assert!(!board.red_2.is_high());
    }
    door.tick(500, &mut panel, &mut sink);
    assert!(board.red.is_high() && board.green.is_high());
    assert_eq!(blink.signal().fire_count(), 7);
}

#[test]
fn reds_blink_only_while_moving() {
    let board = Board::new();
    let (blink, mut panel) = board.wire();
    let mut sink = CollectingSink::new();
    let mut door = DoorController::new(DoorConfig::default(), blink.signal());
    door.start(&mut panel, &mut sink);

    door.handle_command(DoorCommand::Open, 0, &mut panel, &mut sink);
    assert!(board.bridge_a.is_high());
    assert!(!board.bridge_b.is_high());
    assert!(!board.green.is_high());

    let mut seen = [false, false];
    for _ in 0..4 {
        let level = blink.on_timer().expect("armed while opening");
        assert_eq!(board.red.is_high(), level);
        assert_eq!(board.red_2.is_high(), level);
        seen[usize::from(level)] = true;
        door.tick(1_000, &mut panel, &mut sink);
        assert_eq!(board.red.is_high(), level, "control loop overwrote a blink-owned LED");
    }
    assert_eq!(seen, [true, true]);

    // Leave the LEDs lit so the resync has something to clear.
    if !board.red.is_high() {
        blink.on_timer();
    }
    door.tick(5_001, &mut panel, &mut sink);
    assert_eq!(door.state(), DoorState::Open);
    assert!(!board.red.is_high() && !board.red_2.is_high());
    assert!(!board.bridge_a.is_high());
    assert!(board.green.is_high() && board.green_2.is_high());

    assert_eq!(blink.on_timer(), None);
    assert!(!board.red.is_high());
}

#[test]
fn closing_drives_bridge_b_and_ends_closed() {
    let board = Board::new();
    let (blink, mut panel) = board.wire();
    let mut sink = CollectingSink::new();
    let mut door = DoorController::new(DoorConfig::default(), blink.signal());
    door.start(&mut panel, &mut sink);

    door.request_open(0, &mut panel, &mut sink);
    door.tick(5_001, &mut panel, &mut sink);
    door.request_close(6_000, &mut panel, &mut sink);
    assert!(board.bridge_b.is_high());
    assert!(!board.bridge_a.is_high());
    assert!(!board.green.is_high() && !board.green_2.is_high());

    blink.on_timer();
    door.tick(11_001, &mut panel, &mut sink);
    assert_eq!(door.state(), DoorState::Closed);
    assert!(!board.bridge_b.is_high());
    assert!(board.red.is_high(), "closed picture restored");
    assert!(!board.red_2.is_high());
    assert!(board.green.is_high());
}
