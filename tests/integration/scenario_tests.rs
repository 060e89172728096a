//! Operator scenarios: console line → DoorController → panel.
//!
//! Virtual time only; every call passes `now_ms` explicitly.

use doorctl::app::commands::DoorCommand;
use doorctl::app::events::AppEvent;
use doorctl::app::ports::OutputLine;
use doorctl::app::service::DoorController;
use doorctl::config::DoorConfig;
use doorctl::drivers::blink::BlinkSignal;
use doorctl::fsm::DoorState;

use super::mock_panel::{CollectingSink, MockPanel, PanelCall};

struct Rig<'a> {
    door: DoorController<'a>,
    panel: MockPanel,
    sink: CollectingSink,
}

impl<'a> Rig<'a> {
    fn new(blink: &'a BlinkSignal) -> Self {
        let mut panel = MockPanel::new();
        let mut sink = CollectingSink::new();
        let mut door = DoorController::new(DoorConfig::default(), blink);
        door.start(&mut panel, &mut sink);
        Self { door, panel, sink }
    }

    /// Feed a console line the way the control loop does.
    fn line(&mut self, text: &str, now_ms: u64) -> bool {
        match DoorCommand::parse(text) {
            Some(cmd) => self.door.handle_command(cmd, now_ms, &mut self.panel, &mut self.sink),
            None => false,
        }
    }

    fn tick(&mut self, now_ms: u64) {
        self.door.tick(now_ms, &mut self.panel, &mut self.sink);
    }

    /// Drive a fresh rig to `Open`, finishing at t = 5_001.
    fn opened(blink: &'a BlinkSignal) -> Self {
        let mut rig = Self::new(blink);
        assert!(rig.line("abrir", 0));
        rig.tick(5_001);
        assert_eq!(rig.door.state(), DoorState::Open);
        rig
    }
}

// ── Scenario 1: closed → opening → open ───────────────────────

#[test]
fn open_from_closed_runs_full_travel() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::new(&blink);

    assert!(rig.line("abrir", 1_000));
    rig.tick(1_000);
    assert_eq!(rig.door.state(), DoorState::Opening);
    assert!(rig.panel.level(OutputLine::BridgeA));
    assert!(!rig.panel.level(OutputLine::BridgeB));
    assert!(rig.panel.blink_owned());

    rig.tick(6_001);
    assert_eq!(rig.door.state(), DoorState::Open);
    assert!(!rig.panel.level(OutputLine::BridgeA));
    assert!(rig.panel.level(OutputLine::GreenLed2));
    assert!(!rig.panel.blink_owned());
}

// ── Scenario 2: open request while open ───────────────────────

#[test]
fn open_while_open_is_ignored() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::opened(&blink);
    rig.panel.clear();
    let changes = rig.sink.state_changes();

    assert!(!rig.line("abrir", 6_000));
    assert_eq!(rig.door.state(), DoorState::Open);
    assert!(rig.panel.calls.is_empty());
    assert_eq!(rig.sink.state_changes(), changes);
}

// ── Scenario 3: open → closing → closed ───────────────────────

#[test]
fn close_from_open_resyncs_indicators() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::opened(&blink);

    assert!(rig.line("cerrar", 10_000));
    rig.tick(10_000);
    assert_eq!(rig.door.state(), DoorState::Closing);
    assert!(rig.panel.level(OutputLine::BridgeB));
    assert!(!rig.panel.level(OutputLine::BridgeA));

    rig.tick(15_001);
    assert_eq!(rig.door.state(), DoorState::Closed);
    assert!(!rig.panel.level(OutputLine::BridgeB));

    // At the hand-back both reds are forced off and both greens are
    // still dark from the closing pass.
    for line in [OutputLine::RedLed, OutputLine::RedLed2, OutputLine::GreenLed, OutputLine::GreenLed2] {
        assert_eq!(rig.panel.level_at_release(line), Some(false), "{line:?}");
    }
    assert_eq!(rig.panel.level_at_release(OutputLine::BridgeB), Some(false));

    // The same pass then renders the closed picture.
    assert!(rig.panel.level(OutputLine::RedLed));
    assert!(rig.panel.level(OutputLine::GreenLed));
    assert!(!rig.panel.level(OutputLine::GreenLed2));
}

// ── Scenario 4: unrecognised input ────────────────────────────

#[test]
fn unknown_command_changes_nothing_in_any_state() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::new(&blink);

    for (now, prep) in [(0, None), (100, Some("abrir")), (5_101, None), (6_000, Some("cerrar"))] {
        if let Some(cmd) = prep {
            rig.line(cmd, now);
        }
        rig.tick(now);
        let state = rig.door.state();
        rig.panel.clear();
        assert!(!rig.line("foo", now));
        assert!(!rig.line("", now));
        assert_eq!(rig.door.state(), state);
        assert!(rig.panel.calls.is_empty());
    }
}

// ── Scenario 5: strict completion boundary ────────────────────

#[test]
fn exactly_full_travel_is_not_yet_complete() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::new(&blink);

    rig.line("abrir", 2_000);
    rig.tick(7_000);
    assert_eq!(rig.door.state(), DoorState::Opening);
    assert_eq!(rig.door.motion_elapsed_ms(7_000), Some(5_000));
    rig.tick(7_001);
    assert_eq!(rig.door.state(), DoorState::Open);

    rig.line("cerrar", 8_000);
    rig.tick(13_000);
    assert_eq!(rig.door.state(), DoorState::Closing);
    rig.tick(13_001);
    assert_eq!(rig.door.state(), DoorState::Closed);
}

// ── Command handling details ──────────────────────────────────

#[test]
fn commands_are_trimmed_and_case_insensitive() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::new(&blink);
    assert!(rig.line("  ABRIR \r", 0));
    assert_eq!(rig.door.state(), DoorState::Opening);
}

#[test]
fn commands_during_motion_are_dropped_not_queued() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::new(&blink);
    rig.line("abrir", 0);

    assert!(!rig.line("cerrar", 1_000));
    assert!(!rig.line("abrir", 2_000));
    rig.tick(5_001);
    rig.tick(5_501);
    assert_eq!(rig.door.state(), DoorState::Open, "no queued close after arrival");
}

#[test]
fn control_loop_never_writes_reds_while_moving() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::new(&blink);
    rig.line("abrir", 0);
    rig.panel.clear();

    let mut now = 0;
    while rig.door.state() == DoorState::Opening {
        now += 500;
        blink.fire();
        rig.tick(now);
    }

    let first_release = rig
        .panel
        .calls
        .iter()
        .position(|c| *c == PanelCall::MotionBlink(false))
        .unwrap();
    assert!(rig.panel.calls[..first_release].iter().all(|c| !matches!(
        c,
        PanelCall::SetLine { line: OutputLine::RedLed | OutputLine::RedLed2, .. }
    )));
}

#[test]
fn event_stream_reads_like_the_console() {
    let blink = BlinkSignal::new();
    let mut rig = Rig::new(&blink);
    rig.tick(500);
    rig.line("abrir", 600);
    rig.tick(1_000);

    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::Started(DoorState::Closed),
            AppEvent::Status(DoorState::Closed),
            AppEvent::StateChanged { from: DoorState::Closed, to: DoorState::Opening },
            AppEvent::Status(DoorState::Opening),
        ]
    );
    assert_eq!(rig.door.pass_count(), 2);
}
