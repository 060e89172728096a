//! Door controller service: the hexagonal core.
//!
//! [`DoorController`] owns the FSM and its context (state + MotionTimer)
//! and borrows the blink flag. All I/O flows through port traits injected
//! at call sites, so the whole service runs against mock adapters.
//!
//! ```text
//!  DoorCommand ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                  │    DoorController     │
//!   PanelPort ◀────│  FSM · Output driver  │◀── BlinkSignal (read)
//!                  └──────────────────────┘
//! ```

use log::{debug, info};

use crate::config::DoorConfig;
use crate::drivers::blink::BlinkSignal;
use crate::drivers::output::{self, OutputSet};
use crate::fsm::context::{Bridge, DoorContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{DoorState, Fsm};

use super::commands::DoorCommand;
use super::events::AppEvent;
use super::ports::{EventSink, OutputLine, PanelPort};

// ───────────────────────────────────────────────────────────────
// DoorController
// ───────────────────────────────────────────────────────────────

/// Single process-wide door controller.
pub struct DoorController<'a> {
    fsm: Fsm,
    ctx: DoorContext,
    blink: &'a BlinkSignal,
    /// Whether the red LEDs are currently handed to the blink generator.
    blink_owned: bool,
    passes: u64,
}

impl<'a> DoorController<'a> {
    /// Build the controller in `Closed`. Call [`start`](Self::start) next.
    pub fn new(config: DoorConfig, blink: &'a BlinkSignal) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), DoorState::Closed),
            ctx: DoorContext::new(config),
            blink,
            blink_owned: false,
            passes: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the initial state's entry action and establish every output.
    pub fn start(&mut self, panel: &mut impl PanelPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        panel.set_motion_blink(false);
        self.blink_owned = false;
        self.sync_outputs(panel);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("DoorController started in {}", self.fsm.current_state());
    }

    // ── Commands ──────────────────────────────────────────────

    /// Route an operator command. Returns `true` if the state changed.
    pub fn handle_command(
        &mut self,
        cmd: DoorCommand,
        now_ms: u64,
        panel: &mut impl PanelPort,
        sink: &mut impl EventSink,
    ) -> bool {
        match cmd {
            DoorCommand::Open => self.request_open(now_ms, panel, sink),
            DoorCommand::Close => self.request_close(now_ms, panel, sink),
        }
    }

    /// Start opening if the door is closed; otherwise do nothing.
    pub fn request_open(
        &mut self,
        now_ms: u64,
        panel: &mut impl PanelPort,
        sink: &mut impl EventSink,
    ) -> bool {
        self.dispatch(DoorCommand::Open, now_ms, panel, sink)
    }

    /// Start closing if the door is open; otherwise do nothing.
    pub fn request_close(
        &mut self,
        now_ms: u64,
        panel: &mut impl PanelPort,
        sink: &mut impl EventSink,
    ) -> bool {
        self.dispatch(DoorCommand::Close, now_ms, panel, sink)
    }

    fn dispatch(
        &mut self,
        cmd: DoorCommand,
        now_ms: u64,
        panel: &mut impl PanelPort,
        sink: &mut impl EventSink,
    ) -> bool {
        self.ctx.now_ms = now_ms;
        let from = self.fsm.current_state();
        match self.fsm.command(cmd, &mut self.ctx) {
            Some(to) => {
                self.sync_outputs(panel);
                sink.emit(&AppEvent::StateChanged { from, to });
                true
            }
            None => {
                debug!("'{}' had no effect", cmd.keyword());
                false
            }
        }
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// One control-loop pass: time-based completion, render, status.
    pub fn tick(&mut self, now_ms: u64, panel: &mut impl PanelPort, sink: &mut impl EventSink) {
        self.passes += 1;
        self.ctx.now_ms = now_ms;

        let from = self.fsm.current_state();
        if let Some(to) = self.fsm.tick(&mut self.ctx) {
            self.sync_outputs(panel);
            sink.emit(&AppEvent::StateChanged { from, to });
        } else {
            output::apply(&self.render(), panel);
        }

        sink.emit(&AppEvent::Status(self.fsm.current_state()));
    }

    /// Push the FSM's output commands to the panel, then render.
    ///
    /// Bridge lines are written inactive-first so A and B are never high
    /// together, even between two writes.
    fn sync_outputs(&mut self, panel: &mut impl PanelPort) {
        let commands = self.ctx.commands;
        match commands.bridge {
            Bridge::Off | Bridge::Forward => {
                panel.set_line(OutputLine::BridgeB, false);
                panel.set_line(OutputLine::BridgeA, commands.bridge.a_active());
            }
            Bridge::Reverse => {
                panel.set_line(OutputLine::BridgeA, false);
                panel.set_line(OutputLine::BridgeB, true);
            }
        }

        if commands.motion_blink != self.blink_owned {
            panel.set_motion_blink(commands.motion_blink);
            self.blink_owned = commands.motion_blink;
        }

        let set = self.render();
        debug_assert_eq!(set.bridge_a.level(), commands.bridge.a_active());
        debug_assert_eq!(set.bridge_b.level(), commands.bridge.b_active());
        output::apply(&set, panel);
    }

    fn render(&self) -> OutputSet {
        output::render(self.fsm.current_state(), self.blink.level())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> DoorState {
        self.fsm.current_state()
    }

    /// Time since the current motion started, `None` while at rest.
    pub fn motion_elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.state()
            .is_moving()
            .then(|| now_ms.saturating_sub(self.ctx.motion_started_ms))
    }

    /// Control-loop passes run so far.
    pub fn pass_count(&self) -> u64 {
        self.passes
    }

    /// State changes since start.
    pub fn transition_count(&self) -> u64 {
        self.fsm.transition_count()
    }
}
