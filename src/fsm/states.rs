//! Concrete state handler functions and table builder.
//!
//! ```text
//!  CLOSED ──[abrir]──▶ OPENING ──[elapsed > travel]──▶ OPEN
//!    ▲                                                  │
//!    └──[elapsed > travel]── CLOSING ◀──[cerrar]────────┘
//! ```
//!
//! The completion checks in `opening_update` / `closing_update` are the
//! only place motion end is decided; a limit-switch or encoder input would
//! replace `ctx.motion_complete()` there.

use super::context::{Bridge, DoorContext};
use super::{DoorState, StateDescriptor};
use crate::app::commands::DoorCommand;
use log::debug;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; DoorState::COUNT] {
    [
        // Index 0 — Closed
        StateDescriptor {
            id: DoorState::Closed,
            name: "Closed",
            on_enter: Some(at_rest_enter),
            on_exit: None,
            on_update: at_rest_update,
            on_command: closed_command,
        },
        // Index 1 — Opening
        StateDescriptor {
            id: DoorState::Opening,
            name: "Opening",
            on_enter: Some(opening_enter),
            on_exit: Some(motion_exit),
            on_update: opening_update,
            on_command: moving_command,
        },
        // Index 2 — Open
        StateDescriptor {
            id: DoorState::Open,
            name: "Open",
            on_enter: Some(at_rest_enter),
            on_exit: None,
            on_update: at_rest_update,
            on_command: open_command,
        },
        // Index 3 — Closing
        StateDescriptor {
            id: DoorState::Closing,
            name: "Closing",
            on_enter: Some(closing_enter),
            on_exit: Some(motion_exit),
            on_update: closing_update,
            on_command: moving_command,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  At rest (CLOSED / OPEN) — stable until a command arrives
// ═══════════════════════════════════════════════════════════════════════════

fn at_rest_enter(ctx: &mut DoorContext) {
    ctx.commands.bridge = Bridge::Off;
    ctx.commands.motion_blink = false;
}

fn at_rest_update(_ctx: &DoorContext) -> Option<DoorState> {
    None
}

fn closed_command(_ctx: &DoorContext, cmd: DoorCommand) -> Option<DoorState> {
    match cmd {
        DoorCommand::Open => Some(DoorState::Opening),
        DoorCommand::Close => None,
    }
}

fn open_command(_ctx: &DoorContext, cmd: DoorCommand) -> Option<DoorState> {
    match cmd {
        DoorCommand::Close => Some(DoorState::Closing),
        DoorCommand::Open => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Moving (OPENING / CLOSING) — exited only by elapsed time
// ═══════════════════════════════════════════════════════════════════════════

fn start_motion(ctx: &mut DoorContext, bridge: Bridge) {
    ctx.motion_started_ms = ctx.now_ms;
    ctx.commands.bridge = bridge;
    ctx.commands.motion_blink = true;
}

fn opening_enter(ctx: &mut DoorContext) {
    start_motion(ctx, Bridge::Forward);
    debug!("OPENING: bridge A on at t={}ms", ctx.now_ms);
}

fn closing_enter(ctx: &mut DoorContext) {
    start_motion(ctx, Bridge::Reverse);
    debug!("CLOSING: bridge B on at t={}ms", ctx.now_ms);
}

/// Release the bridge and take the red LEDs back from the blink generator.
fn motion_exit(ctx: &mut DoorContext) {
    debug!("motion done after {}ms", ctx.motion_elapsed_ms());
    ctx.commands.bridge = Bridge::Off;
    ctx.commands.motion_blink = false;
}

fn opening_update(ctx: &DoorContext) -> Option<DoorState> {
    ctx.motion_complete().then_some(DoorState::Open)
}

fn closing_update(ctx: &DoorContext) -> Option<DoorState> {
    ctx.motion_complete().then_some(DoorState::Closed)
}

/// No abort and no queuing: commands during motion are dropped.
fn moving_command(_ctx: &DoorContext, _cmd: DoorCommand) -> Option<DoorState> {
    None
}
