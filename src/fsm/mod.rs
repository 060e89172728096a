//! Function-pointer finite state machine engine for the door.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                          │
//! │  ┌─────────┬──────────┬──────────┬──────────────────┬──────────────┐ │
//! │  │ State   │ on_enter │ on_exit  │ on_update        │ on_command   │ │
//! │  ├─────────┼──────────┼──────────┼──────────────────┼──────────────┤ │
//! │  │ Closed  │ fn(ctx)  │ —        │ fn(ctx)->Option  │ fn(ctx,cmd)  │ │
//! │  │ Opening │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option  │ fn(ctx,cmd)  │ │
//! │  │ Open    │ fn(ctx)  │ —        │ fn(ctx)->Option  │ fn(ctx,cmd)  │ │
//! │  │ Closing │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Option  │ fn(ctx,cmd)  │ │
//! │  └─────────┴──────────┴──────────┴──────────────────┴──────────────┘ │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two things move the machine:
//!
//! - [`Fsm::tick`] calls `on_update` for the **current** state. At-rest
//!   states always stay; moving states return their at-rest target once
//!   the MotionTimer has run out.
//! - [`Fsm::command`] calls `on_command` for the current state. Only
//!   `Closed` accepts `Open` and only `Open` accepts `Close`; every other
//!   pairing is discarded without error.
//!
//! Either way a `Some(next)` runs `on_exit(current)` then `on_enter(next)`.
//! Handlers never touch hardware: they write [`context::OutputCommands`]
//! which the door controller applies through its ports.

pub mod context;
pub mod states;

use core::fmt;

use context::DoorContext;
use log::debug;

use crate::app::commands::DoorCommand;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The four mutually exclusive door states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DoorState {
    Closed = 0,
    Opening = 1,
    Open = 2,
    Closing = 3,
}

impl DoorState {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 4;

    /// Every state, in table order.
    pub const ALL: [Self; Self::COUNT] = [Self::Closed, Self::Opening, Self::Open, Self::Closing];

    /// Convert a table index back to `DoorState`.  Panics on out-of-range in
    /// debug builds; returns `Closed` (motor off) in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Closed,
            1 => Self::Opening,
            2 => Self::Open,
            3 => Self::Closing,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Closed
            }
        }
    }

    /// `true` while the motor is being driven.
    pub fn is_moving(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "Closed",
            Self::Opening => "Opening",
            Self::Open => "Open",
            Self::Closing => "Closing",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut DoorContext);

/// Signature for the per-pass update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&DoorContext) -> Option<DoorState>;

/// Signature for the command handler.
/// Returns `Some(next)` if the state accepts the command.
pub type StateCommandFn = fn(&DoorContext, DoorCommand) -> Option<DoorState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single door state.
pub struct StateDescriptor {
    pub id: DoorState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
    pub on_command: StateCommandFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The door state machine engine.
///
/// Owns the state table and the index of the current state. The
/// [`DoorContext`] is owned by the caller and threaded through every call.
pub struct Fsm {
    /// Fixed-size table indexed by `DoorState as usize`.
    table: [StateDescriptor; DoorState::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Completed transitions since construction.
    transitions: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; DoorState::COUNT], initial: DoorState) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut DoorContext) {
        debug!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Evaluate time-based completion for the current state.
    /// Returns the new state if a transition happened.
    pub fn tick(&mut self, ctx: &mut DoorContext) -> Option<DoorState> {
        let next = (self.table[self.current].on_update)(ctx)?;
        self.transition(next, ctx);
        Some(next)
    }

    /// Offer an external command to the current state.
    /// Returns the new state if the command was accepted.
    pub fn command(&mut self, cmd: DoorCommand, ctx: &mut DoorContext) -> Option<DoorState> {
        let next = (self.table[self.current].on_command)(ctx, cmd)?;
        self.transition(next, ctx);
        Some(next)
    }

    /// The current state's identity.
    pub fn current_state(&self) -> DoorState {
        DoorState::from_index(self.current)
    }

    /// Number of transitions executed so far.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: DoorState, ctx: &mut DoorContext) {
        let next_idx = next_id as usize;

        debug!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions += 1;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
