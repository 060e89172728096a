//! Outbound application events.
//!
//! The [`DoorController`](super::service::DoorController) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side turn them into operator-facing status lines.

use crate::fsm::DoorState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(DoorState),

    /// The FSM transitioned between states.
    StateChanged { from: DoorState, to: DoorState },

    /// Once per control-loop pass, after outputs have been rendered.
    Status(DoorState),
}
