//! Shared mutable context threaded through every FSM handler.
//!
//! `DoorContext` is the blackboard state handlers read from and write to:
//! the pass timestamp, the MotionTimer, the output commands, and the
//! configuration.

use crate::config::DoorConfig;

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the door controller)
// ---------------------------------------------------------------------------

/// H-bridge drive request. A single enum means bridge A and bridge B can
/// never be requested at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bridge {
    /// Both bridge inputs low, motor free.
    #[default]
    Off,
    /// Bridge A high: motor runs in the opening direction.
    Forward,
    /// Bridge B high: motor runs in the closing direction.
    Reverse,
}

impl Bridge {
    /// Level of bridge input A.
    pub fn a_active(self) -> bool {
        matches!(self, Self::Forward)
    }

    /// Level of bridge input B.
    pub fn b_active(self) -> bool {
        matches!(self, Self::Reverse)
    }
}

/// Commands state handlers write to request output actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputCommands {
    /// Desired motor drive.
    pub bridge: Bridge,
    /// `true` hands the two red LEDs to the blink generator; `false` takes
    /// them back with both lines forced low.
    pub motion_blink: bool,
}

impl OutputCommands {
    /// Motor off, red LEDs owned by the control loop.
    pub fn at_rest() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// DoorContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
#[derive(Debug, Clone)]
pub struct DoorContext {
    // -- Timing --
    /// Monotonic time of the current pass or command (milliseconds).
    pub now_ms: u64,
    /// MotionTimer: when the current motion began. Overwritten on every
    /// motion start; not consulted while the door is at rest.
    pub motion_started_ms: u64,

    // -- Outputs --
    /// Commands applied to the panel after each transition.
    pub commands: OutputCommands,

    // -- Configuration --
    pub config: DoorConfig,
}

impl DoorContext {
    /// Create a new context with the given configuration.
    pub fn new(config: DoorConfig) -> Self {
        Self {
            now_ms: 0,
            motion_started_ms: 0,
            commands: OutputCommands::at_rest(),
            config,
        }
    }

    /// Milliseconds since the MotionTimer was recorded.
    pub fn motion_elapsed_ms(&self) -> u64 {
        self.now_ms.saturating_sub(self.motion_started_ms)
    }

    /// `true` once the elapsed motion time strictly exceeds the travel time.
    pub fn motion_complete(&self) -> bool {
        self.motion_elapsed_ms() > self.config.motion_duration_ms
    }
}
