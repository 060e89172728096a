//! Output driver: maps `(state, blink flag)` to panel line levels.
//!
//! | State   | Red        | Green | Red 2      | Green 2 | Bridge A | Bridge B |
//! |---------|------------|-------|------------|---------|----------|----------|
//! | Closed  | on         | on    | off        | off     | off      | off      |
//! | Opening | blink-owned| off   | blink-owned| off     | active   | off      |
//! | Open    | off        | on    | off        | on      | off      | off      |
//! | Closing | blink-owned| off   | blink-owned| off     | off      | active   |
//!
//! While the door moves the two red lines belong to the blink generator,
//! which runs at its own cadence; [`apply`] skips them so the control loop
//! never races the timer for those pins.

use crate::app::ports::{OutputLine, PanelPort};
use crate::fsm::DoorState;

/// How a single line is driven on this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDrive {
    /// The control loop sets this level.
    Fixed(bool),
    /// The blink generator owns the line; the value is the blink flag at
    /// render time, for reporting only.
    Blink(bool),
}

impl LineDrive {
    /// Level to write, or `None` if the line belongs to the blink generator.
    pub fn driven_level(self) -> Option<bool> {
        match self {
            Self::Fixed(level) => Some(level),
            Self::Blink(_) => None,
        }
    }

    /// Level the line shows right now.
    pub fn level(self) -> bool {
        match self {
            Self::Fixed(level) | Self::Blink(level) => level,
        }
    }
}

/// Complete set of panel levels for one control-loop pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSet {
    pub red: LineDrive,
    pub green: LineDrive,
    pub red_2: LineDrive,
    pub green_2: LineDrive,
    pub bridge_a: LineDrive,
    pub bridge_b: LineDrive,
}

impl OutputSet {
    pub fn line(&self, line: OutputLine) -> LineDrive {
        match line {
            OutputLine::RedLed => self.red,
            OutputLine::GreenLed => self.green,
            OutputLine::RedLed2 => self.red_2,
            OutputLine::GreenLed2 => self.green_2,
            OutputLine::BridgeA => self.bridge_a,
            OutputLine::BridgeB => self.bridge_b,
        }
    }
}

/// Pure rendering of the panel for `state`.
///
/// `blink_flag` only shows up inside [`LineDrive::Blink`] cells, so it has
/// no effect on the result while the door is at rest.
pub fn render(state: DoorState, blink_flag: bool) -> OutputSet {
    use LineDrive::{Blink, Fixed};

    match state {
        DoorState::Closed => OutputSet {
            red: Fixed(true),
            green: Fixed(true),
            red_2: Fixed(false),
            green_2: Fixed(false),
            bridge_a: Fixed(false),
            bridge_b: Fixed(false),
        },
        DoorState::Opening => OutputSet {
            red: Blink(blink_flag),
            green: Fixed(false),
            red_2: Blink(blink_flag),
            green_2: Fixed(false),
            bridge_a: Fixed(true),
            bridge_b: Fixed(false),
        },
        DoorState::Open => OutputSet {
            red: Fixed(false),
            green: Fixed(true),
            red_2: Fixed(false),
            green_2: Fixed(true),
            bridge_a: Fixed(false),
            bridge_b: Fixed(false),
        },
        DoorState::Closing => OutputSet {
            red: Blink(blink_flag),
            green: Fixed(false),
            red_2: Blink(blink_flag),
            green_2: Fixed(false),
            bridge_a: Fixed(false),
            bridge_b: Fixed(true),
        },
    }
}

/// Write every control-loop-owned line of `set` to the panel.
pub fn apply(set: &OutputSet, panel: &mut impl PanelPort) {
    for line in OutputLine::ALL {
        if let Some(level) = set.line(line).driven_level() {
            panel.set_line(line, level);
        }
    }
}
