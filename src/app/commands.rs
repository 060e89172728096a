//! Inbound commands to the door controller.
//!
//! The serial console delivers one command per line. Lines are trimmed
//! and matched ASCII-case-insensitively; anything unrecognised is dropped
//! without a reply.

/// Commands the outside world can send into the door controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorCommand {
    /// `abrir`: start opening (only honoured while closed).
    Open,
    /// `cerrar`: start closing (only honoured while open).
    Close,
}

impl DoorCommand {
    /// Console keyword for opening.
    pub const OPEN_KEYWORD: &'static str = "abrir";
    /// Console keyword for closing.
    pub const CLOSE_KEYWORD: &'static str = "cerrar";

    /// Interpret one console line.
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim();
        if word.eq_ignore_ascii_case(Self::OPEN_KEYWORD) {
            Some(Self::Open)
        } else if word.eq_ignore_ascii_case(Self::CLOSE_KEYWORD) {
            Some(Self::Close)
        } else {
            None
        }
    }

    /// The keyword an operator types for this command.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Open => Self::OPEN_KEYWORD,
            Self::Close => Self::CLOSE_KEYWORD,
        }
    }
}
