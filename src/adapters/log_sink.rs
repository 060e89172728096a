//! Console event sink adapter.
//!
//! Implements [`EventSink`] by turning application events into the
//! operator-facing status lines on the serial console (via the ESP-IDF
//! logger). Lines are human-readable only; nothing parses them.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::DoorState;

/// First line printed once the controller is up.
pub const BANNER: &str = "Sistema Iniciado...";

/// Usage hint printed after the banner.
pub const HELP: &str = "Escriba 'abrir' para abrir la puerta o 'cerrar' para cerrarla.";

/// Status line for the once-per-pass report.
pub fn status_line(state: DoorState) -> &'static str {
    match state {
        DoorState::Closed => "Estado: PUERTA CERRADA - Escriba 'abrir' para abrir.",
        DoorState::Opening => "Estado: ABRIENDO PUERTA - LED rojo parpadeando...",
        DoorState::Open => "Estado: PUERTA ABIERTA - Escriba 'cerrar' para cerrarla.",
        DoorState::Closing => "Estado: CERRANDO PUERTA - LED rojo parpadeando...",
    }
}

/// Announcement for entering `to`.
pub fn transition_line(to: DoorState) -> &'static str {
    match to {
        DoorState::Opening => "-> Iniciando apertura de puerta...",
        DoorState::Open => "-> Puerta completamente abierta.",
        DoorState::Closing => "-> Iniciando cierre de puerta...",
        DoorState::Closed => "-> Puerta completamente cerrada.",
    }
}

/// Adapter that prints every [`AppEvent`] for the operator.
#[derive(Debug, Default)]
pub struct ConsoleEventSink {
    lines: u64,
}

impl ConsoleEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines printed so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    fn line(&mut self, text: &str) {
        self.lines += 1;
        info!("{}", text);
    }
}

impl EventSink for ConsoleEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match *event {
            AppEvent::Started(_) => {
                self.line(BANNER);
                self.line(HELP);
            }
            AppEvent::StateChanged { to, .. } => self.line(transition_line(to)),
            AppEvent::Status(state) => self.line(status_line(state)),
        }
    }
}
