//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                     |
//! |------------|------------|---------------------------------|
//! | `hardware` | PanelPort  | LED and H-bridge GPIO lines     |
//! | `log_sink` | EventSink  | Serial console (ESP-IDF logger) |
//! | `time`     | ClockPort  | ESP32 system timer              |
//! | `console`  | (input)    | UART stdin → line channel       |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod time;
