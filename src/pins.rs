//! GPIO assignments for the door controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. The numbering matches the deployed ESP32 wiring.

// ---------------------------------------------------------------------------
// Indicator panel
// ---------------------------------------------------------------------------

/// Primary red LED: lit while closed, blinks while the door moves.
pub const LED_RED_GPIO: i32 = 2;
/// Primary green LED: lit while the door is at rest.
pub const LED_GREEN_GPIO: i32 = 4;
/// Secondary red LED: blinks in step with the primary red while moving.
pub const LED_RED_2_GPIO: i32 = 16;
/// Secondary green LED: lit only while the door is fully open.
pub const LED_GREEN_2_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Motor H-bridge
// ---------------------------------------------------------------------------

/// Bridge input A: HIGH drives the motor forward (opening).
pub const BRIDGE_A_GPIO: i32 = 5;
/// Bridge input B: HIGH drives the motor in reverse (closing).
/// Never HIGH at the same time as [`BRIDGE_A_GPIO`].
pub const BRIDGE_B_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Console UART baud rate (default ESP-IDF console on UART0).
pub const CONSOLE_BAUD: u32 = 115_200;
