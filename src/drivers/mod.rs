//! Output drivers, blink generation, and the periodic blink timer.

pub mod blink;
pub mod gpio;
pub mod hw_timer;
pub mod output;
