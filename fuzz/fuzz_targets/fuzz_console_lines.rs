//! Fuzz target: console line assembly + command parsing
//!
//! Drives arbitrary bytes through `LineAssembler` and `DoorCommand::parse`
//! and asserts that every yielded line fits the buffer, carries no
//! newline, and that a recognised command is exactly one of the two
//! keywords once trimmed.
//!
//! cargo fuzz run fuzz_console_lines

#![no_main]

use doorctl::adapters::console::{LINE_CAPACITY, LineAssembler};
use doorctl::app::commands::DoorCommand;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut asm = LineAssembler::<LINE_CAPACITY>::new();

    for &byte in data {
        if let Some(line) = asm.push(byte) {
            assert!(line.len() <= LINE_CAPACITY);
            assert!(!line.contains('\n'));

            if let Some(cmd) = DoorCommand::parse(&line) {
                assert!(line.trim().eq_ignore_ascii_case(cmd.keyword()));
            }
        }
        assert!(asm.pending() <= LINE_CAPACITY);
    }
});
