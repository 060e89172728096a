//! Door Controller Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │                                                            │
//! │  HardwareAdapter   ConsoleEventSink   MonotonicClock       │
//! │  (PanelPort)       (EventSink)        (ClockPort)          │
//! │  console reader ──▶ LINE_CHANNEL                           │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ───────────────      │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │        DoorController (pure logic)               │      │
//! │  │        FSM · Output driver                       │      │
//! │  └──────────────────────────────────────────────────┘      │
//! │                                                            │
//! │  esp_timer (50 ms) ──▶ BlinkGenerator ──▶ red LEDs         │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use doorctl::adapters::console::{drain_lines, spawn_console_reader};
use doorctl::adapters::hardware::HardwareAdapter;
use doorctl::adapters::log_sink::ConsoleEventSink;
use doorctl::adapters::time::MonotonicClock;
use doorctl::app::commands::DoorCommand;
use doorctl::app::ports::ClockPort;
use doorctl::app::service::DoorController;
use doorctl::config::DoorConfig;
use doorctl::drivers::blink::{BlinkGenerator, MotionIndicators};
use doorctl::drivers::gpio::GpioLine;
use doorctl::drivers::hw_timer::start_blink_timer;
use doorctl::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  doorctl v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("console: {} baud", pins::CONSOLE_BAUD);

    // ── 2. Configuration ──────────────────────────────────────
    let config = DoorConfig::default();
    config.validate().context("invalid door configuration")?;
    info!("config: {}", serde_json::to_string(&config).context("config encode")?);

    // ── 3. Output lines ───────────────────────────────────────
    let red = GpioLine::output(pins::LED_RED_GPIO).context("red LED")?;
    let red_2 = GpioLine::output(pins::LED_RED_2_GPIO).context("secondary red LED")?;
    let green = GpioLine::output(pins::LED_GREEN_GPIO).context("green LED")?;
    let green_2 = GpioLine::output(pins::LED_GREEN_2_GPIO).context("secondary green LED")?;
    let bridge_a = GpioLine::output(pins::BRIDGE_A_GPIO).context("bridge A")?;
    let bridge_b = GpioLine::output(pins::BRIDGE_B_GPIO).context("bridge B")?;

    // ── 4. Blink generator + timer ────────────────────────────
    let blink = Arc::new(BlinkGenerator::new(MotionIndicators::new(red, red_2)));
    let _blink_timer = start_blink_timer(config.blink_period_ms, Arc::clone(&blink))
        .context("blink timer")?;

    // ── 5. Adapters ───────────────────────────────────────────
    let mut panel = HardwareAdapter::new(green, green_2, bridge_a, bridge_b, Arc::clone(&blink));
    let mut sink = ConsoleEventSink::new();
    let clock = MonotonicClock::new();
    let _console = spawn_console_reader().context("console reader")?;

    // ── 6. Door controller ────────────────────────────────────
    let mut door = DoorController::new(config, blink.signal());
    door.start(&mut panel, &mut sink);

    // ── 7. Control loop ───────────────────────────────────────
    let pass_interval = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    loop {
        drain_lines(|line| {
            if let Some(cmd) = DoorCommand::parse(line) {
                door.handle_command(cmd, clock.now_ms(), &mut panel, &mut sink);
            }
        });

        door.tick(clock.now_ms(), &mut panel, &mut sink);
        std::thread::sleep(pass_interval);
    }
}
