//! Periodic blink timer using ESP-IDF's esp_timer API.
//!
//! The callback runs in the esp_timer task (not ISR) and calls
//! [`BlinkGenerator::on_timer`], which only touches atomics and the red LED
//! pins inside a critical section. On simulation targets a std thread
//! sleeps for the period instead.

use std::sync::Arc;

use embedded_hal::digital::OutputPin;
use log::info;

use super::blink::BlinkGenerator;
use crate::error::{Error, Result};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle to a running blink timer. Dropping it stops the timer.
pub struct BlinkTimer {
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    #[cfg(target_os = "espidf")]
    release: unsafe fn(*mut core::ffi::c_void),
    #[cfg(target_os = "espidf")]
    arg: *mut core::ffi::c_void,

    #[cfg(not(target_os = "espidf"))]
    stop: Arc<AtomicBool>,
    #[cfg(not(target_os = "espidf"))]
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn blink_tick_cb<P: OutputPin>(arg: *mut core::ffi::c_void) {
    // SAFETY: arg is the `Arc::into_raw` pointer handed to esp_timer_create
    // and stays alive until the timer is deleted in `BlinkTimer::drop`.
    let generator = unsafe { &*(arg as *const BlinkGenerator<P>) };
    generator.on_timer();
}

#[cfg(target_os = "espidf")]
unsafe fn release_generator<P: OutputPin>(arg: *mut core::ffi::c_void) {
    // SAFETY: called once, after the timer is deleted, with the pointer
    // produced by `Arc::into_raw` in `start_blink_timer`.
    drop(unsafe { Arc::from_raw(arg as *const BlinkGenerator<P>) });
}

/// Start a periodic timer firing `generator.on_timer()` every `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_blink_timer<P>(period_ms: u32, generator: Arc<BlinkGenerator<P>>) -> Result<BlinkTimer>
where
    P: OutputPin + Send + 'static,
{
    let arg = Arc::into_raw(generator) as *mut core::ffi::c_void;
    let args = esp_timer_create_args_t {
        callback: Some(blink_tick_cb::<P>),
        arg,
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: c"blink".as_ptr(),
        skip_unhandled_events: true,
    };

    let mut handle: esp_timer_handle_t = core::ptr::null_mut();
    // SAFETY: args outlives the call; handle is written by esp_timer_create.
    let rc = unsafe { esp_timer_create(&args, &mut handle) };
    if rc != ESP_OK {
        // SAFETY: the timer was never created, so nothing else holds arg.
        unsafe { release_generator::<P>(arg) };
        log::error!("hw_timer: blink timer create failed (rc={})", rc);
        return Err(Error::Timer(rc));
    }

    let timer = BlinkTimer { handle, release: release_generator::<P>, arg };
    // SAFETY: handle is a valid timer created above.
    let rc = unsafe { esp_timer_start_periodic(handle, u64::from(period_ms) * 1_000) };
    if rc != ESP_OK {
        log::error!("hw_timer: blink timer start failed (rc={})", rc);
        return Err(Error::Timer(rc));
    }

    info!("hw_timer: blink timer started ({}ms period)", period_ms);
    Ok(timer)
}

#[cfg(not(target_os = "espidf"))]
pub fn start_blink_timer<P>(period_ms: u32, generator: Arc<BlinkGenerator<P>>) -> Result<BlinkTimer>
where
    P: OutputPin + Send + 'static,
{
    let period = std::time::Duration::from_millis(u64::from(period_ms));
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let thread = std::thread::Builder::new()
        .name("blink".into())
        .spawn(move || {
            while !stop_flag.load(Ordering::Acquire) {
                std::thread::sleep(period);
                if stop_flag.load(Ordering::Acquire) {
                    break;
                }
                generator.on_timer();
            }
        })
        .map_err(|_| Error::Init("blink timer thread spawn failed"))?;

    info!("hw_timer(sim): blink thread started ({}ms period)", period_ms);
    Ok(BlinkTimer { stop, thread: Some(thread) })
}

impl Drop for BlinkTimer {
    #[cfg(target_os = "espidf")]
    fn drop(&mut self) {
        // SAFETY: handle is valid until deleted here. esp_timer_delete waits
        // for an in-flight callback, after which arg has no other user.
        unsafe {
            esp_timer_stop(self.handle);
            esp_timer_delete(self.handle);
            (self.release)(self.arg);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
