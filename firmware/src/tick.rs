//! 1 ms frame tick.
//!
//! [`tick_task`] runs on the high-priority interrupt executor so the main
//! loop never delays it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use hid_relay_core::{on_tick, FrameTrigger, PendingTick};

use crate::config::TICK_PERIOD_MS;

/// Set every tick, cleared by the relay.
pub static PENDING_TICK: PendingTick = PendingTick::new();

/// Wakes the main loop for the next host-bus frame.
pub static FRAME_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

struct FrameRequest;

impl FrameTrigger for FrameRequest {
    fn request_frame(&self) {
        FRAME_REQUEST.signal(());
    }
}

#[embassy_executor::task]
pub async fn tick_task() {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        ticker.next().await;
        on_tick(&FrameRequest, &PENDING_TICK);
    }
}
