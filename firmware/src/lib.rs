//! USB HID relay firmware for RP2040.
//!
//! The board sits between an input device and a target computer: it
//! impersonates the first HID device attached upstream, forwards its reports
//! to the target, and takes keyboard and mouse commands on a serial console.
//! All relay logic lives in [`hid_relay_core`]; this crate wires it to the
//! RP2040 peripherals with Embassy.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART0 TX | 12   | Console transmit |
//! | UART0 RX | 13   | Console receive |
//! | USB      | -    | Device side, facing the target computer |
//!
//! # Architecture
//!
//! - **Tick task** (interrupt executor): 1 ms ticker setting the pending tick
//!   and waking the main loop
//! - **USB task**: runs the downstream device stack once it is built
//! - **Console RX task**: UART bytes into a channel
//! - **Main loop** ([`runtime::run`]): host poll, queue flush, console
//!
//! # Upstream host
//!
//! The main loop is generic over the upstream host driver, but this crate
//! ships no working one. The `hid-relay` binary wires in [`DetachedHost`],
//! which never mounts a device: on the target only the console, injection
//! and the default device identity are live. Report relay and identity
//! cloning run once a real [`UpstreamHost`](hid_relay_core::UpstreamHost)
//! driver is passed to [`runtime::run`].
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

pub mod config;
pub mod detached;
pub mod reset;
pub mod runtime;
pub mod tick;
pub mod uart_console;
pub mod usb_output;

pub use detached::DetachedHost;
pub use reset::ScbReset;
pub use uart_console::{console_rx_task, ConsoleTx};
pub use usb_output::{DownstreamHid, RoutedSink, UsbDriver};
