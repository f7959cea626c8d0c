//! Board and timing constants.

/// Console UART baud rate (8N1).
pub const CONSOLE_BAUD: u32 = 115_200;

/// Received console bytes buffered between the UART task and the main loop.
pub const CONSOLE_RX_DEPTH: usize = 64;

/// Period of the frame tick.
pub const TICK_PERIOD_MS: u64 = 1;

/// How long to wait for an upstream device to clone before the device
/// side enumerates with the default identity.
pub const CLONE_WAIT_MS: u64 = 2_000;

/// pid.codes test VID/PID, used while nothing is cloned.
pub const DEFAULT_VENDOR_ID: u16 = 0x1209;
pub const DEFAULT_PRODUCT_ID: u16 = 0x0001;
pub const DEFAULT_DEVICE_VERSION: u16 = 0x0100;
pub const DEFAULT_MANUFACTURER: &str = "Rust HID Relay";
pub const DEFAULT_PRODUCT: &str = "USB HID Relay";
pub const DEFAULT_SERIAL: &str = "001";

/// Keyboard input report size on the device side.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Mouse input report size on the device side (buttons, x, y, wheel, pan).
pub const MOUSE_REPORT_SIZE: usize = 5;
