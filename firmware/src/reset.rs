//! System reset through the Cortex-M SCB.

use hid_relay_core::SystemReset;

/// Resets the whole chip with `SYSRESETREQ`.
pub struct ScbReset;

impl SystemReset for ScbReset {
    fn reset(&mut self) -> ! {
        cortex_m::peripheral::SCB::sys_reset()
    }
}
