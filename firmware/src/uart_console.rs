//! Console UART: a receive task feeding a byte channel, and a blocking
//! transmit half for replies.
//!
//! # Pins
//!
//! Uses UART0:
//! - GPIO 12: TX
//! - GPIO 13: RX

use defmt::warn;
use embassy_rp::uart::{Async, UartRx, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::config::CONSOLE_RX_DEPTH;

/// Bytes received on the console UART, oldest first.
pub static CONSOLE_RX: Channel<CriticalSectionRawMutex, u8, CONSOLE_RX_DEPTH> = Channel::new();

/// Receive task: one byte at a time into [`CONSOLE_RX`].
///
/// Bytes arriving while the channel is full are dropped.
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: UartRx<'static, Async>) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                if CONSOLE_RX.try_send(byte[0]).is_err() {
                    warn!("console byte dropped");
                }
            }
            Err(e) => warn!("console UART error: {:?}", e),
        }
    }
}

/// Console write failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct ConsoleError;

impl embedded_io::Error for ConsoleError {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

/// Transmit half of the console UART.
pub struct ConsoleTx {
    tx: UartTx<'static, Async>,
}

impl ConsoleTx {
    #[must_use]
    pub fn new(tx: UartTx<'static, Async>) -> Self {
        Self { tx }
    }
}

impl embedded_io::ErrorType for ConsoleTx {
    type Error = ConsoleError;
}

impl embedded_io::Write for ConsoleTx {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.blocking_write(buf).map_err(|_| ConsoleError)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush().map_err(|_| ConsoleError)
    }
}
