#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::{DMA_CH0, DMA_CH1, UART0, USB};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_rp::usb::Driver;
use hid_relay::config::CONSOLE_BAUD;
use hid_relay::tick::tick_task;
use hid_relay::{console_rx_task, runtime, ConsoleTx, DetachedHost};
use hid_relay_core::BootPassthrough;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::InterruptHandler<UART0>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    DMA_IRQ_0 => embassy_rp::dma::InterruptHandler<DMA_CH0>, embassy_rp::dma::InterruptHandler<DMA_CH1>;
});

/// High-priority executor for the frame tick.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("HID relay starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Tick ---
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high_spawner.spawn(tick_task().unwrap());

    // --- Console UART ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = CONSOLE_BAUD;

    let uart = Uart::new(
        p.UART0,
        p.PIN_12, // TX
        p.PIN_13, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();
    spawner.spawn(console_rx_task(rx).unwrap());

    // --- USB ---
    let usb_driver = Driver::new(p.USB, Irqs);

    runtime::run(
        spawner,
        usb_driver,
        ConsoleTx::new(tx),
        DetachedHost,
        BootPassthrough::new(),
    )
    .await
}
