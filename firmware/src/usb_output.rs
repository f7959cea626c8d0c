//! Downstream USB device: a keyboard and a mouse HID interface presenting
//! the cloned identity to the target computer.

use defmt::{info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::{Builder, Config as UsbConfig, Handler, UsbDevice};
use hid_relay_core::config::{KEYBOARD_REPORT_ID, MOUSE_REPORT_ID};
use hid_relay_core::{
    ClonedIdentity, Interface, OutgoingReportRequest, OutputError, RelayContext, ReportKind,
    ReportSink, UpstreamHost,
};
use portable_atomic::{AtomicBool, Ordering};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, MouseReport, SerializedDescriptor};

use crate::config::{
    DEFAULT_DEVICE_VERSION, DEFAULT_MANUFACTURER, DEFAULT_PRODUCT, DEFAULT_PRODUCT_ID,
    DEFAULT_SERIAL, DEFAULT_VENDOR_ID, KEYBOARD_REPORT_SIZE, MOUSE_REPORT_SIZE,
};

pub type UsbDriver = Driver<'static, USB>;

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static KEYBOARD_STATE: StaticCell<State> = StaticCell::new();
static MOUSE_STATE: StaticCell<State> = StaticCell::new();

/// Identity the descriptors are built from, frozen at build time.
static IDENTITY: StaticCell<ClonedIdentity> = StaticCell::new();
static HANDLER: StaticCell<DeviceHandler> = StaticCell::new();

static CONFIGURED: AtomicBool = AtomicBool::new(false);
static SUSPENDED: AtomicBool = AtomicBool::new(false);

/// Tracks whether the target host has configured us.
struct DeviceHandler;

impl Handler for DeviceHandler {
    fn reset(&mut self) {
        CONFIGURED.store(false, Ordering::Relaxed);
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Relaxed);
        info!("downstream configured: {}", configured);
    }

    fn suspended(&mut self, suspended: bool) {
        SUSPENDED.store(suspended, Ordering::Relaxed);
    }
}

/// Keyboard and mouse input endpoints.
pub struct DownstreamHid {
    keyboard: HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>,
    mouse: HidWriter<'static, UsbDriver, MOUSE_REPORT_SIZE>,
}

impl DownstreamHid {
    /// Whether a report with `report_id` can be written right now.
    #[must_use]
    pub fn is_ready(&self, report_id: u8) -> bool {
        matches!(report_id, KEYBOARD_REPORT_ID | MOUSE_REPORT_ID)
            && CONFIGURED.load(Ordering::Relaxed)
            && !SUSPENDED.load(Ordering::Relaxed)
    }

    /// Write one input report, zero padded to the interface's report size.
    pub async fn write(&mut self, report_id: u8, payload: &[u8]) -> Result<(), OutputError> {
        match report_id {
            KEYBOARD_REPORT_ID => {
                let mut report = [0u8; KEYBOARD_REPORT_SIZE];
                let len = payload.len().min(KEYBOARD_REPORT_SIZE);
                report[..len].copy_from_slice(&payload[..len]);
                self.keyboard.write(&report).await.map_err(|_| OutputError::Io)
            }
            MOUSE_REPORT_ID => {
                let mut report = [0u8; MOUSE_REPORT_SIZE];
                let len = payload.len().min(MOUSE_REPORT_SIZE);
                report[..len].copy_from_slice(&payload[..len]);
                self.mouse.write(&report).await.map_err(|_| OutputError::Io)
            }
            _ => Err(OutputError::Unsupported),
        }
    }
}

/// Build the downstream device from the identity and polling interval in
/// `ctx`. Falls back to the pid.codes identity when nothing is cloned.
pub fn build(driver: UsbDriver, ctx: &RelayContext) -> (UsbDevice<'static, UsbDriver>, DownstreamHid) {
    let cloned = ctx.identity();
    let identity: &'static ClonedIdentity = IDENTITY.init(cloned.clone());

    let mut usb_config = if identity.is_cloned {
        let mut c = UsbConfig::new(identity.vendor_id, identity.product_id);
        c.device_release = identity.device_version;
        c.manufacturer = Some(identity.manufacturer.as_str());
        c.product = Some(identity.product.as_str());
        c.serial_number = Some(identity.serial_number.as_str());
        c
    } else {
        let mut c = UsbConfig::new(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID);
        c.device_release = DEFAULT_DEVICE_VERSION;
        c.manufacturer = Some(DEFAULT_MANUFACTURER);
        c.product = Some(DEFAULT_PRODUCT);
        c.serial_number = Some(DEFAULT_SERIAL);
        c
    };
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(HANDLER.init(DeviceHandler));

    let poll_ms = ctx.polling_interval().millis();
    info!(
        "downstream {:x}:{:x}, polling {} ms",
        identity.vendor_id, identity.product_id, poll_ms
    );

    let keyboard_config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms,
        max_packet_size: KEYBOARD_REPORT_SIZE as u16,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Keyboard,
    };
    let keyboard = HidWriter::new(&mut builder, KEYBOARD_STATE.init(State::new()), keyboard_config);

    let mouse_config = HidConfig {
        report_descriptor: MouseReport::desc(),
        request_handler: None,
        poll_ms,
        max_packet_size: MOUSE_REPORT_SIZE as u16,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Mouse,
    };
    let mouse = HidWriter::new(&mut builder, MOUSE_STATE.init(State::new()), mouse_config);

    (builder.build(), DownstreamHid { keyboard, mouse })
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) {
    device.run().await;
}

/// Routes each request by interface: address 0 is the downstream device,
/// anything else goes back up to the attached device.
pub struct RoutedSink<'a, H> {
    downstream: Option<&'a mut DownstreamHid>,
    host: &'a mut H,
}

impl<'a, H: UpstreamHost> RoutedSink<'a, H> {
    pub fn new(downstream: Option<&'a mut DownstreamHid>, host: &'a mut H) -> Self {
        Self { downstream, host }
    }
}

impl<H: UpstreamHost> ReportSink for RoutedSink<'_, H> {
    fn is_ready(&self, interface: Interface, report_id: u8) -> bool {
        if interface.is_downstream() {
            self.downstream
                .as_ref()
                .is_some_and(|d| d.is_ready(report_id))
        } else {
            self.host.can_send(interface)
        }
    }

    async fn transmit(&mut self, request: &OutgoingReportRequest) -> Result<(), OutputError> {
        if !request.interface.is_downstream() {
            return self.host.send_request(request).await;
        }
        let Some(downstream) = self.downstream.as_mut() else {
            return Err(OutputError::NotReady);
        };
        match request.kind {
            ReportKind::Output => downstream.write(request.report_id, &request.payload).await,
            _ => {
                warn!("feature request to the device side dropped");
                Err(OutputError::Unsupported)
            }
        }
    }
}
