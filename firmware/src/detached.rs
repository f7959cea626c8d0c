//! Upstream host for boards without a host port.
//!
//! Nothing ever mounts, so the relay runs the console and injection only
//! and the device side enumerates with the default identity. This is a
//! placeholder, not an upstream driver: relay and cloning stay idle.

use hid_relay_core::{
    HostEvent, Interface, MidiPacket, OutgoingReportRequest, OutputError, TransferError,
    UpstreamHost,
};

pub struct DetachedHost;

impl UpstreamHost for DetachedHost {
    fn task(&mut self) {}

    fn next_event(&mut self) -> Option<HostEvent> {
        None
    }

    fn hub_port(&self, _dev_addr: u8) -> u8 {
        0
    }

    fn vid_pid(&self, _dev_addr: u8) -> (u16, u16) {
        (0, 0)
    }

    fn report_descriptor(&self, _interface: Interface) -> &[u8] {
        &[]
    }

    async fn device_descriptor(
        &mut self,
        _dev_addr: u8,
        _buf: &mut [u8],
    ) -> Result<usize, TransferError> {
        Err(TransferError::Failed)
    }

    async fn string_descriptor(
        &mut self,
        _dev_addr: u8,
        _index: u8,
        _lang_id: u16,
        _buf: &mut [u8],
    ) -> Result<usize, TransferError> {
        Err(TransferError::Failed)
    }

    fn read_midi_packet(&mut self, _dev_addr: u8) -> Option<MidiPacket> {
        None
    }

    fn receive_report(&mut self, _interface: Interface) -> bool {
        false
    }

    fn can_send(&self, _interface: Interface) -> bool {
        false
    }

    async fn send_request(&mut self, _request: &OutgoingReportRequest) -> Result<(), OutputError> {
        Err(OutputError::NotReady)
    }
}
