//! The cooperative main loop.
//!
//! Each iteration polls the upstream host once, flushes the outgoing queue
//! and, when no report arrived, works through received console bytes. It
//! then sleeps until the next frame tick or console byte.

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_time::{Delay, Duration, Instant};
use hid_relay_core::{
    drain_and_reset, CloneState, Console, Injector, OutgoingReportQueue, Outcome, RelayContext,
    ReportRelay, ReportRemapper, Session, UpstreamHost,
};

use crate::config::CLONE_WAIT_MS;
use crate::reset::ScbReset;
use crate::tick::{FRAME_REQUEST, PENDING_TICK};
use crate::uart_console::{ConsoleTx, CONSOLE_RX};
use crate::usb_output::{self, DownstreamHid, RoutedSink, UsbDriver};

/// State owned by the main loop.
struct Relay<H, R> {
    host: H,
    remapper: R,
    ctx: RelayContext,
    queue: OutgoingReportQueue,
    console: Console,
    tx: ConsoleTx,
    downstream: Option<DownstreamHid>,
    delay: Delay,
}

impl<H: UpstreamHost, R: ReportRemapper> Relay<H, R> {
    async fn poll(&mut self, relay: &mut ReportRelay<'_>) -> bool {
        let outcome = relay
            .poll_once(&mut self.host, &mut self.remapper, &mut self.ctx, &mut self.queue)
            .await;

        let mut sink = RoutedSink::new(self.downstream.as_mut(), &mut self.host);
        if let Err(e) = self.queue.flush(&mut sink).await {
            warn!("report flush failed: {:?}", e);
        }
        outcome.is_idle()
    }

    async fn console_byte(&mut self, byte: u8) {
        let mut sink = RoutedSink::new(self.downstream.as_mut(), &mut self.host);
        let mut session = Session {
            ctx: &mut self.ctx,
            injector: Injector::new(&mut self.queue, &mut sink, &mut self.delay),
            uptime_ms: Instant::now().as_millis(),
        };
        let outcome = match self.console.feed(byte, &mut session, &mut self.tx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("console write failed: {:?}", e);
                Outcome::Continue
            }
        };
        drop(session);

        if outcome == Outcome::Reset {
            drain_and_reset(&mut self.queue, &mut sink, &mut self.delay, &mut ScbReset).await
        }
    }
}

/// Run the relay forever.
///
/// Waits up to [`CLONE_WAIT_MS`] for the first upstream device to clone,
/// builds the device side from whatever identity results, then relays.
pub async fn run<H, R>(spawner: Spawner, usb: UsbDriver, tx: ConsoleTx, host: H, remapper: R) -> !
where
    H: UpstreamHost,
    R: ReportRemapper,
{
    let mut relay = ReportRelay::new(&PENDING_TICK);
    let mut state = Relay {
        host,
        remapper,
        ctx: RelayContext::new(),
        queue: OutgoingReportQueue::new(),
        console: Console::new(),
        tx,
        downstream: None,
        delay: Delay,
    };

    let deadline = Instant::now() + Duration::from_millis(CLONE_WAIT_MS);
    while state.ctx.clone_state() != CloneState::StringsResolved && Instant::now() < deadline {
        state.poll(&mut relay).await;
        FRAME_REQUEST.wait().await;
    }

    let (device, downstream) = usb_output::build(usb, &state.ctx);
    state.downstream = Some(downstream);
    spawner.spawn(usb_output::usb_task(device).unwrap());
    info!("relay running, cloned: {}", state.ctx.identity().is_cloned);

    if state.console.prompt(&mut state.tx).is_err() {
        warn!("console unavailable");
    }

    loop {
        if state.poll(&mut relay).await {
            while let Ok(byte) = CONSOLE_RX.try_receive() {
                state.console_byte(byte).await;
            }
        }

        match select(FRAME_REQUEST.wait(), CONSOLE_RX.receive()).await {
            Either::First(()) => {}
            Either::Second(byte) => state.console_byte(byte).await,
        }
    }
}
