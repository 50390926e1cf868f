use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

/// Unified event type consumed by a host driving the session: decoded
/// characters, the discrete delete signal, and frame ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    Key(char),
    Delete,
    Tick,
}

/// Source of decoded input events. The session core never reads terminals
/// or key codes; hosts decode and push `FrameEvent`s.
pub trait FrameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or
    /// Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<FrameEvent, RecvTimeoutError>;
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-backed event source for tests and scripted hosts.
pub struct ChannelEventSource {
    rx: Receiver<FrameEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<FrameEvent>) -> Self {
        Self { rx }
    }
}

impl FrameEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<FrameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the host one event/tick at a time
pub struct Runner<E: FrameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: FrameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on
    /// timeout
    pub fn step(&self) -> FrameEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                FrameEvent::Tick
            }
        }
    }
}
