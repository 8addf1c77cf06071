//! Transport channel collaborator contract
//!
//! The core treats the transport as an already-reliable collaborator: it
//! moves one opaque wire bit-string per exchange, with no loss,
//! reordering or duplication to compensate for. Retries and backoff, if
//! any, belong to channel implementations, never to the pipeline.

use crate::Result;

/// One-exchange-at-a-time transport for wire bit-strings
pub trait Channel {
    /// Ship a wire bit-string to the peer, returning its acknowledgement
    fn send(&mut self, wire: &str) -> Result<String>;
}

/// In-memory channel: stores the last transmission and echoes it back
#[derive(Debug, Default)]
pub struct Loopback {
    latest: Option<String>,
}

impl Loopback {
    /// Create an empty loopback channel
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent bit-string handed to [`Channel::send`]
    pub fn latest_received(&self) -> Option<&str> {
        self.latest.as_deref()
    }
}

impl Channel for Loopback {
    fn send(&mut self, wire: &str) -> Result<String> {
        self.latest = Some(wire.to_owned());
        Ok(wire.to_owned())
    }
}
