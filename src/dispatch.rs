//! Signal dispatch - fire-and-forget emission into the surrounding
//! state-management layer
//!
//! The gateway is a pure emitter: it hands `{type, payload}` signals to
//! an injected sink and never looks back. What the sink does with them
//! (reducers, toasts, logging) is outside the gateway's contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

/// A `{type, payload}` emission for an external dispatcher
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
}

impl Signal {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Signal {
            kind: kind.into(),
            payload,
        }
    }
}

/// Sink accepting gateway signals
pub trait SignalSink: Send + Sync {
    fn emit(&self, signal: Signal);
}

/// Drops every signal; the gateway default when no sink is wired up
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SignalSink for NullSink {
    fn emit(&self, _signal: Signal) {}
}

/// Forwards signals into an unbounded channel. A closed receiver is
/// not an error - emission is fire-and-forget.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Signal>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Signal>) -> Self {
        ChannelSink { tx }
    }

    /// Convenience pair constructor for callers that own the receive side
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Signal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelSink { tx }, rx)
    }
}

impl SignalSink for ChannelSink {
    fn emit(&self, signal: Signal) {
        let _ = self.tx.send(signal);
    }
}
