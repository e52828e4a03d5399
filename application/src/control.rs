//! Live control side-channel for a running debate
//!
//! The debate runs as one authoritative server-side loop; the user reaches
//! into it through a [`DebateControl`] handle. Signals are buffered and
//! drained by the orchestrator at phase and turn boundaries — an in-flight
//! completion call is never interrupted.

use tokio::sync::mpsc;

/// A signal from the user to a running debate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlSignal {
    /// Free text attached to the next turn's prompt; also restarts the
    /// global clock
    Interjection(String),
    /// Restart the global clock without new text
    Extend,
    /// Cancel not-yet-started turns and jump to synthesis
    Stop,
}

/// Sender half, held by the user-facing side
#[derive(Debug, Clone)]
pub struct DebateControl {
    tx: mpsc::UnboundedSender<ControlSignal>,
}

impl DebateControl {
    /// Submit an interjection. Returns false if the debate already finished.
    pub fn interject(&self, text: impl Into<String>) -> bool {
        self.tx.send(ControlSignal::Interjection(text.into())).is_ok()
    }

    /// Request a budget extension after (or before) timeout.
    pub fn extend(&self) -> bool {
        self.tx.send(ControlSignal::Extend).is_ok()
    }

    /// Stop the debate; synthesis still runs.
    pub fn stop(&self) -> bool {
        self.tx.send(ControlSignal::Stop).is_ok()
    }
}

/// Receiver half, owned by the orchestrator
#[derive(Debug)]
pub struct ControlReceiver {
    rx: mpsc::UnboundedReceiver<ControlSignal>,
}

impl ControlReceiver {
    /// Drain every signal queued since the last boundary, oldest first.
    pub fn drain(&mut self) -> Vec<ControlSignal> {
        let mut signals = Vec::new();
        while let Ok(signal) = self.rx.try_recv() {
            signals.push(signal);
        }
        signals
    }
}

/// Create a linked control handle and receiver for one debate run.
pub fn control_channel() -> (DebateControl, ControlReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DebateControl { tx }, ControlReceiver { rx })
}
