//! Debounced search input.
//!
//! Keystrokes are pushed into a [`Debouncer`]; a value is emitted only once
//! the input has been quiet for the configured delay. A new value during the
//! quiet period restarts the timer and replaces the pending one, so at most
//! one search is dispatched per burst.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Default quiet period before a search is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Input side of a debouncer.
///
/// Dropping every handle flushes a pending value and stops the timer task.
#[derive(Debug, Clone)]
pub struct Debouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl Debouncer {
    /// Spawn the timer task. Settled values arrive on the returned receiver.
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>, JoinHandle<()>) {
        let (tx, input) = mpsc::unbounded_channel();
        let (output, settled) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(input, output, delay));
        (Self { tx }, settled, handle)
    }

    /// Feed the latest input value. Returns false once the timer task is gone.
    pub fn push(&self, value: impl Into<String>) -> bool {
        self.tx.send(value.into()).is_ok()
    }
}

async fn run(
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
    delay: Duration,
) {
    while let Some(first) = input.recv().await {
        let mut latest = first;
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => latest = value,
                    None => {
                        let _ = output.send(latest);
                        return;
                    }
                },
                _ = sleep(delay) => {
                    if output.send(latest).is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
