//! Periodic status-line driver.
//!
//! A tokio task wakes every refresh interval, snapshots the shared state and
//! redraws the status line in place. It owns the status writer while running
//! and hands it back on [`Renderer::stop`], so the caller's final render can
//! never interleave with a periodic one.

use std::io::{self, Write};
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::state::TransferState;

/// Status channel writer that redraws a single line in place.
///
/// Each draw starts with a carriage return and pads with spaces when the new
/// line is shorter than the previous one, so no stale characters remain.
#[derive(Debug)]
pub struct StatusLine<S> {
    out: S,
    last_len: usize,
}

impl<S: Write> StatusLine<S> {
    pub fn new(out: S) -> Self {
        Self { out, last_len: 0 }
    }

    /// Overwrite the current line with `line`.
    pub fn draw(&mut self, line: &str) -> io::Result<()> {
        let pad = self.last_len.saturating_sub(line.len());
        write!(self.out, "\r{}{:pad$}", line, "", pad = pad)?;
        self.out.flush()?;
        self.last_len = line.len();
        Ok(())
    }

    /// End the line so whatever writes to the status channel next starts clean.
    pub fn finish(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.last_len = 0;
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.out
    }
}

/// Handle to a running renderer task.
pub struct Renderer<S> {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<StatusLine<S>>,
}

impl<S> Renderer<S>
where
    S: Write + Send + 'static,
{
    /// Start rendering `state` to `status`. The first draw happens one interval in.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(state: Arc<TransferState>, status: S) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(render_loop(state, StatusLine::new(status), stop_rx));
        Self { stop_tx, task }
    }

    /// Signal the task to stop and wait for it. No periodic draw happens after
    /// this returns. Consumes the handle, so the signal is sent exactly once.
    pub async fn stop(self) -> StatusLine<S> {
        // The task only exits through this signal, so it is still listening.
        let _ = self.stop_tx.send(());
        self.task
            .await
            .unwrap_or_else(|e| panic!("renderer task panicked: {:?}", e))
    }
}

async fn render_loop<S: Write>(
    state: Arc<TransferState>,
    mut line: StatusLine<S>,
    mut stop_rx: oneshot::Receiver<()>,
) -> StatusLine<S> {
    let period = state.refresh_interval();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::debug!(?period, "renderer started");

    loop {
        tokio::select! {
            biased;
            _ = &mut stop_rx => break,
            _ = ticker.tick() => {
                let rendered = state.snapshot().render();
                if let Err(e) = line.draw(&rendered) {
                    tracing::debug!("status line write failed: {}", e);
                }
            }
        }
    }

    tracing::debug!("renderer stopped");
    line
}
