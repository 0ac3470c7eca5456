//! Default command: meter stdin to stdout, progress on stderr.

use anyhow::Result;
use pipemeter_core::{run_pipeline, CancelToken, MeterConfig, TransferError, TransferSummary};
use std::io;
use std::time::Duration;

use crate::cli::signal;

/// How long to wait for the copy loop to notice an interrupt before giving up on it.
const CANCEL_GRACE: Duration = Duration::from_secs(1);

/// How a metered run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

pub async fn run_meter(cfg: MeterConfig) -> Result<Outcome> {
    let cancel = CancelToken::new();
    let pipeline = run_pipeline(
        cfg,
        io::stdin(),
        io::stdout(),
        io::stderr(),
        cancel.clone(),
    );
    tokio::pin!(pipeline);

    tokio::select! {
        res = &mut pipeline => return settle(res, false),
        sig = signal::shutdown_signal() => {
            tracing::info!("received {}, stopping transfer", sig);
            cancel.cancel();
        }
    }

    // A read blocked on a silent producer never sees the token.
    match tokio::time::timeout(CANCEL_GRACE, &mut pipeline).await {
        Ok(res) => settle(res, true),
        Err(_) => {
            tracing::warn!("copy loop still blocked {:?} after interrupt", CANCEL_GRACE);
            // The status line was never terminated.
            eprintln!();
            Ok(Outcome::Interrupted)
        }
    }
}

/// Map the pipeline result to an outcome. Once a signal has been seen the run
/// counts as interrupted even if the copy loop reached end of input: the
/// producer usually dies from the same signal.
fn settle(res: Result<TransferSummary, TransferError>, signalled: bool) -> Result<Outcome> {
    match res {
        Ok(summary) => {
            tracing::debug!(
                bytes = summary.bytes,
                elapsed_secs = summary.elapsed.as_secs_f64(),
                signalled,
                "meter finished"
            );
            if signalled {
                Ok(Outcome::Interrupted)
            } else {
                Ok(Outcome::Completed)
            }
        }
        Err(e) if e.is_cancelled() => Ok(Outcome::Interrupted),
        Err(e) => Err(e.into()),
    }
}
