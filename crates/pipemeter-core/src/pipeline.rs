//! Entry point tying the copy loop, the renderer and the final status line together.

use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::config::MeterConfig;
use crate::control::CancelToken;
use crate::renderer::{Renderer, StatusLine};
use crate::state::TransferState;
use crate::transfer::{self, TransferError};

/// Outcome of a successful transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferSummary {
    /// Bytes copied from input to output.
    pub bytes: u64,
    /// Wall time from state creation to end of input.
    pub elapsed: Duration,
    /// The last status line drawn, if not quiet.
    pub final_line: Option<String>,
}

/// Copy `input` to `output` while drawing progress on `status`.
///
/// Unless `cfg.quiet`, a renderer task redraws the status line every refresh
/// interval. When the copy loop ends the renderer is stopped first; then, on
/// success, one final line is drawn from the fully updated counter. A line
/// break always follows so the status channel is left clean. Must be called
/// from within a tokio runtime.
pub async fn run_pipeline<R, W, S>(
    cfg: MeterConfig,
    input: R,
    output: W,
    status: S,
    cancel: CancelToken,
) -> Result<TransferSummary, TransferError>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
    S: Write + Send + 'static,
{
    cfg.validate()?;
    let state = Arc::new(TransferState::new(&cfg));
    tracing::debug!(
        total_size = cfg.total_size,
        bar_width = cfg.bar_width,
        quiet = cfg.quiet,
        "starting transfer"
    );

    let renderer = if state.quiet() {
        None
    } else {
        Some(Renderer::spawn(Arc::clone(&state), status))
    };

    let copy_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        transfer::copy_stream(input, output, &copy_state, &cancel)
    })
    .await
    .unwrap_or_else(|e| panic!("copy loop panicked: {:?}", e));

    let elapsed = state.start_time().elapsed();
    let final_line = match renderer {
        Some(renderer) => {
            let line = renderer.stop().await;
            finish_status(line, &state, result.is_ok())
        }
        None => None,
    };

    let bytes = result?;
    tracing::info!(bytes, elapsed_secs = elapsed.as_secs_f64(), "transfer complete");
    Ok(TransferSummary {
        bytes,
        elapsed,
        final_line,
    })
}

/// Final draw (on success) and trailing line break. Failures here are cosmetic.
fn finish_status<S: Write>(
    mut line: StatusLine<S>,
    state: &TransferState,
    success: bool,
) -> Option<String> {
    let rendered = success.then(|| state.snapshot().render());
    if let Some(text) = &rendered {
        if let Err(e) = line.draw(text) {
            tracing::debug!("final status line write failed: {}", e);
        }
    }
    if let Err(e) = line.finish() {
        tracing::debug!("status line break failed: {}", e);
    }
    rendered
}
