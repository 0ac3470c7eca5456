//! Pass-through copy loop.
//!
//! Reads fixed-size chunks from the input, writes each chunk to the output
//! before reading again, and advances the shared counter once the chunk has
//! been handed to the output. Runs on a blocking thread; the renderer only
//! ever reads the counter.

mod error;

pub use error::{Side, TransferError};

use std::io::{self, BufWriter, Read, Write};

use crate::control::CancelToken;
use crate::state::TransferState;

/// Bytes requested per read; also the output buffer capacity.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// The output is flushed at least once per this many bytes.
pub const FLUSH_THRESHOLD: u64 = 1024 * 1024;

/// Copy `input` to `output` until end of input.
///
/// Returns the number of bytes copied. The output is flushed every
/// [`FLUSH_THRESHOLD`] bytes and once more at the end. A read or write failure
/// stops the loop at once; `cancel` is checked before every read.
pub fn copy_stream<R: Read, W: Write>(
    mut input: R,
    output: W,
    state: &TransferState,
    cancel: &CancelToken,
) -> Result<u64, TransferError> {
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, output);
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut copied = 0u64;
    let mut since_flush = 0u64;

    loop {
        if cancel.is_cancelled() {
            tracing::debug!(copied, "copy loop cancelled");
            writer.flush().map_err(TransferError::Write)?;
            return Err(TransferError::Cancelled);
        }

        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(copied, "input read failed: {}", e);
                // Keep what was already forwarded; the read error is what gets reported.
                let _ = writer.flush();
                return Err(TransferError::Read(e));
            }
        };

        writer.write_all(&buf[..n]).map_err(|e| {
            tracing::warn!(copied, "output write failed: {}", e);
            TransferError::Write(e)
        })?;
        copied += n as u64;
        since_flush += n as u64;
        state.add_bytes(n as u64);

        if since_flush >= FLUSH_THRESHOLD {
            writer.flush().map_err(TransferError::Write)?;
            since_flush = 0;
        }
    }

    writer.flush().map_err(TransferError::Write)?;
    // An interrupt usually kills the producer too, so EOF can be its first symptom.
    if cancel.is_cancelled() {
        tracing::debug!(copied, "input ended after cancellation");
        return Err(TransferError::Cancelled);
    }
    tracing::debug!(copied, "reached end of input");
    Ok(copied)
}
