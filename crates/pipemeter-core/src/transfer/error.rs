//! Fatal outcomes of a transfer.

use std::io;

use crate::config::ConfigError;

/// Why a transfer stopped before reaching end of input.
///
/// Read and write failures carry the underlying I/O error as their source so
/// the CLI can print the whole chain. Status-line failures never show up here.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The input failed with something other than end of input.
    #[error("error reading from input")]
    Read(#[source] io::Error),
    /// Writing or flushing the output failed.
    #[error("error writing to output")]
    Write(#[source] io::Error),
    /// The cancel token was tripped; everything already read was flushed.
    #[error("transfer interrupted")]
    Cancelled,
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
}

/// Which end of the pipe a fatal error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Read,
    Write,
}

impl TransferError {
    /// The failing side for I/O errors; `None` for cancellation and bad config.
    pub fn side(&self) -> Option<Side> {
        match self {
            TransferError::Read(_) => Some(Side::Read),
            TransferError::Write(_) => Some(Side::Write),
            TransferError::Cancelled | TransferError::Config(_) => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransferError::Cancelled)
    }
}
