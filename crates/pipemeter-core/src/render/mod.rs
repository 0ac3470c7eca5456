//! Render engine: turns a progress snapshot into one status line.
//!
//! Pure computation, no I/O. Two modes:
//! - determinate (`total_size > 0`): filled bar, percentage, rate, ETA or `Done!`;
//! - indeterminate (`total_size <= 0`): bouncing marker, bytes and rate only.
//!
//! Output for identical snapshots is identical; the indeterminate animation
//! depends on elapsed time only.

pub mod bar;
pub mod format;

use std::time::Duration;

pub use format::{format_duration, format_size};

/// Floor applied to elapsed seconds before dividing, so early renders stay finite.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Suffix shown once the declared total has been reached or passed.
pub const DONE_MARKER: &str = " Done!";

/// Point-in-time view of a transfer, as consumed by [`render_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Bytes forwarded so far.
    pub bytes_transferred: u64,
    /// Declared total; `<= 0` means unknown.
    pub total_size: i64,
    /// Time since the transfer started.
    pub elapsed: Duration,
    /// Bar width in character cells.
    pub bar_width: usize,
}

/// Time-remaining estimate for determinate mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eta {
    /// Seconds left at the current average rate.
    Remaining(f64),
    /// The declared total has been reached (or overshot).
    Done,
}

impl Snapshot {
    pub fn is_determinate(&self) -> bool {
        self.total_size > 0
    }

    /// Completion in `[0.0, 1.0]`; `None` when the total is unknown.
    pub fn fraction(&self) -> Option<f64> {
        if !self.is_determinate() {
            return None;
        }
        let f = self.bytes_transferred as f64 / self.total_size as f64;
        Some(f.clamp(0.0, 1.0))
    }

    /// Average rate since start in bytes per second.
    pub fn bytes_per_sec(&self) -> f64 {
        self.bytes_transferred as f64 / self.elapsed.as_secs_f64().max(MIN_ELAPSED_SECS)
    }

    /// ETA or done marker. `None` in indeterminate mode, before the first byte,
    /// or while the rate is still zero.
    pub fn eta(&self) -> Option<Eta> {
        if !self.is_determinate() || self.bytes_transferred == 0 {
            return None;
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        let remaining = i128::from(self.total_size) - i128::from(self.bytes_transferred);
        if remaining > 0 {
            Some(Eta::Remaining(remaining as f64 / rate))
        } else {
            Some(Eta::Done)
        }
    }

    /// Render this snapshot; see [`render_line`].
    pub fn render(&self) -> String {
        render_line(self)
    }
}

fn bytes_as_size(bytes: u64) -> String {
    format_size(i64::try_from(bytes).unwrap_or(i64::MAX))
}

/// Build the full status line (without any leading carriage return).
///
/// Determinate: `[=====>    ] 512B of 1.0KB (50.0%) @ 256B/s ETA: 2s`.
/// Indeterminate: `[  =>      ] 512B @ 256B/s`.
pub fn render_line(snap: &Snapshot) -> String {
    // Rate is truncated to whole bytes before formatting.
    let rate = format!("{}/s", format_size(snap.bytes_per_sec() as i64));
    let read = bytes_as_size(snap.bytes_transferred);

    match snap.fraction() {
        Some(fraction) => {
            let glyph = bar::determinate(snap.bar_width, fraction);
            let tail = match snap.eta() {
                Some(Eta::Remaining(secs)) => format!(" ETA: {}", format_duration(secs)),
                Some(Eta::Done) => DONE_MARKER.to_string(),
                None => String::new(),
            };
            format!(
                "[{}] {} of {} ({:.1}%) @ {}{}",
                glyph,
                read,
                format_size(snap.total_size),
                fraction * 100.0,
                rate,
                tail
            )
        }
        None => {
            let glyph = bar::indeterminate(snap.bar_width, snap.elapsed);
            format!("[{}] {} @ {}", glyph, read, rate)
        }
    }
}
