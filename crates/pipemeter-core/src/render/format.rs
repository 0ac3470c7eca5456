//! Human-readable sizes and durations for the status line.

const KIB: i64 = 1024;
const MIB: i64 = KIB * 1024;
const GIB: i64 = MIB * 1024;

/// Placeholder shown for a size that cannot be a byte count.
pub const UNKNOWN_SIZE: &str = "?";

/// Format a byte count with a binary unit chosen by magnitude.
///
/// Plain bytes below 1 KiB, one decimal in KB, two decimals in MB and GB.
/// Negative counts render as [`UNKNOWN_SIZE`].
pub fn format_size(bytes: i64) -> String {
    if bytes < 0 {
        return UNKNOWN_SIZE.to_string();
    }
    if bytes < KIB {
        return format!("{}B", bytes);
    }
    if bytes < MIB {
        return format!("{:.1}KB", bytes as f64 / KIB as f64);
    }
    if bytes < GIB {
        return format!("{:.2}MB", bytes as f64 / MIB as f64);
    }
    format!("{:.2}GB", bytes as f64 / GIB as f64)
}

/// Format a duration given in seconds: `42s`, `3m07s`, `1h02m03s`.
///
/// Negative input stays in the plain-seconds form (`-10s`); it is not clamped.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{:.0}s", seconds);
    }
    let whole = seconds as u64;
    if seconds < 3600.0 {
        return format!("{}m{:02}s", whole / 60, whole % 60);
    }
    format!("{}h{:02}m{:02}s", whole / 3600, (whole % 3600) / 60, whole % 60)
}
