//! `--refresh` value parsing.
//!
//! Accepts anything `humantime` does: a sequence of number + unit pairs such
//! as `100ms`, `1m30s` or `250us`. Every number needs a unit.

use std::time::Duration;

/// Parse a refresh interval such as `100ms`, `1m30s` or `500us`. Zero is rejected.
pub fn parse_refresh(s: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(s.trim())
        .map_err(|e| format!("invalid refresh interval '{}': {}", s.trim(), e))?;
    if interval.is_zero() {
        return Err("refresh interval must be greater than zero".to_string());
    }
    Ok(interval)
}
