//! Bar glyphs for both rendering modes. The returned string excludes the brackets.

use std::time::Duration;

const FILL: char = '=';
const HEAD: char = '>';
const BLANK: char = ' ';
const MARKER: &str = "=>";

/// Animation step for the indeterminate marker.
const MARKER_STEP_MS: u128 = 100;

/// Filled bar for a known total; `fraction` is expected in `[0, 1]`.
///
/// `floor(width * fraction)` fill cells, then a head and blanks unless full.
pub fn determinate(width: usize, fraction: f64) -> String {
    let filled = ((width as f64 * fraction) as usize).min(width);
    let mut bar = String::with_capacity(width);
    bar.extend(std::iter::repeat(FILL).take(filled));
    if filled < width {
        bar.push(HEAD);
        bar.extend(std::iter::repeat(BLANK).take(width - filled - 1));
    }
    bar
}

/// Marker cell for the bouncing animation at `elapsed`.
///
/// Advances one cell per step and reflects at the right edge. At exactly
/// `width` the marker is off the bar for one step. Returns `None` when
/// `width == 0`.
pub fn bounce_position(width: usize, elapsed: Duration) -> Option<usize> {
    if width == 0 {
        return None;
    }
    let period = 2 * width as u128;
    let mut pos = ((elapsed.as_millis() / MARKER_STEP_MS) % period) as usize;
    if pos >= width {
        pos = 2 * width - pos;
    }
    Some(pos)
}

/// Bouncing two-cell marker for an unknown total.
pub fn indeterminate(width: usize, elapsed: Duration) -> String {
    let Some(pos) = bounce_position(width, elapsed) else {
        return String::new();
    };
    let mut bar = String::with_capacity(width + 1);
    let mut i = 0;
    while i < width {
        if i == pos {
            bar.push_str(MARKER);
            // The marker covers the next cell too.
            i += 2;
        } else {
            bar.push(BLANK);
            i += 1;
        }
    }
    bar
}
