//! Seconds helpers shared by the timeline and the boundary snapper.

/// Shortest slice of source video a segment may cover, in seconds.
pub const MIN_SEGMENT_DURATION: f64 = 1.0;

/// Rounds `seconds` to two decimal places.
///
/// # Example
/// ```
/// use engine::time::round_centiseconds;
///
/// assert_eq!(round_centiseconds(12.345_6), 12.35);
/// assert_eq!(round_centiseconds(-0.004), -0.0);
/// ```
pub fn round_centiseconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Formats seconds as a compact `m:ss` clock, or `h:mm:ss` past one hour.
///
/// Negative and non-finite inputs render as `0:00`.
///
/// # Example
/// ```
/// use engine::time::format_clock;
///
/// assert_eq!(format_clock(75.9), "1:15");
/// assert_eq!(format_clock(3_725.0), "1:02:05");
/// ```
pub fn format_clock(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / 3_600;
    let minutes = (total / 60) % 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Formats seconds as a SubRip timestamp `HH:MM:SS,mmm`.
///
/// # Example
/// ```
/// use engine::time::format_srt_timestamp;
///
/// assert_eq!(format_srt_timestamp(3_661.5), "01:01:01,500");
/// ```
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1_000.0).round() as u64
    } else {
        0
    };
    let ms = total_ms % 1_000;
    let secs = (total_ms / 1_000) % 60;
    let minutes = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;
    format!("{hours:02}:{minutes:02}:{secs:02},{ms:03}")
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}
