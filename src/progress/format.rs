//! Human-readable sizes and durations.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with two decimals in the first unit (B to TB) under 1024.
///
/// ```rust
/// use ictfd::progress::format_bytes;
///
/// assert_eq!(format_bytes(0), "0.00 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// assert_eq!(format_bytes(1073741824), "1.00 GB");
/// ```
pub fn format_bytes(size: u64) -> String {
    scale(size as f64)
}

/// Formats a transfer rate in bytes per second, e.g. `1.50 MB/s`.
pub fn format_speed(bytes_per_sec: f64) -> String {
    format!("{}/s", scale(bytes_per_sec))
}

fn scale(size: f64) -> String {
    let mut size = if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    };
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// Formats seconds as `HH:MM:SS`. Hours are not capped.
///
/// ```rust
/// use ictfd::progress::format_time;
///
/// assert_eq!(format_time(3661), "01:01:01");
/// assert_eq!(format_time(59), "00:00:59");
/// ```
pub fn format_time(seconds: u64) -> String {
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
