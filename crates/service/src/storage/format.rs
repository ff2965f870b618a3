//! Human-readable renderings used by the file listing.

use chrono::{DateTime, Local, Utc};

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Base-1024 size with at most two decimals, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }
    let scaled = format!("{:.2}", bytes as f64 / divisor as f64);
    let trimmed = scaled.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Local wall-clock rendering in the `2024/1/15 14:30:00` style.
pub fn format_upload_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y/%-m/%-d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn size_boundaries() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(5), "5 Bytes");
        assert_eq!(format_size(1023), "1023 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn size_rounds_to_two_decimals() {
        assert_eq!(format_size(1234), "1.21 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 1), "5 MB");
    }

    #[test]
    fn size_caps_at_gigabytes() {
        assert_eq!(format_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn upload_time_has_no_zero_padding_on_date() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let s = format_upload_time(&at);
        assert!(s.starts_with("2024/1/"), "{s}");
        assert_eq!(s.matches(':').count(), 2);
    }
}
