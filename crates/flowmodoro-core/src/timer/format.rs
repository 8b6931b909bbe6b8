/// Format a seconds count as a clock string.
///
/// `H:MM:SS` when there is at least one full hour, otherwise `M:SS`.
/// The leading unit is not zero-padded; the trailing units are.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_below_one_hour() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(3599), "59:59");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_clock(3600), "1:00:00");
        assert_eq!(format_clock(3661), "1:01:01");
        assert_eq!(format_clock(7322), "2:02:02");
        assert_eq!(format_clock(36_000), "10:00:00");
    }
}
