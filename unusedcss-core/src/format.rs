//! Display formatting for report values.

pub const KB_IN_BYTES: f64 = 1024.0;

/// Bytes as whole kilobytes: `"12 KB"`.
pub fn format_kb(bytes: u64) -> String {
    format!("{} KB", kb_rounded(bytes))
}

/// Bytes rounded to the nearest kilobyte.
pub fn kb_rounded(bytes: u64) -> u64 {
    (bytes as f64 / KB_IN_BYTES).round() as u64
}

/// Ratio in `[0, 1]` as a whole percentage: `"20%"`.
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}

/// Report label for a stylesheet identified by its content.
pub fn inline_marker(preview: &str) -> String {
    format!("*inline*```{}```", preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0), "0 KB");
        assert_eq!(format_kb(511), "0 KB");
        assert_eq!(format_kb(512), "1 KB");
        assert_eq!(format_kb(10_000), "10 KB");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.2), "20%");
        assert_eq!(format_percent(1.0 / 3.0), "33%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn test_inline_marker() {
        assert_eq!(inline_marker(".a{}"), "*inline*```.a{}```");
    }
}
