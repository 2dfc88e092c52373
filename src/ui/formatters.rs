/// Bytes in one MB as used for network rates (binary megabyte)
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Format a number with a fixed count of decimals (`12.345`, 1 -> `"12.3"`)
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, 0.0);
    }
    format!("{:.*}", decimals, value)
}

/// Format a byte-per-second rate as MB/s with two decimals
pub fn format_rate_mb(bytes_per_sec: f64) -> String {
    format_fixed(bytes_per_sec / BYTES_PER_MB, 2)
}

/// Percentage of `part` in `whole`, or 0 when `whole` is empty
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
