const KB: u64 = 1024;
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size using the largest unit whose scaled value is at least
/// one, rounded to two decimals with trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut unit_size = 1u64;
    while exponent + 1 < SIZE_UNITS.len() && bytes >= unit_size * KB {
        unit_size *= KB;
        exponent += 1;
    }

    format_scaled_unit(bytes, unit_size, SIZE_UNITS[exponent])
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.2}");
    let compact_value = value_text.trim_end_matches('0').trim_end_matches('.');
    format!("{compact_value} {unit_label}")
}

/// Compact limit label used in validation messages ("50MB").
pub fn format_limit_label(bytes: u64) -> String {
    format_file_size(bytes).replace(' ', "")
}
