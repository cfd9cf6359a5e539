//! Human-readable formatting helpers shared by reports and front ends

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units and up to two decimals
///
/// Zero is `0B`; everything else keeps one fractional digit at minimum, so
/// `1024` is `1.0 KB` and `1536` is `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    // Halves round to even
    let rounded = (size * 100.0).round_ties_even() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1} {}", SIZE_UNITS[unit_index])
    } else {
        format!("{rounded} {}", SIZE_UNITS[unit_index])
    }
}
