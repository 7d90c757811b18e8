//! Display text for distances and durations.

/// Unit word for minutes on the map page.
const MINUTE_UNIT: &str = "menit";

/// `"{m} m"` below one kilometer, `"{km:.2} km"` otherwise.
///
/// Negative or non-finite input formats as zero.
pub fn format_distance(meters: f64) -> String {
    let meters = if meters.is_finite() && meters > 0.0 {
        meters
    } else {
        0.0
    };

    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Whole hours and minutes; leftover seconds are dropped.
///
/// Negative or non-finite input formats as zero.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{} {}", minutes, MINUTE_UNIT)
    }
}
