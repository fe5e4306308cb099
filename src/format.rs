//! Display formatting for player state.
//!
//! Pure conversions from raw numeric player values (seconds, ratios) into
//! the strings the control surface shows. No formatting here ever fails.

/// Format a position or duration in seconds as a clock string.
///
/// Fractional seconds are truncated, never rounded. The output is
/// `H:MM:SS` when hours are present, `M:SS` when only minutes are, and
/// `0:SS` otherwise. Smaller units are zero-padded to two digits; the
/// leading unit never is.
///
/// Negative input is out of contract for player positions and renders
/// as `0:00`.
///
/// # Example
/// ```
/// use varispeed::format::format_time;
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(3661.0), "1:01:01");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hrs = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hrs > 0 {
        format!("{}:{:02}:{:02}", hrs, mins, secs)
    } else if mins > 0 {
        format!("{}:{:02}", mins, secs)
    } else {
        format!("0:{:02}", secs)
    }
}

/// Render a pitch ratio as a signed semitone offset with two decimals.
///
/// A ratio of exactly 1.0 is the zero point. Ratios below 1.0 map linearly
/// onto [-12, 0) over the down-range [0.5, 1.0); ratios above 1.0 map
/// linearly onto (0, 12] over the up-range (1.0, 2.0]. The two branches use
/// different denominators, so equal ratio distances from unity do not give
/// mirrored offsets; that asymmetry is part of the display contract.
///
/// # Example
/// ```
/// use varispeed::format::display_pitch;
/// assert_eq!(display_pitch(0.75), "-6.00");
/// assert_eq!(display_pitch(1.5), "6.00");
/// ```
pub fn display_pitch(ratio: f64) -> String {
    if ratio == 1.0 {
        return "0.00".to_string();
    }

    let semitones = if ratio < 1.0 {
        -12.0 * (1.0 - ratio) / 0.5
    } else {
        12.0 * (ratio - 1.0) / 1.0
    };

    format!("{:.2}", semitones)
}

/// Render a rate ratio with two decimals, as shown next to the speed slider.
pub fn display_rate(ratio: f64) -> String {
    format!("{:.2}", ratio)
}
