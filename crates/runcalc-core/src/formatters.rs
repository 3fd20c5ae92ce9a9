// ABOUTME: Display formatters turning decimal minutes and seconds into clock strings
// ABOUTME: HH:MM:SS race times, M:SS paces (rounded or truncated), MM:SS model paces, speeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Time and pace formatting
//!
//! Each formatter reproduces a specific rounding rule. Race times and model
//! paces floor every component; training paces round the seconds half-to-even;
//! converted paces truncate the seconds.

use crate::constants::units::SECONDS_PER_MINUTE;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Split a non-negative number of seconds into floored (hours, minutes, seconds)
fn clock_components(seconds: f64) -> (u64, u64, u64) {
    let hours = seconds.div_euclid(SECONDS_PER_HOUR) as u64;
    let minutes = seconds
        .rem_euclid(SECONDS_PER_HOUR)
        .div_euclid(SECONDS_PER_MINUTE) as u64;
    let secs = seconds.rem_euclid(SECONDS_PER_MINUTE) as u64;
    (hours, minutes, secs)
}

/// Format seconds as zero-padded `HH:MM:SS`, flooring each component
///
/// ```
/// use runcalc_core::formatters::format_hhmmss;
/// assert_eq!(format_hhmmss(3127.4), "00:52:07");
/// ```
#[must_use]
pub fn format_hhmmss(seconds: f64) -> String {
    let (hours, minutes, secs) = clock_components(seconds);
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Format seconds as `MM:SS`, or `HH:MM:SS` once the value reaches one hour
///
/// ```
/// use runcalc_core::formatters::format_pace_ms;
/// assert_eq!(format_pace_ms(300.0), "05:00");
/// assert_eq!(format_pace_ms(3930.0), "01:05:30");
/// ```
#[must_use]
pub fn format_pace_ms(seconds: f64) -> String {
    let (hours, minutes, secs) = clock_components(seconds);
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Format decimal minutes as `M:SS`, rounding seconds half-to-even
///
/// A rounded value of 60 seconds rolls over into the next minute.
///
/// ```
/// use runcalc_core::formatters::format_pace_rounded;
/// assert_eq!(format_pace_rounded(6.5), "6:30");
/// assert_eq!(format_pace_rounded(4.999), "5:00");
/// ```
#[must_use]
pub fn format_pace_rounded(minutes: f64) -> String {
    let mut whole = minutes.div_euclid(1.0) as u64;
    let mut secs = (minutes.rem_euclid(1.0) * SECONDS_PER_MINUTE).round_ties_even() as u64;
    if secs == 60 {
        whole += 1;
        secs = 0;
    }
    format!("{whole}:{secs:02}")
}

/// Format decimal minutes as `M:SS`, truncating the seconds
///
/// ```
/// use runcalc_core::formatters::format_pace_truncated;
/// assert_eq!(format_pace_truncated(8.046_72), "8:02");
/// ```
#[must_use]
pub fn format_pace_truncated(minutes: f64) -> String {
    let mut whole = minutes.trunc() as u64;
    let mut secs = ((minutes - minutes.trunc()) * SECONDS_PER_MINUTE) as u64;
    if secs >= 60 {
        whole += 1;
        secs = 0;
    }
    format!("{whole}:{secs:02}")
}

/// Format a speed with one decimal place
#[must_use]
pub fn format_speed(speed: f64) -> String {
    format!("{speed:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hhmmss_floors_components() {
        assert_eq!(format_hhmmss(2856.6), "00:47:36");
        assert_eq!(format_hhmmss(2992.0), "00:49:52");
        assert_eq!(format_hhmmss(7200.0), "02:00:00");
        assert_eq!(format_hhmmss(59.99), "00:00:59");
    }

    #[test]
    fn test_rounded_pace_uses_bankers_rounding() {
        // 0.125 min = 7.5 s rounds to the even 8
        assert_eq!(format_pace_rounded(5.125), "5:08");
        // 0.375 min = 22.5 s rounds to the even 22
        assert_eq!(format_pace_rounded(5.375), "5:22");
    }

    #[test]
    fn test_rounded_pace_rolls_over() {
        assert_eq!(format_pace_rounded(5.9999), "6:00");
    }

    #[test]
    fn test_truncated_pace() {
        assert_eq!(format_pace_truncated(6.5), "6:30");
        assert_eq!(format_pace_truncated(5.0), "5:00");
    }

    #[test]
    fn test_speed_one_decimal() {
        assert_eq!(format_speed(7.456_454), "7.5");
        assert_eq!(format_speed(15.0), "15.0");
        assert_eq!(format_speed(12.070_08), "12.1");
    }
}
