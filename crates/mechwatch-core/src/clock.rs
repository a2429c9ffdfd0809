//! Clock hand angles derived from wall-clock time.

use chrono::Timelike;

/// Hand angles in degrees, clockwise from twelve o'clock.
///
/// Always computed fresh from an absolute time, so there is no accumulated
/// drift. Angles are not normalised; they wrap only because the seconds,
/// minutes and hours they are built from wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockAngles {
    pub second: f64,
    pub minute: f64,
    pub hour: f64,
}

impl ClockAngles {
    /// Compute the hand angles for a time of day.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        let hours = f64::from(time.hour() % 12);
        let minutes = f64::from(time.minute());
        let seconds = f64::from(time.second());
        // Leap seconds are encoded as nanosecond >= 1e9.
        let millis = f64::from((time.nanosecond() / 1_000_000).min(999));

        Self {
            second: (seconds + millis / 1000.0) * 6.0,
            minute: (minutes + seconds / 60.0 + millis / 60_000.0) * 6.0,
            hour: (hours + minutes / 60.0 + seconds / 3600.0) * 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> ClockAngles {
        let time = NaiveTime::from_hms_milli_opt(h, m, s, ms).expect("valid time");
        ClockAngles::from_time(&time)
    }

    #[test]
    fn test_quarter_past_ten() {
        let angles = at(10, 15, 30, 0);
        assert!((angles.minute - 93.0).abs() < 1e-9);
        assert!((angles.hour - 307.75).abs() < 1e-9);
        assert!((angles.second - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_afternoon_uses_twelve_hour_dial() {
        assert_eq!(at(22, 15, 30, 0), at(10, 15, 30, 0));
    }

    #[test]
    fn test_milliseconds_advance_second_and_minute() {
        let angles = at(0, 0, 0, 500);
        assert!((angles.second - 3.0).abs() < 1e-9);
        assert!((angles.minute - 0.05).abs() < 1e-9);
        assert_eq!(angles.hour, 0.0);
    }

    #[test]
    fn test_leap_second_is_capped() {
        let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).expect("leap second");
        let angles = ClockAngles::from_time(&time);
        assert!(angles.second < 360.0);
    }
}
