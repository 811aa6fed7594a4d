//! Time-of-day classification.
//!
//! Service frequency on the network depends on whether a journey happens
//! during peak hours, at night, or at any other time. All times are local;
//! no timezone conversion is performed.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Deserialize;

/// The time-of-day bucket governing service frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeOfDay {
    /// Weekday rush hours: 06:00-09:00 and 18:00-21:00 inclusive.
    Peak,
    /// 22:00-05:59, any day.
    Night,
    /// Everything else.
    NonPeak,
}

impl TimeOfDay {
    /// All buckets, in the order they are checked by [`classify`].
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Peak, TimeOfDay::Night, TimeOfDay::NonPeak];

    /// Classify a timestamp into its time-of-day bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_router::domain::TimeOfDay;
    /// use chrono::NaiveDate;
    ///
    /// // Monday 2021-01-25
    /// let monday = NaiveDate::from_ymd_opt(2021, 1, 25).unwrap();
    /// let at = |h, m| monday.and_hms_opt(h, m, 0).unwrap();
    ///
    /// assert_eq!(TimeOfDay::classify(at(9, 0)), TimeOfDay::Peak);
    /// assert_eq!(TimeOfDay::classify(at(9, 1)), TimeOfDay::NonPeak);
    /// assert_eq!(TimeOfDay::classify(at(22, 0)), TimeOfDay::Night);
    /// ```
    pub fn classify(at: NaiveDateTime) -> Self {
        let hour = at.hour();
        let minute = at.minute();

        if is_business_day(at.weekday()) && in_peak_window(hour, minute) {
            TimeOfDay::Peak
        } else if hour >= 22 || hour <= 5 {
            TimeOfDay::Night
        } else {
            TimeOfDay::NonPeak
        }
    }

    /// Lowercase name used in responses ("peak", "night", "non-peak").
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Peak => "peak",
            TimeOfDay::Night => "night",
            TimeOfDay::NonPeak => "non-peak",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_business_day(day: Weekday) -> bool {
    day.number_from_monday() <= 5
}

/// [06:00, 09:00] and [18:00, 21:00], both endpoints included.
fn in_peak_window(hour: u32, minute: u32) -> bool {
    (6..=8).contains(&hour)
        || (hour == 9 && minute == 0)
        || (18..=20).contains(&hour)
        || (hour == 21 && minute == 0)
}
