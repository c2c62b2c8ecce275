//! Conversions between chrono-tz zone arithmetic and `time` calendar dates.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use time::{Date, Month};

/// Calendar date of the given instant in the given zone.
pub fn date_in(tz: Tz, instant: DateTime<Utc>) -> Date {
    let localized = instant.with_timezone(&tz);
    let month = Month::try_from(localized.month() as u8)
        .expect("valid month value from chrono to time conversion");
    let day =
        u8::try_from(localized.day()).expect("valid day value from chrono to time conversion");
    Date::from_calendar_date(localized.year(), month, day).expect("valid calendar date")
}

/// Today's calendar date in the given zone.
pub fn today_in(tz: Tz) -> Date {
    date_in(tz, Utc::now())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn late_utc_evening_is_already_tomorrow_in_istanbul() {
        // 22:30 UTC on March 6 is 01:30 on March 7 in Istanbul (UTC+3).
        let instant = Utc.with_ymd_and_hms(2026, 3, 6, 22, 30, 0).unwrap();
        let date = date_in(chrono_tz::Europe::Istanbul, instant);
        assert_eq!(date, Date::from_calendar_date(2026, Month::March, 7).unwrap());
    }

    #[test]
    fn utc_zone_passes_the_date_through() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 6, 22, 30, 0).unwrap();
        let date = date_in(chrono_tz::UTC, instant);
        assert_eq!(date, Date::from_calendar_date(2026, Month::March, 6).unwrap());
    }
}
