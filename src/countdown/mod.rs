//! Timezone aware countdown to the start of a wedding.
//!
//! Everything here is a pure function of its inputs. Malformed
//! time-of-day or timezone text degrades to the calculator's fallback
//! values, only a malformed date is reported back as an error.
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tashkent;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CountdownError {
    #[error("Invalid wedding date: {0:?}")]
    InvalidDate(String),
}

/// Remaining time until the ceremony floored to whole units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownResult {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownResult {
    fn from_seconds(total: i64) -> Self {
        if total <= 0 {
            return Self::default();
        }
        let days = total / SECONDS_PER_DAY;
        let rem = total % SECONDS_PER_DAY;
        let hours = rem / SECONDS_PER_HOUR;
        let rem = rem % SECONDS_PER_HOUR;
        let minutes = rem / SECONDS_PER_MINUTE;
        let seconds = rem % SECONDS_PER_MINUTE;

        Self {
            days: days as u64,
            hours: hours as u64,
            minutes: minutes as u64,
            seconds: seconds as u64,
        }
    }

    pub fn is_over(&self) -> bool {
        *self == Self::default()
    }
}

/// Default ceremony start when the stored time can't be parsed
pub fn default_time_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(16, 0, 0).expect("16:00 is a valid time")
}

/// Parse a wall-clock time in either 24-hour ("16:00") or 12-hour
/// ("4:00 PM", "4:00pm", "4 PM") form.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let normalized = text.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }

    let (clock, meridiem) = if let Some(rest) = normalized.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = normalized.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (normalized.as_str(), None)
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => (h.trim().parse::<u32>().ok()?, parse_minute(m)?),
        // A bare hour is only meaningful with AM/PM attached
        None if meridiem.is_some() => (clock.parse::<u32>().ok()?, 0),
        None => return None,
    };

    let hour = match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_minute(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.len() != 2 {
        return None;
    }
    let minute = text.parse::<u32>().ok()?;
    (minute <= 59).then_some(minute)
}

/// Look up an IANA zone identifier such as "Asia/Tashkent".
pub fn parse_timezone(text: &str) -> Option<Tz> {
    text.trim().parse::<Tz>().ok()
}

/// Parse a calendar date. Timestamp-backed records may carry a time
/// component after the date which is ignored.
pub fn parse_date(text: &str) -> Result<NaiveDate, CountdownError> {
    let trimmed = text.trim();
    let date_part = trimmed
        .split_once(['T', ' '])
        .map(|(date, _)| date)
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| CountdownError::InvalidDate(text.to_string()))
}

#[derive(Debug, Clone, Copy)]
pub struct CountdownCalculator {
    pub fallback_time: NaiveTime,
    pub fallback_zone: Tz,
}

impl Default for CountdownCalculator {
    fn default() -> Self {
        Self {
            fallback_time: default_time_of_day(),
            fallback_zone: DEFAULT_TIMEZONE,
        }
    }
}

impl CountdownCalculator {
    pub fn new(fallback_time: NaiveTime, fallback_zone: Tz) -> Self {
        Self {
            fallback_time,
            fallback_zone,
        }
    }

    /// The absolute instant the ceremony starts at, interpreting the
    /// wall-clock time in the wedding's own zone.
    pub fn target_instant(
        &self,
        date: &str,
        time_of_day: &str,
        timezone: &str,
    ) -> Result<DateTime<Utc>, CountdownError> {
        let date = parse_date(date)?;
        let time = parse_time_of_day(time_of_day).unwrap_or(self.fallback_time);
        let zone = parse_timezone(timezone).unwrap_or(self.fallback_zone);

        Ok(localize(zone, date.and_time(time)))
    }

    pub fn compute(
        &self,
        date: &str,
        time_of_day: &str,
        timezone: &str,
        now: DateTime<Utc>,
    ) -> Result<CountdownResult, CountdownError> {
        let target = self.target_instant(date, time_of_day, timezone)?;
        Ok(CountdownResult::from_seconds(
            target.signed_duration_since(now).num_seconds(),
        ))
    }
}

/// Convert a wall-clock time to UTC using the zone's own offset on that
/// date. Overlaps resolve to the earlier instant and times inside a
/// spring-forward gap move forward by an hour.
fn localize(zone: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let resolved = match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => zone
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest(),
    };

    match resolved {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&local),
    }
}

/// Countdown using the built-in fallbacks (16:00, Asia/Tashkent).
pub fn compute_countdown(
    date: &str,
    time_of_day: &str,
    timezone: &str,
    now: DateTime<Utc>,
) -> Result<CountdownResult, CountdownError> {
    CountdownCalculator::default().compute(date, time_of_day, timezone, now)
}
