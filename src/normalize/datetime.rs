use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a day-first timestamp like "01/10/2024 12:30:00 PM".
pub fn parse_day_first(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, "%d/%m/%Y %I:%M:%S %p").ok()
}

/// Parse an ISO-like timestamp, stripping any UTC offset instead of
/// converting: the wall-clock digits are already the civic local time.
pub fn parse_iso_naive(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        // naive_local keeps the written wall clock and drops the offset
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Parse a long-form date like "September 9, 2024", tolerating a leading
/// weekday ("Monday, September 9, 2024").
pub fn parse_month_day_year(raw: &str) -> Option<NaiveDate> {
    let mut text = raw.trim();
    if let Some((first, rest)) = text.split_once(',') {
        if WEEKDAYS.contains(&first.trim().to_lowercase().as_str()) {
            text = rest.trim();
        }
    }
    NaiveDate::parse_from_str(text, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%b %d, %Y"))
        .ok()
}

/// Parse a clock time like "5:30 PM" or "6:00PM".
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%I:%M%p"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn day_first_timestamps() {
        assert_eq!(
            parse_day_first("01/10/2024 12:30:00 PM"),
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap().and_hms_opt(12, 30, 0)
        );
        assert_eq!(
            parse_day_first("01/10/2024 12:00:00 AM"),
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("10/01/2024"), None);
    }

    #[test]
    fn iso_offset_is_stripped_not_converted() {
        // -05:00 must be discarded, not applied
        assert_eq!(
            parse_iso_naive("2024-10-08T17:30:00-05:00"),
            NaiveDate::from_ymd_opt(2024, 10, 8).unwrap().and_hms_opt(17, 30, 0)
        );
        assert_eq!(
            parse_iso_naive("2024-10-08T17:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 10, 8).unwrap().and_hms_opt(17, 30, 0)
        );
        assert_eq!(
            parse_iso_naive("2024-12-03T10:00:00"),
            NaiveDate::from_ymd_opt(2024, 12, 3).unwrap().and_hms_opt(10, 0, 0)
        );
        assert_eq!(parse_iso_naive(""), None);
        assert_eq!(parse_iso_naive("not a date"), None);
    }

    #[test]
    fn long_form_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 9, 9);
        assert_eq!(parse_month_day_year("September 9, 2024"), expected);
        assert_eq!(parse_month_day_year("Monday, September 9, 2024"), expected);
        assert_eq!(parse_month_day_year("  Sep 9, 2024 "), expected);
        assert_eq!(parse_month_day_year("someday"), None);
    }

    #[test]
    fn clock_times() {
        assert_eq!(
            parse_clock_time(" 5:30 PM "),
            NaiveTime::from_hms_opt(17, 30, 0)
        );
        assert_eq!(parse_clock_time("6:00PM"), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(parse_clock_time("noonish"), None);
    }
}
