//! Date helper functions

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Naive layouts accepted in `Date:` / `Modified:` headers, most specific first
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a header date, interpreting naive values in `tz`
///
/// # Examples
/// ```ignore
/// parse_datetime("2017-09-28 22:00", chrono_tz::Asia::Kolkata)
/// ```
pub fn parse_datetime(s: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

/// Times inside a DST gap keep the offset in force before the gap
fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<FixedOffset>> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Some(dt.fixed_offset());
    }
    let before = tz
        .from_local_datetime(&(naive - Duration::hours(1)))
        .earliest()?;
    let offset = before.offset().fix();
    Some((before + Duration::hours(1)).with_timezone(&offset))
}

/// Format a date with a strftime pattern
pub fn format_date(date: &DateTime<FixedOffset>, format: &str) -> String {
    date.format(format).to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_datetime("2017-09-28", chrono_tz::UTC).unwrap();
        assert_eq!(date_xml(&dt), "2017-09-28T00:00:00+00:00");
    }

    #[test]
    fn test_parse_in_site_timezone() {
        let dt = parse_datetime("2017-09-28 22:00", chrono_tz::Asia::Kolkata).unwrap();
        assert_eq!(date_xml(&dt), "2017-09-28T22:00:00+05:30");
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let dt = parse_datetime("2020-01-02T03:04:05-07:00", chrono_tz::Asia::Kolkata).unwrap();
        assert_eq!(date_xml(&dt), "2020-01-02T03:04:05-07:00");
    }

    #[test]
    fn test_parse_inside_dst_gap() {
        // 02:30 does not exist in Berlin on 2017-03-26
        let dt = parse_datetime("2017-03-26 02:30", chrono_tz::Europe::Berlin).unwrap();
        assert_eq!(date_xml(&dt), "2017-03-26T02:30:00+01:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_datetime("last tuesday", chrono_tz::UTC).is_none());
        assert!(parse_datetime("2017-13-45", chrono_tz::UTC).is_none());
    }

    #[test]
    fn test_format_date() {
        let dt = parse_datetime("2017/10/01", chrono_tz::UTC).unwrap();
        assert_eq!(format_date(&dt, "%a %d %B %Y"), "Sun 01 October 2017");
    }
}
