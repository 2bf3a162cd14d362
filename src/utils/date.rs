//! Front matter dates.
//!
//! Posts carry a `date` string; the blog build derives a sortable epoch
//! `timestamp` and a normalized `date` from it.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// A validated UTC datetime parsed from front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTimeUtc(DateTime<Utc>);

impl DateTimeUtc {
    /// `None` for dates that don't exist, e.g. `2023-02-29` or `25:00`.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Option<Self> {
        let datetime = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))?
            .and_hms_opt(u32::from(hour), u32::from(minute), u32::from(second))?
            .and_utc();
        Some(Self(datetime))
    }

    /// Parse one of:
    ///
    /// | Format                 | Example                |
    /// |------------------------|------------------------|
    /// | `YYYY-MM-DD`           | `2015-03-17`           |
    /// | `YYYY-MM-DD HH:MM`     | `2015-03-17 09:30`     |
    /// | `YYYY-MM-DD HH:MM:SS`  | `2015-03-17 09:30:15`  |
    /// | `YYYY-MM-DDTHH:MM:SSZ` | `2015-03-17T09:30:15Z` |
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year = parse_u16(&bytes[0..4])?;
        let month = parse_u8(&bytes[5..7])?;
        let day = parse_u8(&bytes[8..10])?;

        let (hour, minute, second) = match bytes.len() {
            10 => (0, 0, 0),
            16 if bytes[10] == b' ' && bytes[13] == b':' => {
                (parse_u8(&bytes[11..13])?, parse_u8(&bytes[14..16])?, 0)
            }
            19 | 20 => {
                let separator_ok = match bytes.len() {
                    20 => bytes[10] == b'T' && bytes[19] == b'Z',
                    _ => bytes[10] == b' ',
                };
                if !separator_ok || bytes[13] != b':' || bytes[16] != b':' {
                    return None;
                }
                (
                    parse_u8(&bytes[11..13])?,
                    parse_u8(&bytes[14..16])?,
                    parse_u8(&bytes[17..19])?,
                )
            }
            _ => return None,
        };

        Self::new(year, month, day, hour, minute, second)
    }

    /// Seconds since the unix epoch.
    pub fn timestamp(self) -> i64 {
        self.0.timestamp()
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`, the form stored back into front matter.
    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `Tue, 17 Mar 2015 09:30:15 +0000`, for rss `pubDate`.
    pub fn to_rfc2822(self) -> String {
        self.0.to_rfc2822()
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: u16, month: u8, day: u8) -> DateTimeUtc {
        DateTimeUtc::new(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        let full = DateTimeUtc::new(2015, 3, 17, 9, 30, 15);

        assert_eq!(DateTimeUtc::parse("2015-03-17"), Some(ymd(2015, 3, 17)));
        assert_eq!(
            DateTimeUtc::parse("2015-03-17 09:30"),
            DateTimeUtc::new(2015, 3, 17, 9, 30, 0)
        );
        assert_eq!(DateTimeUtc::parse("2015-03-17 09:30:15"), full);
        assert_eq!(DateTimeUtc::parse("2015-03-17T09:30:15Z"), full);
        assert_eq!(DateTimeUtc::parse("  2015-03-17  "), Some(ymd(2015, 3, 17)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(DateTimeUtc::parse(""), None);
        assert_eq!(DateTimeUtc::parse("March 17, 2015"), None);
        assert_eq!(DateTimeUtc::parse("2015/03/17"), None);
        assert_eq!(DateTimeUtc::parse("2015-02-30"), None);
        assert_eq!(DateTimeUtc::parse("2015-03-17T09:30:15"), None);
        assert_eq!(DateTimeUtc::parse("2015-03-17 25:00"), None);
    }

    #[test]
    fn test_leap_years() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).is_some());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).is_some());
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).is_none());
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).is_none());
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(ymd(1970, 1, 1).timestamp(), 0);
        assert_eq!(ymd(1970, 1, 2).timestamp(), 86_400);
        assert_eq!(ymd(2000, 3, 1).timestamp(), 951_868_800);
        assert_eq!(
            DateTimeUtc::parse("2015-03-17 09:30:15").unwrap().timestamp(),
            1_426_584_615
        );
        assert_eq!(ymd(1969, 12, 31).timestamp(), -86_400);
    }

    #[test]
    fn test_to_rfc3339() {
        let dt = DateTimeUtc::new(2015, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(dt.to_rfc3339(), "2015-03-07T09:05:01Z");
        assert_eq!(DateTimeUtc::parse(&dt.to_rfc3339()), Some(dt));
    }

    #[test]
    fn test_to_rfc2822() {
        let dt = DateTimeUtc::new(2015, 3, 17, 9, 30, 15).unwrap();
        assert_eq!(dt.to_rfc2822(), "Tue, 17 Mar 2015 09:30:15 +0000");

        let new_year = ymd(2024, 1, 1);
        let reparsed = DateTime::parse_from_rfc2822(&new_year.to_rfc2822()).unwrap();
        assert!(new_year.to_rfc2822().starts_with("Mon, "));
        assert_eq!(reparsed.timestamp(), new_year.timestamp());
    }
}
