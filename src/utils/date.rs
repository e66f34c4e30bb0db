//! UTC datetime handling for `date` fields.
//!
//! Frontmatter dates arrive as plain strings (`2024-06-15`,
//! `2024-06-15T14:30:45Z`). Date inputs are written back at the precision
//! they were given: a bare date stays `2024-06-15`, anything with a time
//! becomes millisecond ISO 8601 (`2024-06-15T14:30:45.000Z`). Only strings
//! already in one of those two forms infer as dates, so an untouched date
//! field saves byte-for-byte.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! assert_eq!(dt.to_iso_string(), "2024-06-15T00:00:00.000Z");
//! ```

use anyhow::{Result, bail};

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millis: u16,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millis: 0,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse `YYYY-MM-DD`, optionally followed by `THH:MM`, `:SS`, `.fff`
    /// and a trailing `Z`.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year = parse_u16(&bytes[0..4])?;
        let month = parse_u8(&bytes[5..7])?;
        let day = parse_u8(&bytes[8..10])?;

        let mut dt = Self::from_ymd(year, month, day);
        let time = &bytes[10..];

        if !time.is_empty() {
            let time = time.strip_prefix(b"T").or_else(|| time.strip_prefix(b" "))?;
            let time = time.strip_suffix(b"Z").unwrap_or(time);
            if time.len() < 5 || time[2] != b':' {
                return None;
            }
            dt.hour = parse_u8(&time[0..2])?;
            dt.minute = parse_u8(&time[3..5])?;

            let rest = &time[5..];
            let rest = match rest {
                [] => rest,
                [b':', s1, s2, tail @ ..] => {
                    dt.second = parse_u8(&[*s1, *s2])?;
                    tail
                }
                _ => return None,
            };
            match rest {
                [] => {}
                [b'.', frac @ ..] if (1..=3).contains(&frac.len()) => {
                    dt.millis = parse_millis(frac)?;
                }
                _ => return None,
            }
        }

        dt.validate().ok()?;
        Some(dt)
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millis,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }
        if millis > 999 {
            bail!("millisecond is invalid: {millis}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Millisecond ISO 8601: `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub fn to_iso_string(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millis
        )
    }

    /// Date part only, the value format of `<input type="date">`.
    pub fn to_date_string(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format at the precision of `raw`, the text this value was parsed
    /// from: a bare date stays a bare date, anything else is ISO.
    pub fn to_string_like(self, raw: &str) -> String {
        if raw.trim().len() == 10 {
            self.to_date_string()
        } else {
            self.to_iso_string()
        }
    }
}

/// A date string in one of the two forms date inputs write back:
/// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[inline]
pub fn is_date_string(s: &str) -> bool {
    DateTimeUtc::parse(s).is_some_and(|dt| dt.to_string_like(s) == s)
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

/// Parse a 1-3 digit fraction as milliseconds (`.5` is 500ms).
fn parse_millis(bytes: &[u8]) -> Option<u16> {
    let mut millis = 0u16;
    for i in 0..3 {
        let digit = match bytes.get(i) {
            Some(b) => {
                let d = b.wrapping_sub(b'0');
                if d > 9 {
                    return None;
                }
                u16::from(d)
            }
            None => 0,
        };
        millis = millis * 10 + digit;
    }
    Some(millis)
}
