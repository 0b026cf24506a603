//! XMP date values
//!
//! XMP dates follow the W3C profile of ISO 8601 and may be partial:
//!
//! - `YYYY`
//! - `YYYY-MM`
//! - `YYYY-MM-DD`
//! - `YYYY-MM-DDThh:mm[TZD]`
//! - `YYYY-MM-DDThh:mm:ss[TZD]`
//! - `YYYY-MM-DDThh:mm:ss.s+[TZD]`
//!
//! where `TZD` is `Z` or `+hh:mm` / `-hh:mm`.

use crate::core::error::{XmpError, XmpResult};
use crate::types::value::{scalar_property, Scalar};
use std::fmt;
use std::str::FromStr;

/// Time zone designator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZone {
    /// `Z`
    Utc,
    /// Offset east of UTC in minutes (negative for west)
    Offset(i16),
}

/// Time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59), absent in `hh:mm` form
    pub second: Option<u8>,
    /// Fraction of the second in nanoseconds
    pub nanosecond: u32,
    /// Time zone, if given
    pub zone: Option<TimeZone>,
}

/// A possibly partial XMP date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Date {
    /// Year
    pub year: u16,
    /// Month (1-12)
    pub month: Option<u8>,
    /// Day of month (1-31)
    pub day: Option<u8>,
    /// Time of day, only present with a full date
    pub time: Option<Time>,
}

impl Date {
    /// A date with only the year set
    pub fn from_year(year: u16) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// A full calendar date, validated
    pub fn ymd(year: u16, month: u8, day: u8) -> XmpResult<Self> {
        check_day(year, month, day)?;
        Ok(Self {
            year,
            month: Some(month),
            day: Some(day),
            time: None,
        })
    }

    /// Same date with a time of day attached
    pub fn with_time(mut self, time: Time) -> XmpResult<Self> {
        if self.day.is_none() {
            return Err(XmpError::BadValue(
                "A time requires a full date".to_string(),
            ));
        }
        self.time = Some(time);
        Ok(self)
    }

    /// Parse an XMP date string
    ///
    /// # Example
    ///
    /// ```rust
    /// use xmpmodel::Date;
    ///
    /// let date = Date::parse("2023-12-25T10:30:00Z").unwrap();
    /// assert_eq!(date.year, 2023);
    /// assert_eq!(date.month, Some(12));
    /// assert_eq!(date.to_string(), "2023-12-25T10:30:00Z");
    /// ```
    pub fn parse(s: &str) -> XmpResult<Self> {
        if s.is_empty() {
            return Err(XmpError::BadValue("Empty date/time string".to_string()));
        }
        let mut cursor = Cursor::new(s);

        let year = cursor.number(4, "year")? as u16;
        let mut date = Date::from_year(year);
        if cursor.done() {
            return Ok(date);
        }

        cursor.expect(b'-', "'-' after year")?;
        let month = cursor.number(2, "month")? as u8;
        if !(1..=12).contains(&month) {
            return Err(bad(s, "month is out of range"));
        }
        date.month = Some(month);
        if cursor.done() {
            return Ok(date);
        }

        cursor.expect(b'-', "'-' after month")?;
        let day = cursor.number(2, "day")? as u8;
        check_day(year, month, day).map_err(|_| bad(s, "day is out of range"))?;
        date.day = Some(day);
        if cursor.done() {
            return Ok(date);
        }

        cursor.expect(b'T', "'T' before time")?;
        let hour = cursor.number(2, "hour")? as u8;
        cursor.expect(b':', "':' after hour")?;
        let minute = cursor.number(2, "minute")? as u8;
        if hour > 23 || minute > 59 {
            return Err(bad(s, "time is out of range"));
        }

        let mut time = Time {
            hour,
            minute,
            second: None,
            nanosecond: 0,
            zone: None,
        };
        if cursor.eat(b':') {
            let second = cursor.number(2, "second")? as u8;
            if second > 59 {
                return Err(bad(s, "second is out of range"));
            }
            time.second = Some(second);
            if cursor.eat(b'.') {
                time.nanosecond = cursor.fraction()?;
            }
        }

        if cursor.eat(b'Z') {
            time.zone = Some(TimeZone::Utc);
        } else if let Some(sign) = cursor.sign() {
            let tz_hour = cursor.number(2, "timezone hour")? as i16;
            cursor.expect(b':', "':' in timezone")?;
            let tz_minute = cursor.number(2, "timezone minute")? as i16;
            if tz_hour > 23 || tz_minute > 59 {
                return Err(bad(s, "timezone is out of range"));
            }
            time.zone = Some(TimeZone::Offset(sign * (tz_hour * 60 + tz_minute)));
        }

        if !cursor.done() {
            return Err(bad(s, "extra characters at end"));
        }
        date.time = Some(time);
        Ok(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        let Some(month) = self.month else {
            return Ok(());
        };
        write!(f, "-{:02}", month)?;
        let Some(day) = self.day else {
            return Ok(());
        };
        write!(f, "-{:02}", day)?;
        let Some(time) = self.time else {
            return Ok(());
        };

        write!(f, "T{:02}:{:02}", time.hour, time.minute)?;
        if let Some(second) = time.second {
            write!(f, ":{:02}", second)?;
            if time.nanosecond > 0 {
                let digits = format!("{:09}", time.nanosecond);
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
        }
        match time.zone {
            None => Ok(()),
            Some(TimeZone::Utc) => f.write_str("Z"),
            Some(TimeZone::Offset(minutes)) => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let minutes = minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
            }
        }
    }
}

impl FromStr for Date {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Scalar for Date {
    fn parse_text(text: &str) -> XmpResult<Self> {
        Self::parse(text)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

scalar_property!(Date);

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Date::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn bad(s: &str, reason: &str) -> XmpError {
    XmpError::BadValue(format!("Invalid date '{}': {}", s, reason))
}

fn check_day(year: u16, month: u8, day: u8) -> XmpResult<()> {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let last = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return Err(XmpError::BadValue("Month is out of range".to_string())),
    };
    if day == 0 || day > last {
        return Err(XmpError::BadValue("Day is out of range".to_string()));
    }
    Ok(())
}

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8, what: &str) -> XmpResult<()> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(bad(self.input, &format!("expected {}", what)))
        }
    }

    fn sign(&mut self) -> Option<i16> {
        if self.eat(b'+') {
            Some(1)
        } else if self.eat(b'-') {
            Some(-1)
        } else {
            None
        }
    }

    /// Exactly `width` ASCII digits
    fn number(&mut self, width: usize, what: &str) -> XmpResult<u32> {
        let end = self.pos + width;
        let digits = self
            .bytes
            .get(self.pos..end)
            .filter(|d| d.iter().all(u8::is_ascii_digit))
            .ok_or_else(|| bad(self.input, &format!("invalid {}", what)))?;
        self.pos = end;
        Ok(digits.iter().fold(0, |acc, d| acc * 10 + u32::from(d - b'0')))
    }

    /// Fractional seconds, normalized to nanoseconds
    fn fraction(&mut self) -> XmpResult<u32> {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(bad(self.input, "invalid fractional second"));
        }
        let mut nanos = 0u32;
        for (i, d) in self.bytes[start..self.pos].iter().enumerate() {
            if i < 9 {
                nanos = nanos * 10 + u32::from(d - b'0');
            }
        }
        let digits = self.pos - start;
        for _ in digits..9 {
            nanos *= 10;
        }
        Ok(nanos)
    }
}
