//! Date helper functions

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};
use crate::i18n::I18n;

/// Parse a publication timestamp as the content API sends it
///
/// Accepts RFC 3339, the `+0000` offset form without a colon, and a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(Error::InvalidDate(raw.to_string()))
}

/// Month and weekday names for one language
#[derive(Debug, Clone)]
pub struct DateNames {
    pub months: Vec<String>,
    pub months_short: Vec<String>,
    /// Sunday first
    pub weekdays: Vec<String>,
    pub weekdays_short: Vec<String>,
}

impl DateNames {
    pub fn from_i18n(i18n: &I18n) -> Self {
        Self {
            months: names(i18n, "date.months", 12),
            months_short: names(i18n, "date.months_short", 12),
            weekdays: names(i18n, "date.weekdays", 7),
            weekdays_short: names(i18n, "date.weekdays_short", 7),
        }
    }
}

fn names(i18n: &I18n, key: &str, len: usize) -> Vec<String> {
    match i18n.get_list(key) {
        Some(list) if list.len() == len => list,
        _ => {
            tracing::warn!(
                "Translation {} for {} is missing or malformed, using English",
                key,
                i18n.language()
            );
            I18n::new("en").get_list(key).unwrap_or_default()
        }
    }
}

/// Localized date formatter for post listings
#[derive(Debug, Clone)]
pub struct DateFormatter {
    names: DateNames,
    pattern: String,
    tz: Tz,
}

impl DateFormatter {
    pub fn new(i18n: &I18n, pattern: &str, tz: Tz) -> Self {
        Self {
            names: DateNames::from_i18n(i18n),
            pattern: pattern.to_string(),
            tz,
        }
    }

    /// Parse and format a raw timestamp
    pub fn format_str(&self, raw: &str) -> Result<String> {
        let date = parse_timestamp(raw)?;
        Ok(self.format(&date))
    }

    /// Format a date in the configured timezone
    pub fn format(&self, date: &DateTime<Utc>) -> String {
        format_date(&date.with_timezone(&self.tz), &self.pattern, &self.names)
    }
}

/// Format a date using a date-fns style pattern
///
/// # Examples
/// ```ignore
/// format_date(&date, "dd MMM yyyy", &pt_br) // -> "01 mar 2021"
/// ```
pub fn format_date<T: TimeZone>(date: &DateTime<T>, pattern: &str, names: &DateNames) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // '' is a literal quote, otherwise copy up to the closing quote
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                out.push(chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            out.push(c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while chars.get(i + run) == Some(&c) {
            run += 1;
        }
        i += run;

        match (c, run) {
            ('y', 2) => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
            ('y', 1) => out.push_str(&date.year().to_string()),
            ('y', n) => out.push_str(&format!("{:0width$}", date.year(), width = n)),
            ('M', 1) => out.push_str(&date.month().to_string()),
            ('M', 2) => out.push_str(&format!("{:02}", date.month())),
            ('M', 3) => out.push_str(pick(&names.months_short, date.month0() as usize)),
            ('M', _) => out.push_str(pick(&names.months, date.month0() as usize)),
            ('d', 1) => out.push_str(&date.day().to_string()),
            ('d', _) => out.push_str(&format!("{:02}", date.day())),
            ('E', 4) => out.push_str(pick(
                &names.weekdays,
                date.weekday().num_days_from_sunday() as usize,
            )),
            ('E', _) => out.push_str(pick(
                &names.weekdays_short,
                date.weekday().num_days_from_sunday() as usize,
            )),
            ('H', 1) => out.push_str(&date.hour().to_string()),
            ('H', _) => out.push_str(&format!("{:02}", date.hour())),
            ('m', 1) => out.push_str(&date.minute().to_string()),
            ('m', _) => out.push_str(&format!("{:02}", date.minute())),
            ('s', 1) => out.push_str(&date.second().to_string()),
            ('s', _) => out.push_str(&format!("{:02}", date.second())),
            (other, n) => {
                for _ in 0..n {
                    out.push(other);
                }
            }
        }
    }

    out
}

fn pick(list: &[String], index: usize) -> &str {
    list.get(index).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt_br() -> DateFormatter {
        DateFormatter::new(&I18n::new("pt-BR"), "dd MMM yyyy", chrono_tz::UTC)
    }

    #[test]
    fn test_format_pt_br() {
        assert_eq!(pt_br().format_str("2021-03-01").unwrap(), "01 mar 2021");
        assert_eq!(
            pt_br().format_str("2021-04-19T19:25:28+0000").unwrap(),
            "19 abr 2021"
        );
        assert_eq!(
            pt_br().format_str("2021-12-05T10:00:00.123+00:00").unwrap(),
            "05 dez 2021"
        );
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let a = parse_timestamp("2021-03-25T19:25:28+0000").unwrap();
        let b = parse_timestamp("2021-03-25T19:25:28Z").unwrap();
        let c = parse_timestamp("2021-03-25T16:25:28-03:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(matches!(
            parse_timestamp("not a date"),
            Err(Error::InvalidDate(_))
        ));
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_timezone_shifts_day() {
        let formatter = DateFormatter::new(
            &I18n::new("pt-BR"),
            "dd MMM yyyy",
            chrono_tz::America::Sao_Paulo,
        );
        assert_eq!(formatter.format_str("2021-03-01").unwrap(), "28 fev 2021");
    }

    #[test]
    fn test_tokens_and_literals() {
        let names = DateNames::from_i18n(&I18n::new("en"));
        let date = Utc.with_ymd_and_hms(2024, 1, 7, 9, 5, 3).unwrap();
        assert_eq!(format_date(&date, "yyyy-MM-dd", &names), "2024-01-07");
        assert_eq!(format_date(&date, "d/M/yy", &names), "7/1/24");
        assert_eq!(format_date(&date, "EEEE, MMMM d", &names), "Sunday, January 7");
        assert_eq!(format_date(&date, "EEE HH:mm:ss", &names), "Sun 09:05:03");
        assert_eq!(format_date(&date, "H'h'mm", &names), "9h05");
        assert_eq!(format_date(&date, "'It''s' yyyy", &names), "It's 2024");
    }

    #[test]
    fn test_long_pt_br_names() {
        let formatter =
            DateFormatter::new(&I18n::new("pt-BR"), "EEEE, d 'de' MMMM", chrono_tz::UTC);
        assert_eq!(
            formatter.format_str("2021-03-01").unwrap(),
            "segunda-feira, 1 de março"
        );
    }
}
