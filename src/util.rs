use chrono::{Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use flexi_logger::{Logger, LoggerHandle};
use simple_error::SimpleError;
use std::error::Error;

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

pub fn init_log() {
    let _lg = init_log_with("debug");
}

// None when a logger is already installed, e.g. a second test in the same process
pub fn init_log_with(spec: &str) -> Option<LoggerHandle> {
    Logger::try_with_env_or_str(spec)
        .ok()?
        .log_to_stdout()
        .start()
        .ok()
}

/// `3981` -> `01:06:21`
pub fn convert_duration_to_time_string(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

// YYYY, YYYY-MM or YYYY-MM-DD
fn parse_date(date: &str) -> Option<NaiveDate> {
    match date.len() {
        10 => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d").ok(),
        4 => date.parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
        _ => None,
    }
}

// drops a trailing Z or +-hh[:mm] offset; None when the offset is malformed
fn strip_offset(time: &str) -> Option<&str> {
    if let Some(t) = time.strip_suffix('Z').or_else(|| time.strip_suffix('z')) {
        return Some(t);
    }
    match time.rfind(|c: char| c == '+' || c == '-') {
        Some(i) => {
            let offset = time[i + 1..].replace(':', "");
            let valid = (offset.len() == 2 || offset.len() == 4)
                && offset.chars().all(|c| c.is_ascii_digit());
            if valid {
                Some(&time[..i])
            } else {
                None
            }
        }
        None => Some(time),
    }
}

// hh, hh:mm, hh:mm:ss or hh:mm:ss.fff
fn parse_time(time: &str) -> Option<NaiveTime> {
    let time = strip_offset(time)?;
    let time = if time.contains(':') {
        time.to_string()
    } else {
        format!("{}:00", time)
    };
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(&time, f).ok())
}

/// Lenient ISO-8601. An offset is accepted but the wall-clock time in that
/// offset is kept.
pub fn parse_iso(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    match raw.find(|c: char| c == 'T' || c == ' ') {
        Some(i) => {
            let date = parse_date(&raw[..i])?;
            let time = parse_time(&raw[i + 1..])?;
            Some(date.and_time(time))
        }
        None => parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)),
    }
}

/// Publication date as shown on the page, e.g. `8 jan 21`.
pub fn format_published_at(raw: &str) -> Result<String, SimpleError> {
    let naive = parse_iso(raw)
        .ok_or_else(|| SimpleError::new(format!("invalid publication date: {}", raw)))?;
    Ok(Utc
        .from_utc_datetime(&naive)
        .format_localized("%-d %b %y", Locale::pt_BR)
        .to_string())
}

pub fn to_simple(e: Box<dyn Error + Send + Sync>) -> SimpleError {
    SimpleError::new(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_string() {
        assert_eq!(convert_duration_to_time_string(0), "00:00:00");
        assert_eq!(convert_duration_to_time_string(3981), "01:06:21");
        assert_eq!(convert_duration_to_time_string(1470), "00:24:30");
        assert_eq!(convert_duration_to_time_string(90_000), "25:00:00");
    }

    #[test]
    fn published_at_formats() {
        init_log();
        assert_eq!(format_published_at("2021-01-22 10:00:00").unwrap(), "22 jan 21");
        assert_eq!(format_published_at("2021-01-08T10:00:00").unwrap(), "8 jan 21");
        assert_eq!(format_published_at("2020-12-31").unwrap(), "31 dez 20");
        assert_eq!(
            format_published_at("2021-02-05T23:30:00-03:00").unwrap(),
            "5 fev 21"
        );
        assert_eq!(
            format_published_at("2021-03-01 08:15:00.250").unwrap(),
            "1 mar 21"
        );
        assert_eq!(format_published_at("2021-01-22T10:00:00Z").unwrap(), "22 jan 21");
        assert_eq!(format_published_at("2021-01-22T10:00Z").unwrap(), "22 jan 21");
        assert_eq!(format_published_at("2021-01-22T10Z").unwrap(), "22 jan 21");
        assert_eq!(format_published_at("2021-04-30T22:00+0300").unwrap(), "30 abr 21");
        assert_eq!(format_published_at("2021-01").unwrap(), "1 jan 21");
        assert_eq!(format_published_at("2021").unwrap(), "1 jan 21");
    }

    #[test]
    fn published_at_invalid() {
        assert!(format_published_at("ontem").is_err());
        assert!(format_published_at("").is_err());
        assert!(format_published_at("2021-13-01").is_err());
        assert!(format_published_at("2021-01-22T10:00+3").is_err());
        assert!(format_published_at("2021-01-22T25:00").is_err());
    }

    #[test]
    fn simple_from_boxed() {
        let e: Box<dyn Error + Send + Sync> = Box::new(SimpleError::new("boom"));
        assert_eq!(to_simple(e).as_str(), "boom");
    }
}
