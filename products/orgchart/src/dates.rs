use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::cell::CellValue;

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch.
const SERIAL_UNIX_OFFSET: f64 = 25569.0;
const MILLIS_PER_DAY: f64 = 86_400.0 * 1000.0;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Coerce a cell into a calendar date, or `None` when it cannot be read as one.
pub fn coerce_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Number(serial) => from_serial(*serial),
        CellValue::Text(text) => parse_text(text.trim()),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Convert a spreadsheet date serial to the UTC calendar date it denotes.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial == 0.0 {
        return None;
    }
    let millis = ((serial - SERIAL_UNIX_OFFSET) * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
}

fn parse_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc().date());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    text.parse::<f64>().ok().and_then(from_serial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn converts_spreadsheet_serials() {
        assert_eq!(coerce_date(&CellValue::Number(25569.0)), Some(date(1970, 1, 1)));
        assert_eq!(coerce_date(&CellValue::Number(45292.0)), Some(date(2024, 1, 1)));
        assert_eq!(coerce_date(&CellValue::Number(45292.75)), Some(date(2024, 1, 1)));
    }

    #[test]
    fn zero_and_non_finite_serials_are_unset() {
        assert_eq!(coerce_date(&CellValue::Number(0.0)), None);
        assert_eq!(coerce_date(&CellValue::Number(f64::NAN)), None);
        assert_eq!(coerce_date(&CellValue::Number(1e300)), None);
    }

    #[test]
    fn parses_common_text_forms() {
        let expected = Some(date(1990, 5, 17));
        assert_eq!(coerce_date(&"1990-05-17".into()), expected);
        assert_eq!(coerce_date(&" 1990/05/17 ".into()), expected);
        assert_eq!(coerce_date(&"05/17/1990".into()), expected);
        assert_eq!(coerce_date(&"17/05/1990".into()), expected);
        assert_eq!(coerce_date(&"1990-05-17T08:30:00Z".into()), expected);
        assert_eq!(coerce_date(&"1990-05-17T08:30:00".into()), expected);
    }

    #[test]
    fn month_first_wins_when_ambiguous() {
        assert_eq!(coerce_date(&"03/04/2020".into()), Some(date(2020, 3, 4)));
    }

    #[test]
    fn garbage_is_unset() {
        assert_eq!(coerce_date(&"amanhã".into()), None);
        assert_eq!(coerce_date(&"".into()), None);
        assert_eq!(coerce_date(&"2020-13-45".into()), None);
        assert_eq!(coerce_date(&CellValue::Bool(true)), None);
        assert_eq!(coerce_date(&CellValue::Empty), None);
    }
}
