use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// A single cell as handed to the table segmenter.
///
/// `Missing` is distinct from `Text(String::new())`: a cell the workbook never
/// filled in separates tables, a cell holding an empty string does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// The cell's text, with missing cells read as empty text.
    pub fn as_str(&self) -> &str {
        match self {
            CellValue::Text(s) => s,
            CellValue::Missing => "",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CellValue::Text(s) => s,
            CellValue::Missing => String::new(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Missing,

            Data::String(s) => CellValue::Text(s.clone()),

            Data::Float(f) => CellValue::Text(format_float(*f)),

            Data::Int(i) => CellValue::Text(i.to_string()),

            Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),

            Data::Error(e) => CellValue::Text(e.to_string()),

            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                if dt.is_duration() || serial < 0.0 {
                    CellValue::Text(format_float(serial))
                } else {
                    CellValue::Text(excel_date_to_iso_string(serial))
                }
            }

            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Convert an Excel serial date (1900 date system) to an ISO 8601 string.
pub fn excel_date_to_iso_string(excel_date: f64) -> String {
    // Serial 60 is the phantom 1900-02-29
    let days = if excel_date > 59.0 {
        excel_date - 1.0
    } else {
        excel_date
    };

    let base_date = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or_default();
    let date = base_date + Duration::days(days.trunc() as i64);

    let seconds = (days.fract() * 86_400.0).round() as u32;
    if seconds == 0 {
        return date.format("%Y-%m-%d").to_string();
    }

    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)
        .unwrap_or_default();
    NaiveDateTime::new(date, time)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
