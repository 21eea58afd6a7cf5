//! Row parsing and coercion for delimited printer logs.

use chrono::{DateTime, NaiveDateTime};
use csv::StringRecord;

use crate::db::log_repo::LogRecord;
use crate::error::RowError;

/// Normalized representation stored in `PrintTime`.
const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Positions of the recognized columns within a file's header row.
///
/// Required columns missing from the header are reported per row, so a file
/// with a broken header logs every row as skipped and is still relocated.
pub(crate) struct ColumnMap {
    printer: Option<usize>,
    user: Option<usize>,
    document: Option<usize>,
    total_pages: Option<usize>,
    print_time: Option<usize>,
    department: Option<usize>,
}

impl ColumnMap {
    pub(crate) fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            printer: find("Printer"),
            user: find("User"),
            document: find("Document"),
            total_pages: find("TotalPages"),
            print_time: find("PrintTime"),
            department: find("Department"),
        }
    }
}

fn required<'a>(
    record: &'a StringRecord,
    index: Option<usize>,
    field: &'static str,
) -> Result<&'a str, RowError> {
    match index.and_then(|i| record.get(i)) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RowError::MissingField { field }),
    }
}

/// Parses one CSV row into a storable record. Any coercion failure skips
/// the row without aborting the file.
pub(crate) fn parse_record(
    columns: &ColumnMap,
    record: &StringRecord,
) -> Result<LogRecord, RowError> {
    let printer = required(record, columns.printer, "Printer")?;
    let user = required(record, columns.user, "User")?;
    let document = required(record, columns.document, "Document")?;

    let pages_raw = required(record, columns.total_pages, "TotalPages")?;
    let total_pages: i64 = pages_raw.parse().map_err(|_| RowError::BadPageCount {
        value: pages_raw.to_string(),
    })?;

    let time_raw = required(record, columns.print_time, "PrintTime")?;
    let print_time = normalize_timestamp(time_raw)?;

    let department = columns
        .department
        .and_then(|i| record.get(i))
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(LogRecord {
        printer: printer.to_string(),
        user: user.to_string(),
        document: document.to_string(),
        total_pages,
        department,
        print_time,
    })
}

/// Normalizes an ISO-8601 timestamp into `YYYY-MM-DD HH:MM:SS`.
///
/// Accepts an offset-aware form (`2024-03-01T10:15:00Z`,
/// `2024-03-01T10:15:00+02:00`) or a naive one, with optional fractional
/// seconds. Offset-aware values keep their local clock fields; no timezone
/// conversion is applied.
pub fn normalize_timestamp(raw: &str) -> Result<String, RowError> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Ok(aware.naive_local().format(STORED_FORMAT).to_string());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.format(STORED_FORMAT).to_string());
        }
    }

    Err(RowError::BadTimestamp {
        value: raw.to_string(),
    })
}
