//! Insert and update operations for the `printer_logs` table.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// One printer-usage record as stored in `printer_logs`.
///
/// The table is append-only: no uniqueness constraint, duplicate rows are
/// allowed. `department` is NULL unless the source file carried one; the
/// enrichment phase overwrites it in place later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub printer: String,
    pub user: String,
    pub document: String,
    pub total_pages: i64,
    pub department: Option<String>,
    pub print_time: String,
}

impl LogRecord {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            printer: row.get("Printer")?,
            user: row.get("User")?,
            document: row.get("Document")?,
            total_pages: row.get("TotalPages")?,
            department: row.get("Department")?,
            print_time: row.get("PrintTime")?,
        })
    }
}

/// Inserts a batch of records inside a single transaction. The batch is
/// committed once; a failure rolls back the whole file's worth of rows.
pub fn insert_batch(db: &Database, records: &[LogRecord]) -> Result<usize, DatabaseError> {
    db.with_conn(|conn| {
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO printer_logs (Printer, User, Document, TotalPages, Department, PrintTime)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.printer,
                    record.user,
                    record.document,
                    record.total_pages,
                    record.department,
                    record.print_time,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    })
}

/// Sets the department for every record whose user matches exactly.
/// Returns the number of rows changed. Matching uses SQLite's default
/// BINARY collation, so comparison is case-sensitive.
pub fn update_department(
    db: &Database,
    user: &str,
    department: &str,
) -> Result<usize, DatabaseError> {
    db.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE printer_logs SET Department = ?1 WHERE User = ?2",
            params![department, user],
        )?;
        Ok(changed)
    })
}

/// Returns all records for a user, in insertion order.
pub fn find_by_user(db: &Database, user: &str) -> Result<Vec<LogRecord>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM printer_logs WHERE User = ?1 ORDER BY rowid",
        )?;
        let records = stmt
            .query_map(params![user], LogRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    })
}

/// Returns every stored record in insertion order.
pub fn all(db: &Database) -> Result<Vec<LogRecord>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM printer_logs ORDER BY rowid")?;
        let records = stmt
            .query_map([], LogRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    })
}

/// Counts all stored records.
pub fn count(db: &Database) -> Result<u64, DatabaseError> {
    db.with_conn(|conn| {
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM printer_logs", [], |r| r.get(0))?;
        Ok(count)
    })
}
