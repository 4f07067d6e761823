//! Shift records.
//!
//! All functions take a plain connection so callers decide the transaction
//! boundary. The `(employee_id, shift_date, shift_type)` unique constraint
//! is the authoritative duplicate check; violations come back as
//! [`SchedulerError::StorageConflict`].

use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, SqliteConnection};

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{MonthAnchor, NewShift, Shift, ShiftKey, ShiftType};

use super::pool::conflict_or_database;

const SHIFT_COLUMNS: &str =
    "id, employee_id, shift_date, shift_type, start_time, end_time, is_weekend, is_available";

#[derive(FromRow)]
struct ShiftRow {
    id: i64,
    employee_id: i64,
    shift_date: NaiveDate,
    shift_type: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
    is_weekend: bool,
    is_available: bool,
}

impl TryFrom<ShiftRow> for Shift {
    type Error = SchedulerError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        let shift_type = row.shift_type.parse::<ShiftType>().map_err(|e| {
            SchedulerError::CorruptRecord {
                table: "shifts".to_string(),
                message: format!("row {}: {}", row.id, e),
            }
        })?;

        Ok(Shift {
            id: row.id,
            employee_id: row.employee_id,
            date: row.shift_date,
            shift_type,
            start_time: row.start_time,
            end_time: row.end_time,
            is_weekend: row.is_weekend,
            is_available: row.is_available,
        })
    }
}

fn into_shifts(rows: Vec<ShiftRow>) -> SchedulerResult<Vec<Shift>> {
    rows.into_iter().map(Shift::try_from).collect()
}

/// Looks up one shift by id.
pub async fn find(conn: &mut SqliteConnection, id: i64) -> SchedulerResult<Option<Shift>> {
    let sql = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1");
    let row = sqlx::query_as::<_, ShiftRow>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    row.map(Shift::try_from).transpose()
}

/// Whether a shift with this natural key is already stored.
pub async fn exists(conn: &mut SqliteConnection, key: &ShiftKey) -> SchedulerResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM shifts WHERE employee_id = ?1 AND shift_date = ?2 AND shift_type = ?3",
    )
    .bind(key.employee_id)
    .bind(key.date)
    .bind(key.shift_type.code())
    .fetch_optional(conn)
    .await?;

    Ok(found.is_some())
}

/// Stores a new shift and returns it with its assigned id.
pub async fn insert(conn: &mut SqliteConnection, shift: &NewShift) -> SchedulerResult<Shift> {
    let id = sqlx::query(
        "INSERT INTO shifts (
            employee_id,
            shift_date,
            shift_type,
            start_time,
            end_time,
            is_weekend,
            is_available
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(shift.employee_id())
    .bind(shift.date())
    .bind(shift.shift_type().code())
    .bind(shift.start_time())
    .bind(shift.end_time())
    .bind(shift.is_weekend())
    .bind(shift.is_available())
    .execute(conn)
    .await
    .map_err(conflict_or_database)?
    .last_insert_rowid();

    Ok(shift.clone().into_shift(id))
}

/// Deletes a shift. Returns false if no such shift existed.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> SchedulerResult<bool> {
    let result = sqlx::query("DELETE FROM shifts WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Sets the availability flag. Returns false if no such shift existed.
pub async fn set_availability(
    conn: &mut SqliteConnection,
    id: i64,
    is_available: bool,
) -> SchedulerResult<bool> {
    let result = sqlx::query("UPDATE shifts SET is_available = ?1 WHERE id = ?2")
        .bind(is_available)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Every shift of one employee dated within `month`.
pub async fn list_for_employee_month(
    conn: &mut SqliteConnection,
    employee_id: i64,
    month: MonthAnchor,
) -> SchedulerResult<Vec<Shift>> {
    list(conn, Some(employee_id), Some(month)).await
}

/// Shifts filtered by employee and month, ordered by date, type and id.
/// `None` leaves that dimension unfiltered.
pub async fn list(
    conn: &mut SqliteConnection,
    employee_id: Option<i64>,
    month: Option<MonthAnchor>,
) -> SchedulerResult<Vec<Shift>> {
    let sql = format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts
         WHERE (?1 IS NULL OR employee_id = ?1)
           AND (?2 IS NULL OR shift_date BETWEEN ?2 AND ?3)
         ORDER BY shift_date, shift_type, id"
    );

    let rows = sqlx::query_as::<_, ShiftRow>(&sql)
        .bind(employee_id)
        .bind(month.map(|m| m.first_day()))
        .bind(month.map(|m| m.last_day()))
        .fetch_all(conn)
        .await?;

    into_shifts(rows)
}
