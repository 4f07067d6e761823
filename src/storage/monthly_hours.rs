//! Monthly working hours records.
//!
//! One row per `(employee_id, month_year)`. Writes always replace the whole
//! row, so the table never holds more than one record per employee and month.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, SqliteConnection};

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{MonthAnchor, MonthlyWorkingHours};

#[derive(FromRow)]
struct MonthlyHoursRow {
    employee_id: i64,
    month_year: NaiveDate,
    total_hours: String,
    weekday_hours: String,
    weekend_hours: String,
    after_19_hours: String,
}

fn parse_hours(column: &str, value: &str) -> SchedulerResult<Decimal> {
    Decimal::from_str(value).map_err(|e| SchedulerError::CorruptRecord {
        table: "monthly_working_hours".to_string(),
        message: format!("{column} '{value}': {e}"),
    })
}

impl TryFrom<MonthlyHoursRow> for MonthlyWorkingHours {
    type Error = SchedulerError;

    fn try_from(row: MonthlyHoursRow) -> Result<Self, Self::Error> {
        Ok(MonthlyWorkingHours {
            employee_id: row.employee_id,
            month_year: MonthAnchor::containing(row.month_year),
            total_hours: parse_hours("total_hours", &row.total_hours)?,
            weekday_hours: parse_hours("weekday_hours", &row.weekday_hours)?,
            weekend_hours: parse_hours("weekend_hours", &row.weekend_hours)?,
            after_19_hours: parse_hours("after_19_hours", &row.after_19_hours)?,
        })
    }
}

fn hours_text(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Creates or overwrites the record for the hours' employee and month.
pub async fn upsert(conn: &mut SqliteConnection, hours: &MonthlyWorkingHours) -> SchedulerResult<()> {
    sqlx::query(
        "INSERT INTO monthly_working_hours (
            employee_id,
            month_year,
            total_hours,
            weekday_hours,
            weekend_hours,
            after_19_hours
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(employee_id, month_year) DO UPDATE SET
            total_hours = excluded.total_hours,
            weekday_hours = excluded.weekday_hours,
            weekend_hours = excluded.weekend_hours,
            after_19_hours = excluded.after_19_hours",
    )
    .bind(hours.employee_id)
    .bind(hours.month_year.first_day())
    .bind(hours_text(hours.total_hours))
    .bind(hours_text(hours.weekday_hours))
    .bind(hours_text(hours.weekend_hours))
    .bind(hours_text(hours.after_19_hours))
    .execute(conn)
    .await?;

    Ok(())
}

/// The stored record for one employee and month, if any.
pub async fn find(
    conn: &mut SqliteConnection,
    employee_id: i64,
    month: MonthAnchor,
) -> SchedulerResult<Option<MonthlyWorkingHours>> {
    let row = sqlx::query_as::<_, MonthlyHoursRow>(
        "SELECT employee_id, month_year, total_hours, weekday_hours, weekend_hours, after_19_hours
         FROM monthly_working_hours
         WHERE employee_id = ?1 AND month_year = ?2",
    )
    .bind(employee_id)
    .bind(month.first_day())
    .fetch_optional(conn)
    .await?;

    row.map(MonthlyWorkingHours::try_from).transpose()
}

/// Stored records, newest month first. `None` lists every employee.
pub async fn list(
    conn: &mut SqliteConnection,
    employee_id: Option<i64>,
) -> SchedulerResult<Vec<MonthlyWorkingHours>> {
    let rows = sqlx::query_as::<_, MonthlyHoursRow>(
        "SELECT employee_id, month_year, total_hours, weekday_hours, weekend_hours, after_19_hours
         FROM monthly_working_hours
         WHERE (?1 IS NULL OR employee_id = ?1)
         ORDER BY month_year DESC, employee_id",
    )
    .bind(employee_id)
    .fetch_all(conn)
    .await?;

    rows.into_iter().map(MonthlyWorkingHours::try_from).collect()
}
