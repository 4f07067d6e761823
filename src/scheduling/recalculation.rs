//! Recalculation trigger.
//!
//! Rebuilds the stored [`MonthlyWorkingHours`] for an employee and month
//! from the committed shift set. Callers invoke it only after their own
//! mutation has committed.

use crate::calculation::compute_monthly_hours;
use crate::error::SchedulerResult;
use crate::models::{MonthAnchor, MonthlyWorkingHours};
use crate::storage::{Database, employees, monthly_hours, shifts};

/// Recomputes and stores monthly working hours.
#[derive(Debug, Clone)]
pub struct Recalculator {
    db: Database,
}

impl Recalculator {
    /// Creates a recalculator over `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Rebuilds and overwrites the record for `employee_id` in `month`.
    ///
    /// Reads the full shift set for the month, so the stored record never
    /// depends on what it held before.
    pub async fn recompute(
        &self,
        employee_id: i64,
        month: MonthAnchor,
    ) -> SchedulerResult<MonthlyWorkingHours> {
        let mut tx = self.db.begin().await?;

        let month_shifts = shifts::list_for_employee_month(&mut tx, employee_id, month).await?;
        let hours = compute_monthly_hours(employee_id, month, &month_shifts);
        monthly_hours::upsert(&mut tx, &hours).await?;

        tx.commit().await?;

        tracing::debug!(
            employee_id,
            month = %month,
            shifts = month_shifts.len(),
            total_hours = %hours.total_hours,
            "Monthly hours recomputed"
        );

        Ok(hours)
    }

    /// Recomputes after a committed mutation.
    ///
    /// Failures are logged and not returned: the mutation already succeeded
    /// and the next write for this employee and month rebuilds the record.
    pub async fn trigger(&self, employee_id: i64, month: MonthAnchor) {
        if let Err(e) = self.recompute(employee_id, month).await {
            tracing::error!(
                employee_id,
                month = %month,
                error = %e,
                "Monthly hours recalculation failed"
            );
        }
    }

    /// Recomputes `month` for every known employee.
    pub async fn recalculate_all(
        &self,
        month: MonthAnchor,
    ) -> SchedulerResult<Vec<MonthlyWorkingHours>> {
        let employee_ids = {
            let mut conn = self.db.acquire().await?;
            employees::list_ids(&mut conn).await?
        };

        let mut results = Vec::with_capacity(employee_ids.len());
        for employee_id in employee_ids {
            results.push(self.recompute(employee_id, month).await?);
        }

        tracing::info!(month = %month, employees = results.len(), "Recalculated monthly hours");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, NewShift, ShiftType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn setup(shift_rows: &[(i64, &str, ShiftType)]) -> Database {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        for id in [1, 2] {
            let employee = Employee {
                id,
                display_name: format!("Employee {id}"),
                designation: String::new(),
            };
            employees::upsert(&mut conn, &employee).await.unwrap();
        }
        for (employee_id, date, shift_type) in shift_rows {
            let shift = NewShift::derive(*employee_id, make_date(date), *shift_type, false);
            shifts::insert(&mut conn, &shift).await.unwrap();
        }
        drop(conn);
        db
    }

    fn december() -> MonthAnchor {
        MonthAnchor::new(2024, 12).unwrap()
    }

    #[tokio::test]
    async fn test_recompute_stores_record() {
        let db = setup(&[
            (1, "2024-12-05", ShiftType::Evening),
            (1, "2024-12-06", ShiftType::Evening),
        ])
        .await;
        let recalculator = Recalculator::new(db.clone());

        let hours = recalculator.recompute(1, december()).await.unwrap();
        assert_eq!(hours.total_hours, dec("13"));
        assert_eq!(hours.weekday_hours, dec("13"));
        assert_eq!(hours.weekend_hours, dec("3"));
        assert_eq!(hours.after_19_hours, dec("3"));

        let mut conn = db.acquire().await.unwrap();
        let stored = monthly_hours::find(&mut conn, 1, december()).await.unwrap();
        assert_eq!(stored, Some(hours));
    }

    #[tokio::test]
    async fn test_recompute_twice_is_identical() {
        let db = setup(&[(1, "2024-12-07", ShiftType::Day)]).await;
        let recalculator = Recalculator::new(db.clone());

        let first = recalculator.recompute(1, december()).await.unwrap();
        let second = recalculator.recompute(1, december()).await.unwrap();
        assert_eq!(first, second);

        let mut conn = db.acquire().await.unwrap();
        assert_eq!(monthly_hours::list(&mut conn, Some(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recalculate_all_covers_every_employee() {
        let db = setup(&[(1, "2024-12-04", ShiftType::Day)]).await;
        let recalculator = Recalculator::new(db);

        let results = recalculator.recalculate_all(december()).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].total_hours, dec("7.5"));
        assert_eq!(results[1].total_hours, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_trigger_swallows_failures() {
        let db = setup(&[(1, "2024-12-04", ShiftType::Day)]).await;
        sqlx::query("DROP TABLE monthly_working_hours")
            .execute(db.pool())
            .await
            .unwrap();

        let recalculator = Recalculator::new(db.clone());
        assert!(recalculator.recompute(1, december()).await.is_err());
        recalculator.trigger(1, december()).await;
    }
}
