//! The shift scheduler service.
//!
//! [`ShiftScheduler`] is the entry point for every shift mutation and
//! read. Each mutation runs in one transaction:
//!
//! 1. Authorize the requester (before touching storage)
//! 2. Derive the stored fields with [`NewShift::derive`]
//! 3. Pre-check the natural key, then write
//! 4. Commit
//! 5. Trigger recalculation for every affected month
//!
//! The pre-check in step 3 only gives a friendlier early exit. The unique
//! constraint decides; its violation is reported as `DuplicateShift`.

use chrono::NaiveDate;

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{
    Employee, MonthAnchor, MonthlyWorkingHours, NewShift, Requester, Shift, ShiftKey, ShiftType,
};
use crate::storage::{Database, employees, monthly_hours, shifts};

use super::authorization::{self, Visibility};
use super::recalculation::Recalculator;

/// Input for [`ShiftScheduler::create_shift`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShift {
    /// The employee the shift is for. Employees may leave this unset to mean
    /// themselves; managers and admins must set it.
    pub employee_id: Option<i64>,
    /// The shift date.
    pub date: NaiveDate,
    /// The shift type.
    pub shift_type: ShiftType,
    /// Availability flag. Unset means `true` for employees and `false` for
    /// managers and admins.
    pub is_available: Option<bool>,
}

impl CreateShift {
    /// A shift for a named employee.
    pub fn new(employee_id: i64, date: NaiveDate, shift_type: ShiftType) -> Self {
        Self {
            employee_id: Some(employee_id),
            date,
            shift_type,
            is_available: None,
        }
    }

    /// A shift for the requester's own employee record.
    pub fn for_self(date: NaiveDate, shift_type: ShiftType) -> Self {
        Self {
            employee_id: None,
            date,
            shift_type,
            is_available: None,
        }
    }

    /// Sets the availability flag explicitly.
    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }
}

/// Manages shifts and keeps monthly working hours in step with them.
///
/// # Example
///
/// ```no_run
/// use shift_scheduler::models::{Requester, ShiftType};
/// use shift_scheduler::scheduling::{CreateShift, ShiftScheduler};
/// use shift_scheduler::storage::Database;
/// use chrono::NaiveDate;
///
/// # async fn run() -> shift_scheduler::error::SchedulerResult<()> {
/// let scheduler = ShiftScheduler::new(Database::in_memory().await?);
/// let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
///
/// let shift = scheduler
///     .create_shift(CreateShift::new(1, date, ShiftType::Day), &Requester::manager(100))
///     .await?;
/// println!("Created shift {}", shift.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShiftScheduler {
    db: Database,
    recalculator: Recalculator,
}

impl ShiftScheduler {
    /// Creates a scheduler over `db`.
    pub fn new(db: Database) -> Self {
        let recalculator = Recalculator::new(db.clone());
        Self { db, recalculator }
    }

    /// Registers or refreshes an employee record so shifts can reference it.
    pub async fn register_employee(&self, employee: &Employee) -> SchedulerResult<()> {
        let mut conn = self.db.acquire().await?;
        employees::upsert(&mut conn, employee).await?;
        tracing::debug!(employee_id = employee.id, "Employee registered");
        Ok(())
    }

    /// Creates a shift.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if an employee names another employee
    /// - `MissingField` if a manager or admin names no employee
    /// - `NotFound` if the employee does not exist
    /// - `DuplicateShift` if the employee already has this shift type on
    ///   this date
    pub async fn create_shift(
        &self,
        request: CreateShift,
        requester: &Requester,
    ) -> SchedulerResult<Shift> {
        let employee_id = authorization::target_employee(requester, request.employee_id)?;
        let is_available = request
            .is_available
            .unwrap_or_else(|| authorization::default_availability(requester));

        let new_shift = NewShift::derive(employee_id, request.date, request.shift_type, is_available);
        let shift = self.insert_shift(new_shift).await?;

        tracing::info!(
            shift_id = shift.id,
            employee_id = shift.employee_id,
            date = %shift.date,
            shift_type = %shift.shift_type,
            is_available = shift.is_available,
            requested_by = requester.user_id,
            "Shift created"
        );

        Ok(shift)
    }

    /// Copies a shift pattern onto `date` as an assigned shift
    /// (availability false). Managers and admins only.
    pub async fn copy_shift(
        &self,
        employee_id: i64,
        date: NaiveDate,
        shift_type: ShiftType,
        requester: &Requester,
    ) -> SchedulerResult<Shift> {
        authorization::require_manager(requester, "copy shifts")?;

        let shift = self
            .insert_shift(NewShift::derive(employee_id, date, shift_type, false))
            .await?;

        tracing::info!(
            shift_id = shift.id,
            employee_id,
            date = %date,
            shift_type = %shift_type,
            requested_by = requester.user_id,
            "Shift copied"
        );

        Ok(shift)
    }

    /// Moves a shift to `new_date`. Managers and admins only.
    ///
    /// The replacement is inserted and the original deleted in the same
    /// transaction, so a failed move leaves the original in place. The moved
    /// shift gets a new id and keeps its type and availability.
    pub async fn move_shift(
        &self,
        shift_id: i64,
        new_date: NaiveDate,
        requester: &Requester,
    ) -> SchedulerResult<Shift> {
        authorization::require_manager(requester, "move shifts")?;

        let mut tx = self.db.begin().await?;

        let original = shifts::find(&mut tx, shift_id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("Shift", shift_id))?;

        let replacement = NewShift::derive(
            original.employee_id,
            new_date,
            original.shift_type,
            original.is_available,
        );
        let key = replacement.key();
        if shifts::exists(&mut tx, &key).await? {
            return Err(key.duplicate_error());
        }

        let moved = shifts::insert(&mut tx, &replacement)
            .await
            .map_err(|e| duplicate_on_conflict(e, &key))?;
        shifts::delete(&mut tx, original.id).await?;

        tx.commit().await?;

        tracing::info!(
            shift_id = moved.id,
            previous_shift_id = original.id,
            employee_id = moved.employee_id,
            from = %original.date,
            to = %moved.date,
            requested_by = requester.user_id,
            "Shift moved"
        );

        self.recalculator
            .trigger(original.employee_id, original.month())
            .await;
        if moved.month() != original.month() {
            self.recalculator.trigger(moved.employee_id, moved.month()).await;
        }

        Ok(moved)
    }

    /// Approves an availability request by clearing its availability flag.
    /// Managers and admins only. Hours do not depend on availability, so no
    /// recalculation runs.
    pub async fn approve_shift(&self, shift_id: i64, requester: &Requester) -> SchedulerResult<()> {
        authorization::require_manager(requester, "approve shifts")?;

        let mut conn = self.db.acquire().await?;
        if !shifts::set_availability(&mut conn, shift_id, false).await? {
            return Err(SchedulerError::not_found("Shift", shift_id));
        }

        tracing::info!(shift_id, requested_by = requester.user_id, "Shift approved");
        Ok(())
    }

    /// Rejects a shift by deleting it. Managers and admins only.
    pub async fn reject_shift(&self, shift_id: i64, requester: &Requester) -> SchedulerResult<()> {
        authorization::require_manager(requester, "reject shifts")?;

        let removed = self.remove_shift(shift_id, requester).await?;
        tracing::info!(
            shift_id,
            employee_id = removed.employee_id,
            requested_by = requester.user_id,
            "Shift rejected"
        );
        Ok(())
    }

    /// Deletes a shift. Managers and admins may delete any shift; employees
    /// only their own.
    pub async fn delete_shift(&self, shift_id: i64, requester: &Requester) -> SchedulerResult<()> {
        if authorization::visibility(requester) == Visibility::Nothing {
            return Err(SchedulerError::forbidden("delete shifts"));
        }

        let removed = self.remove_shift(shift_id, requester).await?;
        tracing::info!(
            shift_id,
            employee_id = removed.employee_id,
            requested_by = requester.user_id,
            "Shift deleted"
        );
        Ok(())
    }

    /// Shifts visible to the requester, optionally limited to one month.
    pub async fn list_shifts(
        &self,
        requester: &Requester,
        month: Option<MonthAnchor>,
    ) -> SchedulerResult<Vec<Shift>> {
        let employee_filter = match authorization::visibility(requester) {
            Visibility::All => None,
            Visibility::Only(employee_id) => Some(employee_id),
            Visibility::Nothing => return Ok(Vec::new()),
        };

        let mut conn = self.db.acquire().await?;
        shifts::list(&mut conn, employee_filter, month).await
    }

    /// Working hours of `employee_id` for `month`.
    ///
    /// Employees may only read their own. A missing record is rebuilt from
    /// the employee's shifts and stored before it is returned.
    pub async fn monthly_hours(
        &self,
        employee_id: i64,
        month: MonthAnchor,
        requester: &Requester,
    ) -> SchedulerResult<MonthlyWorkingHours> {
        authorization::require_acts_for(requester, employee_id, "view other employees' hours")?;

        let stored = {
            let mut conn = self.db.acquire().await?;
            if !employees::exists(&mut conn, employee_id).await? {
                return Err(SchedulerError::not_found("Employee", employee_id));
            }
            monthly_hours::find(&mut conn, employee_id, month).await?
        };

        match stored {
            Some(hours) => Ok(hours),
            None => {
                tracing::debug!(employee_id, month = %month, "No stored hours, recomputing");
                self.recalculator.recompute(employee_id, month).await
            }
        }
    }

    /// Stored monthly hours visible to the requester, newest month first.
    pub async fn list_monthly_hours(
        &self,
        requester: &Requester,
    ) -> SchedulerResult<Vec<MonthlyWorkingHours>> {
        let employee_filter = match authorization::visibility(requester) {
            Visibility::All => None,
            Visibility::Only(employee_id) => Some(employee_id),
            Visibility::Nothing => return Ok(Vec::new()),
        };

        let mut conn = self.db.acquire().await?;
        monthly_hours::list(&mut conn, employee_filter).await
    }

    /// Rebuilds `month` for every employee. Managers and admins only.
    pub async fn recalculate_month(
        &self,
        month: MonthAnchor,
        requester: &Requester,
    ) -> SchedulerResult<Vec<MonthlyWorkingHours>> {
        authorization::require_manager(requester, "recalculate working hours")?;
        self.recalculator.recalculate_all(month).await
    }

    async fn insert_shift(&self, new_shift: NewShift) -> SchedulerResult<Shift> {
        let key = new_shift.key();
        let mut tx = self.db.begin().await?;

        if !employees::exists(&mut tx, key.employee_id).await? {
            return Err(SchedulerError::not_found("Employee", key.employee_id));
        }
        if shifts::exists(&mut tx, &key).await? {
            tracing::debug!(
                employee_id = key.employee_id,
                date = %key.date,
                shift_type = %key.shift_type,
                "Duplicate shift rejected"
            );
            return Err(key.duplicate_error());
        }

        let shift = shifts::insert(&mut tx, &new_shift)
            .await
            .map_err(|e| duplicate_on_conflict(e, &key))?;

        tx.commit().await?;

        self.recalculator.trigger(shift.employee_id, shift.month()).await;
        Ok(shift)
    }

    async fn remove_shift(&self, shift_id: i64, requester: &Requester) -> SchedulerResult<Shift> {
        let mut tx = self.db.begin().await?;

        let shift = shifts::find(&mut tx, shift_id)
            .await?
            .ok_or_else(|| SchedulerError::not_found("Shift", shift_id))?;
        authorization::require_acts_for(requester, shift.employee_id, "delete this shift")?;

        shifts::delete(&mut tx, shift.id).await?;
        tx.commit().await?;

        self.recalculator.trigger(shift.employee_id, shift.month()).await;
        Ok(shift)
    }
}

/// A unique-constraint race that slipped past the pre-check is still a
/// duplicate to the caller.
fn duplicate_on_conflict(error: SchedulerError, key: &ShiftKey) -> SchedulerError {
    match error {
        SchedulerError::StorageConflict { message } => {
            tracing::warn!(
                employee_id = key.employee_id,
                date = %key.date,
                shift_type = %key.shift_type,
                %message,
                "Unique constraint caught concurrent duplicate"
            );
            key.duplicate_error()
        }
        other => other,
    }
}
