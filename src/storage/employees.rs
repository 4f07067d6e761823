//! Employee records.
//!
//! Employees are provisioned by the account service; the scheduler only
//! needs to know that an id exists.

use sqlx::{FromRow, SqliteConnection};

use crate::error::SchedulerResult;
use crate::models::Employee;

#[derive(FromRow)]
struct EmployeeRow {
    id: i64,
    display_name: String,
    designation: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            display_name: row.display_name,
            designation: row.designation,
        }
    }
}

/// Inserts an employee, or refreshes its name and designation if the id is
/// already known.
pub async fn upsert(conn: &mut SqliteConnection, employee: &Employee) -> SchedulerResult<()> {
    sqlx::query(
        "INSERT INTO employees (id, display_name, designation) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             display_name = excluded.display_name,
             designation = excluded.designation",
    )
    .bind(employee.id)
    .bind(&employee.display_name)
    .bind(&employee.designation)
    .execute(conn)
    .await?;

    Ok(())
}

/// Looks up one employee.
pub async fn find(conn: &mut SqliteConnection, id: i64) -> SchedulerResult<Option<Employee>> {
    let row = sqlx::query_as::<_, EmployeeRow>(
        "SELECT id, display_name, designation FROM employees WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(Employee::from))
}

/// Whether an employee with this id exists.
pub async fn exists(conn: &mut SqliteConnection, id: i64) -> SchedulerResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE id = ?1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(found.is_some())
}

/// Every employee id, ascending.
pub async fn list_ids(conn: &mut SqliteConnection) -> SchedulerResult<Vec<i64>> {
    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM employees ORDER BY id")
        .fetch_all(conn)
        .await?;

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn employee(id: i64, name: &str) -> Employee {
        Employee {
            id,
            display_name: name.to_string(),
            designation: "Care Worker".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_find() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        upsert(&mut conn, &employee(7, "Sam")).await.unwrap();
        upsert(&mut conn, &employee(7, "Sam Lee")).await.unwrap();

        let found = find(&mut conn, 7).await.unwrap().unwrap();
        assert_eq!(found.display_name, "Sam Lee");
        assert!(exists(&mut conn, 7).await.unwrap());
        assert!(!exists(&mut conn, 8).await.unwrap());
        assert!(find(&mut conn, 8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_ids_is_sorted() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        for id in [3, 1, 2] {
            upsert(&mut conn, &employee(id, "Worker")).await.unwrap();
        }

        assert_eq!(list_ids(&mut conn).await.unwrap(), vec![1, 2, 3]);
    }
}
