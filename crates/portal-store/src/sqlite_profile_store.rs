use crate::{ProfileStore, Result as StoreErrorResult, StoreError};

use portal_core::{AccountStatus, ErrorLocation, ProfileCandidate, ProfileRecord, Role};

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// SQLite-backed profile store.
///
/// The upsert reads the current row, merges in Rust, then writes the
/// merged row with `ON CONFLICT DO UPDATE`. Two physically concurrent
/// upserts resolve last-write-wins, which the reconciliation protocol
/// tolerates by design.
pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run the schema migrations for this store
    pub async fn migrate(pool: &SqlitePool) -> StoreErrorResult<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| StoreError::Unavailable {
                message: format!("migration failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Fetch a row regardless of the deleted flag (upserts revive)
    async fn find_any(&self, subject_id: &str) -> StoreErrorResult<Option<ProfileRecord>> {
        let row = sqlx::query(
            r#"
                SELECT subject_id, email, display_name, phone_number, photo_url,
                    first_name, last_name, university, college, department, course,
                    year_of_study, semester, unit, role, status, deleted,
                    created_at, updated_at
                FROM profiles
                WHERE subject_id = ?
            "#,
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_record(&r)).transpose()
    }
}

#[track_caller]
fn row_to_record(row: &SqliteRow) -> StoreErrorResult<ProfileRecord> {
    let subject_id: String = row.try_get("subject_id")?;

    let corrupt = |message: String| StoreError::CorruptRecord {
        subject_id: subject_id.clone(),
        message,
        location: ErrorLocation::from(Location::caller()),
    };

    let role: String = row.try_get("role")?;
    let status: String = row.try_get("status")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(ProfileRecord {
        subject_id: subject_id.clone(),
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        phone_number: row.try_get("phone_number")?,
        photo_url: row.try_get("photo_url")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        university: row.try_get("university")?,
        college: row.try_get("college")?,
        department: row.try_get("department")?,
        course: row.try_get("course")?,
        year_of_study: row.try_get("year_of_study")?,
        semester: row.try_get("semester")?,
        unit: row.try_get("unit")?,
        role: Role::from_str(&role)
            .map_err(|e| corrupt(format!("invalid role: {}", e)))?,
        status: AccountStatus::from_str(&status)
            .map_err(|e| corrupt(format!("invalid status: {}", e)))?,
        deleted: row.try_get::<i64, _>("deleted")? != 0,
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| corrupt("invalid created_at timestamp".to_string()))?,
        updated_at: DateTime::from_timestamp(updated_at, 0)
            .ok_or_else(|| corrupt("invalid updated_at timestamp".to_string()))?,
    })
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn find_by_subject_id(
        &self,
        subject_id: &str,
    ) -> StoreErrorResult<Option<ProfileRecord>> {
        Ok(self
            .find_any(subject_id)
            .await?
            .filter(|r| !r.is_deleted()))
    }

    async fn upsert(
        &self,
        subject_id: &str,
        candidate: &ProfileCandidate,
    ) -> StoreErrorResult<ProfileRecord> {
        if subject_id.is_empty() {
            return Err(StoreError::CorruptRecord {
                subject_id: subject_id.to_string(),
                message: "subject id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let record = match self.find_any(subject_id).await? {
            Some(existing) => {
                let mut merged = existing;
                merged.deleted = false;
                merged.apply(candidate);
                merged
            }
            None => ProfileRecord::from_candidate(subject_id.to_string(), candidate),
        };

        let created_at = record.created_at.timestamp();
        let updated_at = record.updated_at.timestamp();
        let role = record.role.as_str();
        let status = record.status.as_str();
        let deleted = record.deleted as i64;

        sqlx::query(
            r#"
                INSERT INTO profiles (
                    subject_id, email, display_name, phone_number, photo_url,
                    first_name, last_name, university, college, department, course,
                    year_of_study, semester, unit, role, status, deleted,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(subject_id) DO UPDATE SET
                    email = excluded.email,
                    display_name = excluded.display_name,
                    phone_number = excluded.phone_number,
                    photo_url = excluded.photo_url,
                    first_name = excluded.first_name,
                    last_name = excluded.last_name,
                    university = excluded.university,
                    college = excluded.college,
                    department = excluded.department,
                    course = excluded.course,
                    year_of_study = excluded.year_of_study,
                    semester = excluded.semester,
                    unit = excluded.unit,
                    role = excluded.role,
                    status = excluded.status,
                    deleted = excluded.deleted,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.subject_id)
        .bind(&record.email)
        .bind(&record.display_name)
        .bind(&record.phone_number)
        .bind(&record.photo_url)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.university)
        .bind(&record.college)
        .bind(&record.department)
        .bind(&record.course)
        .bind(&record.year_of_study)
        .bind(&record.semester)
        .bind(&record.unit)
        .bind(role)
        .bind(status)
        .bind(deleted)
        .bind(created_at)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn soft_delete(&self, subject_id: &str) -> StoreErrorResult<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                UPDATE profiles
                SET deleted = 1, updated_at = ?
                WHERE subject_id = ? AND deleted = 0
            "#,
        )
        .bind(now)
        .bind(subject_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> StoreErrorResult<Vec<ProfileRecord>> {
        let rows = sqlx::query(
            r#"
                SELECT subject_id, email, display_name, phone_number, photo_url,
                    first_name, last_name, university, college, department, course,
                    year_of_study, semester, unit, role, status, deleted,
                    created_at, updated_at
                FROM profiles
                WHERE deleted = 0
                ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }
}
