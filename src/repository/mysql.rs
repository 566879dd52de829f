use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::MySqlPool;
use sqlx::types::Json;
use tracing::{debug, error, info};

use super::{AttendanceRepository, PersonDirectory, SiteCatalog};
use crate::error::{AttendanceError, Result};
use crate::model::attendance::{AttendancePatch, AttendanceRecord, TeamMember};
use crate::model::person::Person;
use crate::model::site::Site;

const ATTENDANCE_COLUMNS: &str = r#"
    id, person_id, attendance_date, time_in, time_out, site_id, department,
    activities, image_in_url, image_out_url, members
"#;

const SITE_COLUMNS: &str = "id, site_code, site_name, location_address, is_active";

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: String,
    person_id: String,
    attendance_date: NaiveDate,
    time_in: Option<DateTime<Utc>>,
    time_out: Option<DateTime<Utc>>,
    site_id: Option<String>,
    department: Option<String>,
    activities: Option<String>,
    image_in_url: Option<String>,
    image_out_url: Option<String>,
    members: Json<Vec<TeamMember>>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        AttendanceRecord {
            id: row.id,
            person_id: row.person_id,
            date: row.attendance_date,
            time_in: row.time_in,
            time_out: row.time_out,
            site_id: row.site_id,
            department: row.department,
            activities: row.activities,
            image_in_url: row.image_in_url,
            image_out_url: row.image_out_url,
            members: row.members.0,
        }
    }
}

/// Only a unique-key collision on (person_id, attendance_date) counts as a
/// duplicate. Foreign-key and other integrity failures share SQLSTATE 23000.
fn is_duplicate_entry(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, record_id: &str) -> Result<Option<AttendanceRecord>> {
        let sql = format!("SELECT {} FROM attendance_logs WHERE id = ?", ATTENDANCE_COLUMNS);
        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(record_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AttendanceRecord::from))
    }

    /// Insert-if-absent, mirrors an upsert with an empty update set.
    pub async fn seed(&self, people: &[Person], sites: &[Site]) -> anyhow::Result<()> {
        for site in sites {
            sqlx::query(
                r#"
                INSERT IGNORE INTO sites (id, site_code, site_name, location_address, is_active)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&site.id)
            .bind(&site.site_code)
            .bind(&site.site_name)
            .bind(&site.location_address)
            .bind(site.is_active)
            .execute(&self.pool)
            .await?;
        }

        for person in people {
            sqlx::query(
                r#"
                INSERT IGNORE INTO people
                    (id, email, first_name, last_name, department, work_category, position)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&person.id)
            .bind(person.email.to_lowercase())
            .bind(&person.first_name)
            .bind(&person.last_name)
            .bind(&person.department)
            .bind(person.work_category.to_string())
            .bind(&person.position)
            .execute(&self.pool)
            .await?;
        }

        info!(sites = sites.len(), people = people.len(), "Demo data seeded");
        Ok(())
    }
}

#[async_trait]
impl PersonDirectory for MySqlStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, email, first_name, last_name, department, work_category, position
            FROM people
            WHERE LOWER(email) = ?
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }
}

#[async_trait]
impl SiteCatalog for MySqlStore {
    async fn list_active(&self) -> Result<Vec<Site>> {
        let sql = format!(
            "SELECT {} FROM sites WHERE is_active = TRUE ORDER BY site_name ASC",
            SITE_COLUMNS
        );
        let sites = sqlx::query_as::<_, Site>(&sql).fetch_all(&self.pool).await?;
        Ok(sites)
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Site>> {
        let sql = format!(
            "SELECT {} FROM sites WHERE id = ? AND is_active = TRUE",
            SITE_COLUMNS
        );
        let site = sqlx::query_as::<_, Site>(&sql)
            .bind(id.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(site)
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Site>> {
        let sql = format!(
            "SELECT {} FROM sites WHERE LOWER(site_code) = ? AND is_active = TRUE",
            SITE_COLUMNS
        );
        let site = sqlx::query_as::<_, Site>(&sql)
            .bind(code.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(site)
    }
}

#[async_trait]
impl AttendanceRepository for MySqlStore {
    async fn find_by_person_and_date(
        &self,
        person_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let sql = format!(
            "SELECT {} FROM attendance_logs WHERE person_id = ? AND attendance_date = ?",
            ATTENDANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(person_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AttendanceRecord::from))
    }

    async fn create(&self, record: AttendanceRecord) -> Result<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_logs
                (id, person_id, attendance_date, time_in, time_out, site_id, department,
                 activities, image_in_url, image_out_url, members)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.person_id)
        .bind(record.date)
        .bind(record.time_in)
        .bind(record.time_out)
        .bind(&record.site_id)
        .bind(&record.department)
        .bind(&record.activities)
        .bind(&record.image_in_url)
        .bind(&record.image_out_url)
        .bind(Json(&record.members))
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            if is_duplicate_entry(&e) {
                debug!(
                    person_id = %record.person_id,
                    date = %record.date,
                    "Duplicate attendance insert"
                );
                return Err(AttendanceError::DuplicateEntry);
            }
            error!(error = %e, person_id = %record.person_id, "Attendance insert failed");
            return Err(e.into());
        }

        self.find_by_id(&record.id)
            .await?
            .ok_or(AttendanceError::RecordNotFound)
    }

    async fn update(&self, record_id: &str, patch: AttendancePatch) -> Result<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            UPDATE attendance_logs
            SET time_out = ?,
                image_out_url = ?,
                activities = COALESCE(?, activities),
                members = ?
            WHERE id = ?
            AND time_out IS NULL
            "#,
        )
        .bind(patch.time_out)
        .bind(&patch.image_out_url)
        .bind(&patch.activities)
        .bind(Json(&patch.members))
        .bind(record_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, record_id, "Attendance update failed");
            AttendanceError::from(e)
        })?;

        let record = self
            .find_by_id(record_id)
            .await?
            .ok_or(AttendanceError::RecordNotFound)?;

        if result.rows_affected() == 0 {
            // row exists but was already closed by someone else
            return Err(AttendanceError::AlreadyTimedOut);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct IntegrityError(ErrorKind);

    impl fmt::Display for IntegrityError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "integrity constraint violation")
        }
    }

    impl StdError for IntegrityError {}

    impl DatabaseError for IntegrityError {
        fn message(&self) -> &str {
            "integrity constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23000"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind) -> sqlx::Error {
        sqlx::Error::Database(Box::new(IntegrityError(kind)))
    }

    #[test]
    fn only_unique_violations_are_duplicates() {
        assert!(is_duplicate_entry(&db_error(ErrorKind::UniqueViolation)));
        assert!(!is_duplicate_entry(&db_error(ErrorKind::ForeignKeyViolation)));
        assert!(!is_duplicate_entry(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn foreign_key_failure_surfaces_as_database_error() {
        let err = AttendanceError::from(db_error(ErrorKind::ForeignKeyViolation));
        assert_eq!(err.kind(), "DATABASE_ERROR");
    }
}
