use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::model::attendance::{AttendancePatch, AttendanceRecord};
use crate::model::person::Person;
use crate::model::site::Site;

pub mod memory;
pub mod mysql;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;

/// Read-only view of employees. People are created by an external process.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// `email` is expected to be normalized already.
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>>;
}

/// Read-only view of registered field sites.
#[async_trait]
pub trait SiteCatalog: Send + Sync {
    /// Active sites ordered by name.
    async fn list_active(&self) -> Result<Vec<Site>>;

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Site>>;

    /// Case-insensitive exact match on the site code.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Site>>;
}

/// Sole owner of attendance persistence.
///
/// Implementations must enforce one record per (person, date) atomically:
/// the losing writer of a concurrent `create` gets `DuplicateEntry`.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_by_person_and_date(
        &self,
        person_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>>;

    async fn create(&self, record: AttendanceRecord) -> Result<AttendanceRecord>;

    /// Applies a time-out. Fails with `RecordNotFound` when the id is gone and
    /// `AlreadyTimedOut` when another request closed the record first.
    async fn update(&self, record_id: &str, patch: AttendancePatch) -> Result<AttendanceRecord>;
}
