use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{AttendanceRepository, PersonDirectory, SiteCatalog};
use crate::error::{AttendanceError, Result};
use crate::model::attendance::{AttendancePatch, AttendanceRecord};
use crate::model::person::Person;
use crate::model::site::Site;

/// Process-local store with the same contract as the MySQL one.
/// Backs `DATABASE_URL=memory:` and the test suite.
#[derive(Default)]
pub struct InMemoryStore {
    people: Mutex<Vec<Person>>,
    sites: Mutex<Vec<Site>>,
    records: Mutex<Vec<AttendanceRecord>>,
    attendance_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-if-absent, keyed by email / site code.
    pub fn seed(&self, people: Vec<Person>, sites: Vec<Site>) {
        let mut stored_people = self.people.lock().expect("people store poisoned");
        for person in people {
            if !stored_people.iter().any(|p| p.email.eq_ignore_ascii_case(&person.email)) {
                stored_people.push(person);
            }
        }

        let mut stored_sites = self.sites.lock().expect("site store poisoned");
        for site in sites {
            if !stored_sites
                .iter()
                .any(|s| s.site_code.eq_ignore_ascii_case(&site.site_code))
            {
                stored_sites.push(site);
            }
        }
    }

    #[cfg(test)]
    /// Number of calls made against the attendance table so far.
    pub fn attendance_calls(&self) -> usize {
        self.attendance_calls.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.lock().expect("attendance store poisoned").clone()
    }

    #[cfg(test)]
    pub fn deactivate_site(&self, code: &str) {
        let mut sites = self.sites.lock().expect("site store poisoned");
        for site in sites.iter_mut().filter(|s| s.site_code.eq_ignore_ascii_case(code)) {
            site.is_active = false;
        }
    }

    fn touch(&self) {
        self.attendance_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PersonDirectory for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>> {
        let people = self.people.lock().expect("people store poisoned");
        Ok(people
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl SiteCatalog for InMemoryStore {
    async fn list_active(&self) -> Result<Vec<Site>> {
        let sites = self.sites.lock().expect("site store poisoned");
        let mut active: Vec<Site> = sites.iter().filter(|s| s.is_active).cloned().collect();
        active.sort_by(|a, b| a.site_name.cmp(&b.site_name));
        Ok(active)
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Site>> {
        let sites = self.sites.lock().expect("site store poisoned");
        Ok(sites
            .iter()
            .find(|s| s.is_active && s.id.eq_ignore_ascii_case(id))
            .cloned())
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Site>> {
        let sites = self.sites.lock().expect("site store poisoned");
        Ok(sites
            .iter()
            .find(|s| s.is_active && s.site_code.eq_ignore_ascii_case(code))
            .cloned())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn find_by_person_and_date(
        &self,
        person_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        self.touch();
        let records = self.records.lock().expect("attendance store poisoned");
        Ok(records
            .iter()
            .find(|r| r.person_id == person_id && r.date == date)
            .cloned())
    }

    async fn create(&self, record: AttendanceRecord) -> Result<AttendanceRecord> {
        self.touch();
        let mut records = self.records.lock().expect("attendance store poisoned");
        if records
            .iter()
            .any(|r| r.person_id == record.person_id && r.date == record.date)
        {
            return Err(AttendanceError::DuplicateEntry);
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record_id: &str, patch: AttendancePatch) -> Result<AttendanceRecord> {
        self.touch();
        let mut records = self.records.lock().expect("attendance store poisoned");
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(AttendanceError::RecordNotFound)?;

        if record.time_out.is_some() {
            return Err(AttendanceError::AlreadyTimedOut);
        }

        record.time_out = Some(patch.time_out);
        record.image_out_url = Some(patch.image_out_url);
        if let Some(activities) = patch.activities {
            record.activities = Some(activities);
        }
        record.members = patch.members;

        Ok(record.clone())
    }
}
