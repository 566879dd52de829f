use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AttendanceError, Result};
use crate::location::LocationResolver;
use crate::model::attendance::{
    AttendanceAction, AttendancePatch, AttendanceRecord, TeamMember, WorkCategory,
};
use crate::model::person::{Person, normalize_email};
use crate::model::site::SiteSummary;
use crate::repository::{AttendanceRepository, PersonDirectory, SiteCatalog};
use crate::storage::{EvidenceUploader, decode_photo, evidence_path};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub bucket: String,
    pub max_photo_bytes: usize,
    /// Upper bound for every repository and storage call.
    pub timeout: Duration,
    /// Offset used to decide which calendar day "today" is.
    pub utc_offset: FixedOffset,
}

/// One time-in or time-out submission as received from a client.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub email: String,
    pub action: AttendanceAction,
    pub location: String,
    pub category: WorkCategory,
    pub notes: Option<String>,
    /// Base64 JPEG, optionally as a data URL.
    pub photo: Option<String>,
    pub members: Vec<TeamMember>,
}

pub struct AttendanceService {
    people: Arc<dyn PersonDirectory>,
    sites: Arc<dyn SiteCatalog>,
    records: Arc<dyn AttendanceRepository>,
    uploader: Arc<dyn EvidenceUploader>,
    resolver: LocationResolver,
    settings: ServiceSettings,
}

impl AttendanceService {
    pub fn new(
        people: Arc<dyn PersonDirectory>,
        sites: Arc<dyn SiteCatalog>,
        records: Arc<dyn AttendanceRepository>,
        uploader: Arc<dyn EvidenceUploader>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(sites.clone()),
            people,
            sites,
            records,
            uploader,
            settings,
        }
    }

    pub fn max_photo_bytes(&self) -> usize {
        self.settings.max_photo_bytes
    }

    /// Active sites, name ascending.
    pub async fn list_sites(&self) -> Result<Vec<SiteSummary>> {
        let sites = self.bounded("site list", self.sites.list_active()).await?;
        Ok(sites.iter().map(SiteSummary::from).collect())
    }

    /// Today's record for `email`, or `None` when the identity is malformed,
    /// unknown or has not timed in yet. Infrastructure errors still surface.
    pub async fn get_status(&self, email: &str) -> Result<Option<AttendanceRecord>> {
        self.get_status_at(email, Utc::now()).await
    }

    pub async fn get_status_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>> {
        let Some(email) = normalize_email(email) else {
            return Ok(None);
        };

        let Some(person) = self
            .bounded("person lookup", self.people.find_by_email(&email))
            .await?
        else {
            return Ok(None);
        };

        let today = self.local_date(now);
        self.bounded(
            "attendance lookup",
            self.records.find_by_person_and_date(&person.id, today),
        )
        .await
    }

    pub async fn submit(&self, request: SubmitRequest) -> Result<AttendanceRecord> {
        self.submit_at(request, Utc::now()).await
    }

    /// Runs a submission as if it arrived at `now`.
    ///
    /// Nothing is written to the attendance store until every check passed and
    /// the photo is uploaded; the final create/update is the only write.
    #[instrument(
        name = "attendance_submit",
        skip(self, request, now),
        fields(action = %request.action, category = %request.category)
    )]
    pub async fn submit_at(
        &self,
        request: SubmitRequest,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord> {
        // 1. identity
        let person = self.resolve_person(&request.email).await?;

        // 2. evidence, before any attendance query
        let photo = match request.photo.as_deref().map(str::trim) {
            Some(photo) if !photo.is_empty() => decode_photo(photo, self.settings.max_photo_bytes)?,
            _ => {
                warn!(person_id = %person.id, "Submission without photo");
                return Err(AttendanceError::EvidenceRequired);
            }
        };

        let members = normalize_roster(request.members)?;
        let notes = normalize_notes(request.notes);

        // 3. today's record
        let today = self.local_date(now);
        let existing = self
            .bounded(
                "attendance lookup",
                self.records.find_by_person_and_date(&person.id, today),
            )
            .await?;

        match request.action {
            AttendanceAction::TimeIn => {
                if existing.is_some() {
                    warn!(person_id = %person.id, %today, "Already timed in");
                    return Err(AttendanceError::AlreadyTimedIn);
                }

                let location = self
                    .bounded(
                        "site lookup",
                        self.resolver.resolve(request.category, &request.location),
                    )
                    .await?;

                let image_url = self
                    .upload(photo, AttendanceAction::TimeIn, &person.email, now)
                    .await?;

                let record = AttendanceRecord {
                    id: Uuid::new_v4().to_string(),
                    person_id: person.id.clone(),
                    date: today,
                    time_in: Some(now),
                    time_out: None,
                    site_id: location.site_id,
                    department: location.department,
                    activities: notes,
                    image_in_url: Some(image_url),
                    image_out_url: None,
                    members,
                };

                let created = self
                    .bounded("attendance create", self.records.create(record))
                    .await
                    .map_err(|e| match e {
                        // lost the race against a concurrent time-in
                        AttendanceError::DuplicateEntry => AttendanceError::AlreadyTimedIn,
                        other => other,
                    })?;

                info!(
                    person_id = %person.id,
                    record_id = %created.id,
                    site_id = ?created.site_id,
                    department = ?created.department,
                    "Timed in"
                );
                Ok(created)
            }
            AttendanceAction::TimeOut => {
                let record = match existing {
                    Some(record) if record.time_in.is_some() => record,
                    _ => {
                        warn!(person_id = %person.id, %today, "Time-out without time-in");
                        return Err(AttendanceError::NoActiveEntry);
                    }
                };

                if record.time_out.is_some() {
                    warn!(person_id = %person.id, record_id = %record.id, "Already timed out");
                    return Err(AttendanceError::AlreadyTimedOut);
                }

                let image_url = self
                    .upload(photo, AttendanceAction::TimeOut, &person.email, now)
                    .await?;

                let patch = AttendancePatch {
                    time_out: now,
                    image_out_url: image_url,
                    activities: notes,
                    members,
                };

                let updated = self
                    .bounded("attendance update", self.records.update(&record.id, patch))
                    .await?;

                info!(person_id = %person.id, record_id = %updated.id, "Timed out");
                Ok(updated)
            }
        }
    }

    async fn resolve_person(&self, raw_email: &str) -> Result<Person> {
        let email = normalize_email(raw_email).ok_or(AttendanceError::IdentityNotFound)?;

        self.bounded("person lookup", self.people.find_by_email(&email))
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "Unknown identity");
                AttendanceError::IdentityNotFound
            })
    }

    async fn upload(
        &self,
        photo: Vec<u8>,
        action: AttendanceAction,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let path = evidence_path(action, email, now);
        debug!(path = %path, size = photo.len(), "Uploading evidence");

        self.bounded(
            "photo upload",
            self.uploader.upload(photo, &self.settings.bucket, &path),
        )
        .await
    }

    fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.settings.utc_offset).date_naive()
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.settings.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.settings.timeout, "Operation timed out");
                Err(AttendanceError::Timeout(operation))
            }
        }
    }
}

/// Trims entries and rejects blank fields or repeated names.
pub fn normalize_roster(members: Vec<TeamMember>) -> Result<Vec<TeamMember>> {
    let mut roster: Vec<TeamMember> = Vec::with_capacity(members.len());

    for member in members {
        let name = member.name.trim().to_string();
        let role = member.role.trim().to_string();

        if name.is_empty() {
            return Err(AttendanceError::InvalidRoster("member name is required".into()));
        }
        if role.is_empty() {
            return Err(AttendanceError::InvalidRoster(format!(
                "role is required for {}",
                name
            )));
        }
        if roster.iter().any(|m| m.name.to_lowercase() == name.to_lowercase()) {
            return Err(AttendanceError::InvalidRoster(format!(
                "{} is listed more than once",
                name
            )));
        }

        roster.push(TeamMember { name, role });
    }

    Ok(roster)
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{AttendanceStatus, FIELD_WORK_DEPARTMENT};
    use crate::repository::InMemoryStore;
    use crate::seed;
    use crate::storage::InMemoryUploader;
    use async_trait::async_trait;
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use chrono::TimeZone;

    const FIELD_EMAIL: &str = "tl1@martindaletech.com";
    const OFFICE_EMAIL: &str = "bdm@martindaletech.com";

    struct Harness {
        store: Arc<InMemoryStore>,
        uploader: Arc<InMemoryUploader>,
        service: AttendanceService,
    }

    fn settings() -> ServiceSettings {
        ServiceSettings {
            bucket: "attendance-photos".into(),
            max_photo_bytes: 1024,
            timeout: Duration::from_secs(5),
            utc_offset: FixedOffset::east_opt(8 * 3600).unwrap(),
        }
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryStore::new());
        store.seed(seed::demo_people(), seed::demo_sites());
        let uploader = Arc::new(InMemoryUploader::new());

        let service = AttendanceService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            uploader.clone(),
            settings(),
        );

        Harness { store, uploader, service }
    }

    fn photo() -> Option<String> {
        Some(format!("data:image/jpeg;base64,{}", STANDARD.encode(b"\xff\xd8jpeg")))
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        // hours are UTC, the service runs at +08:00
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn time_in(email: &str, location: &str, category: WorkCategory) -> SubmitRequest {
        SubmitRequest {
            email: email.into(),
            action: AttendanceAction::TimeIn,
            location: location.into(),
            category,
            notes: Some("Antenna alignment".into()),
            photo: photo(),
            members: vec![TeamMember { name: "Pedro Santos".into(), role: "Rigger".into() }],
        }
    }

    fn time_out(email: &str) -> SubmitRequest {
        SubmitRequest {
            email: email.into(),
            action: AttendanceAction::TimeOut,
            location: String::new(),
            category: WorkCategory::Field,
            notes: None,
            photo: photo(),
            members: vec![
                TeamMember { name: "Pedro Santos".into(), role: "Rigger".into() },
                TeamMember { name: "Ana Reyes".into(), role: "Driver".into() },
            ],
        }
    }

    #[actix_web::test]
    async fn full_day_moves_absent_active_completed() {
        let h = harness();

        let status = h.service.get_status_at(FIELD_EMAIL, at(2, 1)).await.unwrap();
        assert_eq!(AttendanceStatus::of(status.as_ref()), AttendanceStatus::Absent);

        let created = h
            .service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1))
            .await
            .unwrap();
        assert!(created.time_in.is_some());
        assert!(created.time_out.is_none());
        assert_eq!(created.site_id.as_deref(), Some(seed::CEBU_SITE_ID));
        assert_eq!(created.department.as_deref(), Some(FIELD_WORK_DEPARTMENT));
        assert!(created.image_in_url.as_deref().unwrap().contains("time_in/"));

        let status = h.service.get_status_at(FIELD_EMAIL, at(2, 3)).await.unwrap();
        assert_eq!(AttendanceStatus::of(status.as_ref()), AttendanceStatus::Active);

        let closed = h.service.submit_at(time_out(FIELD_EMAIL), at(2, 9)).await.unwrap();
        assert_eq!(closed.id, created.id);
        assert_eq!(closed.time_out, Some(at(2, 9)));
        assert!(closed.image_out_url.as_deref().unwrap().contains("time_out/"));
        // location is not re-resolved, notes kept, roster replaced
        assert_eq!(closed.site_id, created.site_id);
        assert_eq!(closed.activities.as_deref(), Some("Antenna alignment"));
        assert_eq!(closed.members.len(), 2);

        let status = h.service.get_status_at(FIELD_EMAIL, at(2, 10)).await.unwrap();
        assert_eq!(AttendanceStatus::of(status.as_ref()), AttendanceStatus::Completed);
        assert_eq!(h.store.records().len(), 1);
        assert_eq!(h.uploader.object_count(), 2);
    }

    #[actix_web::test]
    async fn second_time_in_is_rejected_and_record_unchanged() {
        let h = harness();
        let first = h
            .service
            .submit_at(time_in(OFFICE_EMAIL, "Logistics", WorkCategory::HeadOffice), at(2, 1))
            .await
            .unwrap();

        let err = h
            .service
            .submit_at(time_in(OFFICE_EMAIL, "Operations", WorkCategory::HeadOffice), at(2, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyTimedIn));

        assert_eq!(h.store.records(), vec![first]);
        assert_eq!(h.uploader.object_count(), 1);
    }

    #[actix_web::test]
    async fn time_out_without_time_in_is_rejected() {
        let h = harness();
        let err = h.service.submit_at(time_out(FIELD_EMAIL), at(2, 9)).await.unwrap_err();
        assert!(matches!(err, AttendanceError::NoActiveEntry));
        assert_eq!(h.uploader.object_count(), 0);
    }

    #[actix_web::test]
    async fn second_time_out_is_rejected() {
        let h = harness();
        h.service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1))
            .await
            .unwrap();
        h.service.submit_at(time_out(FIELD_EMAIL), at(2, 9)).await.unwrap();

        let err = h.service.submit_at(time_out(FIELD_EMAIL), at(2, 10)).await.unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyTimedOut));

        // completed is terminal for the day
        let err = h
            .service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 11))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyTimedIn));
    }

    #[actix_web::test]
    async fn missing_photo_never_touches_attendance_store() {
        let h = harness();

        let mut request = time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field);
        request.photo = None;
        let err = h.service.submit_at(request, at(2, 1)).await.unwrap_err();
        assert!(matches!(err, AttendanceError::EvidenceRequired));

        let mut request = time_out(FIELD_EMAIL);
        request.photo = Some("   ".into());
        let err = h.service.submit_at(request, at(2, 9)).await.unwrap_err();
        assert!(matches!(err, AttendanceError::EvidenceRequired));

        assert_eq!(h.store.attendance_calls(), 0);
    }

    #[actix_web::test]
    async fn oversized_photo_is_rejected_before_upload() {
        let h = harness();
        let mut request = time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field);
        request.photo = Some(STANDARD.encode(vec![0u8; 4096]));

        let err = h.service.submit_at(request, at(2, 1)).await.unwrap_err();
        assert!(matches!(err, AttendanceError::PayloadTooLarge { limit: 1024 }));
        assert_eq!(h.uploader.object_count(), 0);
        assert_eq!(h.store.attendance_calls(), 0);
    }

    #[actix_web::test]
    async fn unknown_or_malformed_identity() {
        let h = harness();

        let err = h
            .service
            .submit_at(
                time_in("ghost@martindaletech.com", "Logistics", WorkCategory::HeadOffice),
                at(2, 1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::IdentityNotFound));

        let err = h
            .service
            .submit_at(time_in("not-an-email", "Logistics", WorkCategory::HeadOffice), at(2, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::IdentityNotFound));

        // read side is tolerant
        assert!(h.service.get_status_at("not-an-email", at(2, 1)).await.unwrap().is_none());
        assert!(h.service.get_status_at("ghost@x.com", at(2, 1)).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn identity_is_case_insensitive() {
        let h = harness();
        h.service
            .submit_at(
                time_in(" TL1@MartindaleTech.com ", "MTI-CEBU-05", WorkCategory::Field),
                at(2, 1),
            )
            .await
            .unwrap();

        let status = h.service.get_status_at(FIELD_EMAIL, at(2, 2)).await.unwrap();
        assert!(status.is_some());
    }

    #[actix_web::test]
    async fn unregistered_field_site_becomes_department() {
        let h = harness();
        let created = h
            .service
            .submit_at(time_in(FIELD_EMAIL, "UNKNOWN-SITE-X", WorkCategory::Field), at(2, 1))
            .await
            .unwrap();
        assert_eq!(created.site_id, None);
        assert_eq!(created.department.as_deref(), Some("UNKNOWN-SITE-X"));
    }

    #[actix_web::test]
    async fn failed_upload_leaves_no_record() {
        let h = harness();
        h.uploader.set_failing(true);

        let err = h
            .service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::UploadFailed(_)));
        assert!(h.store.records().is_empty());

        // resubmission works once storage is back
        h.uploader.set_failing(false);
        h.service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1))
            .await
            .unwrap();

        h.uploader.set_failing(true);
        let err = h.service.submit_at(time_out(FIELD_EMAIL), at(2, 9)).await.unwrap_err();
        assert!(matches!(err, AttendanceError::UploadFailed(_)));
        let record = &h.store.records()[0];
        assert!(record.time_out.is_none());
        assert!(record.image_out_url.is_none());
    }

    #[actix_web::test]
    async fn time_out_replaces_notes_when_supplied() {
        let h = harness();
        h.service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1))
            .await
            .unwrap();

        let mut request = time_out(FIELD_EMAIL);
        request.notes = Some("Alignment finished, tower signed off".into());
        let closed = h.service.submit_at(request, at(2, 9)).await.unwrap();
        assert_eq!(
            closed.activities.as_deref(),
            Some("Alignment finished, tower signed off")
        );
    }

    #[actix_web::test]
    async fn calendar_day_follows_configured_offset() {
        let h = harness();
        // 16:30 UTC on the 2nd is 00:30 on the 3rd at +08:00
        let late = Utc.with_ymd_and_hms(2026, 3, 2, 16, 30, 0).unwrap();
        let created = h
            .service
            .submit_at(time_in(OFFICE_EMAIL, "Logistics", WorkCategory::HeadOffice), late)
            .await
            .unwrap();
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    }

    #[actix_web::test]
    async fn new_day_allows_new_time_in() {
        let h = harness();
        h.service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1))
            .await
            .unwrap();
        h.service.submit_at(time_out(FIELD_EMAIL), at(2, 9)).await.unwrap();

        h.service
            .submit_at(time_in(FIELD_EMAIL, "MTI-DAVAO-12", WorkCategory::Field), at(3, 1))
            .await
            .unwrap();
        assert_eq!(h.store.records().len(), 2);
    }

    /// Parks every upload briefly so concurrent requests interleave.
    struct DelayedUploader(InMemoryUploader);

    #[async_trait]
    impl EvidenceUploader for DelayedUploader {
        async fn upload(&self, bytes: Vec<u8>, bucket: &str, path: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.0.upload(bytes, bucket, path).await
        }
    }

    #[actix_web::test]
    async fn concurrent_time_ins_produce_one_record() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(seed::demo_people(), seed::demo_sites());
        let service = AttendanceService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(DelayedUploader(InMemoryUploader::new())),
            settings(),
        );

        // both pass the existence check before either commits
        let (a, b) = tokio::join!(
            service.submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1)),
            service.submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1)),
        );

        let failures: Vec<_> = [a, b].into_iter().filter_map(|r| r.err()).collect();
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], AttendanceError::AlreadyTimedIn));
        assert_eq!(store.records().len(), 1);
    }

    #[actix_web::test]
    async fn list_sites_is_name_ordered() {
        let h = harness();
        let names: Vec<String> = h
            .service
            .list_sites()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec!["Cebu Data Center", "Davao Telecom Hub", "Manila Tower Project"]
        );
    }

    struct StalledUploader;

    #[async_trait]
    impl EvidenceUploader for StalledUploader {
        async fn upload(&self, _bytes: Vec<u8>, _bucket: &str, _path: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("never".into())
        }
    }

    #[actix_web::test]
    async fn slow_storage_times_out_without_side_effects() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(seed::demo_people(), seed::demo_sites());
        let mut settings = settings();
        settings.timeout = Duration::from_millis(50);

        let service = AttendanceService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(StalledUploader),
            settings,
        );

        let err = service
            .submit_at(time_in(FIELD_EMAIL, "MTI-CEBU-05", WorkCategory::Field), at(2, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Timeout("photo upload")));
        assert!(store.records().is_empty());
    }

    #[test]
    fn roster_rejects_blank_and_duplicate_names() {
        let ok = normalize_roster(vec![
            TeamMember { name: "  Pedro ".into(), role: " Rigger ".into() },
            TeamMember { name: "Ana".into(), role: "Driver".into() },
        ])
        .unwrap();
        assert_eq!(ok[0], TeamMember { name: "Pedro".into(), role: "Rigger".into() });

        let err = normalize_roster(vec![TeamMember { name: " ".into(), role: "Rigger".into() }]);
        assert!(matches!(err, Err(AttendanceError::InvalidRoster(_))));

        let err = normalize_roster(vec![
            TeamMember { name: "Pedro".into(), role: "Rigger".into() },
            TeamMember { name: "PEDRO".into(), role: "Driver".into() },
        ]);
        assert!(matches!(err, Err(AttendanceError::InvalidRoster(_))));

        let err = normalize_roster(vec![TeamMember { name: "Pedro".into(), role: "".into() }]);
        assert!(matches!(err, Err(AttendanceError::InvalidRoster(_))));
    }

    #[test]
    fn blank_notes_are_dropped() {
        assert_eq!(normalize_notes(Some("  ".into())), None);
        assert_eq!(normalize_notes(Some(" ok ".into())), Some("ok".into()));
        assert_eq!(normalize_notes(None), None);
    }
}
