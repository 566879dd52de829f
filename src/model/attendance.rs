use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Department label stored on records whose field location matched a registered site.
pub const FIELD_WORK_DEPARTMENT: &str = "FIELD WORK";

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkCategory {
    HeadOffice,
    Field,
}

impl TryFrom<String> for WorkCategory {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceAction {
    TimeIn,
    TimeOut,
}

/// Derived daily state, never stored.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Absent,
    Active,
    Completed,
}

impl AttendanceStatus {
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        match record {
            None => AttendanceStatus::Absent,
            Some(r) if r.time_out.is_some() => AttendanceStatus::Completed,
            Some(r) if r.time_in.is_some() => AttendanceStatus::Active,
            // a row without time-in never leaves the repository, but it is not an open entry either
            Some(_) => AttendanceStatus::Absent,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamMember {
    #[schema(example = "Pedro Santos")]
    pub name: String,
    #[schema(example = "Rigger")]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "5b0f4b8e-2f0e-4c39-9a53-2d8f3f1c7a10",
        "personId": "8a4e0c2a-7d0e-4b5e-8d1c-3f7f2b9f6a21",
        "date": "2026-03-02",
        "timeIn": "2026-03-02T00:58:11Z",
        "timeOut": null,
        "siteId": "0c9e9a5c-3f5b-4a43-9d0f-6c1b7d1f2e33",
        "department": "FIELD WORK",
        "activities": "Antenna alignment",
        "imageInUrl": "https://storage.example.com/storage/v1/object/public/attendance-photos/time_in/tl1_martindaletech.com/1772413091000-1a2b3c4d.jpg",
        "imageOutUrl": null,
        "members": [{"name": "Pedro Santos", "role": "Rigger"}]
    })
)]
pub struct AttendanceRecord {
    pub id: String,
    pub person_id: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub time_in: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub time_out: Option<DateTime<Utc>>,
    pub site_id: Option<String>,
    pub department: Option<String>,
    pub activities: Option<String>,
    pub image_in_url: Option<String>,
    pub image_out_url: Option<String>,
    pub members: Vec<TeamMember>,
}

impl AttendanceRecord {
    pub fn status(&self) -> AttendanceStatus {
        AttendanceStatus::of(Some(self))
    }
}

/// Fields written by a time-out.
#[derive(Debug, Clone)]
pub struct AttendancePatch {
    pub time_out: DateTime<Utc>,
    pub image_out_url: String,
    /// `None` keeps the notes captured at time-in.
    pub activities: Option<String>,
    pub members: Vec<TeamMember>,
}
