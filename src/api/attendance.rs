use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::error::AttendanceError;
use crate::model::attendance::{
    AttendanceAction, AttendanceRecord, AttendanceStatus, TeamMember, WorkCategory,
};
use crate::seed::{DEPARTMENTS, JOB_ROLES};
use crate::service::{AttendanceService, SubmitRequest};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAttendance {
    #[schema(example = "tl1@martindaletech.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "time_in")]
    pub action: AttendanceAction,
    /// Department for head office, site code or site id for field work.
    #[schema(example = "MTI-CEBU-05")]
    #[serde(default)]
    pub location: String,
    #[schema(example = "FIELD")]
    pub category: WorkCategory,
    #[schema(example = "Antenna alignment", nullable = true)]
    pub notes: Option<String>,
    /// Base64 JPEG or `data:image/jpeg;base64,...`
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQSkZJRg...", nullable = true)]
    pub photo: Option<String>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl From<SubmitAttendance> for SubmitRequest {
    fn from(body: SubmitAttendance) -> Self {
        SubmitRequest {
            email: body.email,
            action: body.action,
            location: body.location,
            category: body.category,
            notes: body.notes,
            photo: body.photo,
            members: body.members,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// Company email of the employee
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "ACTIVE")]
    pub status: AttendanceStatus,
    #[schema(nullable = true)]
    pub record: Option<AttendanceRecord>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    #[schema(example = json!(["Logistics", "Operations"]))]
    pub departments: Vec<String>,
    #[schema(example = json!(["Rigger", "Installer", "Driver"]))]
    pub job_roles: Vec<String>,
}

/// List active sites
#[utoipa::path(
    get,
    path = "/api/sites",
    responses(
        (status = 200, description = "Active sites, name ascending", body = [crate::model::site::SiteSummary]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sites"
)]
pub async fn list_sites(
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    let sites = service.list_sites().await?;
    Ok(HttpResponse::Ok().json(sites))
}

/// Today's attendance for an employee
#[utoipa::path(
    get,
    path = "/api/attendance/status",
    params(StatusQuery),
    responses(
        (status = 200, description = "Derived status and today's record, if any", body = StatusResponse),
        (status = 400, description = "Missing email parameter", body = Object, example = json!({
            "error": "INVALID_REQUEST",
            "message": "Query deserialize error: missing field `email`"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_status(
    service: web::Data<AttendanceService>,
    query: web::Query<StatusQuery>,
) -> actix_web::Result<impl Responder> {
    let record = service.get_status(&query.email).await?;
    let status = record
        .as_ref()
        .map_or(AttendanceStatus::Absent, AttendanceRecord::status);
    debug!(%status, "Status lookup");

    Ok(HttpResponse::Ok().json(StatusResponse { status, record }))
}

/// Time in or time out
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body(
        content = SubmitAttendance,
        description = "Time-in / time-out submission with photo evidence",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Committed attendance record", body = AttendanceRecord),
        (status = 400, description = "Missing photo, location or invalid roster", body = Object, example = json!({
            "error": "EVIDENCE_REQUIRED",
            "message": "A photo is required for every time-in and time-out"
        })),
        (status = 404, description = "Unknown employee email", body = Object, example = json!({
            "error": "IDENTITY_NOT_FOUND",
            "message": "Employee record not found. Please check your email address."
        })),
        (status = 409, description = "Already timed in or out today", body = Object, example = json!({
            "error": "ALREADY_TIMED_IN",
            "message": "Already timed in today"
        })),
        (status = 413, description = "Photo too large"),
        (status = 502, description = "Photo storage failed"),
        (status = 504, description = "Storage or database timed out")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_submit_http", skip(service, payload))]
pub async fn submit(
    service: web::Data<AttendanceService>,
    payload: web::Json<SubmitAttendance>,
) -> Result<HttpResponse, AttendanceError> {
    let record = service.submit(payload.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Departments and team roles offered by the form
#[utoipa::path(
    get,
    path = "/api/options",
    responses(
        (status = 200, description = "Form options", body = FormOptions)
    ),
    tag = "Attendance"
)]
pub async fn form_options() -> impl Responder {
    HttpResponse::Ok().json(FormOptions {
        departments: DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
        job_roles: JOB_ROLES.iter().map(|r| r.to_string()).collect(),
    })
}
