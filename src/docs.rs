use crate::api::attendance::{FormOptions, StatusResponse, SubmitAttendance};
use crate::model::attendance::{
    AttendanceAction, AttendanceRecord, AttendanceStatus, TeamMember, WorkCategory,
};
use crate::model::site::SiteSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Portal API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Portal

Daily **time in** / **time out** with photographic evidence.

### 🔹 Flow
- `GET /api/attendance/status` tells the form whether the employee is
  `ABSENT`, `ACTIVE` or `COMPLETED` for today
- `POST /api/attendance` with `action = time_in` opens the day,
  `action = time_out` closes it; both require a fresh photo
- Head office staff submit a department, field staff a site code
  (unregistered sites are accepted as free text)

### ⚠️ Identity
The email in the request is trusted as-is. Put this service behind an
authenticating proxy before exposing it.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::list_sites,
        crate::api::attendance::get_status,
        crate::api::attendance::submit,
        crate::api::attendance::form_options
    ),
    components(
        schemas(
            SubmitAttendance,
            StatusResponse,
            FormOptions,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceAction,
            WorkCategory,
            TeamMember,
            SiteSummary
        )
    ),
    tags(
        (name = "Attendance", description = "Time-in / time-out APIs"),
        (name = "Sites", description = "Registered field sites"),
    )
)]
pub struct ApiDoc;
