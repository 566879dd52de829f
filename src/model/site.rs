use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Site {
    pub id: String,
    pub site_code: String,
    pub site_name: String,
    pub location_address: Option<String>,
    pub is_active: bool,
}

/// Public projection used by the site picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SiteSummary {
    #[schema(example = "0c9e9a5c-3f5b-4a43-9d0f-6c1b7d1f2e33")]
    pub id: String,
    #[schema(example = "Cebu Data Center")]
    pub name: String,
    #[schema(example = "MTI-CEBU-05")]
    pub code: String,
}

impl From<&Site> for SiteSummary {
    fn from(site: &Site) -> Self {
        SiteSummary {
            id: site.id.clone(),
            name: site.site_name.clone(),
            code: site.site_code.clone(),
        }
    }
}
