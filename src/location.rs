use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{AttendanceError, Result};
use crate::model::attendance::{FIELD_WORK_DEPARTMENT, WorkCategory};
use crate::repository::SiteCatalog;

/// Where a time-in happened. Exactly one of the two is meaningful for reporting:
/// either a registered site (with the field-work label) or a department string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub site_id: Option<String>,
    pub department: Option<String>,
}

pub struct LocationResolver {
    sites: Arc<dyn SiteCatalog>,
}

impl LocationResolver {
    pub fn new(sites: Arc<dyn SiteCatalog>) -> Self {
        Self { sites }
    }

    /// Classifies a location token for the given work category.
    ///
    /// Unmatched field tokens are not an error: they become an ad-hoc
    /// department label so technicians at unregistered sites can still log in.
    ///
    /// Surrounding whitespace only matters for the emptiness check and the site
    /// lookup; department labels keep the token exactly as submitted.
    pub async fn resolve(&self, category: WorkCategory, token: &str) -> Result<ResolvedLocation> {
        let lookup = token.trim();
        if lookup.is_empty() {
            return Err(AttendanceError::LocationRequired);
        }

        match category {
            WorkCategory::HeadOffice => Ok(ResolvedLocation {
                site_id: None,
                department: Some(token.to_string()),
            }),
            WorkCategory::Field => {
                let mut site = None;
                if looks_like_id(lookup) {
                    site = self.sites.find_active_by_id(lookup).await?;
                }
                if site.is_none() {
                    site = self.sites.find_active_by_code(lookup).await?;
                }

                match site {
                    Some(site) => {
                        debug!(
                            site_id = %site.id,
                            code = %site.site_code,
                            "Field location matched site"
                        );
                        Ok(ResolvedLocation {
                            site_id: Some(site.id),
                            department: Some(FIELD_WORK_DEPARTMENT.to_string()),
                        })
                    }
                    None => {
                        debug!(token, "Field location unmatched, using it as department");
                        Ok(ResolvedLocation {
                            site_id: None,
                            department: Some(token.to_string()),
                        })
                    }
                }
            }
        }
    }
}

/// Canonical 36-character hyphenated identifier.
fn looks_like_id(token: &str) -> bool {
    token.len() == 36 && Uuid::parse_str(token).is_ok()
}
