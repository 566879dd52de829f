use serde::{Deserialize, Serialize};

use super::attendance::WorkCategory;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Default department, informational only.
    pub department: Option<String>,
    #[sqlx(try_from = "String")]
    pub work_category: WorkCategory,
    pub position: Option<String>,
}

/// Lowercased, trimmed email, or `None` when the value cannot be an email address.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Some(email),
        _ => None,
    }
}
