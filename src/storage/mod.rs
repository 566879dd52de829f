use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AttendanceError, Result};
use crate::model::attendance::AttendanceAction;

pub mod http;
pub mod memory;

pub use http::HttpUploader;
pub use memory::InMemoryUploader;

/// Sink for photographic evidence. Implementations do not retry.
#[async_trait]
pub trait EvidenceUploader: Send + Sync {
    /// Stores `bytes` under `bucket/path` and returns a public URL.
    async fn upload(&self, bytes: Vec<u8>, bucket: &str, path: &str) -> Result<String>;
}

/// Decodes a base64 photo, optionally wrapped in a `data:` URL.
///
/// Size is checked on the encoded length first so a huge payload is
/// rejected without allocating the decoded buffer.
pub fn decode_photo(encoded: &str, max_bytes: usize) -> Result<Vec<u8>> {
    let payload = match encoded.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => encoded,
    };
    let payload = payload.trim();

    if payload.is_empty() {
        return Err(AttendanceError::EvidenceRequired);
    }

    let upper_bound = payload.len() / 4 * 3;
    if upper_bound > max_bytes + 3 {
        return Err(AttendanceError::PayloadTooLarge { limit: max_bytes });
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| AttendanceError::InvalidEvidence)?;

    if bytes.len() > max_bytes {
        return Err(AttendanceError::PayloadTooLarge { limit: max_bytes });
    }

    Ok(bytes)
}

/// `<action>/<email with unsafe chars replaced>/<millis>-<random>.jpg`
pub fn evidence_path(action: AttendanceAction, email: &str, now: DateTime<Utc>) -> String {
    let owner: String = email
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    let nonce = Uuid::new_v4().to_simple().to_string();

    format!(
        "{}/{}/{}-{}.jpg",
        action,
        owner,
        now.timestamp_millis(),
        &nonce[..8]
    )
}
