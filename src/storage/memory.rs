use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::EvidenceUploader;
use crate::error::{AttendanceError, Result};

/// Keeps uploaded objects in process memory. Used when no storage endpoint is
/// configured and by tests, which can make it fail on demand.
#[derive(Default)]
pub struct InMemoryUploader {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    failing: AtomicBool,
}

impl InMemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[cfg(test)]
    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("object store poisoned").len()
    }
}

#[async_trait]
impl EvidenceUploader for InMemoryUploader {
    async fn upload(&self, bytes: Vec<u8>, bucket: &str, path: &str) -> Result<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AttendanceError::UploadFailed("storage unavailable".into()));
        }

        let key = format!("{}/{}", bucket, path);
        self.objects
            .lock()
            .expect("object store poisoned")
            .insert(key.clone(), bytes);

        Ok(format!("memory://{}", key))
    }
}
