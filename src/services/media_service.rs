// src/services/media_service.rs
//
// Media pipeline: binary assets for a truck record in, durable URLs out.
//
// Destination paths are derived deterministically from the record id, an
// upload timestamp, the gallery index and the original filename, so
// concurrent uploads for the same record and index can never collide.

use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::error::AppResult;
use crate::integrations::blobstore::BlobStore;

/// A file handed over by the authoring flow.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct MediaService {
    blob_store: Arc<dyn BlobStore>,
}

impl MediaService {
    pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    /// Upload a gallery image. `index` is the position the image will take
    /// in the record's `images` array.
    pub async fn upload_image(
        &self,
        file: &UploadFile,
        truck_id: &str,
        index: usize,
    ) -> AppResult<String> {
        let path = image_path(truck_id, index, &file.file_name);
        self.blob_store
            .upload(&path, file.bytes.clone(), &file.content_type)
            .await
    }

    /// Upload a walkaround/condition video. Videos are not order-sensitive
    /// for display, so the path carries no index.
    pub async fn upload_video(&self, file: &UploadFile, truck_id: &str) -> AppResult<String> {
        let path = video_path(truck_id, &file.file_name);
        self.blob_store
            .upload(&path, file.bytes.clone(), &file.content_type)
            .await
    }

    /// Best-effort delete of a previously uploaded asset.
    pub async fn delete_asset(&self, url: &str) -> AppResult<()> {
        self.blob_store.delete(url).await
    }
}

fn image_path(truck_id: &str, index: usize, file_name: &str) -> String {
    format!(
        "trucks/{}/images/{}_{}_{}",
        truck_id,
        Utc::now().timestamp_millis(),
        index,
        sanitize_file_name(file_name)
    )
}

fn video_path(truck_id: &str, file_name: &str) -> String {
    format!(
        "trucks/{}/videos/{}_{}",
        truck_id,
        Utc::now().timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Object paths must stay URL- and filesystem-safe regardless of what the
/// uploading browser called the file.
fn sanitize_file_name(file_name: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

    let cleaned = unsafe_chars.replace_all(file_name, "_");
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
