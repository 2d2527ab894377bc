use std::path::Path;

use anyhow::Context as _;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest as _, Sha256};

use crate::error::{DecalError, DecalResult};

/// Mime type asserted for every embedded image. Content is never inspected.
pub const IMAGE_PNG_MIME: &str = "image/png";

/// Self-contained inline image record, keyed by the SHA-256 of its bytes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedFile {
    pub mime_type: String,
    /// Hex-encoded SHA-256 of the raw bytes, the join key between the file
    /// collection and image elements.
    pub id: String,
    #[serde(rename = "dataURL")]
    pub data_url: String,
    pub created: u64,
    pub last_retrieved: u64,
}

impl EmbeddedFile {
    /// Read `path` fully into memory and encode it.
    ///
    /// The whole file is buffered; no size limit is enforced.
    pub fn from_path(path: &Path, now_ms: u64) -> DecalResult<Self> {
        if !path.is_file() {
            return Err(DecalError::not_found(format!(
                "image file not found: {}",
                path.display()
            )));
        }
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Ok(Self::from_bytes(&bytes, now_ms))
    }

    /// Encode raw bytes. The bytes are treated as an opaque blob; no check is
    /// made that they are well-formed PNG data.
    pub fn from_bytes(bytes: &[u8], now_ms: u64) -> Self {
        Self {
            mime_type: IMAGE_PNG_MIME.to_string(),
            id: content_hash_hex(bytes),
            data_url: format!("data:{IMAGE_PNG_MIME};base64,{}", STANDARD.encode(bytes)),
            created: now_ms,
            last_retrieved: now_ms,
        }
    }
}

/// Hex-encoded SHA-256 of `bytes`. Pure in the content, so re-encoding the
/// same file always yields the same id.
pub fn content_hash_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Milliseconds since the Unix epoch, used to stamp record timestamps.
pub fn unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
