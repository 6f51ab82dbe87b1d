//! Asset storage boundary.
//!
//! Domain logic only ever holds one of two things for a file: a pending
//! locally-encoded blob, or the public URL an upload resolved to. Never
//! both, and never a partially-uploaded state.

use async_trait::async_trait;
use base64::Engine;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from asset decoding or upload.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The input was not a `data:<mime>;base64,<payload>` URI.
    #[error("Invalid data URI")]
    InvalidDataUri,

    /// The base64 payload did not decode.
    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The storage service rejected the upload.
    #[error("Upload failed: {0}")]
    Upload(String),
}

/// A decoded `data:` URI: mime type plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Mime type, e.g. "image/png".
    pub mime: String,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Parse and decode a `data:<mime>;base64,<payload>` URI.
    pub fn parse(uri: &str) -> Result<Self, AssetError> {
        let rest = uri.strip_prefix("data:").ok_or(AssetError::InvalidDataUri)?;
        let (mime, payload) = rest.split_once(";base64,").ok_or(AssetError::InvalidDataUri)?;
        if mime.is_empty() || payload.is_empty() {
            return Err(AssetError::InvalidDataUri);
        }
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// The object storage contract.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload bytes and return the resulting public URL.
    async fn upload(
        &self,
        bytes: &[u8],
        content_type: &str,
        name_hint: &str,
    ) -> Result<String, AssetError>;
}

/// Either an already-resolved public URL or a blob still waiting to be
/// uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// A resolved public URL; passes through untouched.
    Url(String),
    /// A locally-encoded blob, uploaded on resolve.
    Pending(DataUri),
}

impl AssetSource {
    /// Build a source from a form value: data URIs become pending blobs,
    /// anything else is taken to already be a URL.
    pub fn from_input(value: impl Into<String>) -> Result<Self, AssetError> {
        let value = value.into();
        if value.starts_with("data:") {
            Ok(AssetSource::Pending(DataUri::parse(&value)?))
        } else {
            Ok(AssetSource::Url(value))
        }
    }

    /// Resolve to a public URL, uploading pending blobs.
    pub async fn resolve<S: AssetStore>(
        self,
        store: &S,
        name_hint: &str,
    ) -> Result<String, AssetError> {
        match self {
            AssetSource::Url(url) => Ok(url),
            AssetSource::Pending(data) => {
                store.upload(&data.bytes, &data.mime, name_hint).await
            }
        }
    }
}

/// Build an object name: `{prefix}/{timestamp}-{slug}.{ext}`. The hint is
/// lowercased with runs of non-alphanumerics collapsed to `_`, and the
/// extension derives from the content type.
pub fn object_name(prefix: &str, name_hint: &str, content_type: &str) -> String {
    let mut slug = String::new();
    let mut last_was_sep = true;
    for ch in name_hint.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "asset" } else { slug };

    let ext = match content_type {
        "application/pdf" => "pdf",
        other => other.strip_prefix("image/").unwrap_or("bin"),
    };

    format!("{}/{}-{}.{}", prefix.trim_end_matches('/'), current_timestamp(), slug, ext)
}

/// In-memory [`AssetStore`] for tests: records uploads and hands back a
/// deterministic URL built from [`object_name`].
#[derive(Debug, Default)]
pub struct MemoryAssets {
    prefix: String,
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryAssets {
    /// Create a store that names objects under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// Names of everything uploaded so far.
    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploads
            .lock()
            .map(|u| u.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AssetStore for MemoryAssets {
    async fn upload(
        &self,
        bytes: &[u8],
        content_type: &str,
        name_hint: &str,
    ) -> Result<String, AssetError> {
        let name = object_name(&self.prefix, name_hint, content_type);
        let mut uploads = self
            .uploads
            .lock()
            .map_err(|_| AssetError::Upload("uploads mutex poisoned".into()))?;
        uploads.push((name.clone(), bytes.to_vec()));
        Ok(format!("https://assets.invalid/{}", name))
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_uri() {
        // "hi" in base64
        let uri = DataUri::parse("data:image/png;base64,aGk=").unwrap();
        assert_eq!(uri.mime, "image/png");
        assert_eq!(uri.bytes, b"hi");
    }

    #[test]
    fn test_malformed_data_uri_rejected() {
        assert!(matches!(
            DataUri::parse("https://example.com/a.png"),
            Err(AssetError::InvalidDataUri)
        ));
        assert!(matches!(
            DataUri::parse("data:image/png;base64,"),
            Err(AssetError::InvalidDataUri)
        ));
        assert!(matches!(
            DataUri::parse("data:image/png;base64,not!!valid"),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn test_object_name_shape() {
        let name = object_name("uploads", "Danfoss Catalogue (2024)", "application/pdf");
        assert!(name.starts_with("uploads/"));
        assert!(name.ends_with("-danfoss_catalogue_2024.pdf"));

        let name = object_name("uploads/", "photo.JPG", "image/jpeg");
        assert!(name.ends_with("-photo_jpg.jpeg"));
        assert!(!name.contains("//"));

        let name = object_name("uploads", "???", "application/octet-stream");
        assert!(name.ends_with("-asset.bin"));
    }

    #[tokio::test]
    async fn test_url_source_passes_through() {
        let store = MemoryAssets::new("uploads");
        let source = AssetSource::from_input("https://cdn.example/logo.png").unwrap();

        let url = source.resolve(&store, "logo").await.unwrap();
        assert_eq!(url, "https://cdn.example/logo.png");
        assert!(store.uploaded_names().is_empty());
    }

    #[tokio::test]
    async fn test_pending_source_uploads() {
        let store = MemoryAssets::new("uploads");
        let source = AssetSource::from_input("data:image/png;base64,aGk=").unwrap();

        let url = source.resolve(&store, "Brand Logo").await.unwrap();
        assert!(url.starts_with("https://assets.invalid/uploads/"));
        assert!(url.ends_with("-brand_logo.png"));
        assert_eq!(store.uploaded_names().len(), 1);
    }
}
