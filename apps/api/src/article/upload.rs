//! Upload staging — writes an uploaded document to the upload directory and
//! removes it again when the request is done.
//!
//! Every staged file is owned by a `tempfile::TempPath`, so the file is
//! deleted when the owning `UploadedDocument` (or a half-written
//! `PendingUpload`) is dropped, including on early returns and cancelled
//! requests. `UploadedDocument::release` does the same removal eagerly and logs
//! a failure instead of surfacing it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::TempPath;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Longest sanitized original file name kept in the staged file name.
const MAX_NAME_CHARS: usize = 64;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("uploaded file is not valid UTF-8 text")]
    NotUtf8,
}

/// Directory where uploads are staged for the lifetime of a single request.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Opens the store, creating the directory if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates an empty staged file named `<unix-millis>-<random>-<name>`.
    ///
    /// The file is created exclusively, so concurrent uploads with the same
    /// original name never share a path.
    pub fn create(&self, original_name: Option<&str>) -> Result<PendingUpload, UploadError> {
        let original_name = sanitize_file_name(original_name.unwrap_or_default());
        let staged = tempfile::Builder::new()
            .prefix(&format!("{}-", Utc::now().timestamp_millis()))
            .suffix(&format!("-{original_name}"))
            .rand_bytes(8)
            .tempfile_in(&self.dir)?;
        let (file, path) = staged.into_parts();

        debug!("Staging upload at {}", path.display());

        Ok(PendingUpload {
            file: tokio::fs::File::from_std(file),
            path,
            original_name,
            size_bytes: 0,
        })
    }
}

/// A staged file that is still being written.
pub struct PendingUpload {
    file: tokio::fs::File,
    path: TempPath,
    original_name: String,
    size_bytes: u64,
}

impl PendingUpload {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), UploadError> {
        self.file.write_all(chunk).await?;
        self.size_bytes += chunk.len() as u64;
        Ok(())
    }

    pub async fn finish(mut self) -> Result<UploadedDocument, UploadError> {
        self.file.flush().await?;
        Ok(UploadedDocument {
            path: self.path,
            original_name: self.original_name,
            size_bytes: self.size_bytes,
        })
    }
}

/// A fully staged upload. Removed from disk on `release` or drop.
#[derive(Debug)]
pub struct UploadedDocument {
    path: TempPath,
    original_name: String,
    size_bytes: u64,
}

impl UploadedDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Reads the staged file as UTF-8 text.
    pub async fn read_text(&self) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(&*self.path).await?;
        String::from_utf8(bytes).map_err(|_| UploadError::NotUtf8)
    }

    /// Removes the staged file now. A file that is already gone counts as
    /// removed; any other failure is logged and swallowed.
    pub fn release(self) {
        let shown = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => debug!("Removed staged upload {shown}"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Staged upload {shown} was already removed")
            }
            Err(e) => warn!("Failed to remove staged upload {shown}: {e}"),
        }
    }
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
fn sanitize_file_name(name: &str) -> String {
    // Browsers on some platforms send the full client-side path.
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_CHARS)
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path().join("uploads")).await.unwrap();
        (dir, store)
    }

    async fn stage(store: &UploadStore, name: &str, content: &[u8]) -> UploadedDocument {
        let mut pending = store.create(Some(name)).unwrap();
        pending.write_chunk(content).await.unwrap();
        pending.finish().await.unwrap()
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_open_creates_missing_directory() {
        let (_tmp, store) = store().await;
        assert!(store.dir().is_dir());
    }

    #[tokio::test]
    async fn test_staged_name_is_timestamp_prefixed() {
        let (_tmp, store) = store().await;
        let doc = stage(&store, "bio.txt", b"hello").await;

        let file_name = doc.path().file_name().unwrap().to_str().unwrap().to_string();
        let (millis, rest) = file_name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok(), "prefix {millis} is not a timestamp");
        assert!(rest.ends_with("-bio.txt"));
        assert_eq!(doc.original_name(), "bio.txt");
        assert_eq!(doc.size_bytes(), 5);
    }

    #[tokio::test]
    async fn test_same_name_uploads_get_distinct_paths() {
        let (_tmp, store) = store().await;
        let first = stage(&store, "bio.txt", b"one").await;
        let second = stage(&store, "bio.txt", b"two").await;

        assert_ne!(first.path(), second.path());
        assert_eq!(first.read_text().await.unwrap(), "one");
        assert_eq!(second.read_text().await.unwrap(), "two");
    }

    #[tokio::test]
    async fn test_chunks_are_concatenated() {
        let (_tmp, store) = store().await;
        let mut pending = store.create(Some("notes.md")).unwrap();
        pending.write_chunk("Jane ".as_bytes()).await.unwrap();
        pending.write_chunk("Doé".as_bytes()).await.unwrap();
        let doc = pending.finish().await.unwrap();

        assert_eq!(doc.read_text().await.unwrap(), "Jane Doé");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let (_tmp, store) = store().await;
        let doc = stage(&store, "photo.jpg", &[0xff, 0xd8, 0xff, 0xe0]).await;
        assert!(matches!(doc.read_text().await, Err(UploadError::NotUtf8)));
    }

    #[tokio::test]
    async fn test_release_removes_file() {
        let (_tmp, store) = store().await;
        let doc = stage(&store, "bio.txt", b"hello").await;
        let path = doc.path().to_path_buf();
        assert!(path.exists());

        doc.release();
        assert!(!path.exists());
        assert_eq!(entries(store.dir()), 0);
    }

    #[tokio::test]
    async fn test_release_tolerates_already_removed_file() {
        let (_tmp, store) = store().await;
        let doc = stage(&store, "bio.txt", b"hello").await;
        std::fs::remove_file(doc.path()).unwrap();

        doc.release();
        assert_eq!(entries(store.dir()), 0);
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let (_tmp, store) = store().await;
        let doc = stage(&store, "bio.txt", b"hello").await;
        drop(doc);
        assert_eq!(entries(store.dir()), 0);
    }

    #[tokio::test]
    async fn test_abandoned_pending_upload_is_removed() {
        let (_tmp, store) = store().await;
        let mut pending = store.create(Some("bio.txt")).unwrap();
        pending.write_chunk(b"partial").await.unwrap();
        assert_eq!(entries(store.dir()), 1);

        drop(pending);
        assert_eq!(entries(store.dir()), 0);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("bio.txt"), "bio.txt");
        assert_eq!(sanitize_file_name("my résumé (1).txt"), "my_r_sum___1_.txt");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\jane\\bio.txt"), "bio.txt");
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name(".."), "upload");
        assert_eq!(sanitize_file_name(&"a".repeat(200)).len(), MAX_NAME_CHARS);
    }
}
