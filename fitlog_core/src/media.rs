//! Attachment store for workout and meal media.
//!
//! Handles are opaque random filenames; the core never inspects file bytes
//! and entity creation never waits on attachment I/O.

use crate::{Error, MediaKind, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Abstract blob storage for photos and videos
pub trait AttachmentStore {
    /// Persist raw bytes and return an opaque handle
    fn save(&self, bytes: &[u8], kind: MediaKind) -> Result<String>;

    /// Remove the blob behind a handle. Deleting an unknown handle is not
    /// an error; the record referencing it is already gone.
    fn delete(&self, handle: &str) -> Result<()>;

    /// Resolve a handle to a filesystem location
    fn resolve(&self, handle: &str) -> PathBuf;
}

/// Directory-backed attachment store with uuid filenames
pub struct DirAttachmentStore {
    root: PathBuf,
}

impl DirAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AttachmentStore for DirAttachmentStore {
    fn save(&self, bytes: &[u8], kind: MediaKind) -> Result<String> {
        std::fs::create_dir_all(&self.root)?;

        let handle = format!("{}.{}", Uuid::new_v4(), kind.extension());
        let path = self.root.join(&handle);
        std::fs::write(&path, bytes)?;

        tracing::debug!("Saved {:?} attachment as {}", kind, handle);
        Ok(handle)
    }

    fn delete(&self, handle: &str) -> Result<()> {
        // Reject handles that would escape the media directory.
        if handle.contains('/') || handle.contains("..") {
            return Err(Error::Attachment(format!("invalid handle: {}", handle)));
        }

        let path = self.root.join(handle);
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::debug!("Deleted attachment {}", handle);
        }
        Ok(())
    }

    fn resolve(&self, handle: &str) -> PathBuf {
        self.root.join(handle)
    }
}

/// Release every photo handle held by a record being deleted
pub fn release_handles<'a>(
    store: &dyn AttachmentStore,
    handles: impl IntoIterator<Item = &'a str>,
) {
    for handle in handles {
        if let Err(e) = store.delete(handle) {
            tracing::warn!("Failed to release attachment {}: {}", handle, e);
        }
    }
}

/// Check that a media root is usable
pub fn ensure_media_dir(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)
        .map_err(|e| Error::Attachment(format!("cannot create media dir {:?}: {}", root, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_resolve_delete() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirAttachmentStore::new(temp_dir.path());

        let handle = store.save(b"jpegbytes", MediaKind::Photo).unwrap();
        assert!(handle.ends_with(".jpg"));

        let path = store.resolve(&handle);
        assert_eq!(std::fs::read(&path).unwrap(), b"jpegbytes");

        store.delete(&handle).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_handles_are_unique() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirAttachmentStore::new(temp_dir.path());

        let a = store.save(b"a", MediaKind::Photo).unwrap();
        let b = store.save(b"b", MediaKind::Photo).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_delete_unknown_handle_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirAttachmentStore::new(temp_dir.path());
        assert!(store.delete("no-such-file.jpg").is_ok());
    }

    #[test]
    fn test_traversal_handle_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirAttachmentStore::new(temp_dir.path());
        assert!(store.delete("../escape.jpg").is_err());
    }

    #[test]
    fn test_video_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirAttachmentStore::new(temp_dir.path());
        let handle = store.save(b"mp4bytes", MediaKind::Video).unwrap();
        assert!(handle.ends_with(".mp4"));
    }

    #[test]
    fn test_release_handles_ignores_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirAttachmentStore::new(temp_dir.path());
        let handle = store.save(b"x", MediaKind::Photo).unwrap();

        release_handles(&store, [handle.as_str(), "missing.jpg"]);
        assert!(!store.resolve(&handle).exists());
    }
}
