//! Stored-photo management on local disk.
//!
//! The store's contract is `save photo, return stored name`; the HTTP layer
//! only ever records the returned name on the owning row.

use std::io;
use std::path::PathBuf;

use uuid::Uuid;

/// Stored name used for accounts and ads created without a photo.
pub const PLACEHOLDER_PHOTO: &str = "placeholder.png";

/// A directory-backed photo store.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the backing directory exists.
    pub async fn init(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Save photo bytes under a fresh random name and return the name.
    pub async fn save(&self, bytes: &[u8]) -> io::Result<String> {
        let name = format!("{}.jpg", Uuid::new_v4());
        tokio::fs::write(self.root.join(&name), bytes).await?;
        Ok(name)
    }

    /// The stored name recorded when no photo was provided.
    pub fn placeholder(&self) -> String {
        PLACEHOLDER_PHOTO.to_string()
    }

    /// Full path of a stored photo.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_writes_a_readable_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PhotoStore::new(dir.path());
        store.init().await.expect("init");

        let name = store.save(b"not really a jpeg").await.expect("save");
        assert!(name.ends_with(".jpg"));

        let read = tokio::fs::read(store.path_of(&name)).await.expect("read");
        assert_eq!(read, b"not really a jpeg");
    }

    #[tokio::test]
    async fn saved_names_are_distinct() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PhotoStore::new(dir.path());
        store.init().await.expect("init");

        let a = store.save(b"a").await.expect("save");
        let b = store.save(b"b").await.expect("save");
        assert_ne!(a, b);
    }
}
