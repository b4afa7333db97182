use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use fs4::fs_std::FileExt;
use tracing::{debug, warn};

/// Returns `path` with `suffix` appended to the file name, e.g. `data.json` -> `data.json.lock`.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("records"));
    name.push(suffix);
    path.with_file_name(name)
}

/// Replaces the contents of `path` with `data`.
/// Data is written into a temporary sibling first and then renamed over the target, so readers
/// either see the old document or the new one, never a half written file.
pub fn write_atomically(path: &Path, data: &[u8]) -> Result<(), io::Error> {
    let temporary = sibling_path(path, ".tmp");
    let result = (|| -> Result<(), io::Error> {
        let mut file = File::create(&temporary)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temporary, path)
    })();

    if result.is_err() {
        if let Err(e) = fs::remove_file(&temporary) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to clean up {temporary:?}: {e}");
            }
        }
    }
    result
}

/// Exclusive advisory lock on a sidecar file next to a document. The lock is released on drop.
///
/// The document itself can't be locked since [write_atomically] swaps its inode on every write.
#[derive(Debug)]
pub struct DocumentLock {
    file: File,
    path: PathBuf,
}

impl DocumentLock {
    /// Blocks until no other process holds the lock for `document`.
    pub fn acquire(document: &Path) -> Result<Self, io::Error> {
        let path = sibling_path(document, ".lock");
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        FileExt::lock_exclusive(&file)?;
        debug!("Acquired lock {path:?}");
        Ok(Self { file, path })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release lock {:?}: {e}", self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{sibling_path, write_atomically, DocumentLock};

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("/tmp/data.json"), ".lock"),
            Path::new("/tmp/data.json.lock")
        );
        assert_eq!(sibling_path(Path::new("db.json"), ".tmp"), Path::new("db.json.tmp"));
    }

    #[test]
    fn test_write_atomically_replaces_content() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"old\": true, \"padding\": \"xxxxxxxxxxxxxxxx\"}")?;

        write_atomically(&path, b"{}")?;

        assert_eq!(fs::read_to_string(&path)?, "{}");
        assert!(!sibling_path(&path, ".tmp").exists());
        Ok(())
    }

    #[test]
    fn test_write_atomically_creates_missing_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("new.json");

        write_atomically(&path, b"[]")?;

        assert_eq!(fs::read_to_string(&path)?, "[]");
        Ok(())
    }

    #[test]
    fn test_write_atomically_into_missing_directory_fails() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("missing").join("data.json");

        assert!(write_atomically(&path, b"{}").is_err());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_lock_released_on_drop() -> Result<()> {
        let dir = tempdir()?;
        let document = dir.path().join("data.json");

        let lock = DocumentLock::acquire(&document)?;
        assert!(sibling_path(&document, ".lock").exists());
        drop(lock);

        // Would block forever if the first lock was still held.
        let _again = DocumentLock::acquire(&document)?;
        assert!(!document.exists());
        Ok(())
    }
}
