//! Store persistence.
//!
//! The store file holds the export snapshot as JSON. Saving writes a
//! temporary file next to the store file, keeps the previous version as
//! `<name>~`, then renames the temporary file over the store file, so the
//! store file is never observed half-written.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error_handling::StoreError;
use crate::export::{build_snapshot, snapshot_to_vec, Snapshot};

use super::DomainStore;

/// Loads and saves a whole [`DomainStore`] at once.
pub trait StoreBackend {
    /// Reads the complete store. A store that does not exist yet is empty.
    fn load(&self) -> Result<DomainStore, StoreError>;

    /// Replaces the persisted store with `store`.
    fn save(&self, store: &DomainStore) -> Result<(), StoreError>;
}

/// Path of the backup kept next to a store file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("store"));
    name.push("~");
    path.with_file_name(name)
}

/// JSON document store with atomic replace.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreBackend for JsonFileStore {
    fn load(&self) -> Result<DomainStore, StoreError> {
        if !self.path.exists() {
            debug!("No store at {}, starting empty", self.path.display());
            return Ok(DomainStore::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let store = snapshot.into_store();

        info!(
            "Loaded {} domains and {} mail servers from {}",
            store.domain_count(),
            store.mail_server_count(),
            self.path.display()
        );
        Ok(store)
    }

    fn save(&self, store: &DomainStore) -> Result<(), StoreError> {
        let content = snapshot_to_vec(&build_snapshot(store))?;

        let mut tmp = NamedTempFile::new_in(self.directory()).map_err(|e| self.write_error(e))?;
        tmp.write_all(&content).map_err(|e| self.write_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;

        if self.path.exists() {
            let backup = backup_path(&self.path);
            fs::copy(&self.path, &backup).map_err(|source| StoreError::Write {
                path: backup.clone(),
                source,
            })?;
        }

        tmp.persist(&self.path).map_err(|source| StoreError::Replace {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "Stored {} domains and {} mail servers to {}",
            store.domain_count(),
            store.mail_server_count(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Classification;
    use crate::store::{DomainRecord, MailServerRecord};
    use tempfile::TempDir;

    fn sample_store() -> DomainStore {
        let mut store = DomainStore::new();
        store.insert_mail_server("mx.temp.io", MailServerRecord::new(vec!["10.0.0.1".into()]));
        let mut record = DomainRecord::new(Classification::Disposable, Some("temp".into()));
        record.add_mail_server("mx.temp.io");
        store.insert_domain("temp.io", record);
        store
    }

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("/data/fakedomain.json")),
            PathBuf::from("/data/fakedomain.json~")
        );
        assert_eq!(backup_path(Path::new("db.json")), PathBuf::from("db.json~"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileStore::new(dir.path().join("absent.json"));
        let store = backend.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileStore::new(dir.path().join("db.json"));
        let store = sample_store();

        backend.save(&store).unwrap();
        let loaded = backend.load().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_save_keeps_previous_version_as_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let backend = JsonFileStore::new(&path);

        backend.save(&DomainStore::new()).unwrap();
        let first = fs::read(&path).unwrap();
        assert!(!backup_path(&path).exists());

        backend.save(&sample_store()).unwrap();
        assert_eq!(fs::read(backup_path(&path)).unwrap(), first);
        assert_ne!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_save_leaves_no_temporary_files() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileStore::new(dir.path().join("db.json"));
        backend.save(&sample_store()).unwrap();
        backend.save(&sample_store()).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["db.json", "db.json~"]);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "{ not json").unwrap();
        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_failed_save_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let backend = JsonFileStore::new(&path);
        backend.save(&sample_store()).unwrap();
        let before = fs::read(&path).unwrap();

        let unwritable = JsonFileStore::new(dir.path().join("missing-dir").join("db.json"));
        assert!(unwritable.save(&DomainStore::new()).is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}
