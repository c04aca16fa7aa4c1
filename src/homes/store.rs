//! File-backed persistence for the home registry.
//!
//! Two JSON documents live in the data directory: one for personal homes and one for global
//! homes. Each save rewrites the whole document through a temp file and an atomic rename
//! while holding an exclusive lock on the destination.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::config::StorageConfig;
use crate::homes::codec::{self, Decoded};
use crate::homes::errors::HomeError;
use crate::homes::registry::HomeRegistry;

pub const DEFAULT_HOMES_FILE: &str = "homes.json";
pub const DEFAULT_GLOBAL_HOMES_FILE: &str = "globalhomes.json";

/// Counts reported after a load, for startup logging and `status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub accounts: usize,
    pub personal_homes: usize,
    pub global_homes: usize,
    pub skipped_records: usize,
}

#[derive(Debug, Clone)]
pub struct HomeStore {
    homes_path: PathBuf,
    global_path: PathBuf,
}

impl HomeStore {
    /// Store using the default file names inside `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            homes_path: dir.join(DEFAULT_HOMES_FILE),
            global_path: dir.join(DEFAULT_GLOBAL_HOMES_FILE),
        }
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        let dir = Path::new(&storage.data_dir);
        Self {
            homes_path: dir.join(&storage.homes_file),
            global_path: dir.join(&storage.global_homes_file),
        }
    }

    pub fn homes_path(&self) -> &Path {
        &self.homes_path
    }

    pub fn global_path(&self) -> &Path {
        &self.global_path
    }

    /// Create the data directory and empty documents if they do not exist yet.
    pub fn ensure_layout(&self) -> Result<(), HomeError> {
        for path in [&self.homes_path, &self.global_path] {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() {
                    fs::create_dir_all(dir).map_err(|e| HomeError::io(dir, e))?;
                }
            }
            if !path.exists() {
                write_file_locked(path, "{}")?;
                info!("Created empty home document {}", path.display());
            }
        }
        Ok(())
    }

    /// Load both documents into a fresh registry.
    ///
    /// Never fails: an unreadable or unparseable document is logged and that namespace
    /// starts empty; individual corrupt entries are skipped by the codec.
    pub fn load(&self) -> (HomeRegistry, LoadSummary) {
        let personal = match read_document(&self.homes_path) {
            Ok(Some(doc)) => codec::decode_personal(&doc),
            Ok(None) => Decoded::default(),
            Err(e) => {
                error!("Failed to load personal homes, starting empty: {}", e);
                Decoded::default()
            }
        };
        let global = match read_document(&self.global_path) {
            Ok(Some(doc)) => codec::decode_global(&doc),
            Ok(None) => Decoded::default(),
            Err(e) => {
                error!("Failed to load global homes, starting empty: {}", e);
                Decoded::default()
            }
        };

        let summary = LoadSummary {
            accounts: personal.homes.len(),
            personal_homes: personal.homes.values().map(|h| h.len()).sum(),
            global_homes: global.homes.len(),
            skipped_records: personal.skipped.len() + global.skipped.len(),
        };
        if summary.skipped_records > 0 {
            warn!(
                "Skipped {} corrupt home record(s) while loading",
                summary.skipped_records
            );
        }
        info!(
            "Loaded {} personal home(s) for {} account(s) and {} global home(s)",
            summary.personal_homes, summary.accounts, summary.global_homes
        );
        (
            HomeRegistry::from_parts(personal.homes, global.homes),
            summary,
        )
    }

    /// Rewrite the personal homes document from the registry.
    pub fn save_personal(&self, registry: &HomeRegistry) -> Result<(), HomeError> {
        let doc = codec::encode_personal(registry.personal());
        self.write_document(&self.homes_path, &doc)
    }

    /// Rewrite the global homes document from the registry.
    pub fn save_global(&self, registry: &HomeRegistry) -> Result<(), HomeError> {
        let doc = codec::encode_global(registry.global());
        self.write_document(&self.global_path, &doc)
    }

    fn write_document(&self, path: &Path, doc: &Value) -> Result<(), HomeError> {
        let content = serde_json::to_string_pretty(doc).map_err(|e| HomeError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        write_file_locked(path, &content)?;
        debug!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

/// Read and parse a document. `Ok(None)` means "nothing stored yet" (missing or blank file).
fn read_document(path: &Path) -> Result<Option<Value>, HomeError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No {} found; starting with no entries", path.display());
            return Ok(None);
        }
        Err(e) => return Err(HomeError::io(path, e)),
    };
    // Guard against any accidental leading NULs
    let cleaned = data.trim_start_matches('\0');
    if cleaned.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(cleaned)
        .map(Some)
        .map_err(|e| HomeError::Json {
            path: path.to_path_buf(),
            source: e,
        })
}

/// A sibling temp file that is removed on drop unless it was renamed into place.
struct PendingWrite {
    path: PathBuf,
    file: File,
    committed: bool,
}

impl PendingWrite {
    /// Create `.<name>.<pid>-<n>.partial` next to `target`, picking the first free `n`.
    fn create(target: &Path) -> Result<Self, HomeError> {
        let dir = parent_dir(target);
        let name = target
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_HOMES_FILE);
        for attempt in 0..u16::MAX {
            let path = dir.join(format!(".{}.{}-{}.partial", name, std::process::id(), attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    return Ok(Self {
                        path,
                        file,
                        committed: false,
                    })
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(HomeError::io(path, e)),
            }
        }
        Err(HomeError::io(
            target,
            std::io::Error::new(ErrorKind::AlreadyExists, "no free temp file name"),
        ))
    }

    fn write(&mut self, content: &str) -> Result<(), HomeError> {
        self.file
            .write_all(content.as_bytes())
            .and_then(|_| self.file.sync_all())
            .map_err(|e| HomeError::io(&self.path, e))
    }

    fn commit(mut self, target: &Path) -> Result<(), HomeError> {
        fs::rename(&self.path, target).map_err(|e| HomeError::io(target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!("Could not remove {}: {}", self.path.display(), e);
            }
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Replace the document at `path` with `content`.
///
/// Writers serialize on an exclusive lock of the document itself. Readers never see a
/// half-written document: the new content is synced to a temp file and renamed over it.
fn write_file_locked(path: &Path, content: &str) -> Result<(), HomeError> {
    let guard = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(|e| HomeError::io(path, e))?;
    guard.lock_exclusive().map_err(|e| HomeError::io(path, e))?;

    let mut pending = PendingWrite::create(path)?;
    pending.write(content)?;
    pending.commit(path)?;

    if let Ok(dir) = File::open(parent_dir(path)) {
        let _ = dir.sync_all();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::homes::types::{HomeCapacity, HomeName, Location};
    use tempfile::TempDir;
    use uuid::Uuid;

    #[test]
    fn save_then_load_round_trip() {
        let dir = TempDir::new().expect("tempdir");
        let store = HomeStore::new(dir.path());
        let alice = Uuid::new_v4();
        let mut registry = HomeRegistry::new();
        registry
            .set_personal_home(
                alice,
                &HomeName::new("base").unwrap(),
                Location::new("world", 1.5, 64.0, -3.0, 45.0, 10.0),
                HomeCapacity::Unlimited,
            )
            .unwrap();
        registry.set_global_home(&HomeName::new("spawn").unwrap(), Location::at("world", 0.0, 64.0, 0.0));
        store.save_personal(&registry).expect("save personal");
        store.save_global(&registry).expect("save global");

        let (loaded, summary) = store.load();
        assert_eq!(loaded.personal(), registry.personal());
        assert_eq!(loaded.global(), registry.global());
        assert_eq!(
            summary,
            LoadSummary {
                accounts: 1,
                personal_homes: 1,
                global_homes: 1,
                skipped_records: 0
            }
        );
    }

    #[test]
    fn missing_and_blank_files_load_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = HomeStore::new(dir.path());
        let (registry, _) = store.load();
        assert_eq!(registry.account_count(), 0);

        fs::write(store.homes_path(), "").unwrap();
        fs::write(store.global_path(), "\n").unwrap();
        let (registry, summary) = store.load();
        assert_eq!(registry.global_home_count(), 0);
        assert_eq!(summary.skipped_records, 0);
    }

    #[test]
    fn unparseable_document_starts_that_namespace_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = HomeStore::new(dir.path());
        fs::write(store.homes_path(), "{ not json").unwrap();
        fs::write(
            store.global_path(),
            r#"{"spawn":{"world":"world","x":0,"y":64,"z":0,"yaw":0,"pitch":0}}"#,
        )
        .unwrap();
        let (registry, _) = store.load();
        assert_eq!(registry.account_count(), 0);
        assert_eq!(registry.global_home_count(), 1);
    }

    #[test]
    fn ensure_layout_creates_empty_documents() {
        let dir = TempDir::new().expect("tempdir");
        let store = HomeStore::new(dir.path().join("nested"));
        store.ensure_layout().expect("layout");
        assert_eq!(fs::read_to_string(store.homes_path()).unwrap(), "{}");
        assert_eq!(fs::read_to_string(store.global_path()).unwrap(), "{}");
        // Leaves no temp files behind
        let leftovers = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn abandoned_write_removes_its_temp_file() {
        let dir = TempDir::new().expect("tempdir");
        let target = dir.path().join("homes.json");
        let temp_path = {
            let mut pending = PendingWrite::create(&target).expect("temp file");
            pending.write("{\"half\":").expect("write");
            assert!(pending.path.exists());
            pending.path.clone()
        };
        assert!(!temp_path.exists());
        assert!(!target.exists());
    }

    #[test]
    fn failed_rename_leaves_nothing_behind() {
        let dir = TempDir::new().expect("tempdir");
        // a directory cannot be replaced by a file
        let target = dir.path().join("homes.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let mut pending = PendingWrite::create(&target).expect("temp file");
        pending.write("{}").expect("write");
        assert!(pending.commit(&target).is_err());
        let partials = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .count();
        assert_eq!(partials, 0);
    }
}
