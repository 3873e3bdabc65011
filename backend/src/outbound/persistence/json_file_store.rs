//! Key-value store persisted as one JSON file per key.
//!
//! Each key lives in `<key>.json` inside a storage directory opened through
//! `cap-std`, so the adapter cannot touch anything outside it. Writes go to a
//! hidden temporary file that is renamed over the target, so a reader never
//! observes a partially written value.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, StorageKey};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Directory-backed [`KeyValueStore`].
#[derive(Debug)]
pub struct JsonFileStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl JsonFileStore {
    /// Open `root`, creating it (and its parents) when missing.
    pub fn open(root: &Utf8Path) -> Result<Self, KeyValueStoreError> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(root, ambient_authority()))
            .map(|dir| Self {
                root: root.to_path_buf(),
                dir,
            })
            .map_err(|err| KeyValueStoreError::io(root.as_str(), err.to_string()))
    }

    /// Directory holding the value files.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: StorageKey) -> String {
        format!("{key}.json")
    }

    fn io_error(key: StorageKey, err: &io::Error) -> KeyValueStoreError {
        KeyValueStoreError::io(key.as_str(), err.to_string())
    }

    fn write_atomic(&self, key: StorageKey, contents: &str) -> Result<(), KeyValueStoreError> {
        let target = Self::file_name(key);
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let tmp_name = format!(".{target}.tmp.{}.{nanos}.{counter}", std::process::id());

        if let Err(err) = self.write_temp_file(&tmp_name, contents) {
            self.discard_temp_file(&tmp_name);
            return Err(Self::io_error(key, &err));
        }
        if let Err(err) = self.replace_target(&tmp_name, &target) {
            self.discard_temp_file(&tmp_name);
            return Err(Self::io_error(key, &err));
        }
        self.sync_directory();
        Ok(())
    }

    fn write_temp_file(&self, tmp_name: &str, contents: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }

    #[cfg(windows)]
    fn replace_target(&self, tmp_name: &str, target: &str) -> io::Result<()> {
        // Windows rename fails if the target exists.
        match self.dir.remove_file(target) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.dir.rename(tmp_name, &self.dir, target)
    }

    #[cfg(not(windows))]
    fn replace_target(&self, tmp_name: &str, target: &str) -> io::Result<()> {
        self.dir.rename(tmp_name, &self.dir, target)
    }

    fn discard_temp_file(&self, tmp_name: &str) {
        if let Err(err) = self.dir.remove_file(tmp_name) {
            if err.kind() != io::ErrorKind::NotFound {
                debug!(file = tmp_name, error = %err, "temporary file left behind");
            }
        }
    }

    fn sync_directory(&self) {
        // Best effort: not every platform can fsync a directory handle.
        if let Err(err) = self.dir.open(".").and_then(|dir| dir.sync_all()) {
            debug!(root = %self.root, error = %err, "storage directory sync skipped");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, KeyValueStoreError> {
        match self.dir.read_to_string(Self::file_name(key)) {
            Ok(contents) => {
                debug!(%key, bytes = contents.len(), "file store read");
                Ok(Some(contents))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(%key, "file store miss");
                Ok(None)
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                Err(KeyValueStoreError::encoding(key.as_str()))
            }
            Err(err) => Err(Self::io_error(key, &err)),
        }
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), KeyValueStoreError> {
        self.write_atomic(key, value)?;
        debug!(%key, bytes = value.len(), "file store write");
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), KeyValueStoreError> {
        match self.dir.remove_file(Self::file_name(key)) {
            Ok(()) => {
                debug!(%key, "file store remove");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(key, &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Workspace {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().join("state"))
            .expect("temp path is UTF-8");
        Workspace { _temp: temp, root }
    }

    #[rstest]
    fn open_creates_missing_directories(workspace: Workspace) {
        let store = JsonFileStore::open(&workspace.root).expect("open store");
        assert!(workspace.root.is_dir());
        assert_eq!(store.root(), workspace.root.as_path());
    }

    #[rstest]
    fn values_live_in_one_file_per_key(workspace: Workspace) {
        let store = JsonFileStore::open(&workspace.root).expect("open store");
        store.set(StorageKey::Complaints, "[]").expect("write");

        let on_disk = std::fs::read_to_string(workspace.root.join("complaints.json"))
            .expect("complaints file");
        assert_eq!(on_disk, "[]");
        assert_eq!(store.get(StorageKey::Complaints), Ok(Some("[]".to_owned())));
        assert_eq!(store.get(StorageKey::CurrentUser), Ok(None));
    }

    #[rstest]
    fn overwrites_leave_no_temporary_files(workspace: Workspace) {
        let store = JsonFileStore::open(&workspace.root).expect("open store");
        store.set(StorageKey::CurrentUser, r#"{"id":"1"}"#).expect("first write");
        store.set(StorageKey::CurrentUser, r#"{"id":"2"}"#).expect("second write");

        let names: Vec<String> = std::fs::read_dir(&workspace.root)
            .expect("list dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["currentUser.json".to_owned()]);
        assert_eq!(
            store.get(StorageKey::CurrentUser),
            Ok(Some(r#"{"id":"2"}"#.to_owned()))
        );
    }

    #[rstest]
    fn remove_tolerates_missing_keys(workspace: Workspace) {
        let store = JsonFileStore::open(&workspace.root).expect("open store");
        store.remove(StorageKey::CurrentUser).expect("remove missing");
        store.set(StorageKey::CurrentUser, "{}").expect("write");
        store.remove(StorageKey::CurrentUser).expect("remove present");
        assert_eq!(store.get(StorageKey::CurrentUser), Ok(None));
    }

    #[rstest]
    fn reopening_sees_earlier_writes(workspace: Workspace) {
        JsonFileStore::open(&workspace.root)
            .expect("open store")
            .set(StorageKey::Complaints, "[1]")
            .expect("write");
        let reopened = JsonFileStore::open(&workspace.root).expect("reopen store");
        assert_eq!(reopened.get(StorageKey::Complaints), Ok(Some("[1]".to_owned())));
    }
}
