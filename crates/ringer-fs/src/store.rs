// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! File-backed `KeyValueStore` backends and runtime backend selection.
//!
//! Two backends share one contract:
//!
//! - [`SecureFileStore`]: one owner-only file per key, written atomically.
//! - [`LocalFileStore`]: every key in a single JSON map, like browser
//!   local storage. Used where the secure store cannot be set up.

use ringer_core::store::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// File name of the [`LocalFileStore`] map.
pub const LOCAL_STORE_FILE: &str = "local-storage.json";

fn check_key(key: &str) -> Result<(), StoreError> {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        && !key.starts_with('.');
    if plain {
        Ok(())
    } else {
        Err(StoreError::Other(format!("invalid storage key: {key:?}")))
    }
}

/// Write `data` to `path` through a temporary sibling and an atomic rename.
fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .ok_or_else(|| StoreError::Other(format!("no parent for {}", path.display())))?;
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    tmp.persist(path).map_err(|err| StoreError::Io(err.error))?;
    Ok(())
}

/// One file per key under a private directory.
#[derive(Debug)]
pub struct SecureFileStore {
    base: PathBuf,
}

impl SecureFileStore {
    /// Create a store rooted at `base`, creating it owner-only if missing.
    pub fn new(base: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&base, fs::Permissions::from_mode(0o700))?;
        }
        Ok(Self { base })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.base.join(format!("{key}.value")))
    }
}

impl KeyValueStore for SecureFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        write_atomic(&path, value.as_bytes())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

/// All keys in one JSON object on disk.
#[derive(Debug)]
pub struct LocalFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalFileStore {
    /// Keep the map in `dir/local-storage.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(LOCAL_STORE_FILE),
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    /// Current map for a write. A corrupt file is replaced, not preserved.
    fn read_map_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StoreError> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(StoreError::Serde(err)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "discarding corrupt local store"
                );
                Ok((BTreeMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(map)?;
        write_atomic(&self.path, &data)
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for LocalFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        let _guard = self.guard();
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let _guard = self.guard();
        let (mut map, _) = self.read_map_for_write()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let _guard = self.guard();
        let (mut map, corrupt) = self.read_map_for_write()?;
        if map.remove(key).is_some() || corrupt {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Which backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Secure store unless the runtime cannot provide one.
    #[default]
    Auto,
    /// Always the secure store.
    Secure,
    /// Always the local single-file store.
    Local,
}

/// The key-value backend chosen at startup.
#[derive(Debug)]
pub enum StorageBackend {
    /// Owner-only file per key.
    Secure(SecureFileStore),
    /// Single JSON map.
    Local(LocalFileStore),
}

impl StorageBackend {
    /// Open the backend for `kind` under `dir`.
    ///
    /// `Auto` picks the local store on `wasm32`. When the secure store
    /// cannot be initialised it keeps the local map in a sibling of `dir`
    /// (`<dir>.local`), since `dir` itself is what failed.
    pub fn open(kind: BackendKind, dir: &Path) -> Result<Self, StoreError> {
        match kind {
            BackendKind::Secure => SecureFileStore::new(dir).map(Self::Secure),
            BackendKind::Local => Ok(Self::Local(LocalFileStore::new(dir))),
            BackendKind::Auto if cfg!(target_arch = "wasm32") => {
                Ok(Self::Local(LocalFileStore::new(dir)))
            }
            BackendKind::Auto => match SecureFileStore::new(dir) {
                Ok(store) => Ok(Self::Secure(store)),
                Err(err) => {
                    let fallback = local_fallback_dir(dir);
                    tracing::warn!(
                        %err,
                        fallback = %fallback.display(),
                        "secure store unavailable, using local store"
                    );
                    Ok(Self::Local(LocalFileStore::new(fallback)))
                }
            },
        }
    }

    /// Short backend name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Secure(_) => "secure",
            Self::Local(_) => "local",
        }
    }

    fn inner(&self) -> &dyn KeyValueStore {
        match self {
            Self::Secure(store) => store,
            Self::Local(store) => store,
        }
    }
}

fn local_fallback_dir(dir: &Path) -> PathBuf {
    let mut name = dir.file_name().unwrap_or_default().to_os_string();
    name.push(".local");
    dir.with_file_name(name)
}

impl KeyValueStore for StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner().get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner().set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.inner().remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert!(store.get_item("ringtone_settings").unwrap().is_none());
        store.set_item("ringtone_settings", "{\"a\":1}").unwrap();
        store.set_item("other", "x").unwrap();
        assert_eq!(
            store.get_item("ringtone_settings").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        store.remove_item("ringtone_settings").unwrap();
        store.remove_item("ringtone_settings").unwrap();
        assert!(store.get_item("ringtone_settings").unwrap().is_none());
        assert_eq!(store.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn secure_store_contract() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&SecureFileStore::new(dir.path().join("store")).unwrap());
    }

    #[test]
    fn local_store_contract() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&LocalFileStore::new(dir.path()));
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecureFileStore::new(dir.path()).unwrap();
        assert!(store.set_item("../evil", "x").is_err());
        assert!(store.get_item("").is_err());
        assert!(store.set_item(".hidden", "x").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn secure_values_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let store = SecureFileStore::new(dir.path()).unwrap();
        store.set_item("k", "v").unwrap();
        let mode = fs::metadata(dir.path().join("k.value"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_local_map_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOCAL_STORE_FILE), b"[1,2").unwrap();
        let store = LocalFileStore::new(dir.path());
        assert!(matches!(store.get_item("k"), Err(StoreError::Serde(_))));
    }

    #[test]
    fn writes_replace_a_corrupt_local_map() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(LOCAL_STORE_FILE);
        fs::write(&file, b"[1,2").unwrap();
        let store = LocalFileStore::new(dir.path());

        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));

        fs::write(&file, b"{oops").unwrap();
        store.remove_item("k").unwrap();
        assert!(store.get_item("k").unwrap().is_none());
    }

    #[test]
    fn auto_prefers_the_secure_backend() {
        let dir = tempfile::tempdir().unwrap();
        let backend = StorageBackend::open(BackendKind::Auto, dir.path()).unwrap();
        assert_eq!(backend.name(), "secure");
        let local = StorageBackend::open(BackendKind::Local, dir.path()).unwrap();
        assert_eq!(local.name(), "local");
    }

    #[cfg(unix)]
    #[test]
    fn auto_falls_back_to_local_when_secure_cannot_start() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the store directory should be.
        let blocker = dir.path().join("store");
        fs::write(&blocker, b"").unwrap();
        let backend = StorageBackend::open(BackendKind::Auto, &blocker).unwrap();
        assert_eq!(backend.name(), "local");

        backend.set_item("ringtone_settings", "{}").unwrap();
        assert_eq!(
            backend.get_item("ringtone_settings").unwrap().as_deref(),
            Some("{}")
        );
        assert!(dir.path().join("store.local").join(LOCAL_STORE_FILE).is_file());
        assert!(blocker.is_file());
    }
}
