//! Storage backends.
//!
//! A backend only moves bytes. Serialization and the fail-soft read policy
//! live in [`Store`](crate::Store).

use crate::StoreError;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Raw byte storage keyed by string.
///
/// A single `set` must be atomic: readers observe either the old or the
/// new value, never a mix. There is no coordination between separate
/// backends pointing at the same data; the last write wins.
pub trait KvBackend: Send + Sync {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the bytes stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-process backend. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::StoreError("memory backend lock poisoned".to_string())
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes land in a temporary sibling file that is renamed over the
/// target, so a crash mid-write leaves the previous value intact. Each
/// write gets its own temporary file, so concurrent writers to one key
/// never collide; the last rename wins.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

const EXTENSION: &str = "json";

impl FileBackend {
    /// Open (and create if needed) a data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }

    /// A temporary path unique to this process and write.
    fn temp_path_for(&self, key: &str) -> PathBuf {
        static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{key}.{EXTENSION}.{}.{seq}.tmp", std::process::id()))
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control());
    if bad {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.temp_path_for(key);

        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(value)?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&tmp, e));
        }

        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(&path, e)
        })
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "brew-store-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn temp_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tmp")
            })
            .count()
    }

    #[test]
    fn test_memory_set_get_delete() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("a").unwrap(), None);

        backend.set("a", b"[1]").unwrap();
        assert_eq!(backend.get("a").unwrap(), Some(b"[1]".to_vec()));
        assert!(backend.exists("a").unwrap());

        backend.delete("a").unwrap();
        assert!(!backend.exists("a").unwrap());
        // Deleting twice is fine
        backend.delete("a").unwrap();
    }

    #[test]
    fn test_memory_keys_sorted() {
        let backend = MemoryBackend::new();
        backend.set("b", b"1").unwrap();
        backend.set("a", b"2").unwrap();
        assert_eq!(backend.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = temp_dir("roundtrip");
        let backend = FileBackend::open(&dir).unwrap();

        backend.set("brewAuraCart", b"[]").unwrap();
        assert_eq!(backend.get("brewAuraCart").unwrap(), Some(b"[]".to_vec()));
        assert!(dir.join("brewAuraCart.json").is_file());
        assert_eq!(temp_files(&dir), 0);

        backend.set("brewAuraCart", b"[1]").unwrap();
        assert_eq!(backend.get("brewAuraCart").unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(backend.keys().unwrap(), vec!["brewAuraCart"]);

        backend.delete("brewAuraCart").unwrap();
        assert_eq!(backend.get("brewAuraCart").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_rejects_path_keys() {
        let dir = temp_dir("badkey");
        let backend = FileBackend::open(&dir).unwrap();
        assert!(matches!(
            backend.set("../escape", b"x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(backend.get(""), Err(StoreError::InvalidKey(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_concurrent_writers_same_key() {
        let dir = temp_dir("concurrent");
        let a = FileBackend::open(&dir).unwrap();
        let b = FileBackend::open(&dir).unwrap();

        let writer = |backend: FileBackend, tag: &'static str| {
            std::thread::spawn(move || {
                (0..200)
                    .filter(|i| {
                        let value = format!("[\"{tag}-{i}\"]");
                        backend.set("brewAuraCart", value.as_bytes()).is_err()
                    })
                    .count()
            })
        };
        let ha = writer(a, "a");
        let hb = writer(b.clone(), "b");
        assert_eq!(ha.join().unwrap(), 0);
        assert_eq!(hb.join().unwrap(), 0);

        let last = b.get("brewAuraCart").unwrap().unwrap();
        let last: Vec<String> = serde_json::from_slice(&last).unwrap();
        assert!(last == ["a-199"] || last == ["b-199"], "got {last:?}");
        assert_eq!(temp_files(&dir), 0);

        let _ = fs::remove_dir_all(&dir);
    }
}
