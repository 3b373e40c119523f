//! Directory-backed case store: one JSON document per record group,
//! written with atomic replace (temp file in the target directory, then
//! rename) so readers never observe a partial document.

use osydata_storage::{CaseStore, StorageError, StoreConfig};
use serde_json::Value;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

pub struct DirStore {
    dir: PathBuf,
    config: StoreConfig,
}

impl DirStore {
    pub fn new(dir: PathBuf, config: StoreConfig) -> Self {
        DirStore { dir, config }
    }

    fn write_one(&self, dir: &Path, key: &str, value: &Value) -> Result<(), StorageError> {
        fs::create_dir_all(dir)?;
        let body = if self.config.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&body)?;
        tmp.persist(dir.join(format!("{}.json", key)))
            .map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl CaseStore for DirStore {
    fn put(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.write_one(&self.dir, key, value)?;
        if let Some(mirror) = &self.config.mirror {
            self.write_one(mirror, key, value)?;
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.dir.join(format!("{}.json", key));
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path().to_path_buf(), StoreConfig::default());
        let doc = json!({"CC": {"SC_0": []}});
        store.put("RYT", &doc).unwrap();
        assert_eq!(store.get("RYT").unwrap(), Some(doc));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn mirrored_writes_land_in_both_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = tempfile::tempdir().unwrap();
        let store = DirStore::new(
            dir.path().to_path_buf(),
            StoreConfig {
                pretty: false,
                mirror: Some(mirror.path().to_path_buf()),
            },
        );
        store.put("genData", &json!({"osy-years": []})).unwrap();
        assert!(dir.path().join("genData.json").exists());
        assert!(mirror.path().join("genData.json").exists());
    }
}
