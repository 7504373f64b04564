//! JSON file storage implementation

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// File-backed storage that persists the whole collection as a JSON array
///
/// Every mutation rewrites the file. The collection is held in memory and the
/// file is the single durable copy, so reads never touch the disk after load.
/// Writes go through a temp file followed by a rename so a crash mid-write
/// leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStorage<E>
where
    E: StorageEntity,
{
    path: PathBuf,
    entities: RwLock<HashMap<String, E>>,
}

impl<E> JsonFileStorage<E>
where
    E: StorageEntity,
{
    /// Opens (or creates) a JSON file storage at the given path
    ///
    /// Parent directories are created if missing. A missing or empty file
    /// loads as an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    DomainError::storage(format!(
                        "Failed to create storage directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let entities = Self::load(&path)?;

        info!(
            path = %path.display(),
            entities = entities.len(),
            "Opened JSON file storage"
        );

        Ok(Self {
            path,
            entities: RwLock::new(entities),
        })
    }

    fn load(path: &Path) -> Result<HashMap<String, E>, DomainError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            DomainError::storage(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let records: Vec<E> = serde_json::from_str(&contents).map_err(|e| {
            DomainError::storage(format!("Failed to parse '{}': {}", path.display(), e))
        })?;

        let mut entities = HashMap::with_capacity(records.len());

        for record in records {
            entities.insert(record.key().as_str().to_string(), record);
        }

        Ok(entities)
    }

    /// Rewrites the backing file from the in-memory collection
    ///
    /// Records are sorted by key so the file diffs cleanly between runs.
    fn persist(&self, entities: &HashMap<String, E>) -> Result<(), DomainError> {
        let mut records: Vec<&E> = entities.values().collect();
        records.sort_by(|a, b| a.key().as_str().cmp(b.key().as_str()));

        let contents = serde_json::to_string_pretty(&records)
            .map_err(|e| DomainError::storage(format!("Failed to serialize records: {}", e)))?;

        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, contents).map_err(|e| {
            DomainError::storage(format!("Failed to write '{}': {}", tmp_path.display(), e))
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            DomainError::storage(format!(
                "Failed to move '{}' into place: {}",
                tmp_path.display(),
                e
            ))
        })?;

        debug!(path = %self.path.display(), entities = entities.len(), "Persisted storage");

        Ok(())
    }
}

#[async_trait]
impl<E> Storage<E> for JsonFileStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        self.persist(&entities)?;

        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if !entities.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            )));
        }

        entities.insert(key, entity.clone());
        self.persist(&entities)?;

        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = entities.remove(key.as_str()).is_some();

        if removed {
            self.persist(&entities)?;
        }

        Ok(removed)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.len())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.contains_key(key.as_str()))
    }
}
