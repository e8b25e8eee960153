use std::collections::BTreeMap;

use async_trait::async_trait;
use filedepot_api_types::{Attributes, CreateFileDto, FileRecord, UpdateFileDto};
use filedepot_core::domain::PathNumber;
use tokio::sync::RwLock;

use super::file_repository::{
    FileService, FileServiceError, Result, creation_attributes, merge_attributes,
};

/// Process-local store used when no database is configured.
pub struct InMemoryFileService {
    store: RwLock<Store>,
}

struct Store {
    next_id: i32,
    records: BTreeMap<i32, Attributes>,
}

impl InMemoryFileService {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryFileService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileService for InMemoryFileService {
    async fn create(&self, dto: CreateFileDto) -> Result<FileRecord> {
        let attributes = creation_attributes(dto);
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;
        store.records.insert(id, attributes.clone());

        Ok(FileRecord::new(id, attributes))
    }

    async fn find_all(&self) -> Result<Vec<FileRecord>> {
        let store = self.store.read().await;
        Ok(store
            .records
            .iter()
            .map(|(id, attributes)| FileRecord::new(*id, attributes.clone()))
            .collect())
    }

    async fn find_one(&self, id: PathNumber) -> Result<FileRecord> {
        let store = self.store.read().await;
        id.as_file_id()
            .and_then(|file_id| store.records.get_key_value(&file_id))
            .map(|(file_id, attributes)| FileRecord::new(*file_id, attributes.clone()))
            .ok_or(FileServiceError::NotFound(id))
    }

    async fn update(&self, id: PathNumber, dto: UpdateFileDto) -> Result<FileRecord> {
        let mut store = self.store.write().await;
        let Some(file_id) = id.as_file_id() else {
            return Err(FileServiceError::NotFound(id));
        };
        let Some(attributes) = store.records.get_mut(&file_id) else {
            return Err(FileServiceError::NotFound(id));
        };

        merge_attributes(attributes, dto.0);
        Ok(FileRecord::new(file_id, attributes.clone()))
    }

    async fn remove(&self, id: PathNumber) -> Result<FileRecord> {
        let mut store = self.store.write().await;
        id.as_file_id()
            .and_then(|file_id| {
                store
                    .records
                    .remove(&file_id)
                    .map(|attributes| FileRecord::new(file_id, attributes))
            })
            .ok_or(FileServiceError::NotFound(id))
    }
}
