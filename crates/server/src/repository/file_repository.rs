use crate::entity::file;
use async_trait::async_trait;
use chrono::Utc;
use filedepot_api_types::{Attributes, CreateFileDto, FileRecord, UpdateFileDto};
use filedepot_core::domain::PathNumber;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileServiceError {
    #[error("file #{0} not found")]
    NotFound(PathNumber),

    #[error("file #{id} has corrupt attributes: {reason}")]
    Corrupt { id: i32, reason: String },

    #[error("file #{0} kept changing while being updated")]
    Contended(i32),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, FileServiceError>;

/// Persistence collaborator behind the `/files` routes.
///
/// Ids arrive exactly as the router coerced them; implementations decide
/// which of them address a stored record.
#[async_trait]
pub trait FileService: Send + Sync {
    async fn create(&self, dto: CreateFileDto) -> Result<FileRecord>;
    async fn find_all(&self) -> Result<Vec<FileRecord>>;
    async fn find_one(&self, id: PathNumber) -> Result<FileRecord>;
    async fn update(&self, id: PathNumber, dto: UpdateFileDto) -> Result<FileRecord>;
    async fn remove(&self, id: PathNumber) -> Result<FileRecord>;
}

/// Shallow merge of a patch into stored attributes. `null` deletes the key;
/// `id` is never stored.
pub(crate) fn merge_attributes(attributes: &mut Attributes, patch: Attributes) {
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        if value.is_null() {
            attributes.remove(&key);
        } else {
            attributes.insert(key, value);
        }
    }
}

pub(crate) fn creation_attributes(dto: CreateFileDto) -> Attributes {
    let mut attributes = dto.0;
    attributes.remove("id");
    attributes
}

/// Attempts of the compare-and-swap loop in [`SeaOrmFileService::update`].
const MAX_UPDATE_ATTEMPTS: usize = 16;

#[derive(Clone)]
pub struct SeaOrmFileService {
    db: DatabaseConnection,
}

impl SeaOrmFileService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn encode_attributes(attributes: Attributes) -> String {
        Value::Object(attributes).to_string()
    }

    fn decode_attributes(id: i32, raw: &str) -> Result<Attributes> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(attributes)) => Ok(attributes),
            Ok(other) => Err(FileServiceError::Corrupt {
                id,
                reason: format!("expected a JSON object, found {other}"),
            }),
            Err(err) => Err(FileServiceError::Corrupt {
                id,
                reason: err.to_string(),
            }),
        }
    }

    fn map_model(model: file::Model) -> Result<FileRecord> {
        let attributes = Self::decode_attributes(model.id, &model.attributes)?;
        Ok(FileRecord::new(model.id, attributes))
    }

    async fn find_model(&self, id: PathNumber) -> Result<file::Model> {
        let file_id = id.as_file_id().ok_or(FileServiceError::NotFound(id))?;

        file::Entity::find_by_id(file_id)
            .one(&self.db)
            .await?
            .ok_or(FileServiceError::NotFound(id))
    }
}

#[async_trait]
impl FileService for SeaOrmFileService {
    async fn create(&self, dto: CreateFileDto) -> Result<FileRecord> {
        let active_model = file::ActiveModel {
            attributes: Set(Self::encode_attributes(creation_attributes(dto))),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_all(&self) -> Result<Vec<FileRecord>> {
        let models = file::Entity::find()
            .order_by_asc(file::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn find_one(&self, id: PathNumber) -> Result<FileRecord> {
        let model = self.find_model(id).await?;
        Self::map_model(model)
    }

    async fn update(&self, id: PathNumber, dto: UpdateFileDto) -> Result<FileRecord> {
        // The write only lands if the stored attributes are still the ones
        // the merge was computed from; otherwise re-read and merge again.
        for _ in 0..MAX_UPDATE_ATTEMPTS {
            let model = self.find_model(id).await?;
            let mut attributes = Self::decode_attributes(model.id, &model.attributes)?;
            merge_attributes(&mut attributes, dto.0.clone());
            let encoded = Self::encode_attributes(attributes.clone());

            let result = file::Entity::update_many()
                .col_expr(file::Column::Attributes, Expr::value(encoded))
                .col_expr(file::Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
                .filter(file::Column::Id.eq(model.id))
                .filter(file::Column::Attributes.eq(model.attributes))
                .exec(&self.db)
                .await?;

            if result.rows_affected == 1 {
                return Ok(FileRecord::new(model.id, attributes));
            }
        }

        let file_id = id.as_file_id().ok_or(FileServiceError::NotFound(id))?;
        Err(FileServiceError::Contended(file_id))
    }

    async fn remove(&self, id: PathNumber) -> Result<FileRecord> {
        let model = self.find_model(id).await?;
        let file_id = model.id;
        let record = Self::map_model(model)?;

        let result = file::Entity::delete_by_id(file_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(FileServiceError::NotFound(id));
        }
        Ok(record)
    }
}
