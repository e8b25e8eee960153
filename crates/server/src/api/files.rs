//! 文件资源 API 路由。
//!
//! CRUD 路由原样转发给 [`FileService`]，演示下载路由按 id 返回归档或固定错误。

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use filedepot_api_types::{CreateFileDto, FileRecord, UpdateFileDto};
use filedepot_core::domain::{DownloadOutcome, PathNumber};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::error::ApiError;
use super::state::AppState;

/// 创建文件资源路由。
pub fn create_files_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/files", get(find_all).post(create))
        // 静态段优先于 `{id}` 匹配
        .route("/files/download/{id}", get(download))
        .route("/files/{id}", get(find_one).patch(update).delete(remove))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(dto): Json<CreateFileDto>,
) -> Result<(StatusCode, Json<FileRecord>), ApiError> {
    let record = state.files.create(dto).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn find_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let records = state.files.find_all().await?;
    Ok(Json(records))
}

/// 演示下载：1 返回归档字节流，2/3 与其他值返回固定错误。
async fn download(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = PathNumber::coerce(&raw_id);
    let outcome = DownloadOutcome::for_id(id);
    state.observer.download_requested(&raw_id, id, outcome);

    match outcome {
        DownloadOutcome::Archive => stream_archive(&state.archive_path()).await,
        DownloadOutcome::Rejected(rejection) => Err(rejection.into()),
    }
}

/// 打开文件后立即返回，字节在响应体被消费时读取。
async fn stream_archive(path: &FsPath) -> Result<Response, ApiError> {
    let file = File::open(path)
        .await
        .map_err(|err| ApiError::asset_unavailable(path, err))?;
    let body = Body::from_stream(ReaderStream::new(file));

    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], body).into_response())
}

async fn find_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FileRecord>, ApiError> {
    let record = state.files.find_one(PathNumber::coerce(&id)).await?;
    Ok(Json(record))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(dto): Json<UpdateFileDto>,
) -> Result<Json<FileRecord>, ApiError> {
    let record = state.files.update(PathNumber::coerce(&id), dto).await?;
    Ok(Json(record))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FileRecord>, ApiError> {
    let record = state.files.remove(PathNumber::coerce(&id)).await?;
    Ok(Json(record))
}
