//! API 错误类型与 HTTP 响应转换。

use std::path::Path;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use filedepot_api_types::ErrorResponse;
use filedepot_core::domain::DownloadRejection;
use tracing::error;

use crate::repository::FileServiceError;

/// API 错误类型。
#[derive(Debug)]
pub struct ApiError {
    message: String,
    code: String,
    status: StatusCode,
}

impl ApiError {
    /// 下载归档文件无法打开。路径只写入日志，不返回给调用方。
    pub fn asset_unavailable(path: &Path, err: std::io::Error) -> Self {
        error!(path = %path.display(), error = %err, "failed to open download archive");
        ApiError {
            message: format!("download archive unavailable: {}", err.kind()),
            code: "ASSET_UNAVAILABLE".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DownloadRejection> for ApiError {
    fn from(rejection: DownloadRejection) -> Self {
        let (status, code) = match rejection {
            DownloadRejection::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            DownloadRejection::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            DownloadRejection::BadRequest => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };
        ApiError {
            message: rejection.message().to_string(),
            code: code.to_string(),
            status,
        }
    }
}

impl From<FileServiceError> for ApiError {
    fn from(err: FileServiceError) -> Self {
        match err {
            FileServiceError::NotFound(_) => ApiError {
                message: err.to_string(),
                code: "NOT_FOUND".to_string(),
                status: StatusCode::NOT_FOUND,
            },
            FileServiceError::Corrupt { .. } => ApiError {
                message: err.to_string(),
                code: "CORRUPT_RECORD".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
            FileServiceError::Contended(_) => ApiError {
                message: err.to_string(),
                code: "CONCURRENT_UPDATE".to_string(),
                status: StatusCode::CONFLICT,
            },
            FileServiceError::Storage(_) => ApiError {
                message: err.to_string(),
                code: "STORAGE_ERROR".to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedepot_core::domain::PathNumber;

    #[test]
    fn rejections_map_to_distinct_statuses() {
        assert_eq!(
            ApiError::from(DownloadRejection::Unauthorized).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(DownloadRejection::Conflict).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(DownloadRejection::BadRequest).status,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn asset_errors_do_not_leak_the_server_path() {
        let path = Path::new("/srv/secret/location/assets_demo.zip");
        let err = ApiError::asset_unavailable(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        );

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "ASSET_UNAVAILABLE");
        assert!(!err.message.contains("/srv/secret"));
        assert!(err.message.contains("entity not found"));
    }

    #[test]
    fn contended_update_is_a_conflict() {
        let err = ApiError::from(FileServiceError::Contended(4));

        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "CONCURRENT_UPDATE");
    }

    #[test]
    fn not_found_keeps_the_coerced_id_in_the_message() {
        let err = ApiError::from(FileServiceError::NotFound(PathNumber::coerce("abc")));

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "file #NaN not found");
        assert_eq!(err.code, "NOT_FOUND");
    }
}
