//! 统一的应用状态。

use std::path::PathBuf;
use std::sync::Arc;

use filedepot_core::domain::{DownloadObserver, DownloadOutcome};

use super::observer::TracingDownloadObserver;
use crate::repository::FileService;

/// 统一的应用状态，包含所有 handler 共享的依赖。
#[derive(Clone)]
pub struct AppState {
    /// 文件记录服务。
    pub files: Arc<dyn FileService>,
    /// 下载请求观察者。
    pub observer: Arc<dyn DownloadObserver>,
    /// 演示归档所在目录。
    assets_dir: PathBuf,
}

impl AppState {
    /// 创建新的应用状态，默认使用 tracing 观察者。
    pub fn new(files: Arc<dyn FileService>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            files,
            observer: Arc::new(TracingDownloadObserver),
            assets_dir: assets_dir.into(),
        }
    }

    /// 替换下载观察者。
    #[cfg(test)]
    pub fn with_observer(mut self, observer: Arc<dyn DownloadObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 演示归档的完整路径。
    pub fn archive_path(&self) -> PathBuf {
        self.assets_dir.join(DownloadOutcome::ARCHIVE_FILE_NAME)
    }
}
