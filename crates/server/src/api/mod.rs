//! API 路由模块。
//!
//! 提供 `/files` 资源的 CRUD 路由与演示下载路由。

pub mod error;
pub mod files;
pub mod health;
pub mod observer;
pub mod state;

use std::sync::Arc;

use axum::Router;

pub use files::create_files_router;
pub use health::create_health_router;
pub use state::AppState;

/// 组装全部路由并注入应用状态。
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(create_files_router())
        .merge(create_health_router())
        .with_state(state)
}
