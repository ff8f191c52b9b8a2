use std::sync::Arc;

use crate::assets::AssetStore;
use crate::config::ServerConfig;
use crate::templates::Templates;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in `main` and injected into every handler. Cheaply cloneable
/// (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Each store call checks out its own connection.
    pub pool: tourbook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Tour image asset directory.
    pub assets: Arc<AssetStore>,
    /// Compiled page templates.
    pub templates: Arc<Templates>,
}
