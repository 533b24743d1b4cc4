use std::sync::Arc;

use recetario_storage::PhotoStore;

use crate::auth::magic_link::MagicLinkMailer;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: recetario_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Photo object storage (S3 or local directory).
    pub photos: Arc<dyn PhotoStore>,
    /// Magic-link mailer. `None` when SMTP is not configured; login links are
    /// logged instead of sent.
    pub mailer: Option<Arc<MagicLinkMailer>>,
}
