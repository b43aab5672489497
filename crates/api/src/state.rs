use std::sync::Arc;

use crate::store::ProfileStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// In-memory profile storage.
    pub profiles: Arc<ProfileStore>,
}
