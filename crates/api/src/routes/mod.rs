pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profiles                                        list, create (multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/profiles", profile::router())
}
