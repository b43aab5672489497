//! Route definitions for the `/profiles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(profile::list).post(profile::create))
}
