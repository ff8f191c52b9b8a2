pub mod health;
pub mod pages;
pub mod tours;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/tours                                      list, create
/// /admin/tours/{id}                                 get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin/tours", tours::router())
}
