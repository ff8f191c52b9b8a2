//! Route definitions for tour administration.

use axum::routing::get;
use axum::Router;

use crate::handlers::tours;
use crate::state::AppState;

/// Tour routes mounted at `/admin/tours`.
///
/// ```text
/// GET    /              -> list_tours
/// POST   /              -> create_tour    (multipart)
/// GET    /{id}          -> get_tour
/// PUT    /{id}          -> update_tour    (multipart)
/// DELETE /{id}          -> delete_tour
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tours::list_tours).post(tours::create_tour))
        .route(
            "/{id}",
            get(tours::get_tour)
                .put(tours::update_tour)
                .delete(tours::delete_tour),
        )
}
