//! Route definitions for the HTML pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes mounted at the root.
///
/// ```text
/// GET /                                  -> welcome_page
/// GET /views/tours                       -> tours_page
/// GET /views/tours/current_tour/{id}     -> current_tour_page
/// ```
///
/// Unmatched routes are handled by the fallback installed in
/// [`crate::router::build_app_router`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::welcome_page))
        .route("/views/tours", get(pages::tours_page))
        .route("/views/tours/", get(pages::tours_page))
        .route(
            "/views/tours/current_tour/{id}",
            get(pages::current_tour_page),
        )
}
