//! Server-rendered pages for browsing and booking tours.
//!
//! Pages never answer with JSON errors: a missing tour, an unknown URL, or a
//! store fault all render the error page with the matching status.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use tera::Context;
use tourbook_core::types::DbId;
use tourbook_db::repositories::TourRepo;

use crate::state::AppState;
use crate::templates::{
    BOOK_TOUR_PAGE, EMPTY_TOUR_LIST_PAGE, ERROR_PAGE, TOUR_LIST_PAGE, WELCOME_PAGE,
};

/// GET /
pub async fn welcome_page(State(state): State<AppState>) -> Response {
    tracing::debug!("Welcome page requested");
    render(&state, WELCOME_PAGE, &Context::new(), StatusCode::OK)
}

/// GET /views/tours
///
/// Lists every tour, or shows the empty-list page when there are none.
pub async fn tours_page(State(state): State<AppState>) -> Response {
    let tours = match TourRepo::list(&state.pool).await {
        Ok(tours) => tours,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load tours for page");
            return error_page(&state, StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if tours.is_empty() {
        tracing::info!("Tour list is empty");
        return render(&state, EMPTY_TOUR_LIST_PAGE, &Context::new(), StatusCode::OK);
    }

    tracing::info!(count = tours.len(), "Rendering tour list");
    let mut context = Context::new();
    context.insert("tour_models", &tours);
    context.insert("asset_url", &state.config.asset_url());
    render(&state, TOUR_LIST_PAGE, &context, StatusCode::OK)
}

/// GET /views/tours/current_tour/{id}
///
/// Booking page for one tour. Unknown or malformed ids get the error page.
pub async fn current_tour_page(
    State(state): State<AppState>,
    tour_id: Result<Path<DbId>, PathRejection>,
) -> Response {
    let Ok(Path(tour_id)) = tour_id else {
        tracing::warn!("Malformed tour id in booking page URL");
        return error_page(&state, StatusCode::NOT_FOUND);
    };

    match TourRepo::find_by_id(&state.pool, tour_id).await {
        Ok(Some(tour)) => {
            tracing::info!(tour_id, "Rendering booking page");
            let mut context = Context::new();
            context.insert("tour", &tour);
            context.insert("asset_url", &state.config.asset_url());
            render(&state, BOOK_TOUR_PAGE, &context, StatusCode::OK)
        }
        Ok(None) => {
            tracing::warn!(tour_id, "Booking page requested for unknown tour");
            error_page(&state, StatusCode::NOT_FOUND)
        }
        Err(e) => {
            tracing::error!(tour_id, error = %e, "Failed to load tour for page");
            error_page(&state, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Fallback for every unmatched route.
pub async fn not_found_page(State(state): State<AppState>, uri: Uri) -> Response {
    tracing::warn!(%uri, "Requested URL does not exist");
    error_page(&state, StatusCode::NOT_FOUND)
}

fn error_page(state: &AppState, status: StatusCode) -> Response {
    render(state, ERROR_PAGE, &Context::new(), status)
}

fn render(state: &AppState, name: &str, context: &Context, status: StatusCode) -> Response {
    match state.templates.render(name, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(template = name, error = ?e, "Template rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred",
            )
                .into_response()
        }
    }
}
