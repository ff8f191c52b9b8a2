//! Handlers for tour administration.
//!
//! Create and update take `multipart/form-data`: one text part per tour
//! field plus a file part carrying the image. Field values are validated
//! before anything is written to disk.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tourbook_core::error::CoreError;
use tourbook_core::image::{image_extension, validate_image_bytes};
use tourbook_core::tour::{FieldNaming, TourFields, ValidTour};
use tourbook_core::types::DbId;
use tourbook_db::models::tour::Tour;
use tourbook_db::repositories::TourRepo;

use crate::assets::AssetStore;
use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, Detail};
use crate::state::AppState;

/// Multipart part carrying the image on create.
const CREATE_IMAGE_FIELD: &str = "image";

/// Multipart part carrying the image on update. `image` is accepted too.
const UPDATE_IMAGE_FIELD: &str = "new_image";

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Response body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedTour {
    pub id: DbId,
}

/// Response body of a successful update.
#[derive(Debug, Serialize)]
pub struct TourUpdated {
    pub detail: &'static str,
    pub tour: Tour,
}

/// A file part read from a multipart request.
struct UploadedImage {
    /// Name of the multipart part the file arrived under.
    field: String,
    filename: String,
    bytes: Vec<u8>,
}

/// Text parts and the image part of a tour form.
struct TourForm {
    fields: HashMap<String, String>,
    image: Option<UploadedImage>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tours
///
/// List all tours in insertion order. An empty list is a normal result.
pub async fn list_tours(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tours = TourRepo::list(&state.pool).await?;
    tracing::debug!(count = tours.len(), "Listed tours");
    Ok(Json(DataResponse { data: tours }))
}

/// GET /api/v1/admin/tours/{id}
pub async fn get_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tour = find_tour(&state, tour_id).await?;
    Ok(Json(DataResponse { data: tour }))
}

/// POST /api/v1/admin/tours
///
/// Validate the fields and image, store the image under a generated name,
/// then insert the row. Returns 201 with the new ID.
pub async fn create_tour(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_tour_form(multipart, &[CREATE_IMAGE_FIELD]).await?;
    let tour = validate_fields(&form.fields, FieldNaming::Create)?;
    let (ext, bytes) = checked_image(form.image, CREATE_IMAGE_FIELD)?;

    let image = state.assets.save(&ext, &bytes).await?;
    let id = match TourRepo::create(&state.pool, &tour, &image).await {
        Ok(id) => id,
        Err(e) => {
            discard_asset(&state.assets, &image).await;
            return Err(e.into());
        }
    };

    tracing::info!(tour_id = id, title = %tour.title, image = %image, "Tour created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: CreatedTour { id } })))
}

/// PUT /api/v1/admin/tours/{id}
///
/// Replace every field and the image of a tour. The previous image is
/// removed once the row points at the new one; failing to remove it is
/// logged and otherwise ignored.
pub async fn update_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_tour_form(multipart, &[UPDATE_IMAGE_FIELD, CREATE_IMAGE_FIELD]).await?;
    let tour = validate_fields(&form.fields, FieldNaming::Update)?;
    let (ext, bytes) = checked_image(form.image, UPDATE_IMAGE_FIELD)?;

    find_tour(&state, tour_id).await?;

    let image = state.assets.save(&ext, &bytes).await?;
    let replaced = match TourRepo::update(&state.pool, tour_id, &tour, &image).await {
        Ok(Some(replaced)) => replaced,
        Ok(None) => {
            // Deleted between the lookup and the update.
            discard_asset(&state.assets, &image).await;
            tracing::warn!(tour_id, "Tour vanished during update");
            return Err(AppError::tour_not_found(tour_id));
        }
        Err(e) => {
            discard_asset(&state.assets, &image).await;
            return Err(e.into());
        }
    };

    discard_asset(&state.assets, &replaced.previous_image).await;

    tracing::info!(tour_id, image = %image, "Tour updated");

    Ok(Json(DataResponse {
        data: TourUpdated {
            detail: "Tour updated successfully",
            tour: replaced.tour,
        },
    }))
}

/// DELETE /api/v1/admin/tours/{id}
///
/// Remove the row. The image asset stays on disk.
pub async fn delete_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TourRepo::delete(&state.pool, tour_id).await?;

    if !deleted {
        tracing::warn!(tour_id, "Delete requested for unknown tour");
        return Err(AppError::tour_not_found(tour_id));
    }

    tracing::info!(tour_id, "Tour deleted");

    Ok(Json(DataResponse {
        data: Detail {
            detail: "Tour deleted successfully",
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_tour(state: &AppState, tour_id: DbId) -> AppResult<Tour> {
    TourRepo::find_by_id(&state.pool, tour_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(tour_id, "Tour not found");
            AppError::tour_not_found(tour_id)
        })
}

/// Collect text parts by name and the first file part whose name is in
/// `image_fields`. Unknown file parts are skipped.
async fn read_tour_form(mut multipart: Multipart, image_fields: &[&str]) -> AppResult<TourForm> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name.is_empty() {
            continue;
        }

        if image_fields.contains(&name.as_str()) {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if image.is_none() {
                image = Some(UploadedImage {
                    field: name,
                    filename,
                    bytes: data.to_vec(),
                });
            }
        } else if field.file_name().is_none() {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            fields.insert(name, text);
        }
    }

    Ok(TourForm { fields, image })
}

fn validate_fields(form: &HashMap<String, String>, naming: FieldNaming) -> AppResult<ValidTour> {
    TourFields::from_form(form, naming)
        .and_then(|fields| fields.validate_as(naming))
        .map_err(|e| {
            if let CoreError::Validation { field, message } = &e {
                tracing::warn!(field = %field, message = %message, "Rejected tour input");
            }
            AppError::Core(e)
        })
}

/// Check presence, extension, and size of the uploaded image.
///
/// Errors name the part the file arrived under, or `expected_field` when
/// no file was sent.
fn checked_image(
    image: Option<UploadedImage>,
    expected_field: &str,
) -> AppResult<(String, Vec<u8>)> {
    let image = image.ok_or_else(|| CoreError::validation(expected_field, "image is required"))?;
    let ext = image_extension(&image.field, &image.filename)?;
    validate_image_bytes(&image.field, &image.bytes)?;
    Ok((ext, image.bytes))
}

/// Best-effort asset removal; failures are logged, not returned.
async fn discard_asset(assets: &AssetStore, name: &str) {
    if let Err(e) = assets.remove(name).await {
        tracing::warn!(asset = %name, error = %e, "Failed to remove tour image");
    }
}
