//! Tour record schema: field limits, form parsing, and validation.
//!
//! Create and update requests carry the same nine fields under two naming
//! conventions (`title` vs `new_title`). Both go through [`TourFields`] and
//! the same rules; only the field names reported in errors differ.

use std::collections::HashMap;

use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: u64 = 17;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: u64 = 1100;

/// Maximum place length in characters.
pub const MAX_PLACE_LEN: u64 = 27;

/// Message attached to every positivity failure.
pub const POSITIVE_MESSAGE: &str = "value must be greater than 0";

/// Field names in declaration order. Validation reports the first failure
/// in this order.
const FIELD_ORDER: [&str; 9] = [
    "title",
    "description",
    "place",
    "start_date_tour",
    "duration",
    "max_people",
    "available_places",
    "occupied_places",
    "price_per_person",
];

// ---------------------------------------------------------------------------
// Field naming
// ---------------------------------------------------------------------------

/// Naming convention of an incoming tour payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNaming {
    /// `title`, `duration`, ...
    Create,
    /// `new_title`, `new_duration`, ...
    Update,
}

impl FieldNaming {
    /// External name of a schema field under this convention.
    pub fn field(self, base: &str) -> String {
        match self {
            FieldNaming::Create => base.to_string(),
            FieldNaming::Update => format!("new_{base}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The mutable fields of a tour, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct TourFields {
    #[validate(length(max = MAX_TITLE_LEN))]
    pub title: String,
    #[validate(length(max = MAX_DESCRIPTION_LEN))]
    pub description: String,
    #[validate(length(max = MAX_PLACE_LEN))]
    pub place: String,
    /// Opaque date string; only presence is checked.
    pub start_date_tour: String,
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 1))]
    pub max_people: i32,
    #[validate(range(min = 1))]
    pub available_places: i32,
    /// Defaults to 0. No bound is enforced.
    pub occupied_places: i32,
    #[validate(range(min = 1))]
    pub price_per_person: i32,
}

impl TourFields {
    /// Build fields from raw form values keyed by their external names.
    ///
    /// Missing required fields and non-integer numbers are reported as
    /// validation errors. A missing or blank `occupied_places` becomes 0.
    pub fn from_form(
        form: &HashMap<String, String>,
        naming: FieldNaming,
    ) -> Result<Self, CoreError> {
        let text = |base: &str| -> Result<String, CoreError> {
            let name = naming.field(base);
            form.get(&name)
                .cloned()
                .ok_or_else(|| CoreError::validation(name, "field is required"))
        };
        let integer = |base: &str| -> Result<i32, CoreError> {
            let name = naming.field(base);
            let raw = form
                .get(&name)
                .ok_or_else(|| CoreError::validation(name.clone(), "field is required"))?;
            parse_integer(&name, raw)
        };

        let occupied_name = naming.field("occupied_places");
        let occupied_places = match form.get(&occupied_name).map(|v| v.trim()) {
            None | Some("") => 0,
            Some(raw) => parse_integer(&occupied_name, raw)?,
        };

        Ok(Self {
            title: text("title")?,
            description: text("description")?,
            place: text("place")?,
            start_date_tour: text("start_date_tour")?,
            duration: integer("duration")?,
            max_people: integer("max_people")?,
            available_places: integer("available_places")?,
            occupied_places,
            price_per_person: integer("price_per_person")?,
        })
    }

    /// Check every rule and return a [`ValidTour`] on success.
    ///
    /// On failure the first offending field (in declaration order) is
    /// reported, named according to `naming`.
    pub fn validate_as(self, naming: FieldNaming) -> Result<ValidTour, CoreError> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            for name in FIELD_ORDER {
                let Some(first) = field_errors.get(name).and_then(|errs| errs.first()) else {
                    continue;
                };
                return Err(CoreError::validation(naming.field(name), rule_message(first)));
            }
            return Err(CoreError::validation("tour", errors.to_string()));
        }
        Ok(ValidTour(self))
    }
}

/// Human-readable message for a failed `length` or `range` rule.
fn rule_message(error: &ValidationError) -> String {
    match error.code.as_ref() {
        "length" => match error.params.get("max").and_then(|max| max.as_u64()) {
            Some(max) => format!("value must be at most {max} characters"),
            None => "value is too long".to_string(),
        },
        "range" => POSITIVE_MESSAGE.to_string(),
        _ => error
            .message
            .as_deref()
            .map(str::to_string)
            .unwrap_or_else(|| error.code.to_string()),
    }
}

fn parse_integer(name: &str, raw: &str) -> Result<i32, CoreError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| CoreError::validation(name, "value must be an integer"))
}

// ---------------------------------------------------------------------------
// Validated fields
// ---------------------------------------------------------------------------

/// Tour fields that passed every schema rule.
///
/// Only [`TourFields::validate_as`] produces this type, so anything that
/// accepts a `ValidTour` never sees unchecked input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidTour(TourFields);

impl ValidTour {
    pub fn fields(&self) -> &TourFields {
        &self.0
    }
}

impl std::ops::Deref for ValidTour {
    type Target = TourFields;

    fn deref(&self) -> &TourFields {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
