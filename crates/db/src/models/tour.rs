//! Tour listing model.

use serde::Serialize;
use sqlx::FromRow;
use tourbook_core::tour::TourFields;
use tourbook_core::types::DbId;

/// A row from the `tours` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Tour {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub start_date_tour: String,
    pub duration: i32,
    pub max_people: i32,
    pub available_places: i32,
    pub occupied_places: i32,
    pub price_per_person: i32,
    /// Stored asset name of the tour image.
    pub image: String,
}

impl Tour {
    /// The mutable fields of this row, without id and image.
    pub fn fields(&self) -> TourFields {
        TourFields {
            title: self.title.clone(),
            description: self.description.clone(),
            place: self.place.clone(),
            start_date_tour: self.start_date_tour.clone(),
            duration: self.duration,
            max_people: self.max_people,
            available_places: self.available_places,
            occupied_places: self.occupied_places,
            price_per_person: self.price_per_person,
        }
    }
}

/// Result of a successful update: the new row plus the image it replaced.
#[derive(Debug, Clone)]
pub struct ReplacedTour {
    pub tour: Tour,
    pub previous_image: String,
}
