//! Repository for the `tours` table.
//!
//! Writes accept only [`ValidTour`], so every row that reaches the table has
//! passed the schema rules in `tourbook_core::tour`.

use sqlx::PgPool;
use tourbook_core::tour::ValidTour;
use tourbook_core::types::DbId;

use crate::models::tour::{ReplacedTour, Tour};

/// Column list for `tours` queries.
const COLUMNS: &str = "\
    id, title, description, place, start_date_tour, duration, \
    max_people, available_places, occupied_places, price_per_person, image";

/// Provides CRUD operations for tour listings.
pub struct TourRepo;

impl TourRepo {
    /// List all tours in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tour>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tours ORDER BY id");
        sqlx::query_as::<_, Tour>(&query).fetch_all(pool).await
    }

    /// Number of stored tours.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tours")
            .fetch_one(pool)
            .await
    }

    /// Find a tour by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tours WHERE id = $1");
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new tour, returning the assigned ID.
    pub async fn create(pool: &PgPool, tour: &ValidTour, image: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO tours \
                (title, description, place, start_date_tour, duration, max_people, \
                 available_places, occupied_places, price_per_person, image) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING id",
        )
        .bind(&tour.title)
        .bind(&tour.description)
        .bind(&tour.place)
        .bind(&tour.start_date_tour)
        .bind(tour.duration)
        .bind(tour.max_people)
        .bind(tour.available_places)
        .bind(tour.occupied_places)
        .bind(tour.price_per_person)
        .bind(image)
        .fetch_one(pool)
        .await
    }

    /// Overwrite every mutable field and the image of a tour.
    ///
    /// Runs in one transaction with the row locked, so readers see either
    /// the old row or the new one. Returns `None` (and changes nothing) if
    /// the tour does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        tour: &ValidTour,
        image: &str,
    ) -> Result<Option<ReplacedTour>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous_image =
            sqlx::query_scalar::<_, String>("SELECT image FROM tours WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous_image) = previous_image else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE tours SET \
                 title = $2, \
                 description = $3, \
                 place = $4, \
                 start_date_tour = $5, \
                 duration = $6, \
                 max_people = $7, \
                 available_places = $8, \
                 occupied_places = $9, \
                 price_per_person = $10, \
                 image = $11 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .bind(&tour.title)
            .bind(&tour.description)
            .bind(&tour.place)
            .bind(&tour.start_date_tour)
            .bind(tour.duration)
            .bind(tour.max_people)
            .bind(tour.available_places)
            .bind(tour.occupied_places)
            .bind(tour.price_per_person)
            .bind(image)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(ReplacedTour {
            tour: updated,
            previous_image,
        }))
    }

    /// Delete a tour by ID.
    ///
    /// Returns `true` if a row was deleted. The tour's image asset is left
    /// in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
