//! Integration tests for the tour repository.
//!
//! Exercises `TourRepo` against a real database:
//! - Create and read back
//! - Insertion-ordered listing
//! - Atomic full-field update with image replacement
//! - Delete and not-found behaviour
//! - Storage-level positivity constraints

use sqlx::PgPool;
use tourbook_core::tour::{FieldNaming, TourFields, ValidTour};
use tourbook_db::repositories::TourRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn paris_fields() -> TourFields {
    TourFields {
        title: "Paris Trip".to_string(),
        description: "Louvre, Orsay and an evening on the Seine.".to_string(),
        place: "Paris".to_string(),
        start_date_tour: "2024-06-01".to_string(),
        duration: 5,
        max_people: 10,
        available_places: 10,
        occupied_places: 0,
        price_per_person: 500,
    }
}

fn valid(fields: TourFields) -> ValidTour {
    fields.validate_as(FieldNaming::Create).unwrap()
}

fn named(title: &str) -> ValidTour {
    let mut fields = paris_fields();
    fields.title = title.to_string();
    valid(fields)
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_then_find_returns_same_fields(pool: PgPool) {
    let id = TourRepo::create(&pool, &valid(paris_fields()), "tour-a.png")
        .await
        .unwrap();

    let tour = TourRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(tour.id, id);
    assert_eq!(tour.fields(), paris_fields());
    assert_eq!(tour.image, "tour-a.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_tour_gets_id_one(pool: PgPool) {
    let id = TourRepo::create(&pool, &valid(paris_fields()), "tour-a.png")
        .await
        .unwrap();
    assert_eq!(id, 1);

    let tours = TourRepo::list(&pool).await.unwrap();
    assert_eq!(tours.len(), 1);
    assert_eq!(tours[0].id, 1);
    assert_eq!(tours[0].title, "Paris Trip");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_returns_none(pool: PgPool) {
    assert!(TourRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty(pool: PgPool) {
    assert!(TourRepo::list(&pool).await.unwrap().is_empty());
    assert_eq!(TourRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_preserves_insertion_order(pool: PgPool) {
    for title in ["Rome", "Alps", "Cairo"] {
        TourRepo::create(&pool, &named(title), "tour-x.png")
            .await
            .unwrap();
    }

    let titles: Vec<String> = TourRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, ["Rome", "Alps", "Cairo"]);
    assert_eq!(TourRepo::count(&pool).await.unwrap(), 3);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_overwrites_all_fields_and_reports_previous_image(pool: PgPool) {
    let id = TourRepo::create(&pool, &valid(paris_fields()), "tour-old.png")
        .await
        .unwrap();

    let changed = TourFields {
        title: "Lisbon".to_string(),
        description: "Trams and tiles.".to_string(),
        place: "Lisbon".to_string(),
        start_date_tour: "2024-09-10".to_string(),
        duration: 3,
        max_people: 8,
        available_places: 6,
        occupied_places: 2,
        price_per_person: 320,
    };
    let replaced = TourRepo::update(&pool, id, &valid(changed.clone()), "tour-new.png")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.previous_image, "tour-old.png");
    assert_eq!(replaced.tour.id, id);
    assert_eq!(replaced.tour.fields(), changed);
    assert_eq!(replaced.tour.image, "tour-new.png");

    let stored = TourRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored, replaced.tour);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none_and_changes_nothing(pool: PgPool) {
    let id = TourRepo::create(&pool, &valid(paris_fields()), "tour-a.png")
        .await
        .unwrap();

    let result = TourRepo::update(&pool, id + 100, &named("Ghost"), "tour-b.png")
        .await
        .unwrap();
    assert!(result.is_none());

    let tours = TourRepo::list(&pool).await.unwrap();
    assert_eq!(tours.len(), 1);
    assert_eq!(tours[0].fields(), paris_fields());
    assert_eq!(tours[0].image, "tour-a.png");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_then_find_returns_none(pool: PgPool) {
    let id = TourRepo::create(&pool, &valid(paris_fields()), "tour-a.png")
        .await
        .unwrap();

    assert!(TourRepo::delete(&pool, id).await.unwrap());
    assert!(TourRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(TourRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_returns_false(pool: PgPool) {
    assert!(!TourRepo::delete(&pool, 42).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ids_are_not_reused_after_delete(pool: PgPool) {
    let first = TourRepo::create(&pool, &named("One"), "tour-a.png")
        .await
        .unwrap();
    TourRepo::delete(&pool, first).await.unwrap();

    let second = TourRepo::create(&pool, &named("Two"), "tour-b.png")
        .await
        .unwrap();
    assert!(second > first);
}

// ---------------------------------------------------------------------------
// Storage constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_constraint_rejects_raw_non_positive_duration(pool: PgPool) {
    let err = sqlx::query(
        "INSERT INTO tours \
            (title, description, place, start_date_tour, duration, max_people, \
             available_places, occupied_places, price_per_person, image) \
         VALUES ('t', 'd', 'p', '2024-06-01', 0, 1, 1, 0, 1, 'tour-a.png')",
    )
    .execute(&pool)
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.constraint(), Some("ck_tours_duration_positive"));
}
