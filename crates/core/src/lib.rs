//! Domain rules for tour listings.
//!
//! Holds the record schema (field limits and validation), image asset
//! naming, and the error type shared by the store and the HTTP layer.

pub mod error;
pub mod image;
pub mod tour;
pub mod types;
