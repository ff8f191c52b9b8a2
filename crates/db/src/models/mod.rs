//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row. Write payloads come pre-validated from
//! `tourbook_core` rather than as raw DTOs.

pub mod tour;
