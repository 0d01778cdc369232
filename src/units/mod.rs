//! Unit reference data and movement profile resolution

pub mod catalog;
pub mod profile;

pub use catalog::{UnitCatalog, UnitEntry};
pub use profile::{resolve_profile, MovementProfile};
