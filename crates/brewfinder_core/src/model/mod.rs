//! Entity model for brewery discovery.
//!
//! # Responsibility
//! - Define the in-memory shape of every persisted row.
//! - Own field-level validation so no invalid value reaches the store.
//!
//! # Invariants
//! - Entities are constructed only through validating constructors/setters.
//! - A `None` identifier means "not yet inserted".

pub mod beer_image;
pub mod brewery;
pub mod validate;
