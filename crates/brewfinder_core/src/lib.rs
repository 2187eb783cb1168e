//! Persistence layer for the Brewfinder brewery discovery app.
//! Entities validate on write; repositories borrow a caller-owned connection.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::beer_image::{BeerImage, ImageId};
pub use model::brewery::{Brewery, BreweryFields, BreweryId};
pub use model::validate::ValidationError;
pub use repo::beer_image_repo::{BeerImageRepository, SqliteBeerImageRepository};
pub use repo::brewery_repo::{BreweryRepository, SqliteBreweryRepository};
pub use repo::{ErrorKind, RepoError, RepoResult, RowDefect};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
