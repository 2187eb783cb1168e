//! Beer image link model.
//!
//! # Invariants
//! - `image_id` is the store-generated key: `None` before insert, positive after.
//! - `brewery_id` is always positive.

use crate::model::brewery::BreweryId;
use crate::model::validate::{self, ValidationError};
use serde::Serialize;

/// Store-assigned image primary key.
pub type ImageId = i64;

/// Associates one image with one brewery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeerImage {
    image_id: Option<ImageId>,
    brewery_id: BreweryId,
}

impl BeerImage {
    /// Creates a link that has not been inserted yet.
    pub fn new(brewery_id: BreweryId) -> Result<Self, ValidationError> {
        let mut image = Self {
            image_id: None,
            brewery_id: 0,
        };
        image.set_brewery_id(brewery_id)?;
        Ok(image)
    }

    /// Creates a link for a row that already exists in the store.
    pub fn with_id(image_id: ImageId, brewery_id: BreweryId) -> Result<Self, ValidationError> {
        let image_id = validate::positive_id("beer image image id", image_id)?;
        let mut image = Self::new(brewery_id)?;
        image.image_id = Some(image_id);
        Ok(image)
    }

    pub fn image_id(&self) -> Option<ImageId> {
        self.image_id
    }

    pub fn is_persisted(&self) -> bool {
        self.image_id.is_some()
    }

    pub(crate) fn assign_image_id(&mut self, image_id: ImageId) {
        debug_assert!(self.image_id.is_none(), "image id is immutable once assigned");
        self.image_id = Some(image_id);
    }

    pub fn brewery_id(&self) -> BreweryId {
        self.brewery_id
    }

    pub fn set_brewery_id(&mut self, brewery_id: BreweryId) -> Result<(), ValidationError> {
        self.brewery_id = validate::positive_id("beer image brewery id", brewery_id)?;
        Ok(())
    }
}
