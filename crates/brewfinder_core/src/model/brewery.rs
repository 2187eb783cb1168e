//! Brewery domain model.
//!
//! # Responsibility
//! - Hold one brewery location with every field validated on write.
//! - Expose a flat serialized view for API callers.
//!
//! # Invariants
//! - `id` is `None` until the store assigns it and never changes afterwards.
//! - Every mutator validates before assignment; a failed call leaves the
//!   brewery untouched.
//! - Credential material (`hash`, `salt`, `activation_token`) is never
//!   serialized.

use crate::model::validate::{self, ValidationError};
use serde::Serialize;

/// Store-assigned brewery primary key.
pub type BreweryId = i64;

pub const ADDRESS_MAX_CHARS: usize = 128;
pub const CITY_MAX_CHARS: usize = 32;
pub const CONTENT_MAX_CHARS: usize = 750;
pub const EMAIL_MAX_CHARS: usize = 128;
pub const NAME_MAX_CHARS: usize = 32;
pub const PHONE_MAX_CHARS: usize = 12;
pub const ACTIVATION_TOKEN_CHARS: usize = 32;
pub const HASH_CHARS: usize = 128;
pub const SALT_CHARS: usize = 64;
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;
pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;

/// Unvalidated input for building a [`Brewery`].
///
/// Used by callers creating a new brewery and by row hydration; both go
/// through the same setters.
#[derive(Debug, Clone, PartialEq)]
pub struct BreweryFields {
    pub profile_id: Option<i64>,
    pub activation_token: Option<String>,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub content: String,
    pub email: String,
    pub hash: String,
    pub image_id: Option<i64>,
    /// Longitude.
    pub location_x: f64,
    /// Latitude.
    pub location_y: f64,
    pub name: String,
    pub phone: String,
    pub salt: String,
    pub state: String,
    pub zip: i64,
}

/// One physical brewery location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brewery {
    id: Option<BreweryId>,
    profile_id: Option<i64>,
    #[serde(skip_serializing)]
    activation_token: Option<String>,
    address1: String,
    address2: String,
    city: String,
    content: String,
    email: String,
    #[serde(skip_serializing)]
    hash: String,
    image_id: Option<i64>,
    location_x: f64,
    location_y: f64,
    name: String,
    phone: String,
    #[serde(skip_serializing)]
    salt: String,
    state: String,
    zip: i64,
}

impl Brewery {
    /// Builds a new, not yet persisted brewery.
    ///
    /// # Errors
    /// - Returns the first field violation, in declaration order.
    pub fn new(fields: BreweryFields) -> Result<Self, ValidationError> {
        let mut brewery = Self {
            id: None,
            profile_id: None,
            activation_token: None,
            address1: String::new(),
            address2: String::new(),
            city: String::new(),
            content: String::new(),
            email: String::new(),
            hash: String::new(),
            image_id: None,
            location_x: 0.0,
            location_y: 0.0,
            name: String::new(),
            phone: String::new(),
            salt: String::new(),
            state: String::new(),
            zip: 0,
        };

        brewery.set_profile_id(fields.profile_id)?;
        brewery.set_activation_token(fields.activation_token.as_deref())?;
        brewery.set_address1(&fields.address1)?;
        brewery.set_address2(&fields.address2)?;
        brewery.set_city(&fields.city)?;
        brewery.set_content(&fields.content)?;
        brewery.set_email(&fields.email)?;
        brewery.set_hash(&fields.hash)?;
        brewery.set_image_id(fields.image_id)?;
        brewery.set_location_x(fields.location_x)?;
        brewery.set_location_y(fields.location_y)?;
        brewery.set_name(&fields.name)?;
        brewery.set_phone(&fields.phone)?;
        brewery.set_salt(&fields.salt)?;
        brewery.set_state(&fields.state)?;
        brewery.set_zip(fields.zip)?;
        Ok(brewery)
    }

    /// Builds a brewery that already exists in the store.
    pub fn with_id(id: BreweryId, fields: BreweryFields) -> Result<Self, ValidationError> {
        let id = validate::positive_id("brewery id", id)?;
        let mut brewery = Self::new(fields)?;
        brewery.id = Some(id);
        Ok(brewery)
    }

    pub fn id(&self) -> Option<BreweryId> {
        self.id
    }

    /// Whether the store has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Records the store-assigned key after a successful insert.
    pub(crate) fn assign_id(&mut self, id: BreweryId) {
        debug_assert!(self.id.is_none(), "brewery id is immutable once assigned");
        self.id = Some(id);
    }

    pub fn profile_id(&self) -> Option<i64> {
        self.profile_id
    }

    pub fn set_profile_id(&mut self, profile_id: Option<i64>) -> Result<(), ValidationError> {
        self.profile_id = validate::optional_positive_id("brewery profile id", profile_id)?;
        Ok(())
    }

    pub fn activation_token(&self) -> Option<&str> {
        self.activation_token.as_deref()
    }

    /// Sets or clears the one-time activation token (32 hex characters).
    pub fn set_activation_token(&mut self, token: Option<&str>) -> Result<(), ValidationError> {
        self.activation_token = token
            .map(|token| {
                validate::fixed_hex("brewery activation token", token, ACTIVATION_TOKEN_CHARS)
            })
            .transpose()?;
        Ok(())
    }

    pub fn address1(&self) -> &str {
        &self.address1
    }

    pub fn set_address1(&mut self, address1: &str) -> Result<(), ValidationError> {
        self.address1 = validate::bounded_text("brewery address 1", address1, ADDRESS_MAX_CHARS)?;
        Ok(())
    }

    pub fn address2(&self) -> &str {
        &self.address2
    }

    pub fn set_address2(&mut self, address2: &str) -> Result<(), ValidationError> {
        self.address2 = validate::bounded_text("brewery address 2", address2, ADDRESS_MAX_CHARS)?;
        Ok(())
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: &str) -> Result<(), ValidationError> {
        self.city = validate::bounded_text("brewery city", city, CITY_MAX_CHARS)?;
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: &str) -> Result<(), ValidationError> {
        self.content = validate::bounded_text("brewery content", content, CONTENT_MAX_CHARS)?;
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ValidationError> {
        self.email = validate::email("brewery email", email, EMAIL_MAX_CHARS)?;
        Ok(())
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Sets the password hash (128 hex characters, stored lowercase).
    pub fn set_hash(&mut self, hash: &str) -> Result<(), ValidationError> {
        self.hash = validate::fixed_hex("brewery hash", hash, HASH_CHARS)?;
        Ok(())
    }

    pub fn image_id(&self) -> Option<i64> {
        self.image_id
    }

    pub fn set_image_id(&mut self, image_id: Option<i64>) -> Result<(), ValidationError> {
        self.image_id = validate::optional_positive_id("brewery image id", image_id)?;
        Ok(())
    }

    /// Longitude in degrees.
    pub fn location_x(&self) -> f64 {
        self.location_x
    }

    pub fn set_location_x(&mut self, longitude: f64) -> Result<(), ValidationError> {
        self.location_x = validate::bounded_float(
            "brewery location x",
            longitude,
            LONGITUDE_MIN,
            LONGITUDE_MAX,
        )?;
        Ok(())
    }

    /// Parses and sets the longitude from text input.
    pub fn set_location_x_str(&mut self, longitude: &str) -> Result<(), ValidationError> {
        let parsed = validate::parse_coordinate("brewery location x", longitude)?;
        self.set_location_x(parsed)
    }

    /// Latitude in degrees.
    pub fn location_y(&self) -> f64 {
        self.location_y
    }

    pub fn set_location_y(&mut self, latitude: f64) -> Result<(), ValidationError> {
        self.location_y =
            validate::bounded_float("brewery location y", latitude, LATITUDE_MIN, LATITUDE_MAX)?;
        Ok(())
    }

    /// Parses and sets the latitude from text input.
    pub fn set_location_y_str(&mut self, latitude: &str) -> Result<(), ValidationError> {
        let parsed = validate::parse_coordinate("brewery location y", latitude)?;
        self.set_location_y(parsed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate::bounded_text("brewery name", name, NAME_MAX_CHARS)?;
        Ok(())
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, phone: &str) -> Result<(), ValidationError> {
        self.phone = validate::bounded_text("brewery phone", phone, PHONE_MAX_CHARS)?;
        Ok(())
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Sets the password salt (64 hex characters, stored lowercase).
    pub fn set_salt(&mut self, salt: &str) -> Result<(), ValidationError> {
        self.salt = validate::fixed_hex("brewery salt", salt, SALT_CHARS)?;
        Ok(())
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn set_state(&mut self, state: &str) -> Result<(), ValidationError> {
        self.state = validate::state_code("brewery state", state)?;
        Ok(())
    }

    pub fn zip(&self) -> i64 {
        self.zip
    }

    pub fn set_zip(&mut self, zip: i64) -> Result<(), ValidationError> {
        self.zip = validate::positive_id("brewery zip", zip)?;
        Ok(())
    }
}
