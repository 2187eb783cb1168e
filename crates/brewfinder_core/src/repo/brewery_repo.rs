//! Brewery repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, update and delete brewery rows.
//! - Look breweries up by id, activation token, or partial city/name/state.
//!
//! # Invariants
//! - Insert requires `id == None`; update/delete require `id == Some(_)`.
//!   Both checks happen before any SQL runs.
//! - Text lookups are substring matches on the trimmed key with `LIKE`
//!   wildcards escaped; SQLite `LIKE` makes them ASCII case-insensitive.
//! - Collections are ordered by `brewery_id` ascending.

use crate::model::brewery::{Brewery, BreweryFields, BreweryId, ACTIVATION_TOKEN_CHARS};
use crate::model::validate;
use crate::repo::{
    column, contains_pattern, invalid_row, query_all, query_one, RepoError, RepoResult,
};
use log::{debug, info};
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "brewery";

const BREWERY_SELECT_SQL: &str = "SELECT
    brewery_id,
    brewery_profile_id,
    brewery_activation_token,
    brewery_address1,
    brewery_address2,
    brewery_city,
    brewery_content,
    brewery_email,
    brewery_hash,
    brewery_image_id,
    brewery_location_x,
    brewery_location_y,
    brewery_name,
    brewery_phone,
    brewery_salt,
    brewery_state,
    brewery_zip
FROM brewery";

/// Repository interface for brewery persistence.
pub trait BreweryRepository {
    /// Inserts a new brewery and writes the generated id back onto it.
    fn insert_brewery(&self, brewery: &mut Brewery) -> RepoResult<BreweryId>;
    /// Rewrites every column of an existing brewery (last write wins).
    fn update_brewery(&self, brewery: &Brewery) -> RepoResult<()>;
    /// Deletes the row matching the brewery id.
    fn delete_brewery(&self, brewery: &Brewery) -> RepoResult<()>;
    fn get_brewery_by_id(&self, brewery_id: BreweryId) -> RepoResult<Option<Brewery>>;
    fn get_brewery_by_activation_token(&self, token: &str) -> RepoResult<Option<Brewery>>;
    fn get_breweries_by_city(&self, city: &str) -> RepoResult<Vec<Brewery>>;
    fn get_breweries_by_name(&self, name: &str) -> RepoResult<Vec<Brewery>>;
    fn get_breweries_by_state(&self, state: &str) -> RepoResult<Vec<Brewery>>;
    fn get_all_breweries(&self) -> RepoResult<Vec<Brewery>>;
}

/// SQLite-backed brewery repository borrowing a caller-owned connection.
pub struct SqliteBreweryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBreweryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find_by_pattern(&self, column: &str, key: &str) -> RepoResult<Vec<Brewery>> {
        let pattern = contains_pattern(key);
        let breweries = query_all(
            self.conn,
            &format!(
                "{BREWERY_SELECT_SQL}
                 WHERE {column} LIKE ?1 ESCAPE '\\'
                 ORDER BY brewery_id ASC;"
            ),
            params![pattern],
            parse_brewery_row,
        )?;

        debug!(
            "event=brewery_lookup module=repo status=ok column={column} rows={}",
            breweries.len()
        );
        Ok(breweries)
    }
}

impl BreweryRepository for SqliteBreweryRepository<'_> {
    fn insert_brewery(&self, brewery: &mut Brewery) -> RepoResult<BreweryId> {
        if let Some(id) = brewery.id() {
            return Err(RepoError::AlreadyPersisted { entity: ENTITY, id });
        }

        self.conn.execute(
            "INSERT INTO brewery (
                brewery_profile_id,
                brewery_activation_token,
                brewery_address1,
                brewery_address2,
                brewery_city,
                brewery_content,
                brewery_email,
                brewery_hash,
                brewery_image_id,
                brewery_location_x,
                brewery_location_y,
                brewery_name,
                brewery_phone,
                brewery_salt,
                brewery_state,
                brewery_zip
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            params![
                brewery.profile_id(),
                brewery.activation_token(),
                brewery.address1(),
                brewery.address2(),
                brewery.city(),
                brewery.content(),
                brewery.email(),
                brewery.hash(),
                brewery.image_id(),
                brewery.location_x(),
                brewery.location_y(),
                brewery.name(),
                brewery.phone(),
                brewery.salt(),
                brewery.state(),
                brewery.zip(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        brewery.assign_id(id);
        info!("event=brewery_insert module=repo status=ok brewery_id={id}");
        Ok(id)
    }

    fn update_brewery(&self, brewery: &Brewery) -> RepoResult<()> {
        let id = brewery
            .id()
            .ok_or(RepoError::NotPersisted { entity: ENTITY })?;

        let changed = self.conn.execute(
            "UPDATE brewery
             SET
                brewery_profile_id = ?1,
                brewery_activation_token = ?2,
                brewery_address1 = ?3,
                brewery_address2 = ?4,
                brewery_city = ?5,
                brewery_content = ?6,
                brewery_email = ?7,
                brewery_hash = ?8,
                brewery_image_id = ?9,
                brewery_location_x = ?10,
                brewery_location_y = ?11,
                brewery_name = ?12,
                brewery_phone = ?13,
                brewery_salt = ?14,
                brewery_state = ?15,
                brewery_zip = ?16
             WHERE brewery_id = ?17;",
            params![
                brewery.profile_id(),
                brewery.activation_token(),
                brewery.address1(),
                brewery.address2(),
                brewery.city(),
                brewery.content(),
                brewery.email(),
                brewery.hash(),
                brewery.image_id(),
                brewery.location_x(),
                brewery.location_y(),
                brewery.name(),
                brewery.phone(),
                brewery.salt(),
                brewery.state(),
                brewery.zip(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        info!("event=brewery_update module=repo status=ok brewery_id={id}");
        Ok(())
    }

    fn delete_brewery(&self, brewery: &Brewery) -> RepoResult<()> {
        let id = brewery
            .id()
            .ok_or(RepoError::NotPersisted { entity: ENTITY })?;

        let changed = self
            .conn
            .execute("DELETE FROM brewery WHERE brewery_id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        info!("event=brewery_delete module=repo status=ok brewery_id={id}");
        Ok(())
    }

    fn get_brewery_by_id(&self, brewery_id: BreweryId) -> RepoResult<Option<Brewery>> {
        let brewery_id = validate::positive_id("brewery id", brewery_id)?;
        query_one(
            self.conn,
            &format!("{BREWERY_SELECT_SQL} WHERE brewery_id = ?1;"),
            [brewery_id],
            parse_brewery_row,
        )
    }

    fn get_brewery_by_activation_token(&self, token: &str) -> RepoResult<Option<Brewery>> {
        let token =
            validate::fixed_hex("brewery activation token", token, ACTIVATION_TOKEN_CHARS)?;
        query_one(
            self.conn,
            &format!("{BREWERY_SELECT_SQL} WHERE brewery_activation_token = ?1;"),
            [token],
            parse_brewery_row,
        )
    }

    fn get_breweries_by_city(&self, city: &str) -> RepoResult<Vec<Brewery>> {
        let city = validate::search_key("brewery city", city)?;
        self.find_by_pattern("brewery_city", &city)
    }

    fn get_breweries_by_name(&self, name: &str) -> RepoResult<Vec<Brewery>> {
        let name = validate::search_key("brewery name", name)?;
        self.find_by_pattern("brewery_name", &name)
    }

    fn get_breweries_by_state(&self, state: &str) -> RepoResult<Vec<Brewery>> {
        let state = validate::search_key("brewery state", state)?;
        self.find_by_pattern("brewery_state", &state)
    }

    fn get_all_breweries(&self) -> RepoResult<Vec<Brewery>> {
        query_all(
            self.conn,
            &format!("{BREWERY_SELECT_SQL} ORDER BY brewery_id ASC;"),
            [],
            parse_brewery_row,
        )
    }
}

fn parse_brewery_row(row: &Row<'_>) -> RepoResult<Brewery> {
    let id: BreweryId = column(row, ENTITY, "brewery_id")?;
    let fields = BreweryFields {
        profile_id: column(row, ENTITY, "brewery_profile_id")?,
        activation_token: column(row, ENTITY, "brewery_activation_token")?,
        address1: column(row, ENTITY, "brewery_address1")?,
        address2: column(row, ENTITY, "brewery_address2")?,
        city: column(row, ENTITY, "brewery_city")?,
        content: column(row, ENTITY, "brewery_content")?,
        email: column(row, ENTITY, "brewery_email")?,
        hash: column(row, ENTITY, "brewery_hash")?,
        image_id: column(row, ENTITY, "brewery_image_id")?,
        location_x: column(row, ENTITY, "brewery_location_x")?,
        location_y: column(row, ENTITY, "brewery_location_y")?,
        name: column(row, ENTITY, "brewery_name")?,
        phone: column(row, ENTITY, "brewery_phone")?,
        salt: column(row, ENTITY, "brewery_salt")?,
        state: column(row, ENTITY, "brewery_state")?,
        zip: column(row, ENTITY, "brewery_zip")?,
    };

    Brewery::with_id(id, fields).map_err(invalid_row(ENTITY))
}
