//! Beer image repository contract and SQLite implementation.
//!
//! # Invariants
//! - Links are insert/delete only; there is no update path.
//! - `beer_image_brewery_id` must reference an existing brewery
//!   (enforced by the `foreign_keys` pragma).

use crate::model::beer_image::{BeerImage, ImageId};
use crate::model::brewery::BreweryId;
use crate::model::validate;
use crate::repo::{column, invalid_row, query_all, query_one, RepoError, RepoResult};
use log::{debug, info};
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "beer image";

const BEER_IMAGE_SELECT_SQL: &str = "SELECT
    beer_image_image_id,
    beer_image_brewery_id
FROM beer_image";

/// Repository interface for beer image links.
pub trait BeerImageRepository {
    /// Inserts a link and writes the generated image id back onto it.
    fn insert_beer_image(&self, image: &mut BeerImage) -> RepoResult<ImageId>;
    fn delete_beer_image(&self, image: &BeerImage) -> RepoResult<()>;
    fn get_beer_images_by_image_id(&self, image_id: ImageId) -> RepoResult<Vec<BeerImage>>;
    fn get_beer_images_by_brewery_id(&self, brewery_id: BreweryId)
        -> RepoResult<Vec<BeerImage>>;
    fn get_beer_image_by_image_id_and_brewery_id(
        &self,
        image_id: ImageId,
        brewery_id: BreweryId,
    ) -> RepoResult<Option<BeerImage>>;
    fn get_all_beer_images(&self) -> RepoResult<Vec<BeerImage>>;
}

/// SQLite-backed beer image repository.
pub struct SqliteBeerImageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBeerImageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BeerImageRepository for SqliteBeerImageRepository<'_> {
    fn insert_beer_image(&self, image: &mut BeerImage) -> RepoResult<ImageId> {
        if let Some(id) = image.image_id() {
            return Err(RepoError::AlreadyPersisted { entity: ENTITY, id });
        }

        self.conn.execute(
            "INSERT INTO beer_image (beer_image_brewery_id) VALUES (?1);",
            params![image.brewery_id()],
        )?;

        let image_id = self.conn.last_insert_rowid();
        image.assign_image_id(image_id);
        info!(
            "event=beer_image_insert module=repo status=ok image_id={image_id} brewery_id={}",
            image.brewery_id()
        );
        Ok(image_id)
    }

    fn delete_beer_image(&self, image: &BeerImage) -> RepoResult<()> {
        let image_id = image
            .image_id()
            .ok_or(RepoError::NotPersisted { entity: ENTITY })?;

        let changed = self.conn.execute(
            "DELETE FROM beer_image WHERE beer_image_image_id = ?1;",
            [image_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                id: image_id,
            });
        }

        info!("event=beer_image_delete module=repo status=ok image_id={image_id}");
        Ok(())
    }

    fn get_beer_images_by_image_id(&self, image_id: ImageId) -> RepoResult<Vec<BeerImage>> {
        let image_id = validate::positive_id("beer image image id", image_id)?;
        let images = query_all(
            self.conn,
            &format!(
                "{BEER_IMAGE_SELECT_SQL}
                 WHERE beer_image_image_id = ?1
                 ORDER BY beer_image_image_id ASC;"
            ),
            [image_id],
            parse_beer_image_row,
        )?;

        debug!(
            "event=beer_image_lookup module=repo status=ok key=image_id rows={}",
            images.len()
        );
        Ok(images)
    }

    fn get_beer_images_by_brewery_id(
        &self,
        brewery_id: BreweryId,
    ) -> RepoResult<Vec<BeerImage>> {
        let brewery_id = validate::positive_id("beer image brewery id", brewery_id)?;
        let images = query_all(
            self.conn,
            &format!(
                "{BEER_IMAGE_SELECT_SQL}
                 WHERE beer_image_brewery_id = ?1
                 ORDER BY beer_image_image_id ASC;"
            ),
            [brewery_id],
            parse_beer_image_row,
        )?;

        debug!(
            "event=beer_image_lookup module=repo status=ok key=brewery_id rows={}",
            images.len()
        );
        Ok(images)
    }

    fn get_beer_image_by_image_id_and_brewery_id(
        &self,
        image_id: ImageId,
        brewery_id: BreweryId,
    ) -> RepoResult<Option<BeerImage>> {
        let image_id = validate::positive_id("beer image image id", image_id)?;
        let brewery_id = validate::positive_id("beer image brewery id", brewery_id)?;
        query_one(
            self.conn,
            &format!(
                "{BEER_IMAGE_SELECT_SQL}
                 WHERE beer_image_image_id = ?1
                   AND beer_image_brewery_id = ?2;"
            ),
            [image_id, brewery_id],
            parse_beer_image_row,
        )
    }

    fn get_all_beer_images(&self) -> RepoResult<Vec<BeerImage>> {
        query_all(
            self.conn,
            &format!("{BEER_IMAGE_SELECT_SQL} ORDER BY beer_image_image_id ASC;"),
            [],
            parse_beer_image_row,
        )
    }
}

const TABLE: &str = "beer_image";

fn parse_beer_image_row(row: &Row<'_>) -> RepoResult<BeerImage> {
    let image_id: ImageId = column(row, TABLE, "beer_image_image_id")?;
    let brewery_id: BreweryId = column(row, TABLE, "beer_image_brewery_id")?;

    BeerImage::with_id(image_id, brewery_id).map_err(invalid_row(TABLE))
}
