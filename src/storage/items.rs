use anyhow::{bail, Result};

use super::schema::Database;
use super::types::ItemRow;
use crate::catalog::{Item, ItemId, NewItem};

impl Database {
    // ========================================================================
    // Item Queries
    // ========================================================================

    /// Every item of a collection, in display (insertion) order.
    pub async fn fetch_items(&self, collection: &str) -> Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, volume, title, year, description, image, collected
            FROM items
            WHERE collection = ?
            ORDER BY id
        "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }

    pub async fn count_items(&self, collection: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // ========================================================================
    // Item Writes
    // ========================================================================

    /// Persist a new item, returning it with its assigned id.
    pub async fn create_item(&self, collection: &str, item: NewItem) -> Result<Item> {
        let result = sqlx::query(
            r#"
            INSERT INTO items (collection, volume, title, year, description, image, collected)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
        )
        .bind(collection)
        .bind(&item.volume)
        .bind(&item.title)
        .bind(&item.year)
        .bind(&item.description)
        .bind(&item.image)
        .bind(item.collected)
        .execute(&self.pool)
        .await?;

        Ok(item.persisted(result.last_insert_rowid()))
    }

    /// Persist a batch of new items in one transaction, preserving order.
    ///
    /// Either every item is written or none is.
    pub async fn create_items(&self, collection: &str, items: Vec<NewItem>) -> Result<Vec<Item>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let result = sqlx::query(
                r#"
                INSERT INTO items (collection, volume, title, year, description, image, collected)
                VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            )
            .bind(collection)
            .bind(&item.volume)
            .bind(&item.title)
            .bind(&item.year)
            .bind(&item.description)
            .bind(&item.image)
            .bind(item.collected)
            .execute(&mut *tx)
            .await?;
            created.push(item.persisted(result.last_insert_rowid()));
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Write an item's collected flag.
    ///
    /// Fails if the item no longer exists in the collection.
    pub async fn update_item(&self, collection: &str, id: ItemId, collected: bool) -> Result<()> {
        let result = sqlx::query("UPDATE items SET collected = ? WHERE id = ? AND collection = ?")
            .bind(collected)
            .bind(id)
            .bind(collection)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            bail!("item {} not found in collection '{}'", id, collection);
        }
        Ok(())
    }

    /// Delete an item. Deleting an item that is already gone is not an error.
    pub async fn delete_item(&self, collection: &str, id: ItemId) -> Result<()> {
        sqlx::query("DELETE FROM items WHERE id = ? AND collection = ?")
            .bind(id)
            .bind(collection)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Drop every item of a collection. Backs `--reset-db`.
    pub async fn clear_items(&self, collection: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM items WHERE collection = ?")
            .bind(collection)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
