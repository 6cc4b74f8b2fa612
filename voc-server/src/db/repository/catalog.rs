//! Catalog Repository
//!
//! 四类库存各占一张表 (lens / frame / accessory / contact_lens)。
//! 镜片库存全店共享，其余三类按 store 字段隔离。

use async_trait::async_trait;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{CatalogFilter, CatalogItem, ItemType};
use shared::types::Store;

use crate::voc::{CatalogStore, StoreError};

use super::{BaseRepository, RepoError, RepoResult};

#[derive(Clone)]
pub struct CatalogRepository {
    base: BaseRepository,
}

impl CatalogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse::<RecordId>()
            .map_err(|_| RepoError::Validation(format!("Invalid record id: {}", id)))
    }

    /// Query one category with optional sub-filters
    pub async fn query(
        &self,
        item_type: ItemType,
        store: Store,
        filter: &CatalogFilter,
    ) -> RepoResult<Vec<CatalogItem>> {
        let mut sql = String::from("SELECT *, <string>id AS id FROM type::table($tbl)");
        let mut clauses: Vec<&str> = Vec::new();
        if item_type.is_store_scoped() {
            clauses.push("store = $store");
        }
        if filter.sub_type.is_some() {
            clauses.push("lens_type = $sub_type");
        }
        if filter.category.is_some() {
            clauses.push("category = $category");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY name");

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("tbl", item_type.table()))
            .bind(("store", store.as_str()));
        if let Some(sub_type) = filter.sub_type.clone() {
            query = query.bind(("sub_type", sub_type));
        }
        if let Some(category) = filter.category.clone() {
            query = query.bind(("category", category));
        }

        let items: Vec<CatalogItem> = query.await?.take(0)?;
        Ok(items)
    }

    /// Find one item by its "table:key" record ID
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CatalogItem>> {
        let rid = Self::parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM $rid")
            .bind(("rid", rid))
            .await?;
        let items: Vec<CatalogItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Atomically decrement stock
    ///
    /// The decrement only applies while `qty >= amount` still holds,
    /// closing the oversell race at the storage level.
    pub async fn decrement_qty(&self, id: &str, amount: i32) -> RepoResult<()> {
        let rid = Self::parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $rid SET qty -= $amount, updated_at = time::now() \
                 WHERE qty >= $amount RETURN VALUE qty",
            )
            .bind(("rid", rid))
            .bind(("amount", amount))
            .await?;
        let updated: Vec<i32> = result.take(0)?;

        if updated.is_empty() {
            return match self.find_by_id(id).await? {
                Some(item) => Err(RepoError::Conflict(item.name)),
                None => Err(RepoError::NotFound(format!("Item {} not found", id))),
            };
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn query(
        &self,
        item_type: ItemType,
        store: Store,
        filter: &CatalogFilter,
    ) -> Result<Vec<CatalogItem>, StoreError> {
        CatalogRepository::query(self, item_type, store, filter)
            .await
            .map_err(store_error)
    }

    async fn read(&self, id: &str) -> Result<CatalogItem, StoreError> {
        self.find_by_id(id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn decrement(&self, id: &str, amount: i32) -> Result<(), StoreError> {
        self.decrement_qty(id, amount).await.map_err(store_error)
    }
}

fn store_error(err: RepoError) -> StoreError {
    match err {
        RepoError::NotFound(msg) => StoreError::NotFound(msg),
        RepoError::Conflict(name) => StoreError::InsufficientStock(name),
        other => StoreError::Backend(other.to_string()),
    }
}
