//! 目录查询服务
//!
//! 查询一个类目的商品、应用子过滤和搜索，并按展示顺序排序：
//! 有货的排在无货之前，组内按名称字母序 (不区分大小写)。
//! 排序和搜索是纯函数，IO 由注入的 [`CatalogStore`] 承担。

use std::sync::Arc;

use shared::models::{CatalogFilter, CatalogItem, ItemType};
use shared::types::Store;

use crate::voc::{CatalogStore, StoreError};

/// 展示排序：有货优先，其余按名称字母序
pub fn sort_for_display(items: &mut [CatalogItem]) {
    items.sort_by(|a, b| {
        let a_in_stock = a.qty > 0;
        let b_in_stock = b.qty > 0;
        b_in_stock
            .cmp(&a_in_stock)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// 名称或编码的子串匹配 (不区分大小写)
pub fn matches_search(item: &CatalogItem, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if item.name.to_lowercase().contains(&needle) {
        return true;
    }
    item.code
        .as_deref()
        .is_some_and(|code| code.to_lowercase().contains(&needle))
}

/// 过滤出匹配搜索词的商品；空搜索词保留全部
pub fn filter_by_search(items: Vec<CatalogItem>, search: Option<&str>) -> Vec<CatalogItem> {
    match search {
        Some(needle) if !needle.trim().is_empty() => {
            let needle = needle.trim();
            items
                .into_iter()
                .filter(|item| matches_search(item, needle))
                .collect()
        }
        _ => items,
    }
}

/// 目录查询服务
#[derive(Clone)]
pub struct CatalogBrowser {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogBrowser {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// 查询一个类目并返回展示顺序的结果
    pub async fn browse(
        &self,
        item_type: ItemType,
        store: Store,
        filter: &CatalogFilter,
        search: Option<&str>,
    ) -> Result<Vec<CatalogItem>, StoreError> {
        let items = self.catalog.query(item_type, store, filter).await?;
        let mut items = filter_by_search(items, search);
        sort_for_display(&mut items);
        Ok(items)
    }
}
