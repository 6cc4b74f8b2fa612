//! Catalog API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{CatalogFilter, CatalogItem, ItemType};
use shared::types::Store;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct BrowseParams {
    pub store: Store,
    pub sub_type: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// URL 路径段用表名风格的小写类目
fn parse_item_type(segment: &str) -> Option<ItemType> {
    match segment {
        "lens" => Some(ItemType::Lens),
        "frame" => Some(ItemType::Frame),
        "accessory" => Some(ItemType::Accessories),
        "contact_lens" => Some(ItemType::ContactLens),
        _ => None,
    }
}

/// GET /api/catalog/:item_type - 查询一个类目
///
/// 有货的排前，组内按名称字母序；`search` 对名称和编码做
/// 不区分大小写的子串匹配。
pub async fn browse(
    State(state): State<ServerState>,
    Path(item_type): Path<String>,
    Query(params): Query<BrowseParams>,
) -> AppResult<Json<Vec<CatalogItem>>> {
    let item_type = parse_item_type(&item_type)
        .ok_or_else(|| AppError::validation(format!("Unknown item type: {}", item_type)))?;

    let filter = CatalogFilter {
        sub_type: params.sub_type,
        category: params.category,
    };

    let items = state
        .catalog
        .browse(item_type, params.store, &filter, params.search.as_deref())
        .await?;
    Ok(Json(items))
}
