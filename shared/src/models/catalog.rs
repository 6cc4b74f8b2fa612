//! Catalog Models
//!
//! A catalog item is a stock-keeping unit in exactly one of four
//! categories. Each category is backed by its own table and carries its
//! own detail attributes, modelled as a tagged union so that access is
//! exhaustive per category instead of nullable-field poking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inventory category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Lens,
    Frame,
    Accessories,
    ContactLens,
}

impl ItemType {
    /// Backing table for this category
    pub fn table(&self) -> &'static str {
        match self {
            ItemType::Lens => "lens",
            ItemType::Frame => "frame",
            ItemType::Accessories => "accessory",
            ItemType::ContactLens => "contact_lens",
        }
    }

    /// Lens stock is shared across all stores; every other category is
    /// held per store.
    pub fn is_store_scoped(&self) -> bool {
        !matches!(self, ItemType::Lens)
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ItemType::Lens => "Lens",
            ItemType::Frame => "Frame",
            ItemType::Accessories => "Accessories",
            ItemType::ContactLens => "Contact Lens",
        };
        f.write_str(name)
    }
}

/// Category-specific attributes, tagged by category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "item_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemDetails {
    Lens {
        #[serde(skip_serializing_if = "Option::is_none")]
        sph: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cyl: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        axis: Option<String>,
        /// Sub-type: "Single Vision" | "Bifocal"
        #[serde(skip_serializing_if = "Option::is_none")]
        lens_type: Option<String>,
    },
    Frame {
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Accessories,
    ContactLens {
        #[serde(skip_serializing_if = "Option::is_none")]
        power: Option<String>,
    },
}

impl ItemDetails {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemDetails::Lens { .. } => ItemType::Lens,
            ItemDetails::Frame { .. } => ItemType::Frame,
            ItemDetails::Accessories => ItemType::Accessories,
            ItemDetails::ContactLens { .. } => ItemType::ContactLens,
        }
    }
}

/// Stock-keeping unit
///
/// `qty` is mutated only by stock adjustments (sale decrement, manual
/// restock) and is never negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Record ID in "table:key" form
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Sub-category label (lens material, frame/contact-lens category)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units on hand
    pub qty: i32,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl CatalogItem {
    pub fn item_type(&self) -> ItemType {
        self.details.item_type()
    }
}

/// Sub-filters for a catalog query (the category itself is passed
/// alongside, since it selects the backing table)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Lens sub-type filter ("Single Vision" | "Bifocal")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    /// Category label filter (lens material, frame/contact-lens category)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
