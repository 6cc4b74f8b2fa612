//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod catalog;
pub mod voucher;

// Re-exports
pub use catalog::CatalogRepository;
pub use voucher::{VoucherPeriod, VoucherRepository};

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 创建: let id = RecordId::from_table_key("frame", "abc");
//   - 查询投影: SELECT *, <string>id AS id 返回 "table:id" 字符串

/// Build a RecordId from a "table:key" string or a bare key
pub fn record_id(table: &str, id: &str) -> RecordId {
    let key = id.strip_prefix(&format!("{}:", table)).unwrap_or(id);
    RecordId::from_table_key(table, key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
