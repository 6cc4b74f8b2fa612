//! 数据库层
//!
//! 嵌入式 SurrealDB (RocksDB 引擎)，单命名空间单库。

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// 打开嵌入式数据库
///
/// 数据文件位于 `path`，首次打开时自动建库。
pub async fn open(path: &str) -> Result<Surreal<Db>, surrealdb::Error> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns("voc").use_db("voc").await?;
    Ok(db)
}
