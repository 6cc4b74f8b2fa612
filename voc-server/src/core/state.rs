use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::catalog::CatalogBrowser;
use crate::core::Config;
use crate::db;
use crate::db::repository::{CatalogRepository, VoucherRepository};
use crate::voc::VocService;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | catalog | CatalogBrowser | 目录查询服务 |
/// | voc | VocService | 凭证提交编排器 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 目录查询服务
    pub catalog: CatalogBrowser,
    /// 凭证提交编排器
    pub voc: VocService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/voc.db)
    /// 3. 各服务 (CatalogBrowser, VocService)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).expect("Failed to create database directory");
        std::fs::create_dir_all(config.log_dir()).expect("Failed to create log directory");

        // 1. Initialize DB
        let db_path = db_dir.join("voc.db");
        let db = db::open(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        // 2. Initialize Services
        let catalog_repo = Arc::new(CatalogRepository::new(db.clone()));
        let voucher_repo = Arc::new(VoucherRepository::new(db.clone()));
        let catalog = CatalogBrowser::new(catalog_repo.clone());
        let voc = VocService::new(catalog_repo, voucher_repo);

        Self {
            config: config.clone(),
            db,
            catalog,
            voc,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
