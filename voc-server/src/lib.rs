//! VOC Server - 多店铺眼镜零售销售凭证服务
//!
//! # 架构概述
//!
//! 本模块是 VOC 服务的主入口，提供以下核心功能：
//!
//! - **商品目录** (`catalog`): 四类库存的查询、过滤和展示排序
//! - **购物车** (`cart`): 按库存上限增减的订单组装模型
//! - **支付核算** (`payment`): 全款/订金的金额推导
//! - **凭证提交** (`voc`): 校验、复核库存、落库、扣减库存
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! voc-server/src/
//! ├── core/          # 配置、状态
//! ├── catalog/       # 目录查询服务
//! ├── cart/          # 购物车模型
//! ├── payment/       # 支付核算
//! ├── voc/           # 凭证提交编排
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod db;
pub mod payment;
pub mod utils;
pub mod voc;

// Re-export 公共类型
pub use crate::core::{Config, ServerState};
pub use cart::{Cart, CartError, QuantityChange};
pub use catalog::CatalogBrowser;
pub use payment::PaymentSummary;
pub use utils::{AppError, AppResponse, AppResult};
pub use voc::{VocError, VocService};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
