//! 核心模块 - 配置和服务器状态

pub mod config;
pub mod state;

pub use config::Config;
pub use state::ServerState;
