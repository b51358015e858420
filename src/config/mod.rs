// ==========================================
// 仓库 FEFO 看板 - 配置层
// ==========================================
// 职责: 候选键配置（可检查、可覆写）与运行配置
// 存储: JSON 文件 + 环境变量
// ==========================================

pub mod column_keys;
pub mod config_manager;
pub mod error;

// 重导出核心配置
pub use column_keys::{ColumnKeyConfig, ColumnKeys, MovementColumnKeys, StockColumnKeys};
pub use config_manager::{resolve_data_dir, AppConfig};
pub use error::{ConfigError, ConfigResult};
