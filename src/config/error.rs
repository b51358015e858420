// ==========================================
// 仓库 FEFO 看板 - 配置错误类型
// ==========================================

use thiserror::Error;

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadFailed { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    InvalidJson { path: String, message: String },

    #[error("候选键不可为空白 (表 {table}, 字段 {field})")]
    BlankCandidateKey { table: String, field: String },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
