// ==========================================
// 仓库 FEFO 看板 - 结果输出错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 结果输出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("输出目录创建失败: {path}: {message}")]
    CreateDirFailed { path: String, message: String },

    #[error("文件写入失败: {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("文件读取失败: {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("JSON 序列化失败: {0}")]
    Serialize(String),

    #[error("分析结果格式无效: {path}: {message}")]
    InvalidDocument { path: String, message: String },

    #[error("CSV 写入失败: {0}")]
    Csv(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
