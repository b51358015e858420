// ==========================================
// 仓库 FEFO 看板 - 运行配置
// ==========================================
// 职责: 数据目录解析、候选键配置加载
// 来源: 环境变量 > 用户数据目录 > 当前目录
// ==========================================

use crate::config::column_keys::ColumnKeyConfig;
use crate::config::error::ConfigResult;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 数据目录环境变量
pub const ENV_DATA_DIR: &str = "WMS_FEFO_DATA_DIR";

/// 候选键配置文件环境变量
pub const ENV_COLUMNS: &str = "WMS_FEFO_COLUMNS";

/// 分析结果文件名
pub const ANALYSIS_FILE_NAME: &str = "analysis.json";

/// 拣货清单文件名
pub const PICK_PRIORITY_FILE_NAME: &str = "pick_priority.csv";

// ==========================================
// AppConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,             // 结果输出目录
    pub columns_path: Option<PathBuf>, // 候选键 JSON（None 使用默认）
}

impl AppConfig {
    /// 从环境变量构建
    pub fn from_env() -> Self {
        let data_dir = resolve_data_dir(std::env::var(ENV_DATA_DIR).ok());
        let columns_path = non_blank(std::env::var(ENV_COLUMNS).ok()).map(PathBuf::from);

        debug!(data_dir = %data_dir.display(), "运行配置已解析");
        Self {
            data_dir,
            columns_path,
        }
    }

    /// 覆写输出目录
    pub fn with_data_dir<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    /// 覆写候选键配置文件
    pub fn with_columns_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.columns_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// 加载候选键配置
    pub fn column_keys(&self) -> ConfigResult<ColumnKeyConfig> {
        match &self.columns_path {
            Some(path) => {
                info!(path = %path.display(), "加载候选键配置");
                ColumnKeyConfig::load(path)
            }
            None => Ok(ColumnKeyConfig::default()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 解析数据目录
///
/// 1. 显式指定（环境变量）
/// 2. 用户数据目录（开发构建使用独立目录）
/// 3. ./app_data
pub fn resolve_data_dir(explicit: Option<String>) -> PathBuf {
    if let Some(path) = non_blank(explicit) {
        return PathBuf::from(path);
    }

    match dirs::data_dir() {
        Some(data_dir) => {
            #[cfg(debug_assertions)]
            {
                data_dir.join("wms-fefo-dev")
            }

            #[cfg(not(debug_assertions))]
            {
                data_dir.join("wms-fefo")
            }
        }
        None => PathBuf::from("./app_data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_explicit_wins() {
        let dir = resolve_data_dir(Some("  /tmp/fefo  ".to_string()));
        assert_eq!(dir, PathBuf::from("/tmp/fefo"));
    }

    #[test]
    fn test_resolve_data_dir_blank_falls_back() {
        let dir = resolve_data_dir(Some("   ".to_string()));
        assert_ne!(dir, PathBuf::from(""));
        assert_ne!(dir, PathBuf::from("   "));
    }

    #[test]
    fn test_default_column_keys_without_file() {
        let config = AppConfig {
            data_dir: PathBuf::from("."),
            columns_path: None,
        };
        assert_eq!(config.column_keys().unwrap(), ColumnKeyConfig::default());
    }
}
