// ==========================================
// 仓库 FEFO 看板 - 列名候选键配置
// ==========================================
// 职责: 每个标准字段的候选键列表（按优先级）
// 说明: 导出表头随报表版本/语言变化,候选键可通过 JSON 覆写
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{CanonicalField, MovementField, StockField};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// ColumnKeys Trait
// ==========================================
// 用途: 列解析器按字段读取候选键
// 实现者: MovementColumnKeys, StockColumnKeys
pub trait ColumnKeys<F: CanonicalField> {
    /// 字段的候选键（优先级从高到低）
    fn candidates(&self, field: F) -> &[String];
}

fn keys(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ==========================================
// MovementColumnKeys - LT22 候选键
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementColumnKeys {
    pub material: Vec<String>,
    pub quantity: Vec<String>,
    pub sled: Vec<String>,
    pub source_storage_type: Vec<String>,
    pub source_storage_bin: Vec<String>,
    pub batch: Vec<String>,
    pub user: Vec<String>,
    pub exp_in_count: Vec<String>,
    pub oldest_in_sap: Vec<String>,
}

impl Default for MovementColumnKeys {
    fn default() -> Self {
        Self {
            material: keys(&["Material"]),
            quantity: keys(&["Source target qty", "Qty", "Quantity"]),
            sled: keys(&["SLED", "BBD", "expiration"]),
            source_storage_type: keys(&["Source Storage Type"]),
            source_storage_bin: keys(&["Source Storage Bin"]),
            batch: keys(&["Batch"]),
            user: keys(&["User"]),
            exp_in_count: keys(&["EXP IN", "EXP IN #"]),
            oldest_in_sap: keys(&["OLDEST IN SAP"]),
        }
    }
}

impl ColumnKeys<MovementField> for MovementColumnKeys {
    fn candidates(&self, field: MovementField) -> &[String] {
        match field {
            MovementField::Material => &self.material,
            MovementField::Quantity => &self.quantity,
            MovementField::Sled => &self.sled,
            MovementField::SourceStorageType => &self.source_storage_type,
            MovementField::SourceStorageBin => &self.source_storage_bin,
            MovementField::Batch => &self.batch,
            MovementField::User => &self.user,
            MovementField::ExpInCount => &self.exp_in_count,
            MovementField::OldestInSap => &self.oldest_in_sap,
        }
    }
}

// ==========================================
// StockColumnKeys - LX03 候选键
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockColumnKeys {
    pub material: Vec<String>,
    pub sled: Vec<String>,
    pub storage_bin: Vec<String>,
    pub storage_type: Vec<String>,
    pub quantity: Vec<String>,
    pub batch: Vec<String>,
    pub gr_date: Vec<String>,
}

impl Default for StockColumnKeys {
    fn default() -> Self {
        Self {
            material: keys(&["Material"]),
            sled: keys(&["SLED", "BBD"]),
            storage_bin: keys(&["Storage Bin"]),
            storage_type: keys(&["Storage Type"]),
            quantity: keys(&["Total Stock"]),
            batch: keys(&["Batch"]),
            gr_date: keys(&["GR Date"]),
        }
    }
}

impl ColumnKeys<StockField> for StockColumnKeys {
    fn candidates(&self, field: StockField) -> &[String] {
        match field {
            StockField::Material => &self.material,
            StockField::Sled => &self.sled,
            StockField::StorageBin => &self.storage_bin,
            StockField::StorageType => &self.storage_type,
            StockField::Quantity => &self.quantity,
            StockField::Batch => &self.batch,
            StockField::GrDate => &self.gr_date,
        }
    }
}

// ==========================================
// ColumnKeyConfig - 两张表的候选键
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnKeyConfig {
    pub movement: MovementColumnKeys,
    pub stock: StockColumnKeys,
}

impl ColumnKeyConfig {
    /// 从 JSON 文件加载（缺省的列表使用默认值）
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            ConfigError::InvalidJson { message, .. } => ConfigError::InvalidJson {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// 从 JSON 文本解析
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: ColumnKeyConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::InvalidJson {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 候选键不可为空白字符串（空白键会匹配任意表头）
    pub fn validate(&self) -> ConfigResult<()> {
        for field in MovementField::ALL {
            check_keys("movement", field.name(), self.movement.candidates(*field))?;
        }
        for field in StockField::ALL {
            check_keys("stock", field.name(), self.stock.candidates(*field))?;
        }
        Ok(())
    }
}

fn check_keys(table: &str, field: &str, candidates: &[String]) -> ConfigResult<()> {
    if candidates.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::BlankCandidateKey {
            table: table.to_string(),
            field: field.to_string(),
        });
    }
    Ok(())
}
