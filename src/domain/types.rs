// ==========================================
// 仓库 FEFO 看板 - 领域类型定义
// ==========================================
// 依据: SAP LT22 (转储单) / LX03 (库位库存) 导出格式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

// ==========================================
// CanonicalField - 标准字段
// ==========================================
// 每张输入表各有一组标准字段,由列解析器映射到实际表头
pub trait CanonicalField: Copy + Eq + Hash + fmt::Debug + 'static {
    /// 全部字段（固定顺序）
    const ALL: &'static [Self];

    /// 字段名（用于日志与配置）
    fn name(&self) -> &'static str;
}

// ==========================================
// 转储记录字段 (LT22)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementField {
    Material,
    Quantity,
    Sled,
    SourceStorageType,
    SourceStorageBin,
    Batch,
    User,
    ExpInCount,
    OldestInSap,
}

impl CanonicalField for MovementField {
    const ALL: &'static [Self] = &[
        MovementField::Material,
        MovementField::Quantity,
        MovementField::Sled,
        MovementField::SourceStorageType,
        MovementField::SourceStorageBin,
        MovementField::Batch,
        MovementField::User,
        MovementField::ExpInCount,
        MovementField::OldestInSap,
    ];

    fn name(&self) -> &'static str {
        match self {
            MovementField::Material => "material",
            MovementField::Quantity => "quantity",
            MovementField::Sled => "sled",
            MovementField::SourceStorageType => "source_storage_type",
            MovementField::SourceStorageBin => "source_storage_bin",
            MovementField::Batch => "batch",
            MovementField::User => "user",
            MovementField::ExpInCount => "exp_in_count",
            MovementField::OldestInSap => "oldest_in_sap",
        }
    }
}

// ==========================================
// 库存记录字段 (LX03)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockField {
    Material,
    Sled,
    StorageBin,
    StorageType,
    Quantity,
    Batch,
    GrDate,
}

impl CanonicalField for StockField {
    const ALL: &'static [Self] = &[
        StockField::Material,
        StockField::Sled,
        StockField::StorageBin,
        StockField::StorageType,
        StockField::Quantity,
        StockField::Batch,
        StockField::GrDate,
    ];

    fn name(&self) -> &'static str {
        match self {
            StockField::Material => "material",
            StockField::Sled => "sled",
            StockField::StorageBin => "storage_bin",
            StockField::StorageType => "storage_type",
            StockField::Quantity => "quantity",
            StockField::Batch => "batch",
            StockField::GrDate => "gr_date",
        }
    }
}

// ==========================================
// 到期分桶 (Expiry Bucket)
// ==========================================
// 红线: 边界值（0/30/60/90/150）归入较早的桶
// 序列化格式: 报表标签（与看板一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryBucket {
    #[serde(rename = "Expired/Past Due")]
    Expired, // 已过期
    #[serde(rename = "0-30")]
    Days0To30,
    #[serde(rename = "31-60")]
    Days31To60,
    #[serde(rename = "61-90")]
    Days61To90,
    #[serde(rename = "91-150")]
    Days91To150,
    #[serde(rename = "150+")]
    Over150,
    #[serde(rename = "Unknown")]
    Unknown, // 无到期日
}

impl ExpiryBucket {
    /// 报表顺序
    pub const ALL: [ExpiryBucket; 7] = [
        ExpiryBucket::Expired,
        ExpiryBucket::Days0To30,
        ExpiryBucket::Days31To60,
        ExpiryBucket::Days61To90,
        ExpiryBucket::Days91To150,
        ExpiryBucket::Over150,
        ExpiryBucket::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryBucket::Expired => "Expired/Past Due",
            ExpiryBucket::Days0To30 => "0-30",
            ExpiryBucket::Days31To60 => "31-60",
            ExpiryBucket::Days61To90 => "61-90",
            ExpiryBucket::Days91To150 => "91-150",
            ExpiryBucket::Over150 => "150+",
            ExpiryBucket::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ExpiryBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
