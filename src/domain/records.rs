// ==========================================
// 仓库 FEFO 看板 - 记录模型
// ==========================================
// 职责: 单次分析中由原始行映射出的类型化记录
// 用途: 导入层写入,引擎层只读
// ==========================================

use crate::domain::types::ExpiryBucket;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MovementRecord - 转储记录 (LT22 每行一条)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub material: Option<String>,            // 物料号
    pub quantity: Option<f64>,               // 源目标数量
    pub sled: Option<NaiveDate>,             // SLED/BBD 到期日
    pub source_storage_type: Option<String>, // 源仓储类型
    pub source_storage_bin: Option<String>,  // 源库位
    pub batch: Option<String>,               // 批次
    pub user: Option<String>,                // 操作用户
    pub exp_in_count: Option<i64>,           // EXP IN 计数
    pub oldest_in_sap: Option<NaiveDate>,    // SAP 中最早到期日

    // 派生: 任一单元格含 FEFO VIOLATION 标记
    pub violation: bool,
}

// ==========================================
// StockRecord - 库存记录 (LX03 每行一条)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub material: Option<String>,     // 物料号
    pub sled: Option<NaiveDate>,      // SLED/BBD 到期日
    pub storage_bin: Option<String>,  // 库位
    pub storage_type: Option<String>, // 仓储类型
    pub quantity: Option<f64>,        // 总库存
    pub batch: Option<String>,        // 批次
    pub gr_date: Option<NaiveDate>,   // 收货日期

    // 派生: 到期天数 = sled - 评估日
    pub days_to_expiry: Option<i64>,
    // 派生: 到期分桶（始终存在）
    pub expiry_bucket: ExpiryBucket,
}

impl Default for StockRecord {
    fn default() -> Self {
        Self {
            material: None,
            sled: None,
            storage_bin: None,
            storage_type: None,
            quantity: None,
            batch: None,
            gr_date: None,
            days_to_expiry: None,
            expiry_bucket: ExpiryBucket::Unknown,
        }
    }
}
