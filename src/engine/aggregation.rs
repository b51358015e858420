// ==========================================
// 仓库 FEFO 看板 - 聚合引擎
// ==========================================
// 职责: 分组计数/求和、降序排名、Top-N 截断,生成六个报表视图
// 规则: 分组按首次出现顺序建立,再做稳定降序排序（并列保持原行序）
// 规则: 视图仅在其分组列已解析时计算; 分组键缺失的行不参与分组
// ==========================================

use crate::domain::analysis::{ReportRow, ReportTable};
use crate::domain::records::{MovementRecord, StockRecord};
use crate::domain::types::{ExpiryBucket, MovementField, StockField};
use crate::engine::expiry::is_within_risk_window;
use crate::importer::column_resolver::ColumnMapping;
use serde_json::Value;
use std::collections::HashMap;

// ==========================================
// 视图名称（看板与持久化共用）
// ==========================================
pub const VIEW_VIOLATIONS_BY_STORAGE_TYPE: &str = "Violations by Storage Type";
pub const VIEW_TOP_MATERIALS_BY_VIOLATIONS: &str = "Top Materials by Violations";
pub const VIEW_TOP_BINS_BY_VIOLATIONS: &str = "Top Bins by Violations";
pub const VIEW_VIOLATIONS_BY_USER: &str = "Violations by User (LT22)";
pub const VIEW_INVENTORY_BY_EXPIRY_BUCKET: &str = "Inventory by Expiry Bucket (LX03)";
pub const VIEW_TOP_RISK_MATERIALS: &str = "Top Risk Materials (≤60 days)";

// ==========================================
// 指标列名
// ==========================================
pub const METRIC_VIOLATIONS: &str = "Violations";
pub const METRIC_TOTAL_STOCK: &str = "Total_Stock";
pub const METRIC_TOTAL_STOCK_RISK: &str = "Total_Stock_<=60d";
pub const BUCKET_COLUMN: &str = "EXP_BUCKET";

/// Top-N 视图行数上限
pub const TOP_N: usize = 15;

// ==========================================
// 通用分组计算
// ==========================================

/// 分组合计（按首次出现顺序）
pub fn group_totals<T, K, V>(items: &[T], key: K, value: V) -> Vec<(String, f64)>
where
    K: Fn(&T) -> Option<&str>,
    V: Fn(&T) -> f64,
{
    let mut groups: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let Some(k) = key(item) else {
            continue;
        };
        let v = value(item);
        match index.get(k) {
            Some(&pos) => groups[pos].1 += v,
            None => {
                index.insert(k.to_string(), groups.len());
                groups.push((k.to_string(), v));
            }
        }
    }

    groups
}

/// 稳定降序排序 + 可选截断
pub fn rank_desc(mut groups: Vec<(String, f64)>, limit: Option<usize>) -> Vec<(String, f64)> {
    // sort_by 为稳定排序,并列保持首次出现顺序
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    if let Some(n) = limit {
        groups.truncate(n);
    }
    groups
}

/// 指标值: 整数值输出为整数
pub fn metric_value(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn group_rows(group_column: &str, metric: &str, groups: Vec<(String, f64)>) -> Vec<ReportRow> {
    groups
        .into_iter()
        .map(|(key, total)| {
            let mut row = ReportRow::new();
            row.insert(group_column.to_string(), Value::String(key));
            row.insert(metric.to_string(), metric_value(total));
            row
        })
        .collect()
}

fn non_empty(name: &str, rows: Vec<ReportRow>) -> Option<ReportTable> {
    if rows.is_empty() {
        None
    } else {
        Some(ReportTable {
            name: name.to_string(),
            rows,
        })
    }
}

// ==========================================
// AggregationEngine - 聚合引擎
// ==========================================
pub struct AggregationEngine {
    // 无状态引擎
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 违规按维度计数（仅违规子集）
    fn violations_by<K>(
        &self,
        name: &str,
        records: &[MovementRecord],
        group_column: Option<&str>,
        key: K,
        limit: Option<usize>,
    ) -> Option<ReportTable>
    where
        K: Fn(&MovementRecord) -> Option<&str>,
    {
        let group_column = group_column?;
        let violations: Vec<&MovementRecord> = records.iter().filter(|r| r.violation).collect();
        let groups = group_totals(&violations, |r| key(*r), |_| 1.0);
        non_empty(
            name,
            group_rows(group_column, METRIC_VIOLATIONS, rank_desc(groups, limit)),
        )
    }

    /// 视图 1: 违规按源仓储类型（全部行）
    pub fn violations_by_storage_type(
        &self,
        records: &[MovementRecord],
        mapping: &ColumnMapping<MovementField>,
    ) -> Option<ReportTable> {
        self.violations_by(
            VIEW_VIOLATIONS_BY_STORAGE_TYPE,
            records,
            mapping.header(MovementField::SourceStorageType),
            |r| r.source_storage_type.as_deref(),
            None,
        )
    }

    /// 视图 2: 违规按物料（Top 15）
    pub fn top_materials_by_violations(
        &self,
        records: &[MovementRecord],
        mapping: &ColumnMapping<MovementField>,
    ) -> Option<ReportTable> {
        self.violations_by(
            VIEW_TOP_MATERIALS_BY_VIOLATIONS,
            records,
            mapping.header(MovementField::Material),
            |r| r.material.as_deref(),
            Some(TOP_N),
        )
    }

    /// 视图 3: 违规按源库位（Top 15）
    pub fn top_bins_by_violations(
        &self,
        records: &[MovementRecord],
        mapping: &ColumnMapping<MovementField>,
    ) -> Option<ReportTable> {
        self.violations_by(
            VIEW_TOP_BINS_BY_VIOLATIONS,
            records,
            mapping.header(MovementField::SourceStorageBin),
            |r| r.source_storage_bin.as_deref(),
            Some(TOP_N),
        )
    }

    /// 视图 4: 违规按用户（全部行）
    pub fn violations_by_user(
        &self,
        records: &[MovementRecord],
        mapping: &ColumnMapping<MovementField>,
    ) -> Option<ReportTable> {
        self.violations_by(
            VIEW_VIOLATIONS_BY_USER,
            records,
            mapping.header(MovementField::User),
            |r| r.user.as_deref(),
            None,
        )
    }

    /// 视图 5: 库存数量按到期分桶
    ///
    /// 每个分桶固定一行（报表顺序）,缺失数量按 0 计
    pub fn inventory_by_expiry_bucket(&self, records: &[StockRecord]) -> ReportTable {
        let mut sums: HashMap<ExpiryBucket, f64> = HashMap::new();
        for record in records {
            *sums.entry(record.expiry_bucket).or_insert(0.0) += record.quantity.unwrap_or(0.0);
        }

        let rows = ExpiryBucket::ALL
            .iter()
            .map(|bucket| {
                let mut row = ReportRow::new();
                row.insert(
                    BUCKET_COLUMN.to_string(),
                    Value::String(bucket.label().to_string()),
                );
                row.insert(
                    METRIC_TOTAL_STOCK.to_string(),
                    metric_value(sums.get(bucket).copied().unwrap_or(0.0)),
                );
                row
            })
            .collect();

        ReportTable {
            name: VIEW_INVENTORY_BY_EXPIRY_BUCKET.to_string(),
            rows,
        }
    }

    /// 视图 6: 0-60 天风险物料（按物料求和,Top 15）
    ///
    /// 需要物料列与数量列均已解析
    pub fn top_risk_materials(
        &self,
        records: &[StockRecord],
        mapping: &ColumnMapping<StockField>,
    ) -> Option<ReportTable> {
        let material_column = mapping.header(StockField::Material)?;
        mapping.header(StockField::Quantity)?;

        let at_risk: Vec<&StockRecord> = records
            .iter()
            .filter(|r| is_within_risk_window(r.days_to_expiry))
            .collect();
        let groups = group_totals(
            &at_risk,
            |r| r.material.as_deref(),
            |r| r.quantity.unwrap_or(0.0),
        );

        non_empty(
            VIEW_TOP_RISK_MATERIALS,
            group_rows(
                material_column,
                METRIC_TOTAL_STOCK_RISK,
                rank_desc(groups, Some(TOP_N)),
            ),
        )
    }

    /// 全部视图（固定顺序,空视图省略）
    pub fn build_tables(
        &self,
        movements: &[MovementRecord],
        movement_mapping: &ColumnMapping<MovementField>,
        stock: &[StockRecord],
        stock_mapping: &ColumnMapping<StockField>,
    ) -> Vec<ReportTable> {
        [
            self.violations_by_storage_type(movements, movement_mapping),
            self.top_materials_by_violations(movements, movement_mapping),
            self.top_bins_by_violations(movements, movement_mapping),
            self.violations_by_user(movements, movement_mapping),
            Some(self.inventory_by_expiry_bucket(stock)),
            self.top_risk_materials(stock, stock_mapping),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}
