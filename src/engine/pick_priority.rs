// ==========================================
// 仓库 FEFO 看板 - 拣货优先级构建器
// ==========================================
// 职责: 库存记录 → 按 (物料, 到期日, 批次) 升序的拣货清单
// 规则: 仅投影已解析的列,未解析列不出现（不填占位值）
// 规则: 稳定排序; 每个键内缺失值排在所有存在值之后
// ==========================================

use crate::domain::analysis::{PickColumn, PickPriorityList, PickPriorityRow};
use crate::domain::records::StockRecord;
use crate::domain::types::StockField;
use crate::importer::column_resolver::ColumnMapping;
use std::cmp::Ordering;

/// 拣货列对应的库存字段
fn source_field(column: PickColumn) -> StockField {
    match column {
        PickColumn::Material => StockField::Material,
        PickColumn::Batch => StockField::Batch,
        PickColumn::Sled => StockField::Sled,
        PickColumn::Quantity => StockField::Quantity,
        PickColumn::StorageType => StockField::StorageType,
        PickColumn::StorageBin => StockField::StorageBin,
    }
}

/// 缺失值排后的比较
fn cmp_missing_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 拣货顺序: 物料 → 到期日 → 批次
pub fn compare_pick_rows(a: &PickPriorityRow, b: &PickPriorityRow) -> Ordering {
    cmp_missing_last(&a.material, &b.material)
        .then_with(|| cmp_missing_last(&a.sled, &b.sled))
        .then_with(|| cmp_missing_last(&a.batch, &b.batch))
}

/// 稳定排序（对已排序清单再次排序结果不变）
pub fn sort_pick_rows(rows: &mut [PickPriorityRow]) {
    rows.sort_by(compare_pick_rows);
}

// ==========================================
// PickPriorityBuilder - 拣货优先级构建器
// ==========================================
pub struct PickPriorityBuilder {
    // 无状态引擎
}

impl PickPriorityBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建拣货清单
    ///
    /// 没有任何可投影列时返回空清单
    pub fn build(
        &self,
        records: &[StockRecord],
        mapping: &ColumnMapping<StockField>,
    ) -> PickPriorityList {
        let columns: Vec<PickColumn> = PickColumn::ALL
            .iter()
            .copied()
            .filter(|col| mapping.is_resolved(source_field(*col)))
            .collect();

        if columns.is_empty() {
            return PickPriorityList::default();
        }

        let mut rows: Vec<PickPriorityRow> = records
            .iter()
            .map(|record| project(record, &columns))
            .collect();
        sort_pick_rows(&mut rows);

        PickPriorityList { columns, rows }
    }
}

impl Default for PickPriorityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn project(record: &StockRecord, columns: &[PickColumn]) -> PickPriorityRow {
    let has = |col: PickColumn| columns.contains(&col);
    PickPriorityRow {
        material: record.material.clone().filter(|_| has(PickColumn::Material)),
        batch: record.batch.clone().filter(|_| has(PickColumn::Batch)),
        sled: record.sled.filter(|_| has(PickColumn::Sled)),
        quantity: record.quantity.filter(|_| has(PickColumn::Quantity)),
        storage_type: record
            .storage_type
            .clone()
            .filter(|_| has(PickColumn::StorageType)),
        storage_bin: record
            .storage_bin
            .clone()
            .filter(|_| has(PickColumn::StorageBin)),
    }
}
