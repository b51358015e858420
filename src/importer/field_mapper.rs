// ==========================================
// 仓库 FEFO 看板 - 字段映射器实现
// ==========================================
// 职责: 原始行 + 列映射 → 类型化记录（经字段规范化器）
// 说明: 派生字段（违规标记/到期天数/分桶）由引擎层填充
// ==========================================

use crate::domain::records::{MovementRecord, StockRecord};
use crate::domain::table::{cell_at, CellValue, RawTable};
use crate::domain::types::{CanonicalField, MovementField, StockField};
use crate::importer::column_resolver::ColumnMapping;
use crate::importer::field_normalizer::{
    normalize_date, normalize_integer, normalize_number, normalize_text,
};

// ==========================================
// ColumnIndex - 字段 → 列号
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnIndex<F: CanonicalField> {
    entries: Vec<(F, Option<usize>)>,
}

impl<F: CanonicalField> ColumnIndex<F> {
    pub fn new(table: &RawTable, mapping: &ColumnMapping<F>) -> Self {
        let entries = mapping
            .entries()
            .map(|(field, header)| (field, header.and_then(|h| table.column_index(h))))
            .collect();
        Self { entries }
    }

    pub fn get(&self, field: F) -> Option<usize> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, idx)| *idx)
    }
}

pub struct FieldMapper;

impl FieldMapper {
    /// 转储记录（违规标记默认 false,由违规检测器设置）
    pub fn map_movement_row(
        &self,
        row: &[CellValue],
        columns: &ColumnIndex<MovementField>,
    ) -> MovementRecord {
        let cell = |field: MovementField| cell_at(row, columns.get(field));

        MovementRecord {
            material: normalize_text(cell(MovementField::Material)),
            quantity: normalize_number(cell(MovementField::Quantity)),
            sled: normalize_date(cell(MovementField::Sled)),
            source_storage_type: normalize_text(cell(MovementField::SourceStorageType)),
            source_storage_bin: normalize_text(cell(MovementField::SourceStorageBin)),
            batch: normalize_text(cell(MovementField::Batch)),
            user: normalize_text(cell(MovementField::User)),
            exp_in_count: normalize_integer(cell(MovementField::ExpInCount)),
            oldest_in_sap: normalize_date(cell(MovementField::OldestInSap)),
            violation: false,
        }
    }

    /// 库存记录（到期天数/分桶由到期分类器设置）
    pub fn map_stock_row(&self, row: &[CellValue], columns: &ColumnIndex<StockField>) -> StockRecord {
        let cell = |field: StockField| cell_at(row, columns.get(field));

        StockRecord {
            material: normalize_text(cell(StockField::Material)),
            sled: normalize_date(cell(StockField::Sled)),
            storage_bin: normalize_text(cell(StockField::StorageBin)),
            storage_type: normalize_text(cell(StockField::StorageType)),
            quantity: normalize_number(cell(StockField::Quantity)),
            batch: normalize_text(cell(StockField::Batch)),
            gr_date: normalize_date(cell(StockField::GrDate)),
            ..StockRecord::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MovementColumnKeys, StockColumnKeys};
    use chrono::NaiveDate;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_map_movement_row() {
        let table = RawTable::new(
            vec![
                "Material".to_string(),
                "Source target qty".to_string(),
                "SLED/BBD".to_string(),
                "EXP IN #".to_string(),
            ],
            vec![vec![
                CellValue::Number(100234.0),
                text("12"),
                text("2025-06-30"),
                text("3"),
            ]],
        );
        let mapping = ColumnMapping::resolve(&table.headers, &MovementColumnKeys::default());
        let columns = ColumnIndex::new(&table, &mapping);

        let record = FieldMapper.map_movement_row(&table.rows[0], &columns);

        assert_eq!(record.material, Some("100234".to_string()));
        assert_eq!(record.quantity, Some(12.0));
        assert_eq!(record.sled, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert_eq!(record.exp_in_count, Some(3));
        assert_eq!(record.user, None);
        assert!(!record.violation);
    }

    #[test]
    fn test_map_stock_row_malformed_cells_are_missing() {
        let table = RawTable::new(
            vec![
                "Material".to_string(),
                "SLED".to_string(),
                "Total Stock".to_string(),
            ],
            vec![vec![text("M1"), text("soon"), text("n/a")]],
        );
        let mapping = ColumnMapping::resolve(&table.headers, &StockColumnKeys::default());
        let columns = ColumnIndex::new(&table, &mapping);

        let record = FieldMapper.map_stock_row(&table.rows[0], &columns);

        assert_eq!(record.material, Some("M1".to_string()));
        assert_eq!(record.sled, None);
        assert_eq!(record.quantity, None);
        assert_eq!(record.days_to_expiry, None);
    }
}
