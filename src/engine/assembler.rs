// ==========================================
// 仓库 FEFO 看板 - 结果组装与分析编排
// ==========================================
// 职责: 汇总卡片 + 报表视图 + 拣货清单 → 分析结果
// 流程: 列解析 → 记录映射 → 违规检测 → 到期分类 → 聚合 → 组装
// 红线: 评估时刻由调用方注入; 固定输入与时刻下结果逐字节可复现
// ==========================================

use crate::config::ColumnKeyConfig;
use crate::domain::analysis::{AnalysisOutput, AnalysisResult, ReportTable, ReportTables};
use crate::domain::records::{MovementRecord, StockRecord};
use crate::domain::table::RawTable;
use crate::domain::types::{MovementField, StockField};
use crate::engine::aggregation::AggregationEngine;
use crate::engine::expiry::ExpiryClassifier;
use crate::engine::pick_priority::PickPriorityBuilder;
use crate::engine::violation::ViolationDetector;
use crate::importer::column_resolver::ColumnMapping;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{ColumnIndex, FieldMapper};
use crate::importer::file_parser::UniversalFileParser;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument};

// ==========================================
// 卡片标签
// ==========================================
pub const CARD_TOTAL_VIOLATIONS: &str = "Total FEFO Violations";
pub const CARD_MOVEMENT_ROWS: &str = "LT22 Rows";
pub const CARD_UNIQUE_MATERIALS: &str = "Unique Materials (LT22)";
pub const CARD_SLED_RANGE: &str = "Min/Max SLED (LT22)";

/// 时间戳格式（秒精度）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ==========================================
// ResultAssembler - 结果组装器
// ==========================================
pub struct ResultAssembler {
    // 无状态引擎
}

impl ResultAssembler {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总卡片（固定顺序）
    pub fn build_cards(
        &self,
        movement_rows: usize,
        movements: &[MovementRecord],
        movement_mapping: &ColumnMapping<MovementField>,
    ) -> Map<String, Value> {
        let violations = movements.iter().filter(|r| r.violation).count();

        let unique_materials = if movement_mapping.is_resolved(MovementField::Material) {
            let distinct: HashSet<&str> = movements
                .iter()
                .filter_map(|r| r.material.as_deref())
                .collect();
            Value::from(distinct.len())
        } else {
            Value::Null
        };

        let min_sled = movements.iter().filter_map(|r| r.sled).min();
        let max_sled = movements.iter().filter_map(|r| r.sled).max();
        let side = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string())
        };

        let mut cards = Map::new();
        cards.insert(CARD_TOTAL_VIOLATIONS.to_string(), Value::from(violations));
        cards.insert(CARD_MOVEMENT_ROWS.to_string(), Value::from(movement_rows));
        cards.insert(CARD_UNIQUE_MATERIALS.to_string(), unique_materials);
        cards.insert(
            CARD_SLED_RANGE.to_string(),
            Value::String(format!("{} → {}", side(min_sled), side(max_sled))),
        );
        cards
    }

    pub fn assemble(
        &self,
        evaluated_at: NaiveDateTime,
        cards: Map<String, Value>,
        tables: Vec<ReportTable>,
    ) -> AnalysisResult {
        AnalysisResult {
            timestamp: evaluated_at.format(TIMESTAMP_FORMAT).to_string(),
            cards,
            tables: ReportTables(tables),
        }
    }
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// FefoAnalyzer - 分析编排器
// ==========================================
pub struct FefoAnalyzer {
    column_keys: ColumnKeyConfig,
    detector: ViolationDetector,
    aggregator: AggregationEngine,
    pick_builder: PickPriorityBuilder,
    assembler: ResultAssembler,
}

impl FefoAnalyzer {
    pub fn new(column_keys: ColumnKeyConfig) -> Self {
        Self {
            column_keys,
            detector: ViolationDetector::new(),
            aggregator: AggregationEngine::new(),
            pick_builder: PickPriorityBuilder::new(),
            assembler: ResultAssembler::new(),
        }
    }

    /// 对两张原始表执行一次完整分析
    #[instrument(skip_all, fields(movement_rows = movement.row_count(), stock_rows = stock.row_count()))]
    pub fn analyze(
        &self,
        movement: &RawTable,
        stock: &RawTable,
        evaluated_at: NaiveDateTime,
    ) -> AnalysisOutput {
        let movement_mapping: ColumnMapping<MovementField> =
            ColumnMapping::resolve(&movement.headers, &self.column_keys.movement);
        let stock_mapping: ColumnMapping<StockField> =
            ColumnMapping::resolve(&stock.headers, &self.column_keys.stock);
        info!(
            movement_resolved = movement_mapping.resolved_count(),
            stock_resolved = stock_mapping.resolved_count(),
            "列解析完成"
        );

        let mapper = FieldMapper;

        let movement_index = ColumnIndex::new(movement, &movement_mapping);
        let movements: Vec<MovementRecord> = movement
            .rows
            .iter()
            .map(|row| MovementRecord {
                violation: self.detector.detect(row),
                ..mapper.map_movement_row(row, &movement_index)
            })
            .collect();

        let classifier = ExpiryClassifier::new(evaluated_at.date());
        let stock_index = ColumnIndex::new(stock, &stock_mapping);
        let stock_records: Vec<StockRecord> = stock
            .rows
            .iter()
            .map(|row| classifier.classify(mapper.map_stock_row(row, &stock_index)))
            .collect();

        let tables = self.aggregator.build_tables(
            &movements,
            &movement_mapping,
            &stock_records,
            &stock_mapping,
        );
        let cards = self
            .assembler
            .build_cards(movement.row_count(), &movements, &movement_mapping);
        let pick_priority = self.pick_builder.build(&stock_records, &stock_mapping);

        let result = self.assembler.assemble(evaluated_at, cards, tables);
        info!(
            violations = movements.iter().filter(|r| r.violation).count(),
            tables = result.tables.len(),
            pick_rows = pick_priority.len(),
            "分析完成"
        );

        AnalysisOutput {
            result,
            pick_priority,
        }
    }

    /// 读取两个导出文件并分析
    pub fn analyze_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        movement_path: P,
        stock_path: Q,
        evaluated_at: NaiveDateTime,
    ) -> ImportResult<AnalysisOutput> {
        let movement = UniversalFileParser::for_movement().parse(movement_path)?;
        let stock = UniversalFileParser::for_stock().parse(stock_path)?;
        Ok(self.analyze(&movement, &stock, evaluated_at))
    }
}

impl Default for FefoAnalyzer {
    fn default() -> Self {
        Self::new(ColumnKeyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;
    use crate::engine::aggregation::{
        VIEW_INVENTORY_BY_EXPIRY_BUCKET, VIEW_TOP_MATERIALS_BY_VIOLATIONS,
        VIEW_TOP_RISK_MATERIALS, VIEW_VIOLATIONS_BY_STORAGE_TYPE,
    };
    use chrono::NaiveDate;
    use serde_json::json;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn empty_stock() -> RawTable {
        table(&["Material", "SLED/BBD", "Total Stock"], vec![])
    }

    #[test]
    fn test_violation_scenario() {
        let movement = table(
            &["Material", "Source Storage Type", "Remark"],
            vec![
                vec![text("A"), text("T1"), text("FEFO VIOLATION")],
                vec![text("B"), text("T1"), text("ok")],
                vec![text("A"), text("T2"), text("fefo violation")],
            ],
        );

        let output = FefoAnalyzer::default().analyze(&movement, &empty_stock(), at(2025, 1, 1));
        let result = &output.result;

        assert_eq!(result.card(CARD_TOTAL_VIOLATIONS), Some(&json!(2)));
        assert_eq!(result.card(CARD_MOVEMENT_ROWS), Some(&json!(3)));
        assert_eq!(result.card(CARD_UNIQUE_MATERIALS), Some(&json!(2)));

        let materials = result.table(VIEW_TOP_MATERIALS_BY_VIOLATIONS).unwrap();
        assert_eq!(materials.rows, vec![json!({"Material": "A", "Violations": 2})
            .as_object()
            .unwrap()
            .clone()]);

        let types = result.table(VIEW_VIOLATIONS_BY_STORAGE_TYPE).unwrap();
        let keys: Vec<_> = types
            .rows
            .iter()
            .map(|r| r["Source Storage Type"].clone())
            .collect();
        assert_eq!(keys, vec![json!("T1"), json!("T2")]);
    }

    #[test]
    fn test_bucket_scenario() {
        let stock = table(
            &["Material", "SLED/BBD", "Total Stock"],
            vec![
                vec![text("M1"), text("2024-12-31"), CellValue::Number(10.0)],
                vec![text("M2"), text("2025-01-01"), CellValue::Number(20.0)],
                vec![text("M3"), text("2025-03-02"), CellValue::Number(30.0)],
                vec![text("M4"), text("2025-07-20"), CellValue::Number(40.0)],
                vec![text("M5"), CellValue::Empty, CellValue::Number(50.0)],
            ],
        );
        let movement = table(&["Material"], vec![]);

        let output = FefoAnalyzer::default().analyze(&movement, &stock, at(2025, 1, 1));
        let buckets = output.result.table(VIEW_INVENTORY_BY_EXPIRY_BUCKET).unwrap();
        let sums: Vec<_> = buckets
            .rows
            .iter()
            .map(|r| (r["EXP_BUCKET"].clone(), r["Total_Stock"].clone()))
            .collect();

        assert_eq!(
            sums,
            vec![
                (json!("Expired/Past Due"), json!(30)),
                (json!("0-30"), json!(0)),
                (json!("31-60"), json!(30)),
                (json!("61-90"), json!(0)),
                (json!("91-150"), json!(0)),
                (json!("150+"), json!(40)),
                (json!("Unknown"), json!(50)),
            ]
        );

        // 风险窗口 [0, 60]: M2(0 天) 与 M3(60 天)
        let risk = output.result.table(VIEW_TOP_RISK_MATERIALS).unwrap();
        let risk_keys: Vec<_> = risk.rows.iter().map(|r| r["Material"].clone()).collect();
        assert_eq!(risk_keys, vec![json!("M3"), json!("M2")]);
    }

    #[test]
    fn test_no_material_column() {
        let movement = table(
            &["Source Storage Bin", "Note"],
            vec![
                vec![text("B-01"), text("FEFO VIOLATION")],
                vec![text("B-02"), text("ok")],
            ],
        );

        let output = FefoAnalyzer::default().analyze(&movement, &empty_stock(), at(2025, 1, 1));
        let result = &output.result;

        assert_eq!(result.card(CARD_UNIQUE_MATERIALS), Some(&Value::Null));
        assert_eq!(result.card(CARD_TOTAL_VIOLATIONS), Some(&json!(1)));
        assert!(result.table(VIEW_TOP_MATERIALS_BY_VIOLATIONS).is_none());
        assert!(result.table(VIEW_VIOLATIONS_BY_STORAGE_TYPE).is_none());
    }

    #[test]
    fn test_cards_order_and_sled_range() {
        let movement = table(
            &["Material", "SLED/BBD"],
            vec![
                vec![text("A"), text("2025-05-01")],
                vec![text("B"), text("2025-02-01")],
                vec![text("C"), CellValue::Empty],
            ],
        );

        let output = FefoAnalyzer::default().analyze(&movement, &empty_stock(), at(2025, 1, 1));
        let labels: Vec<_> = output.result.cards.keys().cloned().collect();
        assert_eq!(
            labels,
            vec![
                CARD_TOTAL_VIOLATIONS,
                CARD_MOVEMENT_ROWS,
                CARD_UNIQUE_MATERIALS,
                CARD_SLED_RANGE
            ]
        );
        assert_eq!(
            output.result.card(CARD_SLED_RANGE),
            Some(&json!("2025-02-01 → 2025-05-01"))
        );
        assert_eq!(output.result.timestamp, "2025-01-01T08:30:00");
    }

    #[test]
    fn test_sled_range_missing_sides() {
        let movement = table(&["Material"], vec![vec![text("A")]]);
        let output = FefoAnalyzer::default().analyze(&movement, &empty_stock(), at(2025, 1, 1));
        assert_eq!(output.result.card(CARD_SLED_RANGE), Some(&json!("- → -")));
    }

    #[test]
    fn test_reproducible_output() {
        let movement = table(
            &["Material", "User"],
            vec![
                vec![text("A"), text("u1 FEFO VIOLATION")],
                vec![text("B"), text("u2 FEFO VIOLATION")],
            ],
        );
        let analyzer = FefoAnalyzer::default();
        let first = serde_json::to_string(&analyzer.analyze(&movement, &empty_stock(), at(2025, 1, 1)).result).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(&movement, &empty_stock(), at(2025, 1, 1)).result).unwrap();
        assert_eq!(first, second);
    }
}
