// ==========================================
// FefoAnalyzer 集成测试
// ==========================================
// 测试目标: 导出文件 → 分析结果的完整流程
// ==========================================

mod test_helpers;

use serde_json::{json, Value};
use tempfile::TempDir;
use wms_fefo::config::ColumnKeyConfig;
use wms_fefo::domain::PickColumn;
use wms_fefo::engine::aggregation::{
    VIEW_INVENTORY_BY_EXPIRY_BUCKET, VIEW_TOP_BINS_BY_VIOLATIONS,
    VIEW_TOP_MATERIALS_BY_VIOLATIONS, VIEW_TOP_RISK_MATERIALS, VIEW_VIOLATIONS_BY_STORAGE_TYPE,
    VIEW_VIOLATIONS_BY_USER,
};
use wms_fefo::engine::FefoAnalyzer;
use wms_fefo::importer::ImportError;
use wms_fefo::logging;
use test_helpers::{evaluation_instant, write_csv, MOVEMENT_CSV, STOCK_CSV};

fn column(rows: &[serde_json::Map<String, Value>], name: &str) -> Vec<Value> {
    rows.iter().map(|r| r[name].clone()).collect()
}

#[test]
fn test_full_analysis_from_csv() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let movement = write_csv(&dir, "lt22.csv", MOVEMENT_CSV);
    let stock = write_csv(&dir, "lx03.csv", STOCK_CSV);

    let output = FefoAnalyzer::default()
        .analyze_files(&movement, &stock, evaluation_instant())
        .expect("分析失败");
    let result = &output.result;

    // ===== 卡片 =====
    assert_eq!(result.timestamp, "2025-01-01T08:00:00");
    assert_eq!(
        Value::Object(result.cards.clone()),
        json!({
            "Total FEFO Violations": 3,
            "LT22 Rows": 5,
            "Unique Materials (LT22)": 3,
            "Min/Max SLED (LT22)": "2025-01-15 → 2025-04-01"
        })
    );

    // ===== 视图顺序 =====
    let names: Vec<&str> = result.tables.names().collect();
    assert_eq!(
        names,
        vec![
            VIEW_VIOLATIONS_BY_STORAGE_TYPE,
            VIEW_TOP_MATERIALS_BY_VIOLATIONS,
            VIEW_TOP_BINS_BY_VIOLATIONS,
            VIEW_VIOLATIONS_BY_USER,
            VIEW_INVENTORY_BY_EXPIRY_BUCKET,
            VIEW_TOP_RISK_MATERIALS,
        ]
    );

    // ===== 违规视图 =====
    let by_type = result.table(VIEW_VIOLATIONS_BY_STORAGE_TYPE).unwrap();
    assert_eq!(column(&by_type.rows, "Source Storage Type"), vec![json!("T02"), json!("T01")]);
    assert_eq!(column(&by_type.rows, "Violations"), vec![json!(2), json!(1)]);

    let by_material = result.table(VIEW_TOP_MATERIALS_BY_VIOLATIONS).unwrap();
    assert_eq!(column(&by_material.rows, "Material"), vec![json!("100234"), json!("200111")]);

    // 并列时保持首次出现顺序
    let by_bin = result.table(VIEW_TOP_BINS_BY_VIOLATIONS).unwrap();
    assert_eq!(
        column(&by_bin.rows, "Source Storage Bin"),
        vec![json!("01-A-01"), json!("02-B-01"), json!("02-B-02")]
    );

    let by_user = result.table(VIEW_VIOLATIONS_BY_USER).unwrap();
    assert_eq!(by_user.rows.len(), 1);
    assert_eq!(by_user.rows[0]["User"], json!("alice"));
    assert_eq!(by_user.rows[0]["Violations"], json!(3));

    // ===== 库存视图 =====
    let buckets = result.table(VIEW_INVENTORY_BY_EXPIRY_BUCKET).unwrap();
    assert_eq!(
        column(&buckets.rows, "Total_Stock"),
        vec![json!(7), json!(0), json!(50), json!(0), json!(0), json!(100), json!(25)]
    );

    let risk = result.table(VIEW_TOP_RISK_MATERIALS).unwrap();
    assert_eq!(
        risk.rows,
        vec![json!({"Material": "100234", "Total_Stock_<=60d": 50})
            .as_object()
            .unwrap()
            .clone()]
    );

    // ===== 拣货清单 =====
    let pick = &output.pick_priority;
    assert_eq!(pick.columns, PickColumn::ALL.to_vec());
    let batches: Vec<_> = pick.rows.iter().map(|r| r.batch.clone().unwrap()).collect();
    assert_eq!(batches, vec!["B1", "B2", "B3", "B4", "B9"]);
    assert_eq!(pick.rows[4].sled, None);
}

#[test]
fn test_bucket_sum_equals_total_stock() {
    let dir = TempDir::new().unwrap();
    let movement = write_csv(&dir, "lt22.csv", MOVEMENT_CSV);
    let stock = write_csv(&dir, "lx03.csv", STOCK_CSV);

    let output = FefoAnalyzer::default()
        .analyze_files(&movement, &stock, evaluation_instant())
        .unwrap();
    let buckets = output.result.table(VIEW_INVENTORY_BY_EXPIRY_BUCKET).unwrap();
    let total: i64 = buckets
        .rows
        .iter()
        .map(|r| r["Total_Stock"].as_i64().unwrap())
        .sum();

    assert_eq!(total, 40 + 10 + 7 + 100 + 25);
}

#[test]
fn test_custom_column_keys() {
    let dir = TempDir::new().unwrap();
    let movement = write_csv(
        &dir,
        "lt22.csv",
        "Materialnummer,Lagertyp,Hinweis\nM1,T1,FEFO VIOLATION\nM2,T1,ok\n",
    );
    let stock = write_csv(&dir, "lx03.csv", "Material,Total Stock\nM1,5\n");

    let keys = ColumnKeyConfig::from_json(
        r#"{"movement": {"source_storage_type": ["Lagertyp"]}}"#,
    )
    .unwrap();
    let output = FefoAnalyzer::new(keys)
        .analyze_files(&movement, &stock, evaluation_instant())
        .unwrap();

    let by_type = output.result.table(VIEW_VIOLATIONS_BY_STORAGE_TYPE).unwrap();
    assert_eq!(by_type.rows[0]["Lagertyp"], json!("T1"));
    // 未覆写的列表保持默认（"Material" 子串匹配 "Materialnummer"）
    assert_eq!(output.result.card("Unique Materials (LT22)"), Some(&json!(2)));
}

#[test]
fn test_missing_columns_omit_views() {
    let dir = TempDir::new().unwrap();
    let movement = write_csv(&dir, "lt22.csv", "Note\nFEFO VIOLATION\n");
    let stock = write_csv(&dir, "lx03.csv", "Plant\nP1\n");

    let output = FefoAnalyzer::default()
        .analyze_files(&movement, &stock, evaluation_instant())
        .unwrap();
    let result = &output.result;

    assert_eq!(result.card("Total FEFO Violations"), Some(&json!(1)));
    assert_eq!(result.card("Unique Materials (LT22)"), Some(&Value::Null));
    assert_eq!(result.card("Min/Max SLED (LT22)"), Some(&json!("- → -")));

    // 仅到期分桶视图始终存在（全部为 Unknown）
    let names: Vec<&str> = result.tables.names().collect();
    assert_eq!(names, vec![VIEW_INVENTORY_BY_EXPIRY_BUCKET]);
    assert!(output.pick_priority.is_empty());
}

#[test]
fn test_unreadable_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let stock = write_csv(&dir, "lx03.csv", STOCK_CSV);

    let err = FefoAnalyzer::default()
        .analyze_files(dir.path().join("missing.csv"), &stock, evaluation_instant())
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));

    let text = write_csv(&dir, "lt22.txt", MOVEMENT_CSV);
    let err = FefoAnalyzer::default()
        .analyze_files(&text, &stock, evaluation_instant())
        .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}
