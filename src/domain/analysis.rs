// ==========================================
// 仓库 FEFO 看板 - 分析结果模型
// ==========================================
// 职责: 定义分析结果文档与拣货优先级清单
// 红线: 记录内字段顺序由视图定义决定（preserve_order）
// ==========================================

use crate::domain::table::format_number;
use chrono::NaiveDate;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// 扁平记录（字段名 → 标量）
pub type ReportRow = Map<String, Value>;

// ==========================================
// ReportTable - 命名报表视图
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub name: String,
    pub rows: Vec<ReportRow>,
}

// ==========================================
// ReportTables - 有序视图集合
// ==========================================
// 序列化为 JSON 对象: { 视图名: [记录...] }
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTables(pub Vec<ReportTable>);

impl ReportTables {
    pub fn get(&self, name: &str) -> Option<&ReportTable> {
        self.0.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ReportTables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for table in &self.0 {
            map.serialize_entry(&table.name, &table.rows)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ReportTables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let mut tables = Vec::with_capacity(raw.len());
        for (name, rows) in raw {
            let rows: Vec<ReportRow> = serde_json::from_value(rows).map_err(D::Error::custom)?;
            tables.push(ReportTable { name, rows });
        }
        Ok(ReportTables(tables))
    }
}

// ==========================================
// AnalysisResult - 分析结果文档
// ==========================================
// 用途: JSON 持久化与界面渲染的唯一数据源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub timestamp: String,       // 评估时刻（ISO-8601,秒精度）
    pub cards: Map<String, Value>, // 汇总卡片
    pub tables: ReportTables,    // 报表视图（仅非空视图）
}

impl AnalysisResult {
    pub fn card(&self, label: &str) -> Option<&Value> {
        self.cards.get(label)
    }

    pub fn table(&self, name: &str) -> Option<&ReportTable> {
        self.tables.get(name)
    }
}

// ==========================================
// PickColumn - 拣货清单标准列
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickColumn {
    Material,
    Batch,
    Sled,
    Quantity,
    StorageType,
    StorageBin,
}

impl PickColumn {
    /// 投影顺序
    pub const ALL: [PickColumn; 6] = [
        PickColumn::Material,
        PickColumn::Batch,
        PickColumn::Sled,
        PickColumn::Quantity,
        PickColumn::StorageType,
        PickColumn::StorageBin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PickColumn::Material => "Material",
            PickColumn::Batch => "Batch",
            PickColumn::Sled => "SLED/BBD",
            PickColumn::Quantity => "Total Stock",
            PickColumn::StorageType => "Storage Type",
            PickColumn::StorageBin => "Storage Bin",
        }
    }
}

// ==========================================
// PickPriorityRow - 拣货清单行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickPriorityRow {
    pub material: Option<String>,
    pub batch: Option<String>,
    pub sled: Option<NaiveDate>,
    pub quantity: Option<f64>,
    pub storage_type: Option<String>,
    pub storage_bin: Option<String>,
}

impl PickPriorityRow {
    /// 按列取单元格文本: 日期 %Y-%m-%d,整数不带小数,缺失为空
    pub fn cell_text(&self, column: PickColumn) -> String {
        match column {
            PickColumn::Material => self.material.clone().unwrap_or_default(),
            PickColumn::Batch => self.batch.clone().unwrap_or_default(),
            PickColumn::Sled => self
                .sled
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            PickColumn::Quantity => self.quantity.map(format_number).unwrap_or_default(),
            PickColumn::StorageType => self.storage_type.clone().unwrap_or_default(),
            PickColumn::StorageBin => self.storage_bin.clone().unwrap_or_default(),
        }
    }
}

// ==========================================
// PickPriorityList - 拣货优先级清单
// ==========================================
// 按 (物料, 到期日, 批次) 升序,缺失值排在最后
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickPriorityList {
    pub columns: Vec<PickColumn>, // 已解析并投影的列
    pub rows: Vec<PickPriorityRow>,
}

impl PickPriorityList {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// AnalysisOutput - 单次分析的两个产物
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    pub result: AnalysisResult,
    pub pick_priority: PickPriorityList,
}
