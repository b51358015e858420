// ==========================================
// 仓库 FEFO 看板 - 领域模型层
// ==========================================
// 职责: 定义原始表格、类型化记录、分析结果
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod analysis;
pub mod records;
pub mod table;
pub mod types;

// 重导出核心类型
pub use analysis::{
    AnalysisOutput, AnalysisResult, PickColumn, PickPriorityList, PickPriorityRow, ReportRow,
    ReportTable, ReportTables,
};
pub use records::{MovementRecord, StockRecord};
pub use table::{cell_at, format_number, CellValue, RawTable};
pub use types::{CanonicalField, ExpiryBucket, MovementField, StockField};
