// ==========================================
// 仓库 FEFO 看板 - 结果输出层
// ==========================================
// 职责: 分析结果 → analysis.json,拣货清单 → pick_priority.csv
// 红线: 每次运行整体替换上一次的产物
// ==========================================

pub mod error;
pub mod writer;

pub use error::{ExportError, ExportResult};
pub use writer::ResultWriter;
