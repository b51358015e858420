// ==========================================
// 仓库 FEFO 看板 - 引擎层
// ==========================================
// 职责: 违规检测、到期分类、聚合、拣货排序、结果组装
// 红线: 引擎不写文件,不读取系统时钟; 仅 FefoAnalyzer::analyze_files 经导入层读取输入
// ==========================================

pub mod aggregation;
pub mod assembler;
pub mod expiry;
pub mod pick_priority;
pub mod violation;

// 重导出核心引擎
pub use aggregation::AggregationEngine;
pub use assembler::{FefoAnalyzer, ResultAssembler};
pub use expiry::{classify_bucket, days_to_expiry, is_within_risk_window, ExpiryClassifier};
pub use pick_priority::{sort_pick_rows, PickPriorityBuilder};
pub use violation::{is_fefo_violation, ViolationDetector};
