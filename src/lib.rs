// ==========================================
// 仓库 FEFO 看板 - 核心库
// ==========================================
// 输入: LT22 转储导出 + LX03 库存导出（Excel/CSV）
// 输出: 分析结果文档 + 拣货优先级清单
// 系统定位: 决策支持（只读分析,不回写 WMS）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格、记录与结果模型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 结果输出层 - 持久化
pub mod export;

// 配置层 - 候选键与运行配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AnalysisOutput, AnalysisResult, CellValue, ExpiryBucket, MovementField, MovementRecord,
    PickColumn, PickPriorityList, RawTable, ReportTable, StockField, StockRecord,
};

// 引擎
pub use engine::{
    AggregationEngine, ExpiryClassifier, FefoAnalyzer, PickPriorityBuilder, ResultAssembler,
    ViolationDetector,
};

// 导入
pub use importer::{ImportError, UniversalFileParser};

// 输出
pub use export::{ExportError, ResultWriter};

// 配置
pub use config::{AppConfig, ColumnKeyConfig, ConfigError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "仓库 FEFO 看板";
