// ==========================================
// 仓库 FEFO 看板 - 导入层
// ==========================================
// 职责: 外部导出文件 → 原始表格 → 列映射 → 类型化记录
// 支持: Excel, CSV
// ==========================================

pub mod column_resolver;
pub mod error;
pub mod field_mapper;
pub mod field_normalizer;
pub mod file_parser;

// 重导出核心类型
pub use column_resolver::{resolve_column, ColumnMapping};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{ColumnIndex, FieldMapper};
pub use field_normalizer::{normalize_date, normalize_integer, normalize_number, normalize_text};
pub use file_parser::{CsvParser, ExcelParser, FileParser, SheetSelection, UniversalFileParser};
