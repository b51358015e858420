// ==========================================
// 仓库 FEFO 看板 - 原始表格模型
// ==========================================
// 职责: 定义加载器输出的中立单元格与表格结构
// 红线: 不做类型推断,类型转换交给字段规范化器
// ==========================================

use chrono::NaiveDateTime;
use std::fmt;

// ==========================================
// CellValue - 原始单元格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// 空白判定（Empty 或全空白文本）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 作为分组键的文本（空白返回 None）
    pub fn as_key(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(self.to_string().trim().to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    write!(f, "{}", dt.date().format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

/// 数值渲染: 整数值不带小数部分（100234.0 → "100234"）
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ==========================================
// RawTable - 表头 + 数据行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,      // 表头（已 TRIM）
    pub rows: Vec<Vec<CellValue>>, // 数据行（源顺序）
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 表头在表中的列号
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// 按列号读取单元格（短行/未解析列按 Empty 处理）
pub fn cell_at(row: &[CellValue], col: Option<usize>) -> &CellValue {
    col.and_then(|idx| row.get(idx)).unwrap_or(&EMPTY_CELL)
}
