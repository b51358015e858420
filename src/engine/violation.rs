// ==========================================
// 仓库 FEFO 看板 - FEFO 违规检测器
// ==========================================
// 职责: 行级谓词,判定转储行是否被标记为 FEFO 违规
// 规则: 整行所有单元格渲染为文本后拼接,大小写不敏感地包含标记即为违规
// 说明: 标记所在列随导出版本变化,因此扫描整行而非某个状态列
// ==========================================

use crate::domain::table::CellValue;

/// 违规标记
pub const FEFO_VIOLATION_MARKER: &str = "FEFO VIOLATION";

/// 单元格分隔符（防止标记跨单元格拼出）
const CELL_SEPARATOR: char = '\u{1f}';

/// 行 → 文本（各单元格渲染后以分隔符拼接）
pub fn row_text(row: &[CellValue]) -> String {
    let mut text = String::new();
    for (idx, cell) in row.iter().enumerate() {
        if idx > 0 {
            text.push(CELL_SEPARATOR);
        }
        text.push_str(&cell.to_string());
    }
    text
}

/// 行是否含违规标记（大小写不敏感）
pub fn is_fefo_violation(row: &[CellValue]) -> bool {
    row_text(row)
        .to_uppercase()
        .contains(FEFO_VIOLATION_MARKER)
}

// ==========================================
// ViolationDetector - 违规检测器
// ==========================================
pub struct ViolationDetector {
    // 无状态引擎
}

impl ViolationDetector {
    pub fn new() -> Self {
        Self {}
    }

    pub fn detect(&self, row: &[CellValue]) -> bool {
        is_fefo_violation(row)
    }
}

impl Default for ViolationDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_marker_in_any_column() {
        let row = vec![text("M1"), CellValue::Number(5.0), text("Remark: FEFO VIOLATION")];
        assert!(is_fefo_violation(&row));

        let row = vec![text("FEFO VIOLATION"), text("M1")];
        assert!(is_fefo_violation(&row));
    }

    #[test]
    fn test_case_insensitive() {
        let upper = vec![text("FEFO VIOLATION")];
        let lower = vec![text("fefo violation")];
        let mixed = vec![text("Fefo Violation detected")];
        assert_eq!(is_fefo_violation(&upper), is_fefo_violation(&lower));
        assert!(is_fefo_violation(&lower));
        assert!(is_fefo_violation(&mixed));
    }

    #[test]
    fn test_no_marker() {
        let row = vec![text("FEFO"), text("OK"), CellValue::Empty];
        assert!(!is_fefo_violation(&row));
        assert!(!is_fefo_violation(&[]));
    }

    #[test]
    fn test_marker_not_spliced_across_cells() {
        let row = vec![text("FEFO"), text("VIOLATION")];
        assert!(!is_fefo_violation(&row));
    }

    #[test]
    fn test_detector_flags_rows() {
        let detector = ViolationDetector::new();
        let rows = vec![
            vec![text("A"), text("fefo violation")],
            vec![text("B"), text("ok")],
            vec![text("A"), text("ok")],
        ];
        let flags: Vec<bool> = rows.iter().map(|row| detector.detect(row)).collect();
        assert_eq!(flags, vec![true, false, false]);
    }
}
