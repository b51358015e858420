// ==========================================
// 仓库 FEFO 看板 - 字段规范化器
// ==========================================
// 职责: 原始单元格 → 数值 / 日期 / 文本
// 规则: 解析失败或空白一律为缺失,不中断整表; 不伪造默认值（无 0 / 无纪元日期）
// 说明: 规范化幂等,对已规范化列再次规范化结果不变
// ==========================================

use crate::domain::table::CellValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 文本日期格式（按顺序尝试）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// 文本字段: TRIM,空白为 None
pub fn normalize_text(cell: &CellValue) -> Option<String> {
    cell.as_key()
}

/// 数值字段: 接受无区域格式的十进制文本
pub fn normalize_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => parse_decimal(s),
        _ => None,
    }
}

/// 整数字段: 数值且无小数部分
pub fn normalize_integer(cell: &CellValue) -> Option<i64> {
    normalize_number(cell)
        .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
        .map(|n| n as i64)
}

/// 日期字段: 日期时间单元格取日期部分,文本按常见格式解析
///
/// 裸数值不做纪元换算,视为缺失
pub fn normalize_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Text(s) => parse_date_text(s),
        _ => None,
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_local().date())
}
