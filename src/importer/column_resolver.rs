// ==========================================
// 仓库 FEFO 看板 - 列解析器
// ==========================================
// 职责: 标准字段 → 实际表头（按候选键优先级做子串匹配）
// 规则: 外层按候选键顺序,内层按表头顺序,大小写不敏感,首个命中即返回
// 红线: 纯函数; 未命中不是错误,字段在本次分析中缺失
// ==========================================

use crate::config::ColumnKeys;
use crate::domain::types::CanonicalField;
use tracing::{debug, warn};

/// 按候选键解析表头
///
/// # 返回
/// - Some(header): 第一个包含任一候选键（大小写不敏感）的表头
/// - None: 无表头命中
pub fn resolve_column<'a, K: AsRef<str>>(headers: &'a [String], keys: &[K]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        let needle = key.as_ref().to_lowercase();
        headers
            .iter()
            .find(|header| header.to_lowercase().contains(&needle))
            .map(String::as_str)
    })
}

// ==========================================
// ColumnMapping - 单表列映射
// ==========================================
// 解析后不可变; 下游一律通过映射读取,不重复解析
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping<F: CanonicalField> {
    entries: Vec<(F, Option<String>)>,
}

impl<F: CanonicalField> ColumnMapping<F> {
    /// 对一张表的表头解析全部标准字段
    pub fn resolve<C: ColumnKeys<F>>(headers: &[String], keys: &C) -> Self {
        let entries = F::ALL
            .iter()
            .map(|field| {
                let resolved = resolve_column(headers, keys.candidates(*field)).map(str::to_string);
                match &resolved {
                    Some(header) => debug!(field = field.name(), header = %header, "列已解析"),
                    None => warn!(field = field.name(), "列未解析,相关视图将省略"),
                }
                (*field, resolved)
            })
            .collect();
        Self { entries }
    }

    /// 字段对应的表头
    pub fn header(&self, field: F) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, h)| h.as_deref())
    }

    pub fn is_resolved(&self, field: F) -> bool {
        self.header(field).is_some()
    }

    /// 已解析字段数
    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|(_, h)| h.is_some()).count()
    }

    /// 全部映射（字段固定顺序）
    pub fn entries(&self) -> impl Iterator<Item = (F, Option<&str>)> {
        self.entries.iter().map(|(f, h)| (*f, h.as_deref()))
    }
}
