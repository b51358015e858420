// ==========================================
// 仓库 FEFO 看板 - 到期分类器
// ==========================================
// 职责: 计算到期天数,划分到期分桶,判定 0-60 天风险窗口
// 红线: 分桶边界值（0/30/60/90/150）归入较早的桶
// 红线: 评估日由调用方注入,引擎不读取系统时钟
// 说明: 分桶与风险窗口是两套独立口径,风险窗口为闭区间 [0, 60]
// ==========================================

use crate::domain::records::StockRecord;
use crate::domain::types::ExpiryBucket;
use chrono::NaiveDate;

/// 风险窗口下限（天,含）
pub const RISK_WINDOW_MIN_DAYS: i64 = 0;

/// 风险窗口上限（天,含）
pub const RISK_WINDOW_MAX_DAYS: i64 = 60;

/// 到期天数 = 到期日 - 评估日（整天）
pub fn days_to_expiry(sled: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    sled.map(|date| (date - today).num_days())
}

/// 到期分桶（自上而下,首个命中即返回）
pub fn classify_bucket(days: Option<i64>) -> ExpiryBucket {
    match days {
        None => ExpiryBucket::Unknown,
        Some(d) if d <= 0 => ExpiryBucket::Expired,
        Some(d) if d <= 30 => ExpiryBucket::Days0To30,
        Some(d) if d <= 60 => ExpiryBucket::Days31To60,
        Some(d) if d <= 90 => ExpiryBucket::Days61To90,
        Some(d) if d <= 150 => ExpiryBucket::Days91To150,
        Some(_) => ExpiryBucket::Over150,
    }
}

/// 是否处于 0-60 天风险窗口（闭区间）
pub fn is_within_risk_window(days: Option<i64>) -> bool {
    matches!(days, Some(d) if (RISK_WINDOW_MIN_DAYS..=RISK_WINDOW_MAX_DAYS).contains(&d))
}

// ==========================================
// ExpiryClassifier - 到期分类器
// ==========================================
pub struct ExpiryClassifier {
    today: NaiveDate, // 评估日（仅日期）
}

impl ExpiryClassifier {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// 填充到期天数与分桶
    pub fn classify(&self, record: StockRecord) -> StockRecord {
        let days = days_to_expiry(record.sled, self.today);
        StockRecord {
            days_to_expiry: days,
            expiry_bucket: classify_bucket(days),
            ..record
        }
    }
}
