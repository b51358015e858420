// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成临时导出文件、固定评估时刻
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 在临时目录中写入 CSV 文件
pub fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("写入测试 CSV 失败");
    path
}

/// 固定评估时刻（2025-01-01 08:00:00）
pub fn evaluation_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// LT22 样例: 5 行,3 行违规（标记分布在不同列、大小写不同）
pub const MOVEMENT_CSV: &str = "\
Material,Batch,Source Storage Type,Source Storage Bin,User,SLED/BBD,Source target qty,Remark
100234,B1,T01,01-A-01,alice,2025-02-10,5,FEFO VIOLATION
100234,B2,T01,01-A-02,bob,2025-03-01,3,ok
200111,B3,T02,02-B-01,alice,2025-01-15,8,fefo violation - oldest skipped
300999,B4,T01,01-A-01,carol,,2,
100234,B5,T02,02-B-02,alice,2025-04-01,1,Fefo Violation
";

/// LX03 样例: 覆盖过期、0-60 天、远期与缺失到期日
pub const STOCK_CSV: &str = "\
Material,Batch,SLED/BBD,Total Stock,Storage Type,Storage Bin,GR Date
100234,B2,2025-03-01,40,T01,01-A-02,2024-10-01
100234,B1,2025-02-10,10,T01,01-A-01,2024-09-01
200111,B3,2024-12-20,7,T02,02-B-01,2024-08-01
300999,B4,2025-09-01,100,T01,01-A-01,2024-11-01
400500,B9,,25,T03,03-C-01,2024-12-01
";
