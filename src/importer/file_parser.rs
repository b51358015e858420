// ==========================================
// 仓库 FEFO 看板 - 文件解析器实现
// ==========================================
// 职责: 文件 → RawTable（表头 + 原始单元格）
// 支持: Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) / CSV (.csv)
// 红线: 不做类型推断; 表格不可读即整次分析失败
// ==========================================

use crate::domain::table::{CellValue, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头已 TRIM,完全空白的行已跳过
    /// - Err: 文件不存在、格式错误、无表头
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 表头标准化: TRIM,空表头按列号命名
fn normalize_header(raw: &str, idx: usize) -> String {
    let trimmed = raw.trim().trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        format!("Unnamed: {}", idx)
    } else {
        trimmed.to_string()
    }
}

fn text_cell(value: &str) -> CellValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, h)| normalize_header(h, idx))
            .collect();

        if headers.is_empty() {
            return Err(ImportError::MissingHeaderRow(file_path.display().to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record.iter().map(text_cell).collect();

            // 跳过完全空白的行
            if row.iter().all(CellValue::is_blank) {
                continue;
            }
            rows.push(row);
        }

        debug!(file = %file_path.display(), rows = rows.len(), "CSV 解析完成");
        Ok(RawTable::new(headers, rows))
    }
}

// ==========================================
// 工作表选择策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSelection {
    /// 第一个工作表（LT22）
    First,
    /// 多于一个工作表时取第二个,否则取第一个（LX03）
    SecondIfMultiple,
}

impl SheetSelection {
    pub fn pick<'a>(&self, sheet_names: &'a [String]) -> Option<&'a String> {
        match self {
            SheetSelection::First => sheet_names.first(),
            SheetSelection::SecondIfMultiple => {
                if sheet_names.len() > 1 {
                    sheet_names.get(1)
                } else {
                    sheet_names.first()
                }
            }
        }
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    pub sheet: SheetSelection,
}

impl ExcelParser {
    pub fn new(sheet: SheetSelection) -> Self {
        Self { sheet }
    }
}

impl Default for ExcelParser {
    fn default() -> Self {
        Self::new(SheetSelection::First)
    }
}

/// calamine 单元格 → CellValue
fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => text_cell(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_datetime() {
            Some(dt) => CellValue::DateTime(dt),
            None => text_cell(&data.to_string()),
        },
        Data::DurationIso(s) => text_cell(s),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

impl FileParser for ExcelParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !matches!(ext.as_str(), "xlsx" | "xlsm" | "xls" | "xlsb" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = self
            .sheet
            .pick(&sheet_names)
            .cloned()
            .ok_or_else(|| ImportError::NoWorksheet(file_path.display().to_string()))?;

        info!(
            file = %file_path.display(),
            sheet = %sheet_name,
            sheet_count = sheet_names.len(),
            "读取工作表"
        );

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut data_rows = range.rows();
        let header_row = data_rows
            .next()
            .ok_or_else(|| ImportError::MissingHeaderRow(sheet_name.clone()))?;

        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| normalize_header(&cell.to_string(), idx))
            .collect();

        let mut rows = Vec::new();
        for data_row in data_rows {
            let row: Vec<CellValue> = data_row.iter().map(convert_cell).collect();

            // 跳过完全空白的行
            if row.iter().all(CellValue::is_blank) {
                continue;
            }
            rows.push(row);
        }

        debug!(sheet = %sheet_name, rows = rows.len(), "Excel 解析完成");
        Ok(RawTable::new(headers, rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    pub sheet: SheetSelection,
}

impl UniversalFileParser {
    /// 转储记录（LT22）解析器
    pub fn for_movement() -> Self {
        Self {
            sheet: SheetSelection::First,
        }
    }

    /// 库存快照（LX03）解析器
    pub fn for_stock() -> Self {
        Self {
            sheet: SheetSelection::SecondIfMultiple,
        }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_table(path),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => {
                ExcelParser::new(self.sheet).parse_table(path)
            }
            other => {
                // 先报告文件不存在,再报告格式问题
                ensure_exists(path)?;
                Err(ImportError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}
