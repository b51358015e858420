// ==========================================
// 仓库 FEFO 看板 - 结果写出器
// ==========================================
// 职责: 持久化分析结果文档与拣货清单,并支持读回展示
// 格式: JSON（缩进,字段顺序保持）, CSV（仅已投影列）
// ==========================================

use crate::config::config_manager::{ANALYSIS_FILE_NAME, PICK_PRIORITY_FILE_NAME};
use crate::domain::analysis::{AnalysisOutput, AnalysisResult, PickPriorityList};
use crate::export::error::{ExportError, ExportResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// ResultWriter - 结果写出器
// ==========================================
pub struct ResultWriter {
    out_dir: PathBuf,
}

impl ResultWriter {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.out_dir.join(ANALYSIS_FILE_NAME)
    }

    pub fn pick_priority_path(&self) -> PathBuf {
        self.out_dir.join(PICK_PRIORITY_FILE_NAME)
    }

    fn ensure_dir(&self) -> ExportResult<()> {
        fs::create_dir_all(&self.out_dir).map_err(|e| ExportError::CreateDirFailed {
            path: self.out_dir.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 写出分析结果文档
    pub fn write_analysis(&self, result: &AnalysisResult) -> ExportResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.analysis_path();
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        fs::write(&path, format!("{json}\n")).map_err(|e| ExportError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), tables = result.tables.len(), "分析结果已写出");
        Ok(path)
    }

    /// 写出拣货清单
    ///
    /// # 返回
    /// - Some(path): 清单非空并已写出
    /// - None: 清单为空,旧文件已移除
    pub fn write_pick_priority(&self, list: &PickPriorityList) -> ExportResult<Option<PathBuf>> {
        let path = self.pick_priority_path();

        if list.is_empty() {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| ExportError::WriteFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                debug!(path = %path.display(), "拣货清单为空,已移除旧文件");
            }
            return Ok(None);
        }

        self.ensure_dir()?;
        let mut writer = csv::WriterBuilder::new().from_path(&path)?;
        writer.write_record(list.columns.iter().map(|c| c.label()))?;
        for row in &list.rows {
            writer.write_record(list.columns.iter().map(|c| row.cell_text(*c)))?;
        }
        writer.flush().map_err(|e| ExportError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), rows = list.len(), "拣货清单已写出");
        Ok(Some(path))
    }

    /// 写出单次分析的全部产物
    pub fn write_all(&self, output: &AnalysisOutput) -> ExportResult<(PathBuf, Option<PathBuf>)> {
        let analysis = self.write_analysis(&output.result)?;
        let pick = self.write_pick_priority(&output.pick_priority)?;
        Ok((analysis, pick))
    }

    /// 读回已持久化的分析结果（不存在时返回 None）
    pub fn read_analysis(&self) -> ExportResult<Option<AnalysisResult>> {
        let path = self.analysis_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|e| ExportError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let result = serde_json::from_str(&raw).map_err(|e| ExportError::InvalidDocument {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(result))
    }
}
