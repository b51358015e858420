// ==========================================
// 仓库 FEFO 看板 - 命令行入口
// ==========================================
// 命令: analyze / show / columns
// 红线: 仅入口读取系统时钟,引擎接收注入的评估时刻
// ==========================================

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wms_fefo::config::AppConfig;
use wms_fefo::domain::AnalysisResult;
use wms_fefo::engine::FefoAnalyzer;
use wms_fefo::export::ResultWriter;
use wms_fefo::logging;

#[derive(Parser)]
#[command(name = "wms-fefo", version, about = "LT22/LX03 先到期先出（FEFO）分析")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 分析两份导出并写出结果
    Analyze {
        /// LT22 转储导出（Excel/CSV）
        #[arg(long)]
        movement: PathBuf,
        /// LX03 库存导出（Excel/CSV）
        #[arg(long)]
        stock: PathBuf,
        /// 结果输出目录（默认取 WMS_FEFO_DATA_DIR 或用户数据目录）
        #[arg(long = "out-dir")]
        out_dir: Option<PathBuf>,
        /// 候选键 JSON 配置
        #[arg(long)]
        columns: Option<PathBuf>,
        /// 评估日 YYYY-MM-DD（默认今天）
        #[arg(long)]
        today: Option<String>,
    },
    /// 显示上一次持久化的分析结果
    Show {
        #[arg(long = "out-dir")]
        out_dir: Option<PathBuf>,
    },
    /// 输出当前生效的候选键配置
    Columns {
        #[arg(long)]
        columns: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            movement,
            stock,
            out_dir,
            columns,
            today,
        } => run_analyze(movement, stock, out_dir, columns, today),
        Commands::Show { out_dir } => run_show(out_dir),
        Commands::Columns { columns } => run_columns(columns),
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn app_config(out_dir: Option<PathBuf>, columns: Option<PathBuf>) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(dir) = out_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(path) = columns {
        config = config.with_columns_path(path);
    }
    config
}

/// 评估时刻: 指定日期取当日零点,否则取本地当前时刻
fn evaluation_instant(today: Option<String>) -> Result<NaiveDateTime> {
    match today {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("评估日格式无效（应为 YYYY-MM-DD）: {}", raw))?;
            Ok(date.and_time(chrono::NaiveTime::MIN))
        }
        None => Ok(Local::now().naive_local()),
    }
}

fn run_analyze(
    movement: PathBuf,
    stock: PathBuf,
    out_dir: Option<PathBuf>,
    columns: Option<PathBuf>,
    today: Option<String>,
) -> Result<()> {
    let config = app_config(out_dir, columns);
    let evaluated_at = evaluation_instant(today)?;
    let analyzer = FefoAnalyzer::new(config.column_keys()?);

    tracing::info!(
        version = wms_fefo::VERSION,
        movement = %movement.display(),
        stock = %stock.display(),
        "开始分析"
    );
    let output = analyzer.analyze_files(&movement, &stock, evaluated_at)?;

    let writer = ResultWriter::new(&config.data_dir);
    let (analysis_path, pick_path) = writer.write_all(&output)?;

    print_result(&output.result);
    println!("分析结果: {}", analysis_path.display());
    match pick_path {
        Some(path) => println!("拣货清单: {} ({} 行)", path.display(), output.pick_priority.len()),
        None => println!("拣货清单: 无可投影列,未生成"),
    }
    Ok(())
}

fn run_show(out_dir: Option<PathBuf>) -> Result<()> {
    let config = app_config(out_dir, None);
    let writer = ResultWriter::new(&config.data_dir);
    match writer.read_analysis()? {
        Some(result) => print_result(&result),
        None => println!("尚无分析结果: {}", writer.analysis_path().display()),
    }
    Ok(())
}

fn run_columns(columns: Option<PathBuf>) -> Result<()> {
    let config = app_config(None, columns);
    let keys = config.column_keys()?;
    println!("{}", serde_json::to_string_pretty(&keys)?);
    Ok(())
}

fn print_result(result: &AnalysisResult) {
    println!("评估时刻: {}", result.timestamp);
    for (label, value) in &result.cards {
        let text = match value {
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("  {}: {}", label, text);
    }
    for table in &result.tables.0 {
        println!("  [{}] {} 行", table.name, table.rows.len());
    }
}
