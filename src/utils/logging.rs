//! 运行日志
//!
//! 运行开始时重建日志文件，结束时把统计追加到同一文件

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 重建日志文件，写入本次运行的开始时间和并发数
pub fn init_log_file(log_file_path: &str, max_concurrent: usize) -> Result<()> {
    fs::write(
        log_file_path,
        format!("注册回执核验 开始于 {} (并发 {})\n", now(), max_concurrent),
    )?;
    info!("🚀 注册回执核验启动, 最大并发数: {}", max_concurrent);
    Ok(())
}

/// 记录一个批次的结果
pub fn log_batch(batch_num: usize, total_batches: usize, accepted: usize, size: usize) {
    info!(
        "📦 第 {}/{} 批完成: 通过 {}/{}",
        batch_num, total_batches, accepted, size
    );
}

/// 记录最终统计并追加到日志文件
pub fn write_run_summary(
    log_file_path: &str,
    accepted: usize,
    rejected: usize,
    failed: usize,
    total: usize,
) -> Result<()> {
    let summary = format!(
        "通过 {} / 拒绝 {} / 失败 {} / 共 {}",
        accepted, rejected, failed, total
    );
    info!("📊 全部处理完成: {}", summary);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;
    writeln!(file, "{} 结束: {}", now(), summary)?;
    Ok(())
}
