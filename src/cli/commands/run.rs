use anyhow::Result;
use std::path::PathBuf;

use crate::core::types::RunSummary;
use crate::executor::nbconvert::NbconvertExecutor;
use crate::notebook_scanner::discover_notebooks;
use crate::processing::implementations::{ConsoleProgressReporter, DefaultRunnerConfig};
use crate::processing::runner::BatchRunner;
use crate::processing::traits::RunnerConfig;

/// Execute the batch run over explicit notebook paths or the default directory
pub async fn execute_run(paths: Vec<PathBuf>, root: PathBuf) -> Result<RunSummary> {
    // Validate project root
    if !root.exists() {
        anyhow::bail!("Root directory does not exist: {}", root.display());
    }

    if !root.is_dir() {
        anyhow::bail!("Root path is not a directory: {}", root.display());
    }

    let root = std::path::absolute(&root)?;

    println!("🚀 ノートブック一括実行開始");
    println!("   - プロジェクトルート: {}", root.display());

    // Resolve the target set before building the engine
    let notebooks = discover_notebooks(&paths, &root)?;

    if notebooks.is_empty() {
        println!("⚠️  実行対象のノートブックが見つかりませんでした");
        return Ok(RunSummary::empty());
    }

    println!("   - 対象ノートブック数: {}", notebooks.len());

    let config = DefaultRunnerConfig::default();

    println!("⚙️  実行設定:");
    println!("   - ワーカー数: {}", config.worker_count());
    println!("   - タイムアウト: {}秒", config.execution_timeout().as_secs());
    println!("   - カーネル: {}", config.kernel_name());

    let engine = NbconvertExecutor::new()
        .with_kernel_name(config.kernel_name())
        .with_cell_timeout(config.execution_timeout())
        .with_record_timing(config.record_timing());

    let runner = BatchRunner::new(engine, config, ConsoleProgressReporter::new());

    let summary = runner.run(notebooks).await?;

    println!("✅ 実行完了!");
    println!("   - 開始時刻: {}", summary.started_at.to_rfc3339());
    println!("   - 実行済ノートブック: {}", summary.executed_notebooks);
    println!("   - 総ノートブック数: {}", summary.total_notebooks);
    println!("   - エラー数: {}", summary.error_count);
    println!("   - 処理時間: {}ms", summary.total_duration_ms);

    if summary.error_count > 0 {
        for (notebook, error) in summary.failures() {
            eprintln!("   - {}: {}", notebook.display_name(), error);
        }
        anyhow::bail!(
            "{}件のノートブックでエラーが発生しました",
            summary.error_count
        );
    }

    Ok(summary)
}
