// 単一ノートブックの実行ワーカー

use std::time::Instant;

use crate::core::error::{RunError, RunResult};
use crate::core::types::{NotebookOutcome, NotebookRef};
use crate::executor::ExecutionBackend;
use crate::notebook::io::{read_notebook, write_notebook};
use crate::processing::traits::{NotebookStage, ProgressReporter, RunnerConfig};

/// 1つのノートブックを読み込みから書き戻しまで処理する
///
/// ステージ遷移を順に報告します。どのステージで失敗しても結果は
/// NotebookOutcome として返し、呼び出し元の実行全体は中断しません。
pub async fn run_single_notebook<E, C, R>(
    engine: &E,
    config: &C,
    reporter: &R,
    notebook: &NotebookRef,
) -> NotebookOutcome
where
    E: ExecutionBackend,
    C: RunnerConfig,
    R: ProgressReporter,
{
    let path = notebook.path().display().to_string();
    let started = Instant::now();

    let result: RunResult<usize> = async {
        reporter
            .report_stage(notebook, NotebookStage::Loading)
            .await;
        let document = read_notebook(notebook.path()).await?;

        reporter
            .report_stage(notebook, NotebookStage::Executing)
            .await;
        let timeout = config.execution_timeout();
        let mut executed =
            match tokio::time::timeout(timeout, engine.execute_notebook(document)).await {
                Ok(Ok(executed)) => executed,
                Ok(Err(e)) => return Err(RunError::execution(&path, anyhow::Error::new(e))),
                // タイムアウト時は実行エンジンのFutureがdropされ、子プロセスも終了する
                Err(_) => return Err(RunError::timeout(&path, timeout.as_secs())),
            };

        if !config.record_timing() {
            executed.strip_timing_metadata();
        }

        reporter
            .report_stage(notebook, NotebookStage::Writing)
            .await;
        let code_cells = executed.code_cell_count();
        write_notebook(notebook.path(), &executed).await?;

        reporter
            .report_stage(notebook, NotebookStage::Finished)
            .await;
        Ok(code_cells)
    }
    .await;

    match result {
        Ok(code_cells) => NotebookOutcome::Success {
            notebook: notebook.clone(),
            code_cells,
            duration_ms: started.elapsed().as_millis() as u64,
        },
        Err(error) => {
            reporter.report_error(notebook, &error.to_string()).await;
            NotebookOutcome::Error {
                notebook: notebook.clone(),
                error,
            }
        }
    }
}
