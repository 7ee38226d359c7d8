// jupyter nbconvert を利用した実行エンジン実装

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::executor::{ExecutionBackend, ExecutionError, ExecutionResult};
use crate::notebook::NotebookDocument;

/// Jupyter nbconvert を子プロセスとして起動する実行エンジン
///
/// スクラッチディレクトリ内のコピーに対して
/// `jupyter nbconvert --to notebook --execute --inplace` を実行し、
/// 完了後に実行結果を読み戻します。元のファイルを直接渡さないため、
/// 実行が失敗しても呼び出し元のノートブックは変更されません。
pub struct NbconvertExecutor {
    launcher: PathBuf,
    kernel_name: String,
    cell_timeout: Duration,
    record_timing: bool,
}

impl NbconvertExecutor {
    pub fn new() -> Self {
        Self {
            launcher: PathBuf::from("jupyter"),
            kernel_name: "python3".to_string(),
            cell_timeout: Duration::from_secs(600),
            record_timing: false,
        }
    }

    /// 起動するコマンドを指定（テストや特殊な環境向け）
    pub fn with_launcher(mut self, launcher: impl Into<PathBuf>) -> Self {
        self.launcher = launcher.into();
        self
    }

    /// 使用するカーネル名を指定
    pub fn with_kernel_name(mut self, kernel_name: impl Into<String>) -> Self {
        self.kernel_name = kernel_name.into();
        self
    }

    /// セル単位のタイムアウトを指定
    pub fn with_cell_timeout(mut self, cell_timeout: Duration) -> Self {
        self.cell_timeout = cell_timeout;
        self
    }

    /// セル実行タイミングの記録を有効化するかを指定
    pub fn with_record_timing(mut self, record_timing: bool) -> Self {
        self.record_timing = record_timing;
        self
    }

    pub fn kernel_name(&self) -> &str {
        &self.kernel_name
    }
}

impl Default for NbconvertExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutionBackend for NbconvertExecutor {
    async fn execute_notebook(
        &self,
        document: NotebookDocument,
    ) -> ExecutionResult<NotebookDocument> {
        let scratch = tempfile::tempdir().map_err(|e| ExecutionError::internal(e.into()))?;
        let scratch_path = scratch.path().join("notebook.ipynb");

        let json =
            serde_json::to_string(&document).map_err(|e| ExecutionError::internal(e.into()))?;
        tokio::fs::write(&scratch_path, json)
            .await
            .map_err(|e| ExecutionError::internal(e.into()))?;

        let timeout_secs = self.cell_timeout.as_secs().max(1);
        let record_timing = if self.record_timing { "True" } else { "False" };

        // kill_on_drop により、上位でタイムアウトした場合は子プロセスも終了する
        let output = Command::new(&self.launcher)
            .arg("nbconvert")
            .arg("--to")
            .arg("notebook")
            .arg("--execute")
            .arg("--inplace")
            .arg("--log-level")
            .arg("ERROR")
            .arg(format!(
                "--ExecutePreprocessor.kernel_name={}",
                self.kernel_name
            ))
            .arg(format!("--ExecutePreprocessor.timeout={timeout_secs}"))
            .arg(format!(
                "--ExecutePreprocessor.record_timing={record_timing}"
            ))
            .arg(&scratch_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExecutionError::engine_startup(e.into()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExecutionError::cell_failed(stderr.trim().to_string()));
        }

        let executed_raw = tokio::fs::read_to_string(&scratch_path)
            .await
            .map_err(|e| ExecutionError::internal(e.into()))?;
        let mut executed: NotebookDocument =
            serde_json::from_str(&executed_raw).map_err(|e| ExecutionError::internal(e.into()))?;

        if !self.record_timing {
            executed.strip_timing_metadata();
        }

        Ok(executed)
    }

    fn backend_name(&self) -> &'static str {
        "nbconvert"
    }
}
