// テスト・ベンチマーク用のスタブ実行エンジン

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::executor::{ExecutionBackend, ExecutionError, ExecutionResult};
use crate::notebook::NotebookDocument;

/// 外部プロセスを起動せずにノートブック実行をシミュレートするスタブエンジン
///
/// 各コードセルに出力と実行番号を書き込みます。ソースに `raise` を含む
/// セルに遭遇した場合はセル実行エラーを返します。
#[derive(Debug, Clone, Default)]
pub struct StubExecutor {
    delay: Option<Duration>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self { delay: None }
    }

    /// 実行時間をシミュレートするための遅延を設定
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ExecutionBackend for StubExecutor {
    async fn execute_notebook(
        &self,
        mut document: NotebookDocument,
    ) -> ExecutionResult<NotebookDocument> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut execution_count = 0u64;
        for cell in &mut document.cells {
            if !cell.is_code() {
                continue;
            }

            let source = cell.source_text();
            if source.contains("raise") {
                let first_line = source.lines().next().unwrap_or("").to_string();
                return Err(ExecutionError::cell_failed(first_line));
            }

            execution_count += 1;
            cell.rest
                .insert("execution_count".to_string(), json!(execution_count));
            cell.outputs = Some(vec![json!({
                "output_type": "stream",
                "name": "stdout",
                "text": [format!("cell {execution_count}\n")]
            })]);
        }

        Ok(document)
    }

    fn backend_name(&self) -> &'static str {
        "stub"
    }
}
