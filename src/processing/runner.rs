// BatchRunner - 依存性注入による並列ノートブック実行エンジン
// 全ての依存関係がコンストラクタで注入されるDIパターン実装

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::core::error::{RunError, RunResult};
use crate::core::types::{NotebookOutcome, NotebookRef, RunSummary};
use crate::executor::ExecutionBackend;
use crate::notebook_scanner::discover_notebooks;
use crate::processing::traits::{ProgressReporter, RunnerConfig};
use crate::processing::worker::run_single_notebook;

/// 依存性注入による並列ノートブック実行エンジン
///
/// 実行エンジン・設定・進捗報告の全依存関係をコンストラクタで注入します。
/// 並列実行で共有される依存関係はArcで管理し、
/// 不要なクローンを避ける効率的な設計。
pub struct BatchRunner<E, C, R> {
    engine: Arc<E>,
    config: Arc<C>,
    reporter: Arc<R>,
}

impl<E, C, R> BatchRunner<E, C, R>
where
    E: ExecutionBackend + 'static,
    C: RunnerConfig + 'static,
    R: ProgressReporter + 'static,
{
    /// 新しい実行エンジンを作成
    ///
    /// 全ての依存関係をコンストラクタで注入する（Constructor Injection）
    pub fn new(engine: E, config: C, reporter: R) -> Self {
        Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
        }
    }

    /// 指定されたパス群を解決して並列実行する高レベルAPI
    ///
    /// パスが空の場合はルート直下の既定ディレクトリを探索します。
    pub async fn run_paths(&self, paths: &[PathBuf], root: &Path) -> RunResult<RunSummary> {
        let notebooks = discover_notebooks(paths, root)?;
        self.run(notebooks).await
    }

    /// ノートブック一覧を並列実行する
    ///
    /// 全ノートブックの完了を待ってからサマリーを返します。結果は投入順で
    /// 集計され、個々の失敗は該当ノートブックの結果として記録されるのみで
    /// 残りのノートブックの実行は継続します。ワーカータスク自体の失敗
    /// （パニック等）が起きた場合も、全タスクの回収と完了報告を終えてから
    /// 最初の失敗をエラーとして返します。
    pub async fn run(&self, notebooks: Vec<NotebookRef>) -> RunResult<RunSummary> {
        // 設定検証
        if self.config.worker_count() == 0 {
            return Err(RunError::configuration(
                "ワーカー数は1以上である必要があります",
            ));
        }

        let started_at = chrono::Utc::now();
        let start_time = std::time::Instant::now();
        let total_notebooks = notebooks.len();

        self.reporter.report_started(total_notebooks).await;

        // 同時実行数をセマフォで制限し、1ノートブック=1タスクとして投入する
        let semaphore = Arc::new(Semaphore::new(self.config.worker_count()));
        let mut handles = Vec::with_capacity(total_notebooks);

        for notebook in notebooks {
            let engine = Arc::clone(&self.engine);
            let config = Arc::clone(&self.config);
            let reporter = Arc::clone(&self.reporter);
            let semaphore = Arc::clone(&semaphore);

            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| RunError::internal(e.into()))?;

                Ok(run_single_notebook(
                    engine.as_ref(),
                    config.as_ref(),
                    reporter.as_ref(),
                    &notebook,
                )
                .await)
            }));
        }

        // 投入順に全タスクの完了を待つ。タスク自体の失敗（パニック等）が
        // あっても途中で打ち切らず、残りのタスクを回収し終えてから報告する
        let mut outcomes = Vec::with_capacity(total_notebooks);
        let mut first_failure: Option<RunError> = None;

        for handle in handles {
            let outcome: RunResult<NotebookOutcome> = match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(RunError::task(join_error)),
            };

            match outcome {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    if first_failure.is_none() {
                        first_failure = Some(error);
                    }
                }
            }
        }

        let executed_notebooks = outcomes.iter().filter(|o| o.is_success()).count();
        let error_count = total_notebooks - executed_notebooks;

        self.reporter
            .report_completed(executed_notebooks, error_count)
            .await;

        if let Some(error) = first_failure {
            return Err(error);
        }

        let total_duration_ms = start_time.elapsed().as_millis() as u64;
        let average_time_per_notebook_ms = if executed_notebooks > 0 {
            total_duration_ms as f64 / executed_notebooks as f64
        } else {
            0.0
        };

        Ok(RunSummary {
            total_notebooks,
            executed_notebooks,
            error_count,
            total_duration_ms,
            average_time_per_notebook_ms,
            started_at,
            outcomes,
        })
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::stub::StubExecutor;
    use crate::executor::ExecutionResult;
    use crate::notebook::NotebookDocument;
    use crate::notebook_scanner::DEFAULT_NOTEBOOK_DIR;
    use crate::processing::implementations::{
        ConsoleProgressReporter, DefaultRunnerConfig, MemoryProgressReporter, ProgressEvent,
    };
    use crate::processing::traits::NotebookStage;
    use async_trait::async_trait;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    // Local test utility
    fn write_test_notebook(path: &Path, source: &str) {
        let raw = json!({
            "nbformat": 4,
            "nbformat_minor": 5,
            "metadata": {},
            "cells": [
                {
                    "cell_type": "code",
                    "execution_count": null,
                    "metadata": {},
                    "outputs": [],
                    "source": [source]
                }
            ]
        });
        fs::write(path, serde_json::to_string(&raw).unwrap()).unwrap();
    }

    /// ソースに `crash` を含むセルでパニックする実行エンジン（テスト用）
    struct PanickingExecutor;

    #[async_trait]
    impl ExecutionBackend for PanickingExecutor {
        async fn execute_notebook(
            &self,
            document: NotebookDocument,
        ) -> ExecutionResult<NotebookDocument> {
            if document
                .cells
                .iter()
                .any(|cell| cell.source_text().contains("crash"))
            {
                panic!("kernel process crashed");
            }
            Ok(document)
        }

        fn backend_name(&self) -> &'static str {
            "panicking"
        }
    }

    #[test]
    fn test_batch_runner_creation() {
        let runner = BatchRunner::new(
            StubExecutor::new(),
            DefaultRunnerConfig::default(),
            ConsoleProgressReporter::quiet(),
        );

        // エンジン作成が成功すればOK
        assert_eq!(runner.config().worker_count(), num_cpus::get().max(1));
    }

    #[tokio::test]
    async fn test_run_empty() {
        let runner = BatchRunner::new(
            StubExecutor::new(),
            DefaultRunnerConfig::default(),
            ConsoleProgressReporter::quiet(),
        );

        let summary = runner.run(vec![]).await.unwrap();

        assert_eq!(summary.total_notebooks, 0);
        assert_eq!(summary.executed_notebooks, 0);
        assert_eq!(summary.error_count, 0);
        assert!(summary.is_success());
    }

    #[tokio::test]
    async fn test_run_validation_error() {
        let runner = BatchRunner::new(
            StubExecutor::new(),
            DefaultRunnerConfig::default().with_worker_count(0),
            ConsoleProgressReporter::quiet(),
        );

        let result = runner.run(vec![]).await;

        assert!(matches!(result, Err(RunError::ConfigurationError { .. })));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("ワーカー数は1以上である必要があります"));
    }

    #[tokio::test]
    async fn test_run_paths_scans_default_directory() {
        let temp_dir = TempDir::new().unwrap();
        let notebook_dir = temp_dir.path().join(DEFAULT_NOTEBOOK_DIR);
        fs::create_dir(&notebook_dir).unwrap();
        write_test_notebook(&notebook_dir.join("demo.ipynb"), "x = 1\n");

        let runner = BatchRunner::new(
            StubExecutor::new(),
            DefaultRunnerConfig::default(),
            ConsoleProgressReporter::quiet(),
        );

        let summary = runner.run_paths(&[], temp_dir.path()).await.unwrap();

        assert_eq!(summary.total_notebooks, 1);
        assert_eq!(summary.executed_notebooks, 1);
        assert_eq!(summary.error_count, 0);

        // 実行結果が書き戻されていることを確認
        let written: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(notebook_dir.join("demo.ipynb")).unwrap(),
        )
        .unwrap();
        assert_eq!(written["cells"][0]["execution_count"], json!(1));
    }

    #[tokio::test]
    async fn test_run_preserves_dispatch_order_in_outcomes() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("b_first.ipynb");
        let second = temp_dir.path().join("a_second.ipynb");
        write_test_notebook(&first, "x = 1\n");
        write_test_notebook(&second, "y = 2\n");

        let runner = BatchRunner::new(
            StubExecutor::new(),
            DefaultRunnerConfig::default(),
            ConsoleProgressReporter::quiet(),
        );

        let notebooks = vec![
            NotebookRef::new(first, temp_dir.path()),
            NotebookRef::new(second, temp_dir.path()),
        ];
        let summary = runner.run(notebooks).await.unwrap();

        // サマリーの結果は投入順（ソート順ではない）
        assert_eq!(summary.outcomes[0].notebook().display_name(), "b_first.ipynb");
        assert_eq!(summary.outcomes[1].notebook().display_name(), "a_second.ipynb");
    }

    #[tokio::test]
    async fn test_panicked_worker_still_drains_siblings() {
        let temp_dir = TempDir::new().unwrap();
        let ok_a = temp_dir.path().join("a.ipynb");
        let crashing = temp_dir.path().join("crash.ipynb");
        let ok_c = temp_dir.path().join("c.ipynb");
        write_test_notebook(&ok_a, "x = 1\n");
        write_test_notebook(&crashing, "crash()\n");
        write_test_notebook(&ok_c, "y = 2\n");

        let reporter = MemoryProgressReporter::new();
        let runner = BatchRunner::new(
            PanickingExecutor,
            DefaultRunnerConfig::default().with_worker_count(2),
            reporter.clone(),
        );

        let notebooks = vec![
            NotebookRef::new(ok_a, temp_dir.path()),
            NotebookRef::new(crashing, temp_dir.path()),
            NotebookRef::new(ok_c, temp_dir.path()),
        ];
        let result = runner.run(notebooks).await;

        // パニックしたワーカーはタスクエラーとして表面化する
        let error = result.expect_err("パニックはタスクエラーになるべき");
        assert!(matches!(error, RunError::TaskError { .. }));

        // 残りのノートブックは最後まで回収される
        let expected = vec![
            NotebookStage::Loading,
            NotebookStage::Executing,
            NotebookStage::Writing,
            NotebookStage::Finished,
        ];
        assert_eq!(reporter.stages_for("a.ipynb"), expected);
        assert_eq!(reporter.stages_for("c.ipynb"), expected);

        // 完了報告はパニック発生時でも必ず行われる
        assert_eq!(
            reporter.events().last(),
            Some(&ProgressEvent::Completed {
                executed: 2,
                errors: 1
            })
        );
    }

    #[tokio::test]
    async fn test_run_summary_records_start_time() {
        let before = chrono::Utc::now();

        let runner = BatchRunner::new(
            StubExecutor::new(),
            DefaultRunnerConfig::default(),
            ConsoleProgressReporter::quiet(),
        );
        let summary = runner.run(vec![]).await.unwrap();

        let after = chrono::Utc::now();
        assert!(summary.started_at >= before);
        assert!(summary.started_at <= after);
    }
}
