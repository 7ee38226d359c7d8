// 一括実行システムの基本具象実装

use super::traits::{NotebookStage, ProgressReporter, RunnerConfig};
use crate::core::types::NotebookRef;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultRunnerConfig {
    worker_count: usize,
    execution_timeout: Duration,
    kernel_name: String,
    record_timing: bool,
}

impl DefaultRunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_execution_timeout(mut self, execution_timeout: Duration) -> Self {
        self.execution_timeout = execution_timeout;
        self
    }

    pub fn with_kernel_name(mut self, kernel_name: impl Into<String>) -> Self {
        self.kernel_name = kernel_name.into();
        self
    }

    pub fn with_record_timing(mut self, record_timing: bool) -> Self {
        self.record_timing = record_timing;
        self
    }
}

impl Default for DefaultRunnerConfig {
    fn default() -> Self {
        Self {
            // ワーカーはノートブック単位なのでCPU論理コア数に合わせる
            worker_count: num_cpus::get().max(1),
            execution_timeout: Duration::from_secs(600),
            kernel_name: "python3".to_string(),
            record_timing: false,
        }
    }
}

impl RunnerConfig for DefaultRunnerConfig {
    fn worker_count(&self) -> usize {
        self.worker_count
    }

    fn execution_timeout(&self) -> Duration {
        self.execution_timeout
    }

    fn kernel_name(&self) -> &str {
        &self.kernel_name
    }

    fn record_timing(&self) -> bool {
        self.record_timing
    }
}

/// コンソール出力による進捗報告実装
#[derive(Debug, Default)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_notebooks: usize) {
        if !self.quiet {
            println!("🚀 Starting execution of {total_notebooks} notebooks...");
        }
    }

    async fn report_stage(&self, notebook: &NotebookRef, stage: NotebookStage) {
        if !self.quiet {
            println!("{}: {stage}", notebook.display_name());
        }
    }

    async fn report_error(&self, notebook: &NotebookRef, error: &str) {
        if !self.quiet {
            eprintln!("❌ Error executing {}: {error}", notebook.display_name());
        }
    }

    async fn report_completed(&self, executed: usize, errors: usize) {
        if !self.quiet {
            println!("✅ Completed! Executed: {executed}, Errors: {errors}");
        }
    }
}

/// 何もしない進捗報告実装（ベンチマーク用）
#[derive(Debug, Default)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_notebooks: usize) {
        // 何もしない
    }

    async fn report_stage(&self, _notebook: &NotebookRef, _stage: NotebookStage) {
        // 何もしない
    }

    async fn report_error(&self, _notebook: &NotebookRef, _error: &str) {
        // 何もしない
    }

    async fn report_completed(&self, _executed: usize, _errors: usize) {
        // 何もしない
    }
}

/// 進捗イベントの記録（テスト検証用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started {
        total: usize,
    },
    Stage {
        notebook: String,
        stage: NotebookStage,
    },
    Error {
        notebook: String,
        error: String,
    },
    Completed {
        executed: usize,
        errors: usize,
    },
}

/// メモリ内にイベントを蓄積する進捗報告実装（テスト用）
#[derive(Debug, Clone)]
pub struct MemoryProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl Default for MemoryProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProgressReporter {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// テスト用：記録された全イベントを取得
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// テスト用：特定ノートブックのステージ遷移を順に取得
    pub fn stages_for(&self, notebook: &str) -> Vec<NotebookStage> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Stage {
                    notebook: name,
                    stage,
                } if name == notebook => Some(*stage),
                _ => None,
            })
            .collect()
    }

    /// テスト用：イベントクリア
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[async_trait]
impl ProgressReporter for MemoryProgressReporter {
    async fn report_started(&self, total_notebooks: usize) {
        self.events.lock().unwrap().push(ProgressEvent::Started {
            total: total_notebooks,
        });
    }

    async fn report_stage(&self, notebook: &NotebookRef, stage: NotebookStage) {
        self.events.lock().unwrap().push(ProgressEvent::Stage {
            notebook: notebook.display_name().to_string(),
            stage,
        });
    }

    async fn report_error(&self, notebook: &NotebookRef, error: &str) {
        self.events.lock().unwrap().push(ProgressEvent::Error {
            notebook: notebook.display_name().to_string(),
            error: error.to_string(),
        });
    }

    async fn report_completed(&self, executed: usize, errors: usize) {
        self.events
            .lock()
            .unwrap()
            .push(ProgressEvent::Completed { executed, errors });
    }
}
