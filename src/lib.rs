pub mod cli;
pub mod core;
pub mod executor;
pub mod notebook;
pub mod notebook_scanner;
pub mod processing;

// 公開API - 利用側が個別モジュールを辿らずに済むよう主要型を再エクスポート
pub use crate::core::{
    ErrorSeverity, NotebookOutcome, NotebookRef, RunError, RunResult, RunSummary,
};
pub use crate::executor::nbconvert::NbconvertExecutor;
pub use crate::executor::stub::StubExecutor;
pub use crate::executor::{ExecutionBackend, ExecutionError};
pub use crate::notebook::{Cell, NotebookDocument};
pub use crate::notebook_scanner::{discover_notebooks, NotebookScanner, DEFAULT_NOTEBOOK_DIR};
pub use crate::processing::{
    BatchRunner, ConsoleProgressReporter, DefaultRunnerConfig, MemoryProgressReporter,
    NoOpProgressReporter, NotebookStage, ProgressEvent, ProgressReporter, RunnerConfig,
};
