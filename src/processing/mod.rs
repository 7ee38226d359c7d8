// 並列一括実行システムのモジュール
// 抽象化（traits）と具象実装を分離した構造

pub mod implementations;
pub mod runner;
pub mod traits;
pub mod worker;

// 公開API - 各機能から再エクスポート
pub use implementations::{
    ConsoleProgressReporter, DefaultRunnerConfig, MemoryProgressReporter, NoOpProgressReporter,
    ProgressEvent,
};
pub use runner::BatchRunner;
pub use traits::{NotebookStage, ProgressReporter, RunnerConfig};
pub use worker::run_single_notebook;
