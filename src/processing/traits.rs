// 一括実行システムのトレイト定義
// 全ての抽象化インターフェースを定義

use async_trait::async_trait;
use std::time::Duration;

use crate::core::types::NotebookRef;

/// ノートブック実行のステージ
///
/// 1つのノートブックはこの定義順でステージを通過します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotebookStage {
    Loading,
    Executing,
    Writing,
    Finished,
}

impl NotebookStage {
    /// 進捗表示用の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "Loading notebook",
            Self::Executing => "Executing",
            Self::Writing => "Writing",
            Self::Finished => "Finished",
        }
    }
}

impl std::fmt::Display for NotebookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一括実行の設定を抽象化するトレイト
pub trait RunnerConfig: Send + Sync {
    /// 最大同時実行ワーカー数を取得
    fn worker_count(&self) -> usize;

    /// ノートブック1冊あたりの実行タイムアウトを取得
    fn execution_timeout(&self) -> Duration;

    /// 使用するカーネル名を取得
    fn kernel_name(&self) -> &str;

    /// セル実行タイミングを記録するかどうか
    fn record_timing(&self) -> bool;
}

/// 進捗報告の抽象化トレイト
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 実行開始時の報告
    async fn report_started(&self, total_notebooks: usize);

    /// ステージ遷移の報告
    async fn report_stage(&self, notebook: &NotebookRef, stage: NotebookStage);

    /// エラー発生時の報告
    async fn report_error(&self, notebook: &NotebookRef, error: &str);

    /// 実行完了時の報告
    async fn report_completed(&self, executed: usize, errors: usize);
}
