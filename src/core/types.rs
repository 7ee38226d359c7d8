// 実行対象と実行結果に関連するデータ型定義

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::error::RunError;

/// 実行対象のノートブックへの参照
///
/// 実体への絶対パスと、進捗表示に使用するルート相対の表示名を保持します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookRef {
    absolute_path: PathBuf,
    display_name: String,
}

impl NotebookRef {
    /// ルートからの相対表示名を計算して参照を作成
    ///
    /// パスがルート配下にない場合は絶対パスをそのまま表示名とします。
    pub fn new(absolute_path: PathBuf, root: &Path) -> Self {
        let display_name = absolute_path
            .strip_prefix(root)
            .unwrap_or(&absolute_path)
            .display()
            .to_string();
        Self {
            absolute_path,
            display_name,
        }
    }

    /// 実体への絶対パス
    pub fn path(&self) -> &Path {
        &self.absolute_path
    }

    /// 進捗表示用の表示名
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// 個別ノートブック実行の結果
#[derive(Debug)]
pub enum NotebookOutcome {
    Success {
        notebook: NotebookRef,
        code_cells: usize,
        duration_ms: u64,
    },
    Error {
        notebook: NotebookRef,
        error: RunError,
    },
}

impl NotebookOutcome {
    /// 結果が成功かどうか
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// 結果に対応するノートブック参照
    pub fn notebook(&self) -> &NotebookRef {
        match self {
            Self::Success { notebook, .. } | Self::Error { notebook, .. } => notebook,
        }
    }
}

/// 一括実行全体のサマリー
#[derive(Debug)]
pub struct RunSummary {
    pub total_notebooks: usize,
    pub executed_notebooks: usize,
    pub error_count: usize,
    pub total_duration_ms: u64,
    pub average_time_per_notebook_ms: f64,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<NotebookOutcome>,
}

impl RunSummary {
    /// 実行対象が1件もなかった場合の空サマリーを作成
    pub fn empty() -> Self {
        Self {
            total_notebooks: 0,
            executed_notebooks: 0,
            error_count: 0,
            total_duration_ms: 0,
            average_time_per_notebook_ms: 0.0,
            started_at: Utc::now(),
            outcomes: Vec::new(),
        }
    }

    /// 全ノートブックが成功したかどうか
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }

    /// 失敗したノートブックとそのエラーを列挙
    pub fn failures(&self) -> impl Iterator<Item = (&NotebookRef, &RunError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            NotebookOutcome::Error { notebook, error } => Some((notebook, error)),
            NotebookOutcome::Success { .. } => None,
        })
    }
}
