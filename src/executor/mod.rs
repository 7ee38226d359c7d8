// ノートブック実行エンジンの抽象化レイヤー

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::notebook::NotebookDocument;

pub mod nbconvert;
pub mod stub;

/// 実行エンジン固有のエラー型
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// エンジンプロセスの起動に失敗
    #[error("実行エンジンの起動に失敗: {source}")]
    EngineStartup {
        #[source]
        source: anyhow::Error,
    },

    /// セル実行の失敗（例外発生・カーネル異常終了など）
    #[error("セル実行に失敗: {detail}")]
    CellFailed { detail: String },

    /// エンジン内部の予期しないエラー
    #[error("実行エンジン内部エラー: {source}")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl ExecutionError {
    /// 起動エラーの作成
    pub fn engine_startup(source: anyhow::Error) -> Self {
        Self::EngineStartup { source }
    }

    /// セル実行エラーの作成
    pub fn cell_failed(detail: impl Into<String>) -> Self {
        Self::CellFailed {
            detail: detail.into(),
        }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::Internal { source }
    }
}

/// 実行エンジンの結果型
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// ノートブック実行エンジンのトレイト
#[automock]
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// ノートブックの全セルを先頭から順に実行し、出力を埋め込んだドキュメントを返す
    ///
    /// 返されるドキュメントでは各コードセルの outputs と execution_count が
    /// 実行結果で更新されています。
    async fn execute_notebook(
        &self,
        document: NotebookDocument,
    ) -> ExecutionResult<NotebookDocument>;

    /// エンジン名（ログ表示用）
    fn backend_name(&self) -> &'static str;
}

// ExecutionBackend for Box<dyn ExecutionBackend>
#[async_trait]
impl ExecutionBackend for Box<dyn ExecutionBackend> {
    async fn execute_notebook(
        &self,
        document: NotebookDocument,
    ) -> ExecutionResult<NotebookDocument> {
        self.as_ref().execute_notebook(document).await
    }

    fn backend_name(&self) -> &'static str {
        self.as_ref().backend_name()
    }
}
