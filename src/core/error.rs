// Custom error types for notebook batch execution
// ノートブック一括実行専用のカスタムエラー型定義

use thiserror::Error;

/// ノートブック一括実行固有のエラー型
#[derive(Error, Debug)]
pub enum RunError {
    #[error("読み込みエラー: {path} - {source}")]
    LoadError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("実行エラー: {path} - {source}")]
    ExecutionError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("タイムアウトエラー: {path} - {timeout_secs}秒を超過")]
    TimeoutError { path: String, timeout_secs: u64 },

    #[error("書き込みエラー: {path} - {source}")]
    WriteError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("ノートブック探索エラー: {path} - {source}")]
    DiscoveryError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl RunError {
    /// 読み込みエラーの作成
    pub fn load(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::LoadError {
            path: path.into(),
            source,
        }
    }

    /// 実行エラーの作成
    pub fn execution(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ExecutionError {
            path: path.into(),
            source,
        }
    }

    /// タイムアウトエラーの作成
    pub fn timeout(path: impl Into<String>, timeout_secs: u64) -> Self {
        Self::TimeoutError {
            path: path.into(),
            timeout_secs,
        }
    }

    /// 書き込みエラーの作成
    pub fn write(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// ノートブック探索エラーの作成
    pub fn discovery(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::DiscoveryError {
            path: path.into(),
            source,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// エラーに関連するノートブックのパスを取得
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::LoadError { path, .. }
            | Self::ExecutionError { path, .. }
            | Self::TimeoutError { path, .. }
            | Self::WriteError { path, .. }
            | Self::DiscoveryError { path, .. } => Some(path),
            Self::ConfigurationError { .. }
            | Self::TaskError { .. }
            | Self::InternalError { .. } => None,
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LoadError { .. }
            | Self::ExecutionError { .. }
            | Self::TimeoutError { .. }
            | Self::DiscoveryError { .. } => ErrorSeverity::Medium,
            Self::WriteError { .. } | Self::TaskError { .. } => ErrorSeverity::High,
            Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// 回復可能なエラーは該当ノートブックのみ失敗とし、他のノートブックの実行は継続します。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::LoadError { .. } => true,
            Self::ExecutionError { .. } => true,
            Self::TimeoutError { .. } => true,
            Self::WriteError { .. } => true,
            Self::DiscoveryError { .. } => false,
            Self::ConfigurationError { .. } => false,
            Self::TaskError { .. } => false,
            Self::InternalError { .. } => false,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - システム停止レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の数値表現を取得
    pub const fn as_level(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// 一括実行の結果型
pub type RunResult<T> = std::result::Result<T, RunError>;

// From実装を個別に追加
impl From<anyhow::Error> for RunError {
    fn from(error: anyhow::Error) -> Self {
        RunError::InternalError { source: error }
    }
}

impl From<tokio::task::JoinError> for RunError {
    fn from(error: tokio::task::JoinError) -> Self {
        RunError::TaskError { source: error }
    }
}
