// CLI層 - コマンドライン引数の定義と一括実行コマンドの起動
// ユーザーインターフェースと実行エンジンの橋渡し

pub mod args;
pub mod commands;

// 公開API
pub use args::*;
pub use commands::*;
