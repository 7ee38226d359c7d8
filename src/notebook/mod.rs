// ノートブックドキュメントのデータモデル定義 (nbformat v4)

pub mod io;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// サポートするnbformatのメジャーバージョン
pub const SUPPORTED_NBFORMAT: u64 = 4;

/// ノートブック全体のドキュメント
///
/// 実行に関与するフィールドのみを型付けし、それ以外は flatten した
/// マップに保持することで、書き込み時に未知のフィールドも完全に復元します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookDocument {
    pub nbformat: u64,
    pub nbformat_minor: u64,
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NotebookDocument {
    /// コードセルの数を取得
    pub fn code_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_code()).count()
    }

    /// 実行エンジンが記録したセル単位のタイミング情報を除去する
    pub fn strip_timing_metadata(&mut self) {
        for cell in &mut self.cells {
            cell.metadata.remove("execution");
        }
    }
}

/// ノートブック内の単一セル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// markdownセルには outputs キー自体が存在しないため Option で保持
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Value>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Cell {
    /// コードセルかどうか
    pub fn is_code(&self) -> bool {
        self.cell_type == "code"
    }

    /// セルのソースを1つの文字列として取得
    ///
    /// nbformatは source を文字列と行配列のどちらでも許容します。
    pub fn source_text(&self) -> String {
        match self.rest.get("source") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Array(lines)) => lines
                .iter()
                .filter_map(|line| line.as_str())
                .collect::<String>(),
            _ => String::new(),
        }
    }
}
