// ノートブックファイルの非同期読み書き

use std::path::Path;

use anyhow::{anyhow, Context};

use crate::core::error::{RunError, RunResult};
use crate::notebook::{NotebookDocument, SUPPORTED_NBFORMAT};

/// ノートブックファイルを読み込んで解析する
pub async fn read_notebook(path: &Path) -> RunResult<NotebookDocument> {
    let display = path.display().to_string();

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RunError::load(&display, e.into()))?;

    let document: NotebookDocument =
        serde_json::from_str(&raw).map_err(|e| RunError::load(&display, e.into()))?;

    if document.nbformat != SUPPORTED_NBFORMAT {
        return Err(RunError::load(
            &display,
            anyhow!("未対応のnbformatバージョン: {}", document.nbformat),
        ));
    }

    Ok(document)
}

/// 実行結果を同じパスへ書き戻す
///
/// 一時ファイルへ書き込んでからリネームすることで、
/// 書き込み途中の不完全なノートブックが観測されないようにします。
pub async fn write_notebook(path: &Path, document: &NotebookDocument) -> RunResult<()> {
    let display = path.display().to_string();

    let json =
        serde_json::to_string_pretty(document).map_err(|e| RunError::write(&display, e.into()))?;

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        use std::io::Write;

        let parent = target
            .parent()
            .ok_or_else(|| anyhow!("親ディレクトリを特定できません: {}", target.display()))?;

        let mut temp =
            tempfile::NamedTempFile::new_in(parent).context("一時ファイルの作成に失敗")?;
        temp.write_all(json.as_bytes())
            .context("一時ファイルへの書き込みに失敗")?;
        temp.write_all(b"\n")
            .context("一時ファイルへの書き込みに失敗")?;
        temp.persist(&target)
            .map_err(|e| anyhow::Error::new(e.error).context("ノートブックの置き換えに失敗"))?;

        Ok(())
    })
    .await
    .map_err(RunError::task)?
    .map_err(|e| RunError::write(&display, e))?;

    Ok(())
}
