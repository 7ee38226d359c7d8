use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{RunError, RunResult};
use crate::core::types::NotebookRef;

/// 引数省略時に探索するルート直下のディレクトリ名
pub const DEFAULT_NOTEBOOK_DIR: &str = "examples";

pub struct NotebookScanner;

impl NotebookScanner {
    pub fn scan_directory(directory: &Path) -> Result<Vec<PathBuf>> {
        // 探索対象ディレクトリが存在しない場合は空の結果を返す
        if !directory.exists() {
            return Ok(Vec::new());
        }

        let mut file_paths = Vec::new();

        for entry in WalkDir::new(directory) {
            let entry = entry?;

            if entry.file_type().is_file() {
                if let Some(extension) = entry.path().extension() {
                    let ext = extension.to_string_lossy().to_lowercase();
                    if Self::is_notebook_extension(&ext) {
                        file_paths.push(entry.path().to_path_buf());
                    }
                }
            }
        }

        // 実行順を決定的にするためにソート
        file_paths.sort();

        Ok(file_paths)
    }

    fn is_notebook_extension(extension: &str) -> bool {
        matches!(extension, "ipynb")
    }
}

/// 実行対象ノートブックの一覧を決定する
///
/// パスが明示的に指定された場合はそれらを絶対パス化して指定順のまま返します。
/// この時点では存在チェックを行わず、実在しないパスは実行時の読み込みエラーとして
/// 報告されます。パスが指定されなかった場合はルート直下の既定ディレクトリを
/// 再帰的に探索します。
pub fn discover_notebooks(paths: &[PathBuf], root: &Path) -> RunResult<Vec<NotebookRef>> {
    if !paths.is_empty() {
        let mut notebooks = Vec::with_capacity(paths.len());
        for path in paths {
            let absolute = std::path::absolute(path)
                .map_err(|e| RunError::discovery(path.display().to_string(), e.into()))?;
            notebooks.push(NotebookRef::new(absolute, root));
        }
        return Ok(notebooks);
    }

    let default_dir = root.join(DEFAULT_NOTEBOOK_DIR);
    let scanned = NotebookScanner::scan_directory(&default_dir)
        .map_err(|e| RunError::discovery(default_dir.display().to_string(), e))?;

    Ok(scanned
        .into_iter()
        .map(|path| NotebookRef::new(path, root))
        .collect())
}
