// テストユーティリティ
// ノートブックJSONの生成と書き込みヘルパー

// テストバイナリごとに個別コンパイルされるため、バイナリによっては未使用になる
#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// 指定ソースのコードセルのみからなるノートブックJSONを生成
pub fn notebook_json(sources: &[&str]) -> Value {
    let cells: Vec<Value> = sources
        .iter()
        .map(|source| {
            json!({
                "cell_type": "code",
                "execution_count": null,
                "metadata": {},
                "outputs": [],
                "source": [source]
            })
        })
        .collect();

    json!({
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {
            "kernelspec": {
                "display_name": "Python 3",
                "language": "python",
                "name": "python3"
            }
        },
        "cells": cells
    })
}

/// markdownセルとコードセルが混在するノートブックJSONを生成
pub fn mixed_notebook_json() -> Value {
    json!({
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {
            "kernelspec": {"name": "python3"}
        },
        "cells": [
            {
                "cell_type": "markdown",
                "metadata": {},
                "source": ["# サンプルノートブック"]
            },
            {
                "cell_type": "code",
                "execution_count": null,
                "metadata": {},
                "outputs": [],
                "source": ["print('hello')\n"]
            }
        ]
    })
}

/// セルを持たないノートブックJSONを生成
pub fn empty_notebook_json() -> Value {
    json!({
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {},
        "cells": []
    })
}

/// ノートブックJSONをファイルへ書き込み、そのパスを返す
pub fn write_notebook_file(dir: &Path, name: &str, notebook: &Value) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, serde_json::to_string_pretty(notebook).unwrap()).unwrap();
    path
}
