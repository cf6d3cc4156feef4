use crate::error::{InspectionError, Result};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFileInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// 作成日時（取得できない環境では更新日時）
    pub created: SystemTime,
}

const RESULT_EXTENSIONS: &[&str] = &["json", "JSON"];

/// 結果フォルダ直下から、パスにシステム識別子を含むJSONを列挙する
///
/// 作成日時の昇順（同時刻はパス順）で返す。
pub fn scan_result_files(folder: &Path, system: &str) -> Result<Vec<ResultFileInfo>> {
    if !folder.is_dir() {
        return Err(InspectionError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_result_extension(path) {
            continue;
        }

        if !path.to_string_lossy().contains(system) {
            continue;
        }

        let created = entry
            .metadata()
            .map(|meta| meta.created().or_else(|_| meta.modified()).unwrap_or(UNIX_EPOCH))
            .unwrap_or(UNIX_EPOCH);

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        files.push(ResultFileInfo {
            path: path.to_path_buf(),
            file_name,
            created,
        });
    }

    files.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.path.cmp(&b.path)));

    Ok(files)
}

/// 最も新しく作成された結果ファイル
pub fn latest_result_file(folder: &Path, system: &str) -> Result<Option<ResultFileInfo>> {
    Ok(scan_result_files(folder, system)?.pop())
}

fn is_result_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| RESULT_EXTENSIONS.iter().any(|&e| e == ext.to_string_lossy()))
        .unwrap_or(false)
}
