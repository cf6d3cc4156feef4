//! 検査結果の読み込み
//!
//! 結果ファイルと2つのテンプレートファイルを読み込み、共通ライブラリの
//! `bind_results` で結合する。

use crate::config::Config;
use crate::error::{InspectionError, Result};
use inspection_common::{bind_results, InspectionBinding, ResultFile, ShapeTemplateStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// 読み込み対象のテンプレート・画像の場所
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub static_shapes: PathBuf,
    pub live_shapes: PathBuf,
    pub live_image_dir: PathBuf,
}

impl TemplatePaths {
    pub fn from_config(config: &Config) -> Self {
        Self {
            static_shapes: config.static_shapes_file.clone(),
            live_shapes: config.live_shapes_file.clone(),
            live_image_dir: config.live_image_dir().to_path_buf(),
        }
    }
}

/// 結果ファイルを読み込み、描画形状と不合格詳細を返す
pub fn load_inspection(result_path: &Path, paths: &TemplatePaths) -> Result<InspectionBinding> {
    let result = ResultFile::from_path(&require_file(result_path)?)?;
    let static_shapes = ShapeTemplateStore::load(&require_file(&paths.static_shapes)?)?;
    let live_shapes = ShapeTemplateStore::load(&require_file(&paths.live_shapes)?)?;

    let binding = bind_results(&result, &static_shapes, &live_shapes, &paths.live_image_dir);

    info!(
        file = %result_path.display(),
        inspections = result.inspection_count(),
        shapes = binding.shapes_to_draw.len(),
        failed = binding.failed_inspections.len(),
        unmatched = binding.unmatched_count(),
        "inspection results loaded"
    );

    Ok(binding)
}

fn require_file(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(InspectionError::FileNotFound(path.display().to_string()));
    }
    Ok(path.to_path_buf())
}
