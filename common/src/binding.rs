//! 検査結果と形状テンプレートの結合
//!
//! 結果ファイル・静止画テンプレート・ライブ画像テンプレートの3つを
//! 合成キーで突き合わせ、描画する形状と不合格詳細を組み立てる。

use crate::shape::{ShapeColor, ShapeTemplate, ShapeTemplateStore};
use crate::types::ResultFile;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 静止画に重ねる形状（テンプレート + 判定色）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeToDraw {
    pub template: ShapeTemplate,
    pub color: ShapeColor,
}

/// 不合格となった検査項目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedInspection {
    pub keys: Vec<String>,
    pub values: Vec<String>,
    pub inspection_name: String,
    /// ライブ画像のパス
    pub image_file: PathBuf,
    /// ライブ画像テンプレート
    pub shape_to_draw: ShapeTemplate,
}

/// 結合結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InspectionBinding {
    pub shapes_to_draw: Vec<ShapeToDraw>,
    pub failed_inspections: Vec<FailedInspection>,
    /// 静止画テンプレートに一致しなかった合成キー（検査順）
    pub unmatched_keys: Vec<String>,
}

impl ShapeToDraw {
    pub fn new(template: ShapeTemplate, color: ShapeColor) -> Self {
        Self { template, color }
    }
}

impl FailedInspection {
    /// テーブル表示用の `(key, value)` 行
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// パネルのヘッダ文字列
    pub fn header(&self) -> String {
        format!("{} result parameters:", self.inspection_name)
    }

    /// ライブ画像上の形状（常に赤）
    pub fn live_shape(&self) -> ShapeToDraw {
        ShapeToDraw::new(self.shape_to_draw.clone(), ShapeColor::Red)
    }
}

impl InspectionBinding {
    pub fn unmatched_count(&self) -> usize {
        self.unmatched_keys.len()
    }
}

/// 結果ファイルとテンプレートを合成キーで結合
///
/// - 静止画テンプレートは一致する全件を描画対象にする
/// - `F` 判定はライブ画像があれば、一致するライブテンプレート毎に不合格詳細になる
/// - どちらにも一致しない検査は何も出力しない
pub fn bind_results(
    result: &ResultFile,
    static_shapes: &ShapeTemplateStore,
    live_shapes: &ShapeTemplateStore,
    live_image_dir: &Path,
) -> InspectionBinding {
    let mut binding = InspectionBinding::default();

    for camera in &result.cameras {
        for inspection in &camera.inspections {
            let key = inspection.composite_key();

            if inspection.result.is_failure() {
                if let Some(image) = camera.live_image() {
                    let image_file = live_image_dir.join(image);
                    binding.failed_inspections.extend(live_shapes.matching(&key).map(|shape| FailedInspection {
                        keys: inspection.parameter_keys(),
                        values: inspection.parameter_values(),
                        inspection_name: inspection.name.clone(),
                        image_file: image_file.clone(),
                        shape_to_draw: shape.clone(),
                    }));
                }
            }

            let color = inspection.result.color();
            let before = binding.shapes_to_draw.len();
            binding.shapes_to_draw.extend(
                static_shapes
                    .matching(&key)
                    .map(|template| ShapeToDraw::new(template.clone(), color)),
            );

            if binding.shapes_to_draw.len() == before {
                debug!(key = %key, inspection = %inspection.name, "no static shape for key");
                binding.unmatched_keys.push(key);
            }
        }
    }

    binding
}
