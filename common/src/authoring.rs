//! 形状設定ツールの入力フォーム
//!
//! 入力欄は全て文字列で保持し、生成・保存時にだけ数値へ変換する。

use crate::error::{Error, Result};
use crate::overlay::reference_slot;
use crate::shape::{ShapeColor, ShapeKind, ShapeTemplate, DEFAULT_LINE_WIDTH};

/// 入力フォームの内容
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeForm {
    pub scale: String,
    pub key: String,
    pub image: String,
    pub height: String,
    pub width: String,
    pub shape: String,
    pub name: String,
    pub live_image: String,
}

/// 表示する画像の選択結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// 静止画スロット (0..3)
    Reference(usize),
    /// ライブ画像のファイル名
    Live(String),
    Fallback,
}

const LIVE_IMAGE_ID: &str = "4";

impl Default for ShapeForm {
    fn default() -> Self {
        Self {
            scale: "1".into(),
            key: String::new(),
            image: "1".into(),
            height: "100".into(),
            width: "100".into(),
            shape: "0".into(),
            name: "shape_test".into(),
            live_image: String::new(),
        }
    }
}

impl ShapeForm {
    /// 画像番号から表示画像を決める
    pub fn image_source(&self) -> ImageSource {
        if let Some(slot) = reference_slot(&self.image) {
            return ImageSource::Reference(slot);
        }
        if self.image.trim() == LIVE_IMAGE_ID && !self.live_image.trim().is_empty() {
            return ImageSource::Live(self.live_image.trim().to_string());
        }
        ImageSource::Fallback
    }

    pub fn scale_value(&self) -> Result<f64> {
        let scale = parse_number("scale", &self.scale)?;
        if scale <= 0.0 {
            return Err(Error::InvalidShape(format!("scale must be positive: {}", self.scale)));
        }
        Ok(scale)
    }

    /// 画面上のプレビュー形状（中心 `x`, `y` は画像左上からの相対座標）
    ///
    /// プレビューは常に赤・ラベル表示。
    pub fn preview(&self, x: f64, y: f64) -> Result<ShapeTemplate> {
        let shape = parse_number("shape", &self.shape)?;
        if shape.fract() != 0.0 {
            return Err(Error::InvalidShape(format!("shape must be 0 or 1: {}", self.shape)));
        }
        Ok(ShapeTemplate {
            name: self.name.clone(),
            shape: ShapeKind::try_from(shape as i64)?,
            color: ShapeColor::Red,
            display_name: true,
            x,
            y,
            height: parse_number("height", &self.height)?,
            width: parse_number("width", &self.width)?,
            key: self.key.clone(),
            image: self.image.clone(),
            line_width: DEFAULT_LINE_WIDTH,
        })
    }

    /// 保存用テンプレート（画面倍率を元画像の座標系へ戻す）
    pub fn to_template(&self, x: f64, y: f64) -> Result<ShapeTemplate> {
        let scale = self.scale_value()?;
        Ok(unscale(&self.preview(x, y)?, scale))
    }
}

/// 表示倍率で割って元画像座標へ戻す
pub fn unscale(template: &ShapeTemplate, scale: f64) -> ShapeTemplate {
    ShapeTemplate {
        x: template.x / scale,
        y: template.y / scale,
        height: template.height / scale,
        width: template.width / scale,
        ..template.clone()
    }
}

fn parse_number(field: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidShape(format!("{field}: '{text}' is not a number")))
}
