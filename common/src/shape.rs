//! 形状テンプレート
//!
//! 静止画用 (`ShapeData.json`) とライブ画像用 (`LiveImageShapes.json`) の
//! 2種類のテンプレートファイルを同じ型で扱う。

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub const DEFAULT_LINE_WIDTH: u32 = 5;

/// 形状の種類 (0 = 楕円, 1 = 矩形)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ShapeKind {
    Ellipse,
    Rectangle,
}

/// 形状の色（パレット番号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ShapeColor {
    Green,
    #[default]
    Red,
    Yellow,
    Cyan,
    Orange,
}

/// 形状テンプレート1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTemplate {
    /// ラベルに表示する名前
    pub name: String,
    pub shape: ShapeKind,
    #[serde(default)]
    pub color: ShapeColor,
    /// ラベル表示有無（旧データは 0/1 の整数）
    #[serde(default, deserialize_with = "bool_or_int")]
    pub display_name: bool,
    /// 中心座標
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub width: f64,
    /// 結果パラメータの合成キー
    pub key: String,
    /// 対象画像の番号
    pub image: String,
    #[serde(default = "default_line_width")]
    pub line_width: u32,
}

/// テンプレートファイル `{"Shapes": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeTemplateStore {
    #[serde(rename = "Shapes")]
    pub shapes: Vec<ShapeTemplate>,
}

fn default_line_width() -> u32 {
    DEFAULT_LINE_WIDTH
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrInt {
    Bool(bool),
    Int(i64),
}

fn bool_or_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(value) => value,
        BoolOrInt::Int(value) => value != 0,
    })
}

impl TryFrom<i64> for ShapeKind {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(ShapeKind::Ellipse),
            1 => Ok(ShapeKind::Rectangle),
            other => Err(Error::InvalidShape(format!("unknown shape kind {other} (0 = ellipse, 1 = rectangle)"))),
        }
    }
}

impl From<ShapeKind> for i64 {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Ellipse => 0,
            ShapeKind::Rectangle => 1,
        }
    }
}

impl From<i64> for ShapeColor {
    fn from(value: i64) -> Self {
        match value {
            0 => ShapeColor::Green,
            2 => ShapeColor::Yellow,
            3 => ShapeColor::Cyan,
            4 => ShapeColor::Orange,
            _ => ShapeColor::Red,
        }
    }
}

impl From<ShapeColor> for i64 {
    fn from(color: ShapeColor) -> Self {
        match color {
            ShapeColor::Green => 0,
            ShapeColor::Red => 1,
            ShapeColor::Yellow => 2,
            ShapeColor::Cyan => 3,
            ShapeColor::Orange => 4,
        }
    }
}

impl ShapeColor {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ShapeColor::Green => [0, 255, 0],
            ShapeColor::Red => [255, 0, 0],
            ShapeColor::Yellow => [255, 240, 31],
            ShapeColor::Cyan => [0, 255, 255],
            ShapeColor::Orange => [255, 165, 0],
        }
    }
}

impl ShapeTemplateStore {
    /// JSONファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let store = serde_json::from_reader(BufReader::new(file))?;
        Ok(store)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSONファイルへ保存
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// ファイル末尾にテンプレートを追加して保存
    ///
    /// ファイルが無ければ空のストアから作成する。追加後の件数を返す。
    pub fn append(path: &Path, template: ShapeTemplate) -> Result<usize> {
        let mut store = if path.exists() { Self::load(path)? } else { Self::default() };
        store.shapes.push(template);
        store.save(path)?;
        Ok(store.shapes.len())
    }

    /// キーが一致するテンプレートを全て返す（定義順）
    pub fn matching<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ShapeTemplate> + 'a {
        self.shapes.iter().filter(move |s| s.key == key)
    }

    /// キーが一致する最初のテンプレート
    pub fn find(&self, key: &str) -> Option<&ShapeTemplate> {
        self.shapes.iter().find(|s| s.key == key)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
