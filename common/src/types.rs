//! 検査結果ファイルの型定義
//!
//! 検査装置が出力する結果JSON:
//! - ResultFile: ファイル全体（カメラ単位の配列）
//! - CameraResult: カメラ毎の検査結果と画像の保存先
//! - Inspection: 1検査項目（パラメータ・判定・名称）

use crate::shape::ShapeColor;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 結果ファイル全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultFile {
    pub cameras: Vec<CameraResult>,
}

/// カメラ単位の検査結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CameraResult {
    pub inspections: Vec<Inspection>,
    pub image_locations: Vec<ImageLocation>,
}

/// 1検査項目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Inspection {
    pub result_parameters: Vec<ResultParameter>,
    pub result: ResultCode,
    pub name: String,
}

/// 結果パラメータ `[key, value]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultParameter(pub String, pub String);

/// 画像の保存先
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageLocation {
    pub storage_type: String,
    pub image_type: String,
    pub file_name: String,
}

/// 判定コード
///
/// 大文字・小文字の区別はそのまま別バリアントとして保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultCode {
    /// `P`
    Pass,
    /// `F`
    Fail,
    /// `p`
    PassLower,
    /// `f`
    FailLower,
    Other(String),
}

const LIVE_IMAGE_STORAGE: &str = "ID";
const LIVE_IMAGE_TYPE: &str = "Png";

/// 合成キーを生成
///
/// 各パラメータの値を宣言順に半角スペースで連結する。
pub fn composite_key(parameters: &[ResultParameter]) -> String {
    parameters
        .iter()
        .map(|p| p.value())
        .collect::<Vec<_>>()
        .join(" ")
}

impl ResultFile {
    /// JSONファイルから読み込み
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 全カメラの検査項目数
    pub fn inspection_count(&self) -> usize {
        self.cameras.iter().map(|c| c.inspections.len()).sum()
    }
}

impl CameraResult {
    /// ライブ画像のファイル名（StorageType=ID, ImageType=Png の最初のエントリ）
    pub fn live_image(&self) -> Option<&str> {
        self.image_locations
            .iter()
            .find(|loc| loc.storage_type == LIVE_IMAGE_STORAGE && loc.image_type == LIVE_IMAGE_TYPE)
            .map(|loc| loc.file_name.as_str())
    }
}

impl Inspection {
    pub fn composite_key(&self) -> String {
        composite_key(&self.result_parameters)
    }

    pub fn parameter_keys(&self) -> Vec<String> {
        self.result_parameters.iter().map(|p| p.0.clone()).collect()
    }

    pub fn parameter_values(&self) -> Vec<String> {
        self.result_parameters.iter().map(|p| p.1.clone()).collect()
    }
}

impl ResultParameter {
    pub fn key(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

impl ResultCode {
    /// 表示色（未知のコードは赤）
    pub fn color(&self) -> ShapeColor {
        match self {
            ResultCode::Pass => ShapeColor::Green,
            ResultCode::Fail => ShapeColor::Red,
            ResultCode::PassLower => ShapeColor::Yellow,
            ResultCode::FailLower => ShapeColor::Cyan,
            ResultCode::Other(_) => ShapeColor::Red,
        }
    }

    /// 不合格詳細パネルの対象になるか（`F` のみ）
    pub fn is_failure(&self) -> bool {
        matches!(self, ResultCode::Fail)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResultCode::Pass => "P",
            ResultCode::Fail => "F",
            ResultCode::PassLower => "p",
            ResultCode::FailLower => "f",
            ResultCode::Other(code) => code.as_str(),
        }
    }
}

impl From<String> for ResultCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "P" => ResultCode::Pass,
            "F" => ResultCode::Fail,
            "p" => ResultCode::PassLower,
            "f" => ResultCode::FailLower,
            _ => ResultCode::Other(code),
        }
    }
}

impl From<ResultCode> for String {
    fn from(code: ResultCode) -> Self {
        code.as_str().to_string()
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
