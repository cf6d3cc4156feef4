use crate::error::{InspectionError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_ENV: &str = "INSPECTION_VISUALS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// システム識別子を受け取る TCP アドレス
    pub listen_addr: String,
    /// 検査結果JSONの置き場所
    pub result_dir: PathBuf,
    /// ライブ画像の置き場所（未設定なら result_dir）
    pub live_image_dir: Option<PathBuf>,
    pub static_shapes_file: PathBuf,
    pub live_shapes_file: PathBuf,
    /// 静止画（画像番号 1, 2, 3）
    pub reference_images: Vec<PathBuf>,
    pub fallback_image: PathBuf,
    pub frame_rate: u32,
    /// 不合格詳細を切り替えるフレーム間隔
    pub rotate_every_frames: u64,
    pub reference_scale: f32,
    pub live_image_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:12345".into(),
            result_dir: PathBuf::from("."),
            live_image_dir: None,
            static_shapes_file: PathBuf::from("ShapeData.json"),
            live_shapes_file: PathBuf::from("LiveImageShapes.json"),
            reference_images: vec![PathBuf::from("IP_Image_1.png"); 3],
            fallback_image: PathBuf::from("doge_wink.JPG"),
            frame_rate: 60,
            rotate_every_frames: 190,
            reference_scale: 0.8,
            live_image_scale: 0.1,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（存在しなければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| InspectionError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("inspection-visuals").join("config.json"))
    }

    pub fn live_image_dir(&self) -> &Path {
        self.live_image_dir.as_deref().unwrap_or(&self.result_dir)
    }

    /// 1フレームの間隔
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    /// 画像番号 (0始まりスロット) の静止画
    pub fn reference_image(&self, slot: usize) -> Option<&Path> {
        self.reference_images.get(slot).map(PathBuf::as_path)
    }

    fn validate(&self) -> Result<()> {
        if self.reference_scale <= 0.0 || self.live_image_scale <= 0.0 {
            return Err(InspectionError::Config("表示倍率は正の値にしてください".into()));
        }
        if self.rotate_every_frames == 0 {
            return Err(InspectionError::Config("rotate_every_frames は1以上にしてください".into()));
        }
        Ok(())
    }
}
