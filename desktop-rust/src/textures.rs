use anyhow::{Context, Result};
use eframe::egui;
use image::ImageReader;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::warn;

/// 画像ファイルを egui 用に読み込む
pub fn load_color_image(path: &Path) -> Result<egui::ColorImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.to_rgba8().into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

/// パス毎のテクスチャキャッシュ
///
/// 読み込みに失敗したパスは覚えておき、毎フレーム再試行しない。
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<PathBuf, egui::TextureHandle>,
    failed: HashSet<PathBuf>,
}

impl TextureCache {
    pub fn get_or_load(&mut self, ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
        if let Some(texture) = self.textures.get(path) {
            return Some(texture.clone());
        }
        if self.failed.contains(path) {
            return None;
        }

        match load_color_image(path) {
            Ok(color_image) => {
                let texture = ctx.load_texture(path.display().to_string(), color_image, egui::TextureOptions::default());
                self.textures.insert(path.to_path_buf(), texture.clone());
                Some(texture)
            }
            Err(err) => {
                warn!("image load failed: {err:#}");
                self.failed.insert(path.to_path_buf());
                None
            }
        }
    }

    /// 1件だけ破棄し、次回 `get_or_load` で読み直させる
    pub fn forget(&mut self, path: &Path) {
        self.textures.remove(path);
        self.failed.remove(path);
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.failed.clear();
    }
}
