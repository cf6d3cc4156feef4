//! 形状テンプレート設定ツール
//!
//! 左のフォームで形状を作り、画像上でドラッグして位置を決め、
//! 静止画用またはライブ画像用のテンプレートファイルに追記する。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText};
use inspection_common::overlay::{overlay_geometry_with, LabelStyle};
use inspection_common::{ImageSource, Placement, ShapeColor, ShapeForm, ShapeTemplateStore};
use inspection_visuals::config::Config;
use tracing::info;

use crate::layout;
use crate::paint::{paint_overlay, paint_texture, to_rect};
use crate::textures::TextureCache;

/// 画像の左上
const IMAGE_ORIGIN: [f32; 2] = [510.0, 35.0];
/// 画像番号ラベルの位置
const IMAGE_LABEL_POS: [f32; 2] = [420.0, 35.0];
const FORM_WIDTH: f32 = 380.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveTarget {
    Static,
    Live,
}

pub struct ShapeSetupApp {
    config: Config,
    form: ShapeForm,
    /// 最後に「生成」した内容
    applied: ShapeForm,
    /// 形状中心（画像左上からの相対座標）
    position: egui::Vec2,
    textures: TextureCache,
    status: String,
}

impl ShapeSetupApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            form: ShapeForm::default(),
            applied: ShapeForm::default(),
            position: egui::Vec2::ZERO,
            textures: TextureCache::default(),
            status: String::new(),
        }
    }

    fn generate(&mut self) {
        let checked = self.form.scale_value().and_then(|_| self.form.preview(0.0, 0.0));
        match checked {
            Ok(_) => {
                self.applied = self.form.clone();
                self.status = "形状を生成しました".to_string();
            }
            Err(err) => self.status = format!("入力エラー: {err}"),
        }
    }

    fn save(&mut self, target: SaveTarget) {
        let path = match target {
            SaveTarget::Static => self.config.static_shapes_file.clone(),
            SaveTarget::Live => self.config.live_shapes_file.clone(),
        };
        match append_shape(&self.applied, self.position, &path) {
            Ok(count) => {
                info!(file = %path.display(), count, "shape appended");
                self.status = format!("保存しました: {} ({count}件)", path.display());
            }
            Err(err) => self.status = format!("保存失敗: {err:#}"),
        }
    }

    fn form_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Shape Setup");
        ui.separator();

        egui::Grid::new("shape_form").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
            let fields: [(&str, &mut String); 8] = [
                ("scale", &mut self.form.scale),
                ("key", &mut self.form.key),
                ("image", &mut self.form.image),
                ("height", &mut self.form.height),
                ("width", &mut self.form.width),
                ("shape", &mut self.form.shape),
                ("name", &mut self.form.name),
                ("live image", &mut self.form.live_image),
            ];
            for (label, value) in fields {
                ui.label(label);
                ui.add(egui::TextEdit::singleline(value).desired_width(240.0));
                ui.end_row();
            }
        });

        if ui.button("Browse live image").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Image", &["png", "PNG", "jpg", "JPG", "jpeg"])
                .set_directory(self.config.live_image_dir())
                .pick_file()
            {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    self.form.live_image = name.to_string();
                }
            }
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Generate").clicked() {
                self.generate();
            }
            if ui.button("Save static data").clicked() {
                self.save(SaveTarget::Static);
            }
            if ui.button("Save live data").clicked() {
                self.save(SaveTarget::Live);
            }
        });

        ui.add_space(8.0);
        ui.label(format!("x: {:.1}  y: {:.1}", self.position.x, self.position.y));
        if !self.status.is_empty() {
            ui.label(RichText::new(&self.status).color(Color32::LIGHT_YELLOW));
        }
    }

    fn preview_panel(&mut self, ui: &mut egui::Ui) {
        let painter = ui.painter().clone();
        let origin = egui::pos2(IMAGE_ORIGIN[0], IMAGE_ORIGIN[1]);

        painter.text(
            egui::pos2(IMAGE_LABEL_POS[0], IMAGE_LABEL_POS[1]),
            egui::Align2::LEFT_TOP,
            format!("Image {}:", self.applied.image.trim()),
            egui::FontId::proportional(layout::TEXT_SIZE),
            Color32::WHITE,
        );

        let image_path = resolve_image(&self.applied, &self.config);
        let scale = self.applied.scale_value().unwrap_or(1.0) as f32;
        if let Some(texture) = self.textures.get_or_load(ui.ctx(), &image_path) {
            let rect = egui::Rect::from_min_size(origin, texture.size_vec2() * scale);
            paint_texture(&painter, &texture, rect);
        }

        let Ok(preview) = self.applied.preview(self.position.x as f64, self.position.y as f64) else {
            return;
        };
        let geometry = overlay_geometry_with(
            &preview,
            ShapeColor::Red,
            Placement::new(origin.x as f64, origin.y as f64, 1.0),
            LabelStyle::AUTHORING,
        );
        paint_overlay(&painter, &geometry);

        let response = ui.interact(to_rect(&geometry.outline), ui.id().with("preview_shape"), egui::Sense::drag());
        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.position = pointer - origin;
            }
        }
    }
}

/// フォームの画像番号から表示する画像ファイルを決める
pub fn resolve_image(form: &ShapeForm, config: &Config) -> PathBuf {
    match form.image_source() {
        ImageSource::Reference(slot) => config
            .reference_image(slot)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.fallback_image.clone()),
        ImageSource::Live(name) => config.live_image_dir().join(name),
        ImageSource::Fallback => config.fallback_image.clone(),
    }
}

/// 画面上の位置の形状をテンプレートファイルに追記し、追記後の件数を返す
pub fn append_shape(form: &ShapeForm, position: egui::Vec2, path: &Path) -> Result<usize> {
    let template = form
        .to_template(position.x as f64, position.y as f64)
        .context("形状の入力が不正です")?;
    ShapeTemplateStore::append(path, template).with_context(|| format!("{} に追記できません", path.display()))
}

impl eframe::App for ShapeSetupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("shape_form_panel")
            .exact_width(FORM_WIDTH)
            .show(ctx, |ui| self.form_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(layout::BACKGROUND))
            .show(ctx, |ui| self.preview_panel(ui));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspection_common::ShapeKind;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_image_by_number() {
        let config = Config::default();
        let mut form = ShapeForm::default();
        assert_eq!(resolve_image(&form, &config), config.reference_images[0]);

        form.image = "4".to_string();
        assert_eq!(resolve_image(&form, &config), config.fallback_image);

        form.live_image = "live_01.png".to_string();
        assert_eq!(resolve_image(&form, &config), config.live_image_dir().join("live_01.png"));

        form.image = "9".to_string();
        assert_eq!(resolve_image(&form, &config), config.fallback_image);
    }

    #[test]
    fn test_append_shape_unscales_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ShapeData.json");
        let form = ShapeForm {
            scale: "0.5".to_string(),
            key: "Front__Gap".to_string(),
            shape: "1".to_string(),
            ..ShapeForm::default()
        };

        assert_eq!(append_shape(&form, egui::vec2(100.0, 40.0), &path).unwrap(), 1);
        assert_eq!(append_shape(&form, egui::vec2(10.0, 10.0), &path).unwrap(), 2);

        let store = ShapeTemplateStore::load(&path).unwrap();
        let saved = store.find("Front__Gap").unwrap();
        assert_eq!((saved.x, saved.y), (200.0, 80.0));
        assert_eq!((saved.width, saved.height), (200.0, 200.0));
        assert_eq!(saved.shape, ShapeKind::Rectangle);
        assert_eq!(saved.color, ShapeColor::Red);
        assert!(saved.display_name);
    }

    #[test]
    fn test_append_shape_rejects_bad_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("LiveImageShapes.json");
        let form = ShapeForm { height: "abc".to_string(), ..ShapeForm::default() };

        assert!(append_shape(&form, egui::Vec2::ZERO, &path).is_err());
        assert!(!path.exists());
    }
}
