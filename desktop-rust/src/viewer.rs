//! 検査結果ダッシュボード
//!
//! フレーム間隔ごとに `DisplayLoop::tick` で最新の結果ファイルを確認し、
//! 静止画・形状オーバーレイ・不合格詳細を描き直す。

use eframe::egui::{self, Color32, RichText};
use inspection_common::overlay::{overlay_geometry, reference_slot};
use inspection_common::{FailedInspection, InspectionBinding, Placement};
use inspection_visuals::display::{DisplayLoop, FrameOutcome, FramePacer};
use inspection_visuals::AppContext;
use std::time::Instant;
use tracing::{info, warn};

use crate::layout::{self, DashboardLayout};
use crate::paint::{paint_overlay, paint_text_on, paint_texture};
use crate::textures::TextureCache;

const DETAIL_TEXT: Color32 = Color32::WHITE;
const DETAIL_HEADER: Color32 = Color32::from_rgb(255, 0, 0);

pub struct ViewerApp {
    context: AppContext,
    display: DisplayLoop,
    pacer: FramePacer,
    textures: TextureCache,
    /// 最後にライブ画像を読み直した詳細の切り替え回数
    shown_generation: u64,
    last_error: Option<String>,
}

impl ViewerApp {
    pub fn new(context: AppContext) -> Self {
        let display = context.display_loop();
        let pacer = FramePacer::new(context.config.frame_interval());
        Self {
            context,
            display,
            pacer,
            textures: TextureCache::default(),
            shown_generation: 0,
            last_error: None,
        }
    }

    fn poll(&mut self) {
        let system = self.context.selected_system();
        match self.display.tick(system.as_deref()) {
            Ok(FrameOutcome::Restarted(path)) => {
                info!(file = %path.display(), "dashboard reloaded");
                self.textures.clear();
                self.shown_generation = self.display.detail_generation();
                self.last_error = None;
            }
            Ok(_) => self.refresh_live_image(),
            Err(err) => {
                let message = err.to_string();
                if self.last_error.as_deref() != Some(message.as_str()) {
                    warn!("reload failed: {message}");
                }
                self.last_error = Some(message);
            }
        }
    }

    /// 詳細が切り替わったらライブ画像を読み直す（書き込み途中で読めなかった画像も拾う）
    fn refresh_live_image(&mut self) {
        let generation = self.display.detail_generation();
        if generation == self.shown_generation {
            return;
        }
        self.shown_generation = generation;
        if let Some(detail) = self.display.current_detail() {
            self.textures.forget(&detail.image_file);
        }
    }

    fn dashboard_layout(&mut self, ctx: &egui::Context) -> DashboardLayout {
        let sizes = std::array::from_fn(|slot| {
            self.context
                .config
                .reference_image(slot)
                .and_then(|path| self.textures.get_or_load(ctx, path))
                .map(|texture| texture.size_vec2())
                .unwrap_or_else(layout::placeholder_size)
        });
        DashboardLayout::new(sizes, self.context.config.reference_scale)
    }

    fn paint_references(&mut self, ctx: &egui::Context, painter: &egui::Painter, layout: &DashboardLayout) {
        for (slot, rect) in layout.references.iter().enumerate() {
            let texture = self
                .context
                .config
                .reference_image(slot)
                .and_then(|path| self.textures.get_or_load(ctx, path));
            match texture {
                Some(texture) => paint_texture(painter, &texture, *rect),
                None => {
                    painter.rect_stroke(*rect, 0.0, egui::Stroke::new(1.0, Color32::DARK_GRAY));
                }
            }
        }
    }

    fn paint_detail(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        layout: &DashboardLayout,
        detail: &FailedInspection,
    ) {
        painter.rect_filled(layout.detail_region(), 0.0, layout::BACKGROUND);

        paint_text_on(
            painter,
            layout.header_pos(),
            &detail.header(),
            layout::TEXT_SIZE,
            DETAIL_HEADER,
            layout::BACKGROUND,
        );
        for (row, (key, value)) in detail.rows().enumerate() {
            for (column, text) in [format!("{key}:"), value.to_string()].into_iter().enumerate() {
                let cell = layout.cell_rect(row, column);
                painter.text(
                    cell.left_center(),
                    egui::Align2::LEFT_CENTER,
                    text,
                    egui::FontId::proportional(layout::TEXT_SIZE),
                    DETAIL_TEXT,
                );
            }
        }

        let live_scale = self.context.config.live_image_scale;
        if let Some(texture) = self.textures.get_or_load(ctx, &detail.image_file) {
            let rect = egui::Rect::from_min_size(layout.live_image_origin, texture.size_vec2() * live_scale);
            paint_texture(painter, &texture, rect);
        }
        paint_overlay(painter, &overlay_geometry(&detail.live_shape(), layout.live_placement(live_scale)));
    }
}

fn paint_shapes(painter: &egui::Painter, layout: &DashboardLayout, binding: &InspectionBinding) {
    for shape in &binding.shapes_to_draw {
        let placement = reference_slot(&shape.template.image)
            .map(|slot| layout.reference_placement(slot))
            .unwrap_or_else(Placement::identity);
        paint_overlay(painter, &overlay_geometry(shape, placement));
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.pacer.due(now) {
            self.poll();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(layout::BACKGROUND))
            .show(ctx, |ui| {
                let painter = ui.painter().clone();

                let Some(loaded) = self.display.loaded().cloned() else {
                    let message = match self.context.selected_system() {
                        Some(system) => format!("{system} の結果ファイルを待っています…"),
                        None => "システム識別子の受信を待っています…".to_string(),
                    };
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(message).size(layout::TEXT_SIZE).color(DETAIL_TEXT));
                    });
                    return;
                };

                let layout = self.dashboard_layout(ctx);
                self.paint_references(ctx, &painter, &layout);
                paint_shapes(&painter, &layout, &loaded.binding);

                if let Some(detail) = self.display.current_detail().cloned() {
                    self.paint_detail(ctx, &painter, &layout, &detail);
                }

                let (status, color) = match &self.last_error {
                    Some(err) => (err.clone(), DETAIL_HEADER),
                    None => (loaded.path.display().to_string(), Color32::GRAY),
                };
                painter.text(
                    egui::pos2(10.0, layout::WINDOW_SIZE[1] - 10.0),
                    egui::Align2::LEFT_BOTTOM,
                    status,
                    egui::FontId::proportional(14.0),
                    color,
                );
            });

        ctx.request_repaint_after(self.pacer.until_next(Instant::now()));
    }
}
