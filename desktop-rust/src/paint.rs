use eframe::egui::{self, Color32, FontData, FontDefinitions, FontFamily, FontId, Painter, Pos2, Rect, Stroke};
use inspection_common::ShapeKind;
use inspection_common::overlay::{OutlineRect, OverlayGeometry, ellipse_points};

const ELLIPSE_SEGMENTS: usize = 72;
const LABEL_BACKGROUND: Color32 = Color32::BLACK;

pub fn color32(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

pub fn to_rect(outline: &OutlineRect) -> Rect {
    Rect::from_min_size(
        egui::pos2(outline.left as f32, outline.top as f32),
        egui::vec2(outline.width as f32, outline.height as f32),
    )
}

/// 形状1件を描画（輪郭 + ラベル）
pub fn paint_overlay(painter: &Painter, geometry: &OverlayGeometry) {
    let color = color32(geometry.color);
    let stroke = Stroke::new(geometry.stroke_width as f32, color);

    match geometry.kind {
        ShapeKind::Rectangle => {
            painter.rect_stroke(to_rect(&geometry.outline), 0.0, stroke);
        }
        ShapeKind::Ellipse => {
            let points = ellipse_points(&geometry.outline, ELLIPSE_SEGMENTS)
                .into_iter()
                .map(|(x, y)| egui::pos2(x as f32, y as f32))
                .collect();
            painter.add(egui::Shape::closed_line(points, stroke));
        }
    }

    if let Some(label) = &geometry.label {
        paint_text_on(
            painter,
            egui::pos2(label.left as f32, label.top as f32),
            &label.text,
            label.font_size as f32,
            color,
            LABEL_BACKGROUND,
        );
    }
}

/// 背景付きのテキスト。描画した範囲を返す
pub fn paint_text_on(
    painter: &Painter,
    pos: Pos2,
    text: &str,
    size: f32,
    color: Color32,
    background: Color32,
) -> Rect {
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(size.max(1.0)), color);
    let rect = Rect::from_min_size(pos, galley.size());
    painter.rect_filled(rect, 0.0, background);
    painter.galley(pos, galley, color);
    rect
}

pub fn paint_texture(painter: &Painter, texture: &egui::TextureHandle, rect: Rect) {
    let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    painter.image(texture.id(), rect, uv, Color32::WHITE);
}

/// 検査現場の PC にあるセリフ体を優先して使う
pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\times.ttf",
        "/Library/Fonts/Times New Roman.ttf",
        "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
        "/usr/share/fonts/truetype/msttcorefonts/Times_New_Roman.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("serif".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .insert(0, "serif".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}
