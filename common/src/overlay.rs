//! 形状オーバーレイの幾何計算
//!
//! 描画ツールキットに依存しない座標計算のみを行う。
//! 実際の描画はデスクトップ側で `OverlayGeometry` を使って行う。

use crate::binding::ShapeToDraw;
use crate::shape::{ShapeColor, ShapeKind, ShapeTemplate};

/// 画像の配置（左上オフセットと表示倍率）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

/// 形状の外接矩形（画面座標）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// ラベルの描き方
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    /// 形状上端からの持ち上げ量（線幅の倍数）
    pub lift_per_line_width: f64,
    /// 固定フォントサイズ（None なら形状サイズから算出）
    pub fixed_font_size: Option<f64>,
    pub max_font_size: f64,
}

/// ラベル配置
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGeometry {
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub font_size: f64,
}

/// 描画1回分の幾何情報
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGeometry {
    pub kind: ShapeKind,
    pub outline: OutlineRect,
    pub stroke_width: f64,
    pub color: [u8; 3],
    pub label: Option<LabelGeometry>,
}

impl LabelStyle {
    /// ダッシュボード表示用
    pub const DASHBOARD: LabelStyle = LabelStyle {
        lift_per_line_width: 4.5,
        fixed_font_size: None,
        max_font_size: 20.0,
    };

    /// 形状設定ツール用
    pub const AUTHORING: LabelStyle = LabelStyle {
        lift_per_line_width: 3.0,
        fixed_font_size: Some(12.0),
        max_font_size: 12.0,
    };
}

impl Placement {
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        Self { offset_x, offset_y, scale }
    }

    /// 画像番号に対応しない形状の既定配置
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl OutlineRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// 点が矩形内か（右端・下端は含まない）
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// 静止画の番号 (`"1"`..`"3"`) から表示スロットを引く
pub fn reference_slot(image_id: &str) -> Option<usize> {
    match image_id.trim() {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        _ => None,
    }
}

/// テンプレートの外接矩形を画面座標で求める
pub fn outline_rect(template: &ShapeTemplate, placement: Placement) -> OutlineRect {
    let s = placement.scale;
    OutlineRect {
        left: placement.offset_x + template.x * s - template.width * s / 2.0,
        top: placement.offset_y + template.y * s - template.height * s / 2.0,
        width: template.width * s,
        height: template.height * s,
    }
}

/// ダッシュボード用の幾何情報
pub fn overlay_geometry(shape: &ShapeToDraw, placement: Placement) -> OverlayGeometry {
    overlay_geometry_with(&shape.template, shape.color, placement, LabelStyle::DASHBOARD)
}

pub fn overlay_geometry_with(
    template: &ShapeTemplate,
    color: ShapeColor,
    placement: Placement,
    style: LabelStyle,
) -> OverlayGeometry {
    let s = placement.scale;
    let outline = outline_rect(template, placement);
    let stroke_width = template.line_width as f64;

    let label = template.display_name.then(|| {
        let font_size = style
            .fixed_font_size
            .unwrap_or_else(|| ((template.width + template.height) * s * 0.2).floor())
            .min(style.max_font_size);
        LabelGeometry {
            text: template.name.clone(),
            left: placement.offset_x + template.x * s,
            top: outline.top - stroke_width * style.lift_per_line_width,
            font_size,
        }
    });

    OverlayGeometry {
        kind: template.shape,
        outline,
        stroke_width,
        color: color.rgb(),
        label,
    }
}

/// 外接矩形に内接する楕円の周上の点
pub fn ellipse_points(outline: &OutlineRect, segments: usize) -> Vec<(f64, f64)> {
    let segments = segments.max(3);
    let (cx, cy) = outline.center();
    let rx = outline.width / 2.0;
    let ry = outline.height / 2.0;
    (0..segments)
        .map(|i| {
            let t = i as f64 / segments as f64 * std::f64::consts::TAU;
            (cx + rx * t.cos(), cy + ry * t.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(display_name: bool) -> ShapeTemplate {
        ShapeTemplate {
            name: "bolt".to_string(),
            shape: ShapeKind::Rectangle,
            color: ShapeColor::Red,
            display_name,
            x: 100.0,
            y: 50.0,
            height: 20.0,
            width: 40.0,
            key: "k".to_string(),
            image: "1".to_string(),
            line_width: 5,
        }
    }

    #[test]
    fn test_outline_is_centered_and_scaled() {
        let rect = outline_rect(&template(false), Placement::new(510.0, 35.0, 0.5));
        assert_eq!(rect.left, 510.0 + 50.0 - 10.0);
        assert_eq!(rect.top, 35.0 + 25.0 - 5.0);
        assert_eq!(rect.width, 20.0);
        assert_eq!(rect.height, 10.0);
        assert_eq!(rect.center(), (560.0, 60.0));
    }

    #[test]
    fn test_dashboard_label_position_and_size() {
        let shape = ShapeToDraw::new(template(true), ShapeColor::Green);
        let geometry = overlay_geometry(&shape, Placement::new(0.0, 0.0, 1.0));

        assert_eq!(geometry.color, [0, 255, 0]);
        assert_eq!(geometry.stroke_width, 5.0);
        let label = geometry.label.expect("ラベルが無い");
        assert_eq!(label.left, 100.0);
        assert_eq!(label.top, 40.0 - 22.5);
        // (40 + 20) * 0.2 = 12
        assert_eq!(label.font_size, 12.0);
    }

    #[test]
    fn test_dashboard_label_font_is_capped() {
        let mut big = template(true);
        big.width = 400.0;
        big.height = 400.0;
        let geometry = overlay_geometry(&ShapeToDraw::new(big, ShapeColor::Red), Placement::identity());
        assert_eq!(geometry.label.map(|l| l.font_size), Some(20.0));
    }

    #[test]
    fn test_no_label_when_hidden() {
        let geometry = overlay_geometry(&ShapeToDraw::new(template(false), ShapeColor::Red), Placement::identity());
        assert!(geometry.label.is_none());
        assert_eq!(geometry.kind, ShapeKind::Rectangle);
    }

    #[test]
    fn test_authoring_label_style() {
        let geometry = overlay_geometry_with(&template(true), ShapeColor::Red, Placement::identity(), LabelStyle::AUTHORING);
        let label = geometry.label.expect("ラベルが無い");
        assert_eq!(label.font_size, 12.0);
        assert_eq!(label.top, 40.0 - 15.0);
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let rect = OutlineRect { left: 10.0, top: 10.0, width: 10.0, height: 10.0 };
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(19.9, 19.9));
        assert!(!rect.contains(20.0, 15.0));
        assert!(!rect.contains(15.0, 9.9));
    }

    #[test]
    fn test_reference_slot() {
        assert_eq!(reference_slot("1"), Some(0));
        assert_eq!(reference_slot("3"), Some(2));
        assert_eq!(reference_slot("4"), None);
        assert_eq!(reference_slot(""), None);
    }

    #[test]
    fn test_ellipse_points_lie_on_ellipse() {
        let rect = OutlineRect { left: 0.0, top: 0.0, width: 40.0, height: 20.0 };
        let points = ellipse_points(&rect, 32);
        assert_eq!(points.len(), 32);
        for (x, y) in points {
            let nx = (x - 20.0) / 20.0;
            let ny = (y - 10.0) / 10.0;
            assert!((nx * nx + ny * ny - 1.0).abs() < 1e-9);
        }
    }
}
