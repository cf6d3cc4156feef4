//! ダッシュボードの画面配置
//!
//! 静止画3枚を左列に縦並びで置き、その右に不合格詳細（表とライブ画像）を置く。

use eframe::egui::{self, Color32, Pos2, Rect, Vec2};
use inspection_common::Placement;

pub const WINDOW_SIZE: [f32; 2] = [1920.0, 1020.0];
pub const BACKGROUND: Color32 = Color32::from_rgb(51, 51, 51);

/// 静止画の左上座標（スロット順）
pub const REFERENCE_ORIGINS: [[f32; 2]; 3] = [[510.0, 35.0], [510.0, 355.0], [510.0, 675.0]];

/// 画像が読めないときに枠取りに使う大きさ
pub const PLACEHOLDER_IMAGE_SIZE: [f32; 2] = [400.0, 300.0];

pub const ROW_HEIGHT: f32 = 32.0;
pub const COLUMN_WIDTH: f32 = 200.0;
pub const TABLE_GAP: f32 = 100.0;
pub const HEADER_LIFT: f32 = 28.0;
pub const TEXT_SIZE: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLayout {
    pub references: [Rect; 3],
    pub reference_scale: f32,
    pub table_origin: Pos2,
    pub live_image_origin: Pos2,
}

impl DashboardLayout {
    /// `reference_sizes` は元画像のピクセルサイズ
    pub fn new(reference_sizes: [Vec2; 3], reference_scale: f32) -> Self {
        let references = std::array::from_fn(|slot| {
            let [x, y] = REFERENCE_ORIGINS[slot];
            Rect::from_min_size(egui::pos2(x, y), reference_sizes[slot] * reference_scale)
        });
        let table_x = references[1].right() + TABLE_GAP;

        Self {
            references,
            reference_scale,
            table_origin: egui::pos2(table_x, references[1].bottom()),
            live_image_origin: egui::pos2(table_x, references[0].top()),
        }
    }

    /// 静止画スロットに載せる形状の配置
    pub fn reference_placement(&self, slot: usize) -> Placement {
        match self.references.get(slot) {
            Some(rect) => Placement::new(rect.left() as f64, rect.top() as f64, self.reference_scale as f64),
            None => Placement::identity(),
        }
    }

    pub fn live_placement(&self, live_image_scale: f32) -> Placement {
        Placement::new(
            self.live_image_origin.x as f64,
            self.live_image_origin.y as f64,
            live_image_scale as f64,
        )
    }

    pub fn header_pos(&self) -> Pos2 {
        self.table_origin - egui::vec2(0.0, HEADER_LIFT)
    }

    /// 表のセル（column 0 がキー、1 が値）
    pub fn cell_rect(&self, row: usize, column: usize) -> Rect {
        let min = self.table_origin + egui::vec2(column as f32 * COLUMN_WIDTH, row as f32 * ROW_HEIGHT);
        Rect::from_min_size(min, egui::vec2(COLUMN_WIDTH, ROW_HEIGHT))
    }

    /// 詳細を描き替える前に塗りつぶす範囲
    pub fn detail_region(&self) -> Rect {
        Rect::from_min_max(
            egui::pos2(self.table_origin.x, self.live_image_origin.y),
            egui::pos2(WINDOW_SIZE[0], WINDOW_SIZE[1]),
        )
    }
}

pub fn placeholder_size() -> Vec2 {
    egui::vec2(PLACEHOLDER_IMAGE_SIZE[0], PLACEHOLDER_IMAGE_SIZE[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DashboardLayout {
        DashboardLayout::new([egui::vec2(500.0, 375.0); 3], 0.8)
    }

    #[test]
    fn test_references_stacked_at_origins() {
        let layout = layout();
        assert_eq!(layout.references[0].min, egui::pos2(510.0, 35.0));
        assert_eq!(layout.references[2].min, egui::pos2(510.0, 675.0));
        assert_eq!(layout.references[1].size(), egui::vec2(400.0, 300.0));
    }

    #[test]
    fn test_table_right_of_second_image() {
        let layout = layout();
        assert_eq!(layout.table_origin, egui::pos2(510.0 + 400.0 + 100.0, 355.0 + 300.0));
        assert_eq!(layout.header_pos().y, 655.0 - 28.0);
        assert_eq!(layout.live_image_origin, egui::pos2(1010.0, 35.0));
    }

    #[test]
    fn test_cells_follow_row_height() {
        let layout = layout();
        let cell = layout.cell_rect(2, 1);
        assert_eq!(cell.min, layout.table_origin + egui::vec2(200.0, 64.0));
        assert_eq!(cell.height(), ROW_HEIGHT);
    }

    #[test]
    fn test_unknown_slot_uses_identity() {
        assert_eq!(layout().reference_placement(7), Placement::identity());
        let placement = layout().reference_placement(1);
        assert_eq!((placement.offset_x, placement.offset_y), (510.0, 355.0));
    }
}
