//! Inspection Visuals Common Library
//!
//! ビューア・形状設定ツール・CLIで共有される型と結合ロジック

pub mod types;
pub mod shape;
pub mod binding;
pub mod overlay;
pub mod authoring;
pub mod error;

pub use types::{CameraResult, ImageLocation, Inspection, ResultCode, ResultFile, ResultParameter, composite_key};
pub use shape::{ShapeColor, ShapeKind, ShapeTemplate, ShapeTemplateStore};
pub use binding::{FailedInspection, InspectionBinding, ShapeToDraw, bind_results};
pub use overlay::{LabelStyle, OutlineRect, OverlayGeometry, Placement, overlay_geometry};
pub use authoring::{ImageSource, ShapeForm};
pub use error::{Error, Result};
