use anyhow::Context;
use eframe::egui;
use inspection_desktop::layout::WINDOW_SIZE;
use inspection_desktop::paint::configure_fonts;
use inspection_desktop::shape_setup::ShapeSetupApp;
use inspection_visuals::config::Config;

fn main() -> anyhow::Result<()> {
    inspection_desktop::init_tracing();

    let config = Config::load().context("設定の読み込みに失敗しました")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title("Shape Setup"),
        ..Default::default()
    };
    eframe::run_native(
        "Shape Setup",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(ShapeSetupApp::new(config))
        }),
    )
    .map_err(|e| anyhow::anyhow!("ウィンドウを開けません: {e}"))
}
