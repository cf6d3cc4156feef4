use anyhow::Context;
use eframe::egui;
use inspection_desktop::layout::WINDOW_SIZE;
use inspection_desktop::paint::configure_fonts;
use inspection_desktop::viewer::ViewerApp;
use inspection_visuals::AppContext;

fn main() -> anyhow::Result<()> {
    inspection_desktop::init_tracing();

    let context = AppContext::load().context("設定の読み込みに失敗しました")?;
    // リスナーはプロセス終了まで動かし続ける
    let _listener = context.start_listener().context("識別子リスナーを起動できません")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title("Inspection Visuals"),
        ..Default::default()
    };
    eframe::run_native(
        "Inspection Visuals",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(ViewerApp::new(context))
        }),
    )
    .map_err(|e| anyhow::anyhow!("ウィンドウを開けません: {e}"))
}
