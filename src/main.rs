mod app;

use eframe::egui;

use app::CubeApp;
use cube_menu::config::CubeConfig;

fn main() {
    env_logger::init();

    let page_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("https://example.com"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cube Menu",
        options,
        Box::new(move |cc| {
            let mut app = CubeApp::new(CubeConfig::default(), page_url);
            app.start_load(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .expect("Failed to start Cube Menu");
}
