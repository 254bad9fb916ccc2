use image_composer::ComposerApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting image composer");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Image Composer"),
        ..Default::default()
    };

    eframe::run_native(
        "Image Composer",
        native_options,
        Box::new(|cc| Ok(Box::new(ComposerApp::new(cc)))),
    )
}
