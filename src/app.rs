use crate::config::config::*;
use crate::error::Result;
use crate::ui::gallery_view::GalleryView;

pub fn run() -> Result<()> {
    let config = AppConfig::load_or_default();
    log::info!(
        "Starting {} v{} ({}x{}, assets in {})",
        APP_NAME,
        APP_VERSION,
        config.window_width,
        config.window_height,
        config.assets_dir.display()
    );

    let app = GalleryView::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(APP_NAME, options, Box::new(|_cc| Ok(Box::new(app))))?;
    Ok(())
}
