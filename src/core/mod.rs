pub mod art_piece;
pub mod asset_resolver;
pub mod gallery;
pub mod image_cache;
pub mod image_format;
pub mod image_loader_factory;
pub mod preload_manager;
pub mod swipe;
pub mod transition;
