use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use eframe::egui;
use egui::{Align2, FontId, Rect, RichText, Sense, Vec2};

use crate::config::config::AppConfig;
use crate::core::asset_resolver::AssetResolver;
use crate::core::gallery::Gallery;
use crate::core::image_cache::{CachedImage, ImageCache};
use crate::core::preload_manager::PreloadManager;
use crate::core::swipe::SwipeTracker;
use crate::error::Result;
use crate::i18n::en::*;
use crate::ui::pagination_controller::PaginationController;

const IMAGE_TEXT_GAP: f32 = 16.0;
const CONTROLS_GAP: f32 = 24.0;
const CONTROLS_PADDING: f32 = 16.0;
/// Rough height of the title, artist and year lines.
const TEXT_BLOCK_HEIGHT: f32 = 80.0;
const LOADING_POLL: Duration = Duration::from_millis(50);

pub struct GalleryView {
    gallery: Gallery,
    pagination: PaginationController,
    swipe: SwipeTracker,
    image_cache: ImageCache,
    preload_manager: PreloadManager,
    page_changes: Receiver<usize>,
    image_size: f32,
    swipe_threshold: f32,
}

impl GalleryView {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let gallery = Gallery::art_space()?;
        let mut pagination = PaginationController::new(gallery.len(), config.transition_ms)?;

        let (sender, page_changes) = mpsc::channel();
        pagination.subscribe(move |index| {
            let _ = sender.send(index);
        });

        let image_cache = ImageCache::new(config.cache_size);
        let preload_manager = PreloadManager::new(
            AssetResolver::new(config.assets_dir.clone()),
            config.preload_range,
        );
        preload_manager.preload_around(&gallery, pagination.current(), &image_cache);

        Ok(Self {
            gallery,
            pagination,
            swipe: SwipeTracker::new(),
            image_cache,
            preload_manager,
            page_changes,
            image_size: config.image_size,
            swipe_threshold: config.swipe_threshold,
        })
    }

    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (forward, back) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if forward {
            self.pagination.next();
        }
        if back {
            self.pagination.previous();
        }
    }

    fn handle_page_changes(&mut self) {
        let changed = self.page_changes.try_iter().count() > 0;
        let current = self.pagination.current();
        if changed || self.is_loading() {
            self.preload_manager
                .preload_around(&self.gallery, current, &self.image_cache);
        }
    }

    fn show_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls")
            .show_separator_line(false)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(CONTROLS_PADDING))
            .show(ctx, |ui| {
                ui.add_space(CONTROLS_GAP);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} / {}",
                            self.pagination.current() + 1,
                            self.pagination.len()
                        ))
                        .weak(),
                    );
                });
                ui.columns(2, |columns| {
                    columns[0].vertical_centered(|ui| {
                        if ui.button(BTN_PREV).clicked() {
                            self.pagination.previous();
                        }
                    });
                    columns[1].vertical_centered(|ui| {
                        if ui.button(BTN_NEXT).clicked() {
                            self.pagination.next();
                        }
                    });
                });
            });
    }

    fn show_pager(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let area = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(area, Sense::drag());
            self.handle_swipe(&response, area.width());

            let current = self.pagination.current();
            let width = area.width();
            let offset = if self.swipe.is_active() {
                self.swipe.offset()
            } else {
                self.pagination
                    .transition()
                    .map_or(0.0, |transition| transition.offset(width))
            };

            self.render_page(ui, current, area.translate(Vec2::new(offset, 0.0)), area);
            if offset > 0.0 && current > 0 {
                let neighbour = area.translate(Vec2::new(offset - width, 0.0));
                self.render_page(ui, current - 1, neighbour, area);
            } else if offset < 0.0 && current + 1 < self.gallery.len() {
                let neighbour = area.translate(Vec2::new(offset + width, 0.0));
                self.render_page(ui, current + 1, neighbour, area);
            }
        });
    }

    fn handle_swipe(&mut self, response: &egui::Response, page_width: f32) {
        let current = self.pagination.current();
        let len = self.pagination.len();

        if response.dragged() {
            self.swipe.drag(response.drag_delta().x, current, len);
        }
        if response.drag_stopped() {
            let settle = self
                .swipe
                .release(page_width, self.swipe_threshold, current, len);
            if let Err(e) = self.pagination.settle_swipe(settle) {
                log::warn!("Swipe ignored: {}", e);
            }
        } else if !response.dragged() && self.swipe.is_active() {
            self.swipe.cancel();
        }
    }

    fn render_page(&mut self, ui: &mut egui::Ui, page: usize, rect: Rect, clip: Rect) {
        let piece = self.gallery[page].clone();
        let cached = self.image_cache.get(&piece.image).cloned();

        let mut page_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect)
                .layout(egui::Layout::top_down(egui::Align::Center)),
        );
        page_ui.set_clip_rect(clip.intersect(ui.clip_rect()));

        let content_height = self.image_size + IMAGE_TEXT_GAP + TEXT_BLOCK_HEIGHT;
        page_ui.add_space(((rect.height() - content_height) / 2.0).max(0.0));

        let (image_rect, _) =
            page_ui.allocate_exact_size(Vec2::splat(self.image_size), Sense::hover());
        match cached {
            Some(cached) => self.render_image(&page_ui, &cached, image_rect),
            None => {
                page_ui.painter().text(
                    image_rect.center(),
                    Align2::CENTER_CENTER,
                    TEXT_LOADINGIMG,
                    FontId::proportional(14.0),
                    page_ui.visuals().weak_text_color(),
                );
            }
        }

        page_ui.add_space(IMAGE_TEXT_GAP);
        page_ui.label(RichText::new(piece.title).size(24.0).strong());
        page_ui.label(RichText::new(piece.artist).size(16.0).italics());
        page_ui.label(RichText::new(piece.year).size(14.0));
    }

    fn render_image(&self, ui: &egui::Ui, cached: &CachedImage, frame: Rect) {
        let image_size = cached.texture.size_vec2();
        let scale = (frame.width() / image_size.x).min(frame.height() / image_size.y);
        let scaled_size = image_size * scale;
        let rect = Rect::from_center_size(frame.center(), scaled_size);

        egui::Image::from_texture(&cached.texture)
            .fit_to_exact_size(scaled_size)
            .paint_at(ui, rect);

        if cached.placeholder {
            ui.painter().text(
                frame.center(),
                Align2::CENTER_CENTER,
                TEXT_IMG_UNAVAILABLE,
                FontId::proportional(14.0),
                ui.visuals().strong_text_color(),
            );
        }
    }

    fn is_animating(&self) -> bool {
        self.swipe.is_active() || self.pagination.transition().is_some()
    }

    fn is_loading(&self) -> bool {
        let current = self.pagination.current();
        !self.image_cache.contains(&self.gallery[current].image)
    }
}

impl eframe::App for GalleryView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_input(ctx);

        let dt_ms = (ctx.input(|i| i.stable_dt) * 1000.0).round() as u32;
        self.pagination.tick_transition(dt_ms);

        let uploaded = self
            .preload_manager
            .process_loaded_images(ctx, &mut self.image_cache);

        self.show_controls(ctx);
        self.show_pager(ctx);
        self.handle_page_changes();

        if self.is_animating() || uploaded > 0 {
            ctx.request_repaint();
        } else if self.is_loading() {
            ctx.request_repaint_after(LOADING_POLL);
        }
    }
}
