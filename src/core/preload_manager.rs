use std::collections::HashSet;
use std::sync::{mpsc, Mutex};

use egui::{ColorImage, Context};
use rayon::prelude::*;

use crate::core::art_piece::ArtImage;
use crate::core::asset_resolver::AssetResolver;
use crate::core::gallery::Gallery;
use crate::core::image_cache::{CachedImage, ImageCache};
use crate::core::image_loader_factory::{placeholder_image, ImageLoaderFactory};

const MAX_LOADER_THREADS: usize = 4;
const PLACEHOLDER_SIZE: usize = 256;

struct LoadedImage {
    image: ArtImage,
    color_image: ColorImage,
    placeholder: bool,
}

/// Pages to load around `current`: the current page first, then neighbours
/// by distance, clamped to the gallery.
pub fn preload_window(current: usize, len: usize, range: usize) -> Vec<usize> {
    if current >= len {
        return Vec::new();
    }
    let mut pages = vec![current];
    for distance in 1..=range.min(len) {
        if let Some(before) = current.checked_sub(distance) {
            pages.push(before);
        }
        if current + distance < len {
            pages.push(current + distance);
        }
    }
    pages
}

/// Decodes artwork off the UI thread and hands it back for upload.
pub struct PreloadManager {
    image_receiver: mpsc::Receiver<LoadedImage>,
    image_sender: mpsc::Sender<LoadedImage>,
    loading: Mutex<HashSet<ArtImage>>,
    preload_range: usize,
    loader_factory: ImageLoaderFactory,
    resolver: AssetResolver,
    pool: Option<rayon::ThreadPool>,
}

impl PreloadManager {
    pub fn new(resolver: AssetResolver, preload_range: usize) -> Self {
        let (sender, receiver) = mpsc::channel();
        let threads = num_cpus::get().clamp(1, MAX_LOADER_THREADS);
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("art-loader-{i}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!("Falling back to the global rayon pool: {}", e);
                None
            }
        };

        Self {
            image_receiver: receiver,
            image_sender: sender,
            loading: Mutex::new(HashSet::new()),
            preload_range,
            loader_factory: ImageLoaderFactory::new(),
            resolver,
            pool,
        }
    }

    /// Queues every page in the preload window that is neither cached nor
    /// already loading. Cheap to call again for the same page.
    pub fn preload_around(&self, gallery: &Gallery, current: usize, cache: &ImageCache) {
        let Ok(mut in_flight) = self.loading.lock() else {
            return;
        };
        let images: Vec<ArtImage> = preload_window(current, gallery.len(), self.preload_range)
            .into_iter()
            .map(|page| gallery[page].image)
            .filter(|image| !cache.contains(image) && in_flight.insert(*image))
            .collect();
        drop(in_flight);

        if !images.is_empty() {
            log::debug!("Preloading {} image(s) around page {}", images.len(), current + 1);
            self.spawn_loading(images);
        }
    }

    fn spawn_loading(&self, images: Vec<ArtImage>) {
        let sender = self.image_sender.clone();
        let factory = self.loader_factory.clone();
        let resolver = self.resolver.clone();

        let job = move || {
            images.into_par_iter().for_each(|image| {
                let loaded = load_or_placeholder(&factory, &resolver, image);
                // The receiver is gone once the app has shut down.
                let _ = sender.send(loaded);
            });
        };

        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }

    /// Uploads finished decodes as textures. Returns how many arrived.
    ///
    /// An image stays in the in-flight set until it is cached here, so
    /// `preload_around` never queues a decode that is waiting in the channel.
    pub fn process_loaded_images(&self, ctx: &Context, cache: &mut ImageCache) -> usize {
        let mut count = 0;
        while let Ok(loaded) = self.image_receiver.try_recv() {
            if let Ok(mut in_flight) = self.loading.lock() {
                in_flight.remove(&loaded.image);
            }
            let texture = ctx.load_texture(
                format!("art_{}", loaded.image),
                loaded.color_image,
                egui::TextureOptions::LINEAR,
            );
            cache.insert(
                loaded.image,
                CachedImage {
                    texture,
                    placeholder: loaded.placeholder,
                },
            );
            count += 1;
        }
        if count > 0 {
            log::debug!("Uploaded {} texture(s), {} cached", count, cache.len());
        }
        count
    }
}

fn load_or_placeholder(
    factory: &ImageLoaderFactory,
    resolver: &AssetResolver,
    image: ArtImage,
) -> LoadedImage {
    let Some(path) = resolver.resolve(image) else {
        log::warn!(
            "No image for '{}' in {}",
            image,
            resolver.assets_dir().display()
        );
        return LoadedImage {
            image,
            color_image: placeholder_image(PLACEHOLDER_SIZE),
            placeholder: true,
        };
    };

    match factory.load_image(&path) {
        Ok(color_image) => LoadedImage {
            image,
            color_image,
            placeholder: false,
        },
        Err(e) => {
            log::warn!("Error loading {}: {}", path.display(), e);
            LoadedImage {
                image,
                color_image: placeholder_image(PLACEHOLDER_SIZE),
                placeholder: true,
            }
        }
    }
}
