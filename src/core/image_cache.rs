use std::collections::HashMap;
use std::hash::Hash;

use egui::TextureHandle;

use crate::core::art_piece::ArtImage;

/// A texture ready to draw, plus whether it stands in for a missing image.
#[derive(Clone)]
pub struct CachedImage {
    pub texture: TextureHandle,
    pub placeholder: bool,
}

/// Small LRU map; the least recently used entry goes first when full.
pub struct ImageCache<V = CachedImage, K = ArtImage> {
    entries: HashMap<K, V>,
    max_cache_size: usize,
    access_order: Vec<K>,
}

impl<V, K: Eq + Hash + Clone> ImageCache<V, K> {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_cache_size: max_size.max(1),
            access_order: Vec::new(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.touch(key);
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.contains_key(&key) {
            self.touch(&key);
        } else {
            while self.entries.len() >= self.max_cache_size && !self.access_order.is_empty() {
                let oldest = self.access_order.remove(0);
                self.entries.remove(&oldest);
            }
            self.access_order.push(key.clone());
        }
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            let key = self.access_order.remove(pos);
            self.access_order.push(key);
        }
    }
}
