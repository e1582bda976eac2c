//! Cosmetic slide animation between adjacent pages.
//!
//! The logical page index changes before a transition starts. A transition
//! only tells the view how far the incoming page is still shifted.

/// Cubic ease-out. Input is clamped to `[0.0, 1.0]`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t1 = t - 1.0;
    t1 * t1 * t1 + 1.0
}

/// Which way the pages move on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// The new page comes in from the right.
    Forward,
    /// The new page comes in from the left.
    Backward,
}

impl SlideDirection {
    fn sign(self) -> f32 {
        match self {
            SlideDirection::Forward => 1.0,
            SlideDirection::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageTransition {
    pub from: usize,
    pub to: usize,
    /// Starting offset of the incoming page, in page widths.
    pub start_fraction: f32,
    pub duration_ms: u32,
    pub elapsed_ms: u32,
}

impl PageTransition {
    /// Full-width slide between adjacent pages.
    pub fn new(from: usize, to: usize, duration_ms: u32) -> Self {
        let direction = if to >= from {
            SlideDirection::Forward
        } else {
            SlideDirection::Backward
        };
        Self::settle(from, to, direction.sign(), duration_ms)
    }

    /// Slide that picks up where a released drag left the page, `start_fraction`
    /// page widths away from its resting place.
    pub fn settle(from: usize, to: usize, start_fraction: f32, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            start_fraction,
            duration_ms,
            elapsed_ms: 0,
        }
    }

    pub fn tick(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Eased progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        ease_out_cubic(self.elapsed_ms as f32 / self.duration_ms as f32)
    }

    /// Horizontal offset of the incoming page for a page `width` points wide.
    /// The outgoing page sits one width further in the opposite direction.
    pub fn offset(&self, width: f32) -> f32 {
        self.start_fraction * width * (1.0 - self.progress())
    }
}
