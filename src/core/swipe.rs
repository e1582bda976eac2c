/// Where a released swipe comes to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSettle {
    pub target: usize,
    /// Offset of the target page at release, in page widths.
    pub start_fraction: f32,
}

/// Horizontal drag state for one swipe gesture.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    offset: f32,
    active: bool,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a drag delta. Pulling past the first or last page only moves the
    /// content half as far.
    pub fn drag(&mut self, delta_x: f32, current: usize, len: usize) {
        self.active = true;
        let pulling_past_start = current == 0 && self.offset + delta_x > 0.0;
        let pulling_past_end = current + 1 >= len && self.offset + delta_x < 0.0;
        if pulling_past_start || pulling_past_end {
            self.offset += delta_x * 0.5;
        } else {
            self.offset += delta_x;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Ends the gesture. The target is one step away from `current` when the
    /// drag covered `threshold` of the page width, `current` otherwise.
    pub fn release(
        &mut self,
        page_width: f32,
        threshold: f32,
        current: usize,
        len: usize,
    ) -> SwipeSettle {
        let offset = std::mem::take(&mut self.offset);
        self.active = false;

        if page_width <= 0.0 {
            return SwipeSettle {
                target: current,
                start_fraction: 0.0,
            };
        }
        let fraction = offset / page_width;
        let target = if offset.abs() < threshold * page_width {
            current
        } else if offset < 0.0 {
            (current + 1).min(len.saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };

        // The target page rests one width beside the dragged one.
        let start_fraction = if target > current {
            fraction + 1.0
        } else if target < current {
            fraction - 1.0
        } else {
            fraction
        };
        SwipeSettle {
            target,
            start_fraction,
        }
    }

    pub fn cancel(&mut self) {
        self.offset = 0.0;
        self.active = false;
    }
}
