use crate::core::swipe::SwipeSettle;
use crate::core::transition::PageTransition;
use crate::error::{ArtSpaceError, Result};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("page {index} is out of range for {len} pages")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type PageObserver = Box<dyn FnMut(usize)>;

/// Owns the current page over a fixed number of pages.
///
/// Invariant: `current_index < len`, and `len >= 1`. Moves past either end
/// are ignored, there is no wraparound. Subscribers hear about every change
/// of the index, after it has been applied.
pub struct PaginationController {
    len: usize,
    current_index: usize,
    transition_ms: u32,
    transition: Option<PageTransition>,
    observers: Vec<(SubscriptionId, PageObserver)>,
    next_subscription: u64,
}

impl PaginationController {
    pub fn new(len: usize, transition_ms: u32) -> Result<Self> {
        if len == 0 {
            return Err(ArtSpaceError::EmptyGallery);
        }
        Ok(Self {
            len,
            current_index: 0,
            transition_ms,
            transition: None,
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn current(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.len
    }

    /// Moves one page forward and starts a slide. Returns `false` on the last
    /// page, where nothing happens.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.step_to(self.current_index + 1);
        true
    }

    /// Moves one page back and starts a slide. Returns `false` on the first
    /// page, where nothing happens.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.step_to(self.current_index - 1);
        true
    }

    /// Sets the page directly, without a slide. Used once a swipe has already
    /// moved the content on screen. Out-of-range pages are rejected and leave
    /// the state untouched.
    pub fn jump_to(&mut self, index: usize) -> std::result::Result<(), NavigationError> {
        if index >= self.len {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.transition = None;
        if index != self.current_index {
            self.current_index = index;
            self.notify();
        }
        Ok(())
    }

    /// Applies a released swipe: sets the page like `jump_to`, then lets the
    /// content glide in from where the drag left it.
    pub fn settle_swipe(
        &mut self,
        settle: SwipeSettle,
    ) -> std::result::Result<(), NavigationError> {
        let from = self.current_index;
        self.jump_to(settle.target)?;
        if settle.start_fraction != 0.0 {
            self.transition = Some(PageTransition::settle(
                from,
                settle.target,
                settle.start_fraction,
                self.transition_ms,
            ));
        }
        Ok(())
    }

    /// Slide in flight, if any.
    pub fn transition(&self) -> Option<&PageTransition> {
        self.transition.as_ref()
    }

    /// Advances the slide by `dt_ms` and drops it once it has settled.
    pub fn tick_transition(&mut self, dt_ms: u32) {
        if let Some(transition) = &mut self.transition {
            transition.tick(dt_ms);
            if transition.is_finished() {
                self.transition = None;
            }
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(usize) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    fn step_to(&mut self, index: usize) {
        let from = self.current_index;
        let slide = PageTransition::new(from, index, self.transition_ms);
        if let Some(old) = self.transition.replace(slide) {
            log::debug!(
                "Slide {} -> {} superseded by {} -> {}",
                old.from,
                old.to,
                from,
                index
            );
        }
        self.current_index = index;
        self.notify();
    }

    fn notify(&mut self) {
        let index = self.current_index;
        log::debug!("Page changed to {}/{}", index + 1, self.len);
        for (_, observer) in self.observers.iter_mut() {
            observer(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gallery::Gallery;
    use crate::core::swipe::SwipeTracker;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller(len: usize) -> PaginationController {
        PaginationController::new(len, 300).unwrap()
    }

    #[test]
    fn zero_pages_is_rejected() {
        assert!(matches!(
            PaginationController::new(0, 300),
            Err(ArtSpaceError::EmptyGallery)
        ));
    }

    #[test]
    fn starts_on_first_page() {
        let pager = controller(4);
        assert_eq!(pager.current(), 0);
        assert!(!pager.can_go_previous());
        assert!(pager.can_go_next());
        assert!(pager.transition().is_none());
    }

    #[test]
    fn previous_on_first_page_is_a_no_op() {
        let mut pager = controller(4);
        assert!(!pager.previous());
        assert!(!pager.previous());
        assert_eq!(pager.current(), 0);
        assert!(pager.transition().is_none());
    }

    #[test]
    fn next_on_last_page_is_a_no_op() {
        let mut pager = controller(4);
        pager.jump_to(3).unwrap();
        assert!(!pager.next());
        assert!(!pager.next());
        assert_eq!(pager.current(), 3);
    }

    #[test]
    fn jump_to_sets_exact_page_without_slide() {
        let mut pager = controller(4);
        pager.next();
        assert!(pager.transition().is_some());
        pager.jump_to(3).unwrap();
        assert_eq!(pager.current(), 3);
        assert!(pager.transition().is_none());
    }

    #[test]
    fn jump_to_out_of_range_is_rejected() {
        let mut pager = controller(4);
        pager.next();
        assert_eq!(
            pager.jump_to(4),
            Err(NavigationError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn next_and_previous_start_slides() {
        let mut pager = controller(4);
        pager.next();
        let slide = pager.transition().unwrap();
        assert_eq!((slide.from, slide.to), (0, 1));

        pager.previous();
        let slide = pager.transition().unwrap();
        assert_eq!((slide.from, slide.to), (1, 0));
        assert_eq!(slide.elapsed_ms, 0);
    }

    #[test]
    fn slide_is_dropped_once_settled() {
        let mut pager = controller(4);
        pager.next();
        pager.tick_transition(100);
        assert!(pager.transition().is_some());
        pager.tick_transition(250);
        assert!(pager.transition().is_none());
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn subscribers_see_each_change_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut pager = controller(3);
        let sink = Rc::clone(&seen);
        pager.subscribe(move |index| sink.borrow_mut().push(index));

        pager.previous();
        pager.next();
        pager.next();
        pager.next();
        pager.jump_to(2).unwrap();
        pager.jump_to(0).unwrap();
        let _ = pager.jump_to(9);

        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut pager = controller(3);
        let counter = Rc::clone(&calls);
        let id = pager.subscribe(move |_| *counter.borrow_mut() += 1);

        pager.next();
        assert!(pager.unsubscribe(id));
        assert!(!pager.unsubscribe(id));
        pager.next();

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn committed_swipe_glides_into_place() {
        let mut pager = controller(4);
        let mut swipe = SwipeTracker::new();
        swipe.drag(-120.0, 0, 4);
        let settle = swipe.release(400.0, 0.25, 0, 4);

        pager.settle_swipe(settle).unwrap();

        assert_eq!(pager.current(), 1);
        let slide = pager.transition().unwrap();
        assert_eq!((slide.from, slide.to), (0, 1));
        assert!((slide.offset(400.0) - 280.0).abs() < 1e-3);
    }

    #[test]
    fn short_swipe_glides_back_without_notifying() {
        let calls = Rc::new(RefCell::new(0));
        let mut pager = controller(4);
        let counter = Rc::clone(&calls);
        pager.subscribe(move |_| *counter.borrow_mut() += 1);

        let mut swipe = SwipeTracker::new();
        swipe.drag(-40.0, 0, 4);
        pager.settle_swipe(swipe.release(400.0, 0.25, 0, 4)).unwrap();

        assert_eq!(pager.current(), 0);
        assert!(pager.transition().unwrap().offset(400.0) < 0.0);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn settle_out_of_range_is_rejected() {
        let mut pager = controller(2);
        let settle = SwipeSettle {
            target: 5,
            start_fraction: 0.5,
        };
        assert_eq!(
            pager.settle_swipe(settle),
            Err(NavigationError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(pager.current(), 0);
        assert!(pager.transition().is_none());
    }

    #[test]
    fn art_space_walkthrough() {
        let gallery = Gallery::art_space().unwrap();
        let mut pager = controller(gallery.len());
        assert_eq!(gallery[pager.current()].title, "Starry Night");

        pager.next();
        assert_eq!(pager.current(), 1);
        assert_eq!(gallery[pager.current()].title, "The Persistence of Memory");

        pager.next();
        pager.next();
        assert_eq!(pager.current(), 3);
        assert_eq!(gallery[pager.current()].title, "Girl with a Pearl Earring");

        pager.next();
        assert_eq!(pager.current(), 3);

        for _ in 0..3 {
            pager.previous();
        }
        assert_eq!(pager.current(), 0);
    }

    proptest! {
        #[test]
        fn index_stays_in_bounds(
            len in 1..16usize,
            ops in proptest::collection::vec(any::<bool>(), 0..200),
        ) {
            let mut pager = controller(len);
            for forward in ops {
                if forward {
                    pager.next();
                } else {
                    pager.previous();
                }
                prop_assert!(pager.current() < len);
            }
        }

        #[test]
        fn jump_to_lands_on_every_valid_page(
            len in 1..16usize,
            start in 0..16usize,
            k in 0..16usize,
        ) {
            let mut pager = controller(len);
            pager.jump_to(start % len).unwrap();
            let k = k % len;
            prop_assert_eq!(pager.jump_to(k), Ok(()));
            prop_assert_eq!(pager.current(), k);
            prop_assert!(pager.transition().is_none());
        }

        #[test]
        fn jump_to_rejects_every_page_past_the_end(
            len in 1..16usize,
            start in 0..16usize,
            past in 0..64usize,
        ) {
            let mut pager = controller(len);
            let start = start % len;
            pager.jump_to(start).unwrap();
            let k = len + past;
            prop_assert_eq!(pager.jump_to(k), Err(NavigationError::OutOfRange { index: k, len }));
            prop_assert_eq!(pager.current(), start);
        }

        #[test]
        fn next_then_previous_round_trips(len in 3..16usize, at in 0..16usize) {
            let at = 1 + at % (len - 2);
            let mut pager = controller(len);
            pager.jump_to(at).unwrap();
            prop_assert!(pager.next());
            prop_assert!(pager.previous());
            prop_assert_eq!(pager.current(), at);
        }
    }
}
