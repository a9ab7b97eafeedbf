//! Page filler: turns a stream of items into filled pages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pagefill_core::{Coord, Error, Item, ItemSource, PageBounds, PageOptions, PageResult, Result};

use crate::queue::PlacementQueue;
use crate::search::SearchEngine;

/// Fills pages one at a time from an [`ItemSource`].
///
/// Items that do not fit on a page are kept and offered again, most recently
/// kept first, before anything new is pulled from the source.
pub struct PageFiller<I> {
    options: PageOptions,
    bounds: PageBounds,
    engine: SearchEngine,
    pending: Vec<I>,
    cancelled: Arc<AtomicBool>,
}

impl<I: Item> PageFiller<I> {
    /// Creates a filler, validating `options`.
    pub fn new(options: PageOptions) -> Result<Self> {
        let bounds = options.bounds()?;
        let engine = SearchEngine::new(bounds, options.spacing())
            .with_auto_rotate(options.auto_rotate)
            .with_branching_depth_limit(options.branching_depth_limit);

        log::debug!(
            "page filler ready: printable {}x{}, spacing {}x{}, auto_rotate {}",
            bounds.printable_size().width,
            bounds.printable_size().height,
            options.horizontal_spacing,
            options.vertical_spacing,
            options.auto_rotate
        );

        Ok(Self {
            options,
            bounds,
            engine,
            pending: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Page options in use.
    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Printable area in border-pixel coordinates.
    pub fn bounds(&self) -> &PageBounds {
        &self.bounds
    }

    /// Items carried over from previous pages.
    pub fn pending(&self) -> &[I] {
        &self.pending
    }

    /// Returns true while carried-over items are waiting.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Requests cancellation of the page being filled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Shared flag that cancels filling when set from another thread.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Clears a previous cancellation request.
    pub fn reset_cancel(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }

    /// Fills one page.
    ///
    /// Carried-over items are offered before new ones from `source`. Queued
    /// items that are not placed are carried over to the next call, and so
    /// are the items already pulled when the page is cancelled.
    pub fn fill_page<S>(&mut self, source: &mut S) -> PageResult<I>
    where
        S: ItemSource<Item = I> + ?Sized,
    {
        let area_cap = self
            .bounds
            .area()
            .saturating_mul(Coord::from(self.options.area_cap_factor));

        let queue = {
            let mut requeue = RequeueSource {
                pending: &mut self.pending,
                source: &mut *source,
            };
            PlacementQueue::fill(
                &mut requeue,
                self.bounds.printable_size(),
                self.options.spacing(),
                area_cap,
                self.options.auto_rotate,
                &self.cancelled,
            )
        };

        let queue = match queue {
            Ok(queue) => queue,
            Err(pulled) => {
                // Reversed so the next page pulls them in the same order.
                self.pending.extend(pulled.into_iter().rev());
                let has_more = self.has_pending() || source.has_next();
                log::debug!("page cancelled, {} items carried over", self.pending.len());
                return PageResult::cancelled(has_more);
            }
        };

        let queued = queue.len();
        let outcome = self.engine.search(queue);
        let leftover_count = outcome.leftover.len();
        // Popped from the back, so the first leftover is offered last.
        self.pending.extend(outcome.leftover);

        let has_more_pages = self.has_pending() || source.has_next();
        let utilization = if self.bounds.area() > 0 {
            outcome.placed_square as f64 / self.bounds.area() as f64
        } else {
            0.0
        };

        log::debug!(
            "page filled: {} of {} queued items placed, {} carried over, utilization {:.1}%",
            outcome.placed.len(),
            queued,
            leftover_count,
            utilization * 100.0
        );

        PageResult {
            placements: outcome.placed,
            has_more_pages,
            leftover_count,
            cancelled: false,
            utilization,
            stats: outcome.stats,
        }
    }

    /// Fills pages until `source` and the carried-over items are exhausted.
    ///
    /// Stops after a cancelled page. Fails if a page places nothing while
    /// items remain, since every following page would be empty too.
    pub fn paginate<S>(&mut self, source: &mut S) -> Result<Vec<PageResult<I>>>
    where
        S: ItemSource<Item = I> + ?Sized,
    {
        let mut pages = Vec::new();
        while self.has_pending() || source.has_next() {
            let page = self.fill_page(source);
            if page.cancelled {
                pages.push(page);
                break;
            }
            if page.is_empty() && page.has_more_pages {
                return Err(Error::InvalidItem(format!(
                    "page {} placed no items while {} remain",
                    pages.len() + 1,
                    self.pending.len()
                )));
            }
            let more = page.has_more_pages;
            pages.push(page);
            if !more {
                break;
            }
        }
        log::debug!("paginated into {} pages", pages.len());
        Ok(pages)
    }
}

/// Offers carried-over items before the wrapped source.
struct RequeueSource<'a, I, S: ?Sized> {
    pending: &'a mut Vec<I>,
    source: &'a mut S,
}

impl<I, S> ItemSource for RequeueSource<'_, I, S>
where
    I: Item,
    S: ItemSource<Item = I> + ?Sized,
{
    type Item = I;

    fn has_next(&self) -> bool {
        !self.pending.is_empty() || self.source.has_next()
    }

    fn next_item(&mut self) -> Option<I> {
        self.pending.pop().or_else(|| self.source.next_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefill_core::{RectItem, VecSource};

    fn ids(page: &PageResult<RectItem>) -> Vec<&str> {
        page.items().map(|i| i.id()).collect()
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let result = PageFiller::<RectItem>::new(PageOptions::new(0, 100));
        assert!(matches!(result, Err(Error::InvalidPage(_))));
    }

    #[test]
    fn test_requeue_pops_pending_first() {
        let mut pending = vec![RectItem::new("p0", 1, 1), RectItem::new("p1", 1, 1)];
        let mut source = VecSource::new(vec![RectItem::new("s0", 1, 1)]);
        let mut requeue = RequeueSource {
            pending: &mut pending,
            source: &mut source,
        };

        let order: Vec<String> = std::iter::from_fn(|| requeue.next_item())
            .map(|i| i.id().to_string())
            .collect();
        assert_eq!(order, vec!["p1", "p0", "s0"]);
    }

    #[test]
    fn test_fill_page_carries_leftover() {
        let mut filler = PageFiller::new(PageOptions::new(200, 100)).unwrap();
        let mut source = VecSource::new(vec![
            RectItem::new("a", 100, 100),
            RectItem::new("b", 100, 50),
            RectItem::new("c", 120, 50),
        ]);

        let page = filler.fill_page(&mut source);
        assert_eq!(ids(&page), vec!["a", "b"]);
        assert_eq!(page.leftover_count, 1);
        assert!(page.has_more_pages);
        assert_eq!(filler.pending()[0].id(), "c");

        let next = filler.fill_page(&mut source);
        assert_eq!(ids(&next), vec!["c"]);
        assert!(!next.has_more_pages);
        assert!(!filler.has_pending());
    }

    #[test]
    fn test_cancelled_page() {
        let mut filler = PageFiller::new(PageOptions::new(100, 100)).unwrap();
        let mut source = VecSource::new(vec![RectItem::new("a", 10, 10)]);

        filler.cancel();
        let page = filler.fill_page(&mut source);
        assert!(page.cancelled);
        assert!(page.is_empty());

        filler.reset_cancel();
        let mut source = VecSource::new(vec![RectItem::new("b", 10, 10)]);
        let page = filler.fill_page(&mut source);
        assert!(!page.cancelled);
        assert_eq!(page.placed_count(), 1);
    }

    /// Raises the filler's cancel handle once `after` items have been taken.
    struct CancelAfter {
        inner: VecSource<RectItem>,
        handle: Arc<AtomicBool>,
        after: usize,
        pulled: usize,
    }

    impl ItemSource for CancelAfter {
        type Item = RectItem;

        fn has_next(&self) -> bool {
            self.inner.has_next()
        }

        fn next_item(&mut self) -> Option<RectItem> {
            let item = self.inner.next_item()?;
            self.pulled += 1;
            if self.pulled == self.after {
                self.handle.store(true, Ordering::Relaxed);
            }
            Some(item)
        }
    }

    #[test]
    fn test_cancel_after_last_pull_keeps_items() {
        let mut filler = PageFiller::new(PageOptions::new(100, 100)).unwrap();
        let mut source = CancelAfter {
            inner: VecSource::new(vec![RectItem::new("a", 10, 10), RectItem::new("b", 20, 20)]),
            handle: filler.cancel_handle(),
            after: 2,
            pulled: 0,
        };

        let page = filler.fill_page(&mut source);
        assert!(page.cancelled);
        assert!(page.is_empty());
        assert!(!source.has_next());
        assert!(page.has_more_pages);
        assert_eq!(filler.pending().len(), 2);

        filler.reset_cancel();
        let mut order = Vec::new();
        let mut requeue = RequeueSource {
            pending: &mut filler.pending,
            source: &mut source,
        };
        while let Some(item) = requeue.next_item() {
            order.push(item.id().to_string());
        }
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_cancelled_items_placed_after_reset() {
        let mut filler = PageFiller::new(PageOptions::new(100, 100)).unwrap();
        let mut source = CancelAfter {
            inner: VecSource::new((0..4).map(|i| RectItem::new(format!("i{}", i), 10, 10))),
            handle: filler.cancel_handle(),
            after: 3,
            pulled: 0,
        };

        let page = filler.fill_page(&mut source);
        assert!(page.cancelled);
        assert_eq!(filler.pending().len(), 3);

        filler.reset_cancel();
        let page = filler.fill_page(&mut source);
        assert!(!page.cancelled);
        assert_eq!(page.placed_count(), 4);
        assert!(!page.has_more_pages);
        assert!(!filler.has_pending());
    }

    #[test]
    fn test_cancel_handle_shares_flag() {
        let filler = PageFiller::<RectItem>::new(PageOptions::new(100, 100)).unwrap();
        let handle = filler.cancel_handle();
        handle.store(true, Ordering::Relaxed);
        assert!(filler.cancelled.load(Ordering::Relaxed));
    }

    #[test]
    fn test_paginate() {
        let mut filler = PageFiller::new(PageOptions::new(100, 100)).unwrap();
        let mut source = VecSource::new((0..5).map(|i| RectItem::new(format!("i{}", i), 100, 40)));

        let pages = filler.paginate(&mut source).unwrap();
        // Two 41-high items fit in 101 padded rows.
        assert_eq!(
            pages.iter().map(|p| p.placed_count()).collect::<Vec<_>>(),
            vec![2, 2, 1]
        );
        assert!(pages.last().is_some_and(|p| !p.has_more_pages));
    }
}
