//! Placement queue.
//!
//! Collects items from a source up to an area budget and orders them
//! largest-first for the best-fit search.

use std::sync::atomic::{AtomicBool, Ordering};

use pagefill_core::{padded_size, Coord, Item, ItemSource, Size, Spacing};

/// One queued item with its padded sizes.
#[derive(Debug, Clone)]
pub struct QueuedItem<I> {
    item: I,
    padded: Size,
    padded_rotated: Size,
    square: Coord,
    pull_order: usize,
    locked: bool,
}

impl<I: Item> QueuedItem<I> {
    fn new(item: I, spacing: Spacing, pull_order: usize) -> Self {
        let padded = padded_size(item.size(), spacing);
        let padded_rotated = padded_size(item.rotated_size(), spacing);
        Self {
            item,
            padded,
            padded_rotated,
            square: padded.area(),
            pull_order,
            locked: false,
        }
    }
}

impl<I> QueuedItem<I> {
    /// The queued item.
    pub fn item(&self) -> &I {
        &self.item
    }

    /// Padded size in the requested orientation.
    pub fn padded(&self) -> Size {
        self.padded
    }

    /// Padded size after a 90 degree turn.
    pub fn padded_rotated(&self) -> Size {
        self.padded_rotated
    }

    /// Padded area.
    pub fn square(&self) -> Coord {
        self.square
    }

    /// Position in which the item was pulled from the source.
    pub fn pull_order(&self) -> usize {
        self.pull_order
    }

    /// Returns true while the item is reserved by the current search branch.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Items waiting to be placed on the current page, largest padded area first.
#[derive(Debug, Clone)]
pub struct PlacementQueue<I> {
    entries: Vec<QueuedItem<I>>,
    total_square: Coord,
    capped: bool,
}

impl<I: Item> PlacementQueue<I> {
    /// Pulls items from `source` and sorts them by padded area.
    ///
    /// Pulling stops when the source is exhausted or the summed padded area
    /// exceeds `area_cap`. Each item is fitted to `page_size` before padding.
    ///
    /// If `cancelled` is raised while filling, the partial queue is dropped
    /// and the items already pulled are handed back in pull order.
    pub fn fill<S>(
        source: &mut S,
        page_size: Size,
        spacing: Spacing,
        area_cap: Coord,
        auto_rotate: bool,
        cancelled: &AtomicBool,
    ) -> Result<Self, Vec<I>>
    where
        S: ItemSource<Item = I> + ?Sized,
    {
        let mut entries: Vec<QueuedItem<I>> = Vec::new();
        let mut total_square: Coord = 0;
        let mut capped = false;

        loop {
            if cancelled.load(Ordering::Relaxed) {
                log::warn!(
                    "queue filling cancelled after {} items, discarding queue",
                    entries.len()
                );
                return Err(entries.into_iter().map(|e| e.item).collect());
            }
            if total_square > area_cap {
                capped = true;
                break;
            }
            let Some(mut item) = source.next_item() else {
                break;
            };

            item.fit_size(page_size, auto_rotate);
            let entry = QueuedItem::new(item, spacing, entries.len());
            total_square += entry.square;
            entries.push(entry);
        }

        if capped && source.has_next() {
            log::debug!(
                "queue reached area cap {} with {} items, source has more",
                area_cap,
                entries.len()
            );
        }

        // Stable sort keeps pull order among equal areas.
        entries.sort_by(|a, b| b.square.cmp(&a.square));

        Ok(Self {
            entries,
            total_square,
            capped,
        })
    }
}

impl<I> PlacementQueue<I> {
    /// Builds a queue from already-padded entries, preserving their order.
    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<QueuedItem<I>>) -> Self {
        let total_square = entries.iter().map(|e| e.square).sum();
        Self {
            entries,
            total_square,
            capped: false,
        }
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all padded areas.
    pub fn total_square(&self) -> Coord {
        self.total_square
    }

    /// Returns true if filling stopped at the area cap.
    pub fn is_capped(&self) -> bool {
        self.capped
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&QueuedItem<I>> {
        self.entries.get(index)
    }

    /// Iterates over the entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &QueuedItem<I>> {
        self.entries.iter()
    }

    /// Index of the first unlocked entry at or after `from`.
    pub fn first_unlocked_from(&self, from: usize) -> Option<usize> {
        (from..self.entries.len()).find(|&i| !self.entries[i].locked)
    }

    /// Reserves the entry at `index` for the current search branch.
    pub fn lock(&mut self, index: usize) {
        debug_assert!(!self.entries[index].locked, "item {} locked twice", index);
        self.entries[index].locked = true;
    }

    /// Releases the entry at `index`.
    pub fn unlock(&mut self, index: usize) {
        self.entries[index].locked = false;
    }

    /// Consumes the queue and returns the items in queue order.
    pub fn into_items(self) -> Vec<I> {
        self.entries.into_iter().map(|e| e.item).collect()
    }
}

#[cfg(test)]
impl<I: Item> QueuedItem<I> {
    pub(crate) fn for_test(item: I, spacing: Spacing, pull_order: usize) -> Self {
        Self::new(item, spacing, pull_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefill_core::{RectItem, VecSource};

    fn ids(queue: &PlacementQueue<RectItem>) -> Vec<&str> {
        queue.iter().map(|e| e.item().id()).collect()
    }

    #[test]
    fn test_fill_sorts_largest_first() {
        let mut source = VecSource::new(vec![
            RectItem::new("small", 10, 10),
            RectItem::new("large", 50, 50),
            RectItem::new("medium", 30, 20),
        ]);
        let cancelled = AtomicBool::new(false);
        let queue = PlacementQueue::fill(
            &mut source,
            Size::new(100, 100),
            Spacing::default(),
            Coord::MAX,
            false,
            &cancelled,
        )
        .unwrap();

        assert_eq!(ids(&queue), vec!["large", "medium", "small"]);
        assert_eq!(queue.get(0).unwrap().padded(), Size::new(51, 51));
        assert_eq!(queue.get(1).unwrap().padded_rotated(), Size::new(21, 31));
        assert!(!source.has_next());
    }

    #[test]
    fn test_ties_keep_pull_order() {
        let mut source = VecSource::new(vec![
            RectItem::new("a", 10, 20),
            RectItem::new("b", 20, 10),
            RectItem::new("c", 10, 20),
        ]);
        let cancelled = AtomicBool::new(false);
        let queue = PlacementQueue::fill(
            &mut source,
            Size::new(100, 100),
            Spacing::default(),
            Coord::MAX,
            false,
            &cancelled,
        )
        .unwrap();

        assert_eq!(ids(&queue), vec!["a", "b", "c"]);
        assert_eq!(
            queue.iter().map(|e| e.pull_order()).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_fill_stops_at_area_cap() {
        let items = (0..10).map(|i| RectItem::new(format!("i{}", i), 9, 9));
        let mut source = VecSource::new(items);
        let cancelled = AtomicBool::new(false);
        // Each item pads to 10x10 = 100; the cap is exceeded by the fourth item.
        let queue = PlacementQueue::fill(
            &mut source,
            Size::new(100, 100),
            Spacing::default(),
            350,
            false,
            &cancelled,
        )
        .unwrap();

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.total_square(), 400);
        assert!(queue.is_capped());
        assert_eq!(source.remaining(), 6);
    }

    #[test]
    fn test_fill_fits_items_to_page() {
        let mut source = VecSource::new(vec![RectItem::new("big", 400, 200)]);
        let cancelled = AtomicBool::new(false);
        let queue = PlacementQueue::fill(
            &mut source,
            Size::new(100, 100),
            Spacing::new(2, 2),
            Coord::MAX,
            false,
            &cancelled,
        )
        .unwrap();

        assert_eq!(queue.get(0).unwrap().item().size(), Size::new(100, 50));
        assert_eq!(queue.get(0).unwrap().padded(), Size::new(103, 53));
    }

    /// Raises `cancelled` once `after` items have been handed out.
    struct CancelAfter<'a> {
        inner: VecSource<RectItem>,
        cancelled: &'a AtomicBool,
        after: usize,
        pulled: usize,
    }

    impl ItemSource for CancelAfter<'_> {
        type Item = RectItem;

        fn has_next(&self) -> bool {
            self.inner.has_next()
        }

        fn next_item(&mut self) -> Option<RectItem> {
            let item = self.inner.next_item()?;
            self.pulled += 1;
            if self.pulled == self.after {
                self.cancelled.store(true, Ordering::Relaxed);
            }
            Some(item)
        }
    }

    #[test]
    fn test_cancelled_fill_discards_queue() {
        let mut source = VecSource::new(vec![RectItem::new("a", 1, 1)]);
        let cancelled = AtomicBool::new(true);
        let pulled = PlacementQueue::fill(
            &mut source,
            Size::new(100, 100),
            Spacing::default(),
            Coord::MAX,
            false,
            &cancelled,
        )
        .unwrap_err();
        assert!(pulled.is_empty());
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_cancel_mid_fill_returns_pulled_items() {
        let cancelled = AtomicBool::new(false);
        let mut source = CancelAfter {
            inner: VecSource::new(vec![
                RectItem::new("small", 5, 5),
                RectItem::new("big", 40, 40),
                RectItem::new("rest", 10, 10),
            ]),
            cancelled: &cancelled,
            after: 2,
            pulled: 0,
        };

        let pulled = PlacementQueue::fill(
            &mut source,
            Size::new(30, 30),
            Spacing::default(),
            Coord::MAX,
            false,
            &cancelled,
        )
        .unwrap_err();

        // Pull order, not area order; fitted sizes are kept.
        let ids: Vec<&str> = pulled.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["small", "big"]);
        assert_eq!(pulled[1].size(), Size::new(30, 30));
        assert_eq!(source.inner.remaining(), 1);
    }

    #[test]
    fn test_lock_and_scan() {
        let entries = (0..3)
            .map(|i| QueuedItem::for_test(RectItem::new(format!("i{}", i), 5, 5), Spacing::default(), i))
            .collect();
        let mut queue = PlacementQueue::from_entries(entries);

        assert_eq!(queue.first_unlocked_from(0), Some(0));
        queue.lock(0);
        queue.lock(1);
        assert_eq!(queue.first_unlocked_from(0), Some(2));
        queue.unlock(1);
        assert_eq!(queue.first_unlocked_from(0), Some(1));
        assert_eq!(queue.first_unlocked_from(3), None);
    }
}
