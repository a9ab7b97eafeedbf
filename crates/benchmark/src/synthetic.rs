//! Synthetic item-set generator.
//!
//! Generates rectangular items with controlled size distributions for
//! benchmarking and stress testing.

use pagefill_core::{Coord, RectItem};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// A named set of items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSet {
    /// Set name.
    pub name: String,
    /// Items in source order.
    pub items: Vec<RectItem>,
}

impl ItemSet {
    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item areas.
    pub fn total_area(&self) -> Coord {
        self.items.iter().map(|i| i.requested_size().area()).sum()
    }
}

/// Kind of synthetic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetKind {
    /// Sizes drawn uniformly from one range.
    Uniform,
    /// Mostly small items with a few large ones.
    Mixed,
    /// Long thin items in both orientations.
    Strips,
}

/// Generator for synthetic item sets.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    /// Creates a new generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a set of the given kind sized for a `page_width` x
    /// `page_height` page.
    pub fn generate(&mut self, kind: SetKind, count: usize, page_width: Coord, page_height: Coord) -> ItemSet {
        match kind {
            SetKind::Uniform => {
                let max = page_width.min(page_height) / 3;
                self.uniform(count, (max / 4).max(1), max.max(1))
            }
            SetKind::Mixed => self.mixed(count, page_width, page_height),
            SetKind::Strips => self.strips(count, page_width.max(page_height)),
        }
    }

    /// Items with width and height drawn uniformly from `min..=max`.
    pub fn uniform(&mut self, count: usize, min: Coord, max: Coord) -> ItemSet {
        let items = (0..count)
            .map(|i| {
                let w = self.rng.gen_range(min..=max);
                let h = self.rng.gen_range(min..=max);
                RectItem::new(format!("U{}", i), w, h)
            })
            .collect();

        ItemSet {
            name: "synthetic_uniform".to_string(),
            items,
        }
    }

    /// Roughly one in eight items is large; the rest are small.
    ///
    /// Large items may exceed the page and get scaled down when queued.
    pub fn mixed(&mut self, count: usize, page_width: Coord, page_height: Coord) -> ItemSet {
        let short = page_width.min(page_height).max(8);
        let items = (0..count)
            .map(|i| {
                let (w, h) = if self.rng.gen_bool(0.125) {
                    (
                        self.rng.gen_range(short / 2..=page_width.max(short) * 5 / 4),
                        self.rng.gen_range(short / 2..=page_height.max(short) * 5 / 4),
                    )
                } else {
                    (
                        self.rng.gen_range(short / 16..=short / 4),
                        self.rng.gen_range(short / 16..=short / 4),
                    )
                };
                RectItem::new(format!("M{}", i), w.max(1), h.max(1))
            })
            .collect();

        ItemSet {
            name: "synthetic_mixed".to_string(),
            items,
        }
    }

    /// Long thin items, half of them upright.
    pub fn strips(&mut self, count: usize, max_length: Coord) -> ItemSet {
        let max_length = max_length.max(20);
        let items = (0..count)
            .map(|i| {
                let length = self.rng.gen_range(max_length / 4..=max_length / 2);
                let thickness = self.rng.gen_range(2..=(max_length / 20).max(2));
                let (w, h) = if self.rng.gen_bool(0.5) {
                    (length, thickness)
                } else {
                    (thickness, length)
                };
                RectItem::new(format!("S{}", i), w, h)
            })
            .collect();

        ItemSet {
            name: "synthetic_strips".to_string(),
            items,
        }
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_range() {
        let mut gen = SyntheticGenerator::with_seed(42);
        let set = gen.uniform(50, 10, 20);
        assert_eq!(set.len(), 50);
        for item in &set.items {
            let s = item.requested_size();
            assert!((10..=20).contains(&s.width));
            assert!((10..=20).contains(&s.height));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut gen1 = SyntheticGenerator::with_seed(123);
        let mut gen2 = SyntheticGenerator::with_seed(123);

        let a = gen1.generate(SetKind::Mixed, 30, 300, 200);
        let b = gen2.generate(SetKind::Mixed, 30, 300, 200);
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn test_strips_are_thin() {
        let mut gen = SyntheticGenerator::with_seed(7);
        let set = gen.strips(20, 400);
        for item in &set.items {
            let s = item.requested_size();
            let (long, thin) = (s.width.max(s.height), s.width.min(s.height));
            assert!(long >= 100);
            assert!(thin <= 20);
        }
    }

    #[test]
    fn test_generate_names() {
        let mut gen = SyntheticGenerator::with_seed(1);
        assert_eq!(gen.generate(SetKind::Uniform, 3, 100, 100).name, "synthetic_uniform");
        assert_eq!(gen.generate(SetKind::Strips, 3, 100, 100).name, "synthetic_strips");
    }
}
