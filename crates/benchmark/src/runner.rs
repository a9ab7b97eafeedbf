//! Benchmark runner for synthetic item sets.

use std::time::Instant;

use pagefill::{PageFiller, PageOptions, VecSource};

use crate::result::{BenchmarkResult, PageSummary};
use crate::synthetic::ItemSet;

/// Configuration for benchmark runs.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Page layout used for every run.
    pub options: PageOptions,
    /// Number of runs per set (the fastest is reported).
    pub runs_per_set: usize,
    /// Whether to record placement coordinates.
    pub record_placements: bool,
    /// Whether to show progress.
    pub show_progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            options: PageOptions::new(2480, 3508)
                .with_spacing(10, 10)
                .with_auto_rotate(true),
            runs_per_set: 1,
            record_placements: false,
            show_progress: true,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a new benchmark configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page layout.
    pub fn with_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the number of runs per set.
    pub fn with_runs_per_set(mut self, n: usize) -> Self {
        self.runs_per_set = n.max(1);
        self
    }

    /// Records placement coordinates in the result.
    pub fn with_placements(mut self, record: bool) -> Self {
        self.record_placements = record;
        self
    }

    /// Enables or disables progress output.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// Benchmark runner.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Creates a new benchmark runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Paginates `set` and records per-page statistics.
    pub fn run_set(&self, set: &ItemSet) -> pagefill::Result<BenchmarkResult> {
        if self.config.show_progress {
            println!("\nBenchmarking set: {}", set.name);
            println!("  Items: {}", set.len());
            println!("  Total area: {}", set.total_area());
        }

        let mut best_time = u64::MAX;
        let mut pages = Vec::new();
        for run_idx in 0..self.config.runs_per_set {
            let mut filler = PageFiller::new(self.config.options.clone())?;
            let mut source = VecSource::new(set.items.iter().cloned());

            let start = Instant::now();
            let results = filler.paginate(&mut source)?;
            let elapsed = start.elapsed().as_millis() as u64;
            log::debug!("run {} of {}: {} pages in {}ms", run_idx + 1, set.name, results.len(), elapsed);

            if elapsed < best_time || pages.is_empty() {
                best_time = elapsed;
                pages = results
                    .iter()
                    .enumerate()
                    .map(|(i, page)| PageSummary::from_page(i + 1, page, self.config.record_placements))
                    .collect();
            }
        }

        let options = &self.config.options;
        Ok(BenchmarkResult {
            set_name: set.name.clone(),
            total_items: set.len(),
            page_size: [options.page_size.width, options.page_size.height],
            branching_depth_limit: options.branching_depth_limit,
            auto_rotate: options.auto_rotate,
            pages,
            time_ms: best_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{SetKind, SyntheticGenerator};

    #[test]
    fn test_run_places_every_item() {
        let options = PageOptions::new(300, 300).with_spacing(2, 2);
        let config = BenchmarkConfig::new()
            .with_options(options)
            .with_progress(false)
            .with_placements(true);
        let set = SyntheticGenerator::with_seed(9).generate(SetKind::Uniform, 40, 300, 300);

        let result = BenchmarkRunner::new(config).run_set(&set).unwrap();
        assert_eq!(result.placed_items(), 40);
        assert!(result.page_count() >= 1);
        let recorded: usize = result
            .pages
            .iter()
            .map(|p| p.placements.as_ref().map_or(0, Vec::len))
            .sum();
        assert_eq!(recorded, 40);
    }

    #[test]
    fn test_run_rejects_invalid_options() {
        let config = BenchmarkConfig::new()
            .with_options(PageOptions::new(0, 0))
            .with_progress(false);
        let set = SyntheticGenerator::with_seed(1).uniform(3, 5, 10);
        assert!(BenchmarkRunner::new(config).run_set(&set).is_err());
    }
}
