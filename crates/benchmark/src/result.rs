//! Benchmark result types and recording.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use pagefill_core::{Item, PageResult, RectItem};

/// Placement info for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementInfo {
    pub item_id: String,
    pub position: [i64; 2],
    pub size: [i64; 2],
    pub rotated: bool,
}

/// Summary of one filled page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    /// Page number, starting at 1
    pub page: usize,
    /// Items placed on the page
    pub placed: usize,
    /// Items carried over to the next page
    pub leftover: usize,
    /// Utilization ratio (0.0 - 1.0)
    pub utilization: f64,
    /// Search frames pushed
    pub frames: usize,
    /// Frames popped while backtracking
    pub backtracks: usize,
    /// Placement coordinates (optional, for visualization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placements: Option<Vec<PlacementInfo>>,
}

impl PageSummary {
    /// Summarizes page `page` (1-based).
    pub fn from_page(page: usize, result: &PageResult<RectItem>, with_placements: bool) -> Self {
        let placements = with_placements.then(|| {
            result
                .placements
                .iter()
                .map(|p| {
                    let size = p.item.size();
                    PlacementInfo {
                        item_id: p.item.id().to_string(),
                        position: [p.position.x, p.position.y],
                        size: [size.width, size.height],
                        rotated: p.rotated,
                    }
                })
                .collect()
        });

        Self {
            page,
            placed: result.placed_count(),
            leftover: result.leftover_count,
            utilization: result.utilization,
            frames: result.stats.frames_pushed,
            backtracks: result.stats.backtracks,
            placements,
        }
    }
}

/// Result of paginating one item set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Item set name
    pub set_name: String,
    /// Items in the set
    pub total_items: usize,
    /// Page width and height
    pub page_size: [i64; 2],
    /// Branching depth limit used
    pub branching_depth_limit: usize,
    /// Whether rotation was allowed
    pub auto_rotate: bool,
    /// Per-page summaries
    pub pages: Vec<PageSummary>,
    /// Computation time in milliseconds
    pub time_ms: u64,
}

impl BenchmarkResult {
    /// Number of pages used.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Items placed across all pages.
    pub fn placed_items(&self) -> usize {
        self.pages.iter().map(|p| p.placed).sum()
    }

    /// Search frames pushed across all pages.
    pub fn total_frames(&self) -> usize {
        self.pages.iter().map(|p| p.frames).sum()
    }

    /// Mean utilization over all pages except the last, which is usually
    /// only partly filled. Falls back to the last page for single-page runs.
    pub fn avg_utilization(&self) -> f64 {
        let full = match self.pages.len() {
            0 => return 0.0,
            1 => &self.pages[..],
            n => &self.pages[..n - 1],
        };
        full.iter().map(|p| p.utilization).sum::<f64>() / full.len() as f64
    }

    /// Saves results to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Prints a summary table.
    pub fn print_summary(&self) {
        println!("\n{:=<72}", "");
        println!(
            "{} ({} items, page {}x{}, depth {}, rotate {})",
            self.set_name,
            self.total_items,
            self.page_size[0],
            self.page_size[1],
            self.branching_depth_limit,
            self.auto_rotate
        );
        println!("{:=<72}", "");
        println!(
            "{:<6} {:>8} {:>10} {:>10} {:>10} {:>12}",
            "Page", "Placed", "Leftover", "Util%", "Frames", "Backtracks"
        );
        println!("{:-<72}", "");

        for page in &self.pages {
            println!(
                "{:<6} {:>8} {:>10} {:>10.1} {:>10} {:>12}",
                page.page,
                page.placed,
                page.leftover,
                page.utilization * 100.0,
                page.frames,
                page.backtracks
            );
        }

        println!("{:-<72}", "");
        println!(
            "pages={} placed={} avg_util={:.1}% frames={} time={}ms",
            self.page_count(),
            self.placed_items(),
            self.avg_utilization() * 100.0,
            self.total_frames(),
            self.time_ms
        );
        println!("{:=<72}\n", "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn page(n: usize, utilization: f64) -> PageSummary {
        PageSummary {
            page: n,
            placed: 2,
            leftover: 0,
            utilization,
            frames: 3,
            backtracks: 1,
            placements: None,
        }
    }

    fn result(pages: Vec<PageSummary>) -> BenchmarkResult {
        BenchmarkResult {
            set_name: "test".to_string(),
            total_items: 6,
            page_size: [100, 100],
            branching_depth_limit: 0,
            auto_rotate: false,
            pages,
            time_ms: 1,
        }
    }

    #[test]
    fn test_avg_utilization_skips_last_page() {
        let r = result(vec![page(1, 0.9), page(2, 0.7), page(3, 0.1)]);
        assert_relative_eq!(r.avg_utilization(), 0.8);
        assert_eq!(r.placed_items(), 6);
        assert_eq!(r.total_frames(), 9);
    }

    #[test]
    fn test_avg_utilization_single_page() {
        assert_relative_eq!(result(vec![page(1, 0.4)]).avg_utilization(), 0.4);
        assert_eq!(result(Vec::new()).avg_utilization(), 0.0);
    }

    #[test]
    fn test_json_skips_missing_placements() {
        let json = serde_json::to_string(&result(vec![page(1, 0.5)])).unwrap();
        assert!(json.contains("\"set_name\":\"test\""));
        assert!(!json.contains("placements"));
    }
}
