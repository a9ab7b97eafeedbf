//! Backtracking search over placement sequences.
//!
//! The search keeps an explicit stack of frames, one per depth. Frame `d`
//! holds the rectangles placed by frames `0..d` and tries to place the next
//! queue item at the open anchor with the highest coverage. When no remaining
//! item fits, the frame is terminal: its cumulative padded square is compared
//! against the best sequence found so far and the search backtracks.
//!
//! Frames no deeper than the branching depth limit get one retry on backtrack,
//! resuming the scan after the item they placed. Deeper frames commit greedily.
//!
//! Anchor validity is depth-relative (see [`Position`](pagefill_core::Position)).
//! Each frame remembers which anchors its choice closed and reopens exactly
//! those when the choice is withdrawn.

use pagefill_core::{
    Coord, Item, PageBounds, PagePlacement, PaddedRect, Point, SearchStats, Size, Spacing,
};

use crate::attempt::{candidate_anchors, try_place, Layout};
use crate::placed::PlacedRectangle;
use crate::queue::PlacementQueue;

/// How far a frame has explored its alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessState {
    /// Nothing committed yet.
    Fresh,
    /// First choice committed; one retry remains on backtrack.
    Retry,
    /// No alternatives left; backtracking pops the frame.
    Exhausted,
}

/// Reference to a hosted anchor: arena index and corner slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PositionRef {
    rect: usize,
    slot: usize,
}

/// The placement a frame committed to.
#[derive(Debug, Clone)]
struct Choice {
    queue_index: usize,
    anchor: Point,
    rotated: bool,
    rect_index: usize,
    closed: Vec<PositionRef>,
}

/// One level of the explicit search stack.
#[derive(Debug, Clone)]
struct SearchFrame {
    process_state: ProcessState,
    cumulative_coverage: Coord,
    cumulative_square: Coord,
    initial_queue_index: usize,
    actual_queue_index: usize,
    chosen: Option<Choice>,
    placed_rectangles: Vec<usize>,
}

impl SearchFrame {
    fn root() -> Self {
        Self {
            process_state: ProcessState::Fresh,
            cumulative_coverage: 0,
            cumulative_square: 0,
            initial_queue_index: 0,
            actual_queue_index: 0,
            chosen: None,
            placed_rectangles: vec![0],
        }
    }
}

/// Best placement found for one (item, orientation) scan.
#[derive(Debug, Clone)]
struct Candidate {
    queue_index: usize,
    anchor: Point,
    rotated: bool,
    size: Size,
    coverage: Coord,
    touching: Vec<usize>,
}

/// One step of a recorded placement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChainLink {
    queue_index: usize,
    position: Point,
    rotated: bool,
}

#[derive(Debug, Clone)]
struct BestChain {
    square: Coord,
    coverage: Coord,
    links: Vec<ChainLink>,
}

/// Placements and leftovers produced by one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<I> {
    /// Placed items with their top-left item pixel, in placement order.
    pub placed: Vec<PagePlacement<I>>,
    /// Queue items that are not part of the best sequence, in queue order.
    pub leftover: Vec<I>,
    /// Cumulative padded square of the placed items.
    pub placed_square: Coord,
    /// Search counters.
    pub stats: SearchStats,
}

/// Mutable state owned by a single search run.
struct SearchState<I> {
    queue: PlacementQueue<I>,
    arena: Vec<PlacedRectangle>,
    stack: Vec<SearchFrame>,
    best: Option<BestChain>,
    stats: SearchStats,
}

/// Backtracking search engine for one page.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    bounds: PageBounds,
    spacing: Spacing,
    auto_rotate: bool,
    branching_depth_limit: usize,
}

impl SearchEngine {
    /// Creates an engine for the given page bounds.
    pub fn new(bounds: PageBounds, spacing: Spacing) -> Self {
        Self {
            bounds,
            spacing,
            auto_rotate: false,
            branching_depth_limit: 0,
        }
    }

    /// Enables or disables 90 degree rotation.
    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    /// Sets the deepest frame that retries on backtrack.
    pub fn with_branching_depth_limit(mut self, limit: usize) -> Self {
        self.branching_depth_limit = limit;
        self
    }

    /// Searches for the placement sequence with the largest padded square.
    ///
    /// Never fails: if not even the first item fits, everything is leftover.
    pub fn search<I: Item>(&self, queue: PlacementQueue<I>) -> SearchOutcome<I> {
        let mut state = SearchState {
            stats: SearchStats {
                queue_len: queue.len(),
                ..SearchStats::default()
            },
            queue,
            arena: vec![PlacedRectangle::seed(&self.bounds)],
            stack: vec![SearchFrame::root()],
            best: None,
        };

        while let Some(depth) = state.stack.len().checked_sub(1) {
            match self.scan(&state, depth) {
                Some(candidate) => self.commit(&mut state, depth, candidate),
                None => {
                    self.record_terminal(&mut state, depth);
                    self.backtrack(&mut state);
                }
            }
        }

        self.extract(state)
    }

    /// Finds the first unlocked item at or after the frame's scan index that
    /// fits somewhere, with its best anchor and orientation.
    fn scan<I: Item>(&self, state: &SearchState<I>, depth: usize) -> Option<Candidate> {
        let frame = &state.stack[depth];
        let layout = Layout::new(&state.arena, &frame.placed_rectangles);
        let pool: Vec<Point> = frame
            .placed_rectangles
            .iter()
            .flat_map(|&r| state.arena[r].open_positions(depth).map(|(_, p)| p))
            .collect();
        if pool.is_empty() {
            return None;
        }

        let branching = depth <= self.branching_depth_limit;
        let mut index = frame.actual_queue_index;
        while let Some(queue_index) = state.queue.first_unlocked_from(index) {
            let entry = state.queue.get(queue_index)?;
            let normal = entry.padded();
            let turned = entry.padded_rotated();
            let try_turned = self.auto_rotate && turned != normal;

            let found = if try_turned && branching {
                let upright = self.best_anchor(queue_index, normal, false, &pool, layout);
                let rotated = self.best_anchor(queue_index, turned, true, &pool, layout);
                match (upright, rotated) {
                    (Some(u), Some(r)) => Some(if r.coverage > u.coverage { r } else { u }),
                    (u, r) => u.or(r),
                }
            } else {
                self.best_anchor(queue_index, normal, false, &pool, layout)
                    .or_else(|| {
                        try_turned
                            .then(|| self.best_anchor(queue_index, turned, true, &pool, layout))
                            .flatten()
                    })
            };

            if found.is_some() {
                return found;
            }
            index = queue_index + 1;
        }
        None
    }

    /// Highest-coverage anchor for one orientation; ties keep the first found.
    fn best_anchor(
        &self,
        queue_index: usize,
        size: Size,
        rotated: bool,
        pool: &[Point],
        layout: Layout<'_>,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for &position in pool {
            for anchor in candidate_anchors(position, size, layout, &self.bounds) {
                let Ok(attempt) = try_place(anchor, size, layout, &self.bounds, self.spacing)
                else {
                    continue;
                };
                if best.as_ref().map_or(true, |b| attempt.coverage > b.coverage) {
                    best = Some(Candidate {
                        queue_index,
                        anchor: attempt.anchor,
                        rotated,
                        size,
                        coverage: attempt.coverage,
                        touching: attempt.touching,
                    });
                }
            }
        }
        best
    }

    /// Locks the candidate's item, records the choice on the frame at
    /// `depth` and pushes the next frame.
    fn commit<I>(&self, state: &mut SearchState<I>, depth: usize, candidate: Candidate) {
        let rect = PaddedRect::at(candidate.anchor, candidate.size);
        let rect_index = state.arena.len();

        let mut closed = Vec::new();
        for &member in &state.stack[depth].placed_rectangles {
            let host = &mut state.arena[member];
            for slot in 0..host.positions().len() {
                let position = host.position_mut(slot);
                if rect.shadows(position.coordinates()) && position.close(depth) {
                    closed.push(PositionRef { rect: member, slot });
                }
            }
        }

        let mut placed = PlacedRectangle::new(
            candidate.queue_index,
            rect,
            candidate.rotated,
            candidate.touching,
        );
        // The new rectangle's own top-left corner is the anchor it occupies.
        placed.position_mut(0).close(depth);
        state.arena.push(placed);
        state.queue.lock(candidate.queue_index);

        let frame = &mut state.stack[depth];
        debug_assert!(frame.chosen.is_none(), "frame {} committed twice", depth);
        let branching = depth <= self.branching_depth_limit;
        frame.process_state = match frame.process_state {
            ProcessState::Fresh if branching => ProcessState::Retry,
            _ => ProcessState::Exhausted,
        };
        frame.actual_queue_index = candidate.queue_index;
        frame.chosen = Some(Choice {
            queue_index: candidate.queue_index,
            anchor: candidate.anchor,
            rotated: candidate.rotated,
            rect_index,
            closed,
        });

        let mut placed_rectangles = frame.placed_rectangles.clone();
        placed_rectangles.push(rect_index);
        let next = SearchFrame {
            process_state: ProcessState::Fresh,
            cumulative_coverage: frame.cumulative_coverage + candidate.coverage,
            cumulative_square: frame.cumulative_square + rect.square(),
            initial_queue_index: candidate.queue_index + 1,
            actual_queue_index: candidate.queue_index + 1,
            chosen: None,
            placed_rectangles,
        };
        state.stack.push(next);
        state.stats.frames_pushed += 1;
    }

    /// Compares a terminal frame against the best sequence so far.
    fn record_terminal<I>(&self, state: &mut SearchState<I>, depth: usize) {
        let frame = &state.stack[depth];
        let square = frame.cumulative_square;
        state.stats.terminal_frames += 1;
        state.stats.terminal_squares.push(square);
        log::trace!(
            "terminal frame at depth {} (scan from {}): square {}, coverage {}",
            depth,
            frame.initial_queue_index,
            square,
            frame.cumulative_coverage
        );

        if state.best.as_ref().map_or(true, |b| square > b.square) {
            let links = state.stack[..depth]
                .iter()
                .filter_map(|f| f.chosen.as_ref())
                .map(|choice| ChainLink {
                    queue_index: choice.queue_index,
                    position: choice.anchor,
                    rotated: choice.rotated,
                })
                .collect();
            state.best = Some(BestChain {
                square,
                coverage: frame.cumulative_coverage,
                links,
            });
        }
    }

    /// Pops the terminal frame and unwinds until a frame with a retry left.
    fn backtrack<I>(&self, state: &mut SearchState<I>) {
        state.stack.pop();
        while let Some(frame) = state.stack.last_mut() {
            state.stats.backtracks += 1;
            if let Some(choice) = frame.chosen.take() {
                state.queue.unlock(choice.queue_index);
                for r in &choice.closed {
                    state.arena[r.rect].position_mut(r.slot).reopen();
                }
                state.arena.truncate(choice.rect_index);
            }

            if frame.process_state == ProcessState::Retry {
                frame.actual_queue_index += 1;
                return;
            }
            state.stack.pop();
        }
    }

    /// Re-walks the best sequence into placements and leftovers.
    fn extract<I: Item>(&self, state: SearchState<I>) -> SearchOutcome<I> {
        let mut stats = state.stats;
        let best = state.best.unwrap_or(BestChain {
            square: 0,
            coverage: 0,
            links: Vec::new(),
        });
        stats.best_square = best.square;
        stats.best_coverage = best.coverage;

        let mut slots: Vec<Option<I>> = state.queue.into_items().into_iter().map(Some).collect();
        let mut placed = Vec::with_capacity(best.links.len());
        for link in &best.links {
            let Some(mut item) = slots.get_mut(link.queue_index).and_then(Option::take) else {
                unreachable!("queue item {} placed twice", link.queue_index);
            };
            if link.rotated {
                let turned = item.rotated_size();
                item.set_size(turned);
            }
            placed.push(PagePlacement::new(item, link.position.offset(1, 1), link.rotated));
        }
        let leftover: Vec<I> = slots.into_iter().flatten().collect();
        debug_assert_eq!(placed.len() + leftover.len(), stats.queue_len);

        log::debug!(
            "search placed {} of {} items (square {}, {} frames, {} terminal, {} backtracks)",
            placed.len(),
            stats.queue_len,
            best.square,
            stats.frames_pushed,
            stats.terminal_frames,
            stats.backtracks
        );

        SearchOutcome {
            placed,
            leftover,
            placed_square: best.square,
            stats,
        }
    }
}
