//! Minimax Chess Engine
//!
//! Depth-bounded minimax search with alpha-beta pruning over positions
//! owned by the `cozy-chess` rules engine, scored by a material,
//! positional and mobility evaluation. The crate implements no chess
//! rules of its own: legality, move application and game-over detection
//! all come from the rules engine.

mod eval;
mod search;

use cozy_chess::{Board, Color, Move};

pub use eval::{evaluate, insufficient_material, MATE_SCORE, SCORE_SCALE};
pub use search::{minimax, pick_best_move};

/// Search configuration, replacing what would otherwise be global
/// defaults for the automated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum search depth in plies. The sole resource-control knob:
    /// a search always runs to completion at this depth.
    pub depth: u8,
    /// Side the automated player controls.
    pub automated_side: Color,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 3,
            automated_side: Color::Black,
        }
    }
}

/// Result of a root search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// The best move found (`None` if no legal moves exist)
    pub best_move: Option<Move>,
    /// Score of the best move in tenths of a centipawn, White-positive
    pub score: i32,
    /// Search depth used
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

/// Engine façade bundling the search with per-search statistics.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Runs a full search for the side to move and reports the outcome.
    pub fn search(&mut self, board: &Board, params: &SearchParams) -> SearchReport {
        self.nodes = 0;
        let result = pick_best_move(board, params, &mut self.nodes);

        SearchReport {
            best_move: result.map(|(mv, _)| mv),
            score: result.map(|(_, score)| score).unwrap_or(0),
            depth: params.depth,
            nodes: self.nodes,
        }
    }

    pub fn name(&self) -> &str {
        "Minimax v0.1"
    }

    /// Reset internal state for a new game.
    pub fn new_game(&mut self) {
        self.nodes = 0;
    }
}
