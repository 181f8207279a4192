//! Minimax search with alpha-beta pruning and root move selection.

use cozy_chess::{Board, Color, GameStatus, Move, Piece};
use tracing::debug;

use crate::eval::{evaluate, insufficient_material};
use crate::SearchParams;

/// Window sentinel, strictly above any mate score.
pub(crate) const INFINITY: i32 = i32::MAX / 2;

/// Searches the position and returns the best move with its score, or
/// `None` if no legal move exists.
///
/// Root moves are tried captures-first (a stable order, so ties keep the
/// enumeration order) to tighten the alpha-beta window early. The window
/// is shared across root siblings exactly as inside the tree.
///
/// A `None` at a position the caller believes is still in play signals an
/// inconsistency in the rules engine's terminal detection; it is reported
/// as "no move", never papered over with an arbitrary move.
pub fn pick_best_move(
    board: &Board,
    params: &SearchParams,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    let mut moves = legal_moves(board);
    if moves.is_empty() {
        return None;
    }
    order_moves(board, &mut moves);

    let maximizing = board.side_to_move() == Color::White;
    debug!(
        depth = params.depth,
        side = ?board.side_to_move(),
        automated = ?params.automated_side,
        root_moves = moves.len(),
        "starting search"
    );

    let mut best_move = None;
    let mut best_score = if maximizing { -INFINITY } else { INFINITY };
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;

    for mv in moves {
        let mut child = board.clone();
        child.play_unchecked(mv);
        *nodes += 1;

        let score = minimax(
            &child,
            params.depth.saturating_sub(1),
            alpha,
            beta,
            !maximizing,
            nodes,
        );

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    debug!(
        best_move = ?best_move.map(|mv| mv.to_string()),
        score = best_score,
        nodes = *nodes,
        "search complete"
    );
    best_move.map(|mv| (mv, best_score))
}

/// Recursive depth-bounded minimax with alpha-beta pruning.
///
/// At depth 0 or on a finished position this returns the static
/// evaluation. Pruning only skips subtrees that cannot influence the
/// result; the returned value always equals exhaustive minimax at the
/// same depth. Each child is explored on a snapshot of the board, so the
/// caller's position is never mutated.
pub fn minimax(
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 || board.status() != GameStatus::Ongoing || insufficient_material(board) {
        return evaluate(board);
    }

    let moves = legal_moves(board);
    if maximizing {
        let mut best = -INFINITY;
        for mv in moves {
            let mut child = board.clone();
            child.play_unchecked(mv);
            *nodes += 1;
            let score = minimax(&child, depth - 1, alpha, beta, false, nodes);
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break; // Beta cutoff
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for mv in moves {
            let mut child = board.clone();
            child.play_unchecked(mv);
            *nodes += 1;
            let score = minimax(&child, depth - 1, alpha, beta, true, nodes);
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break; // Alpha cutoff
            }
        }
        best
    }
}

pub(crate) fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    board.generate_moves(|batch| {
        moves.extend(batch);
        false
    });
    moves
}

/// Places every capture before every non-capture; the sort is stable so
/// ties keep the generator's order.
pub(crate) fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| !is_capture(board, mv));
}

/// A move is a capture if it lands on an enemy piece, or is a pawn
/// changing file (which covers en passant, where the target square is
/// empty). Castling is encoded king-takes-own-rook and never matches.
pub(crate) fn is_capture(board: &Board, mv: Move) -> bool {
    board.colors(!board.side_to_move()).has(mv.to)
        || (board.pieces(Piece::Pawn).has(mv.from) && mv.from.file() != mv.to.file())
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
