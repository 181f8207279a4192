//! Material, positional and mobility evaluation.

use cozy_chess::{Board, Color, GameStatus, Piece, Square};

/// Scores are kept in tenths of a centipawn so the mobility term stays
/// integral: a pawn is worth 1000 units, one legal move 1 unit.
pub const SCORE_SCALE: i32 = 10;

/// Sentinel for a decided game, strictly outside any reachable finite
/// evaluation. Positive favors White, negative favors Black.
pub const MATE_SCORE: i32 = 1_000_000;

/// Material values in centipawns, indexed by `Piece as usize`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20_000];

/// Pawn square bonuses from White's perspective (index 0 = a1).
/// Rewards advancement and central control.
const PAWN_TABLE: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0, //
    5, 10, 10, -20, -20, 10, 10, 5, //
    5, -5, -10, 0, 0, -10, -5, 5, //
    0, 0, 0, 20, 20, 0, 0, 0, //
    5, 5, 10, 25, 25, 10, 5, 5, //
    10, 10, 20, 30, 30, 20, 10, 10, //
    50, 50, 50, 50, 50, 50, 50, 50, //
    0, 0, 0, 0, 0, 0, 0, 0, //
];

/// Knight square bonuses from White's perspective; prefers the center.
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50, //
    -40, -20, 0, 5, 5, 0, -20, -40, //
    -30, 5, 10, 15, 15, 10, 5, -30, //
    -30, 0, 15, 20, 20, 15, 0, -30, //
    -30, 5, 15, 20, 20, 15, 5, -30, //
    -30, 0, 10, 15, 15, 10, 0, -30, //
    -40, -20, 0, 0, 0, 0, -20, -40, //
    -50, -40, -30, -30, -30, -30, -40, -50, //
];

/// Statically evaluates the position.
///
/// Returns a score in tenths of a centipawn from White's perspective:
/// - Positive = good for White
/// - Negative = good for Black
/// - 0 = balanced or drawn position
///
/// Checkmate evaluates to `MATE_SCORE` in the mating side's favor;
/// stalemate, a drawn position or insufficient material to exactly 0.
pub fn evaluate(board: &Board) -> i32 {
    match board.status() {
        GameStatus::Won => {
            // The side to move has been checkmated.
            return match board.side_to_move() {
                Color::White => -MATE_SCORE,
                Color::Black => MATE_SCORE,
            };
        }
        GameStatus::Drawn => return 0,
        GameStatus::Ongoing => {}
    }
    if insufficient_material(board) {
        return 0;
    }

    let mut cp = 0i32;
    for color in Color::ALL {
        let sign = match color {
            Color::White => 1,
            Color::Black => -1,
        };
        for piece in Piece::ALL {
            for sq in board.colored_pieces(color, piece) {
                cp += sign * PIECE_VALUES[piece as usize];
                cp += sign * square_bonus(piece, sq, color);
            }
        }
    }

    cp * SCORE_SCALE + mobility(board)
}

/// Piece-square bonus in centipawns. Tables are oriented for White and
/// rank-mirrored for Black; only pawns and knights carry one.
fn square_bonus(piece: Piece, sq: Square, color: Color) -> i32 {
    let sq = match color {
        Color::White => sq,
        Color::Black => sq.flip_rank(),
    };
    match piece {
        Piece::Pawn => PAWN_TABLE[sq as usize],
        Piece::Knight => KNIGHT_TABLE[sq as usize],
        _ => 0,
    }
}

/// Mobility tie-breaker: one unit (0.1 centipawn) per legal move, for both
/// sides. The opponent's count is sampled with a null move, which is not
/// available while the mover is in check; then only the mover contributes.
fn mobility(board: &Board) -> i32 {
    let mover = count_moves(board) as i32;
    let opponent = board
        .null_move()
        .map(|b| count_moves(&b) as i32)
        .unwrap_or(0);
    match board.side_to_move() {
        Color::White => mover - opponent,
        Color::Black => opponent - mover,
    }
}

fn count_moves(board: &Board) -> u32 {
    let mut count = 0;
    board.generate_moves(|moves| {
        count += moves.len() as u32;
        false
    });
    count
}

/// Neither side can force mate: bare kings, or a single minor piece
/// beside them. The rules engine does not track this draw itself.
pub fn insufficient_material(board: &Board) -> bool {
    let heavy =
        board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !heavy.is_empty() {
        return false;
    }
    let minors = board.pieces(Piece::Knight) | board.pieces(Piece::Bishop);
    minors.len() <= 1
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
