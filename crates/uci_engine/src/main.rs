//! UCI front end for the minimax engine.
//!
//! The only consumer of `pick_best_move`: it keeps the current position,
//! forwards `go` to the search, and renders the answer as UCI notation.
//! stdout carries the protocol; diagnostics go to stderr via `tracing`.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use cozy_chess::{Board, Color, File, Move, Piece, Rank, Square};
use minimax_engine::{pick_best_move, SearchParams, SCORE_SCALE};
use tracing::warn;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut board = Board::default();
    let mut params = SearchParams::default();

    for line in stdin.lock().lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name Minimax v0.1")?;
                writeln!(stdout, "id author minimax_engine")?;
                writeln!(stdout, "option name Depth type spin default 3 min 1 max 8")?;
                writeln!(stdout, "uciok")?;
                stdout.flush()?;
            }
            "isready" => {
                writeln!(stdout, "readyok")?;
                stdout.flush()?;
            }
            "setoption" => set_option(&mut params, &parts[1..]),
            "ucinewgame" => {
                board = Board::default();
            }
            "position" => match parse_position(&parts[1..]) {
                Ok(parsed) => board = parsed,
                // Malformed input is reported and dropped, never searched.
                Err(err) => warn!(%err, "ignoring position command"),
            },
            "go" => {
                // `go` asks us to move for whichever side is on turn.
                params.automated_side = board.side_to_move();
                let mut nodes = 0;
                match pick_best_move(&board, &params, &mut nodes) {
                    Some((mv, score)) => {
                        writeln!(
                            stdout,
                            "info depth {} score cp {} nodes {}",
                            params.depth,
                            relative_cp(score, params.automated_side),
                            nodes
                        )?;
                        writeln!(stdout, "bestmove {}", display_move(&board, mv))?;
                    }
                    // No legal move: the game is already over.
                    None => writeln!(stdout, "bestmove 0000")?,
                }
                stdout.flush()?;
            }
            "quit" => break,
            _ => {
                // ignore unknown commands
            }
        }
    }
    Ok(())
}

/// Example: `setoption name Depth value 4`
fn set_option(params: &mut SearchParams, parts: &[&str]) {
    let name = parts
        .iter()
        .position(|&p| p == "name")
        .and_then(|i| parts.get(i + 1));
    let value = parts
        .iter()
        .position(|&p| p == "value")
        .and_then(|i| parts.get(i + 1));
    if let (Some(&"Depth"), Some(value)) = (name, value) {
        if let Ok(depth) = value.parse::<u8>() {
            params.depth = depth.clamp(1, 8);
        }
    }
}

/// Orients a White-positive score to the automated player's perspective
/// and rounds it to whole centipawns, as `info score cp` expects.
fn relative_cp(score: i32, side: Color) -> i32 {
    let oriented = match side {
        Color::White => score,
        Color::Black => -score,
    };
    oriented / SCORE_SCALE
}

/// Parses `position startpos|fen <fen> [moves <uci>...]`.
fn parse_position(parts: &[&str]) -> Result<Board> {
    let (mut board, rest) = match parts.first() {
        Some(&"startpos") => (Board::default(), &parts[1..]),
        Some(&"fen") => {
            let fen_len = parts[1..].iter().take_while(|&&p| p != "moves").count();
            let fen = parts[1..1 + fen_len].join(" ");
            let board = fen
                .parse::<Board>()
                .map_err(|err| anyhow!("bad fen {fen:?}: {err}"))?;
            (board, &parts[1 + fen_len..])
        }
        _ => return Err(anyhow!("position needs startpos or fen")),
    };

    let moves: &[&str] = match rest.first() {
        Some(&"moves") => &rest[1..],
        _ => &[],
    };
    for token in moves {
        let mv =
            parse_move(&board, token).ok_or_else(|| anyhow!("illegal move {token:?}"))?;
        board.play(mv);
    }
    Ok(board)
}

/// Parses a UCI move against the current position. Returns `None` for
/// unparseable or illegal moves.
fn parse_move(board: &Board, token: &str) -> Option<Move> {
    let mv: Move = token.parse().ok()?;
    let candidate = normalize_castling(board, mv);
    let mut found = None;
    board.generate_moves(|batch| {
        for legal in batch {
            if legal == candidate {
                found = Some(legal);
                return true;
            }
        }
        false
    });
    found
}

/// GUIs send castling as the king's two-square step; the rules engine
/// encodes it as king-takes-own-rook.
fn normalize_castling(board: &Board, mut mv: Move) -> Move {
    let back = Rank::First.relative_to(board.side_to_move());
    if board.piece_on(mv.from) != Some(Piece::King) || mv.from != Square::new(File::E, back) {
        return mv;
    }
    let rights = board.castle_rights(board.side_to_move());
    if mv.to == Square::new(File::G, back) {
        if let Some(rook) = rights.short {
            mv.to = Square::new(rook, back);
        }
    } else if mv.to == Square::new(File::C, back) {
        if let Some(rook) = rights.long {
            mv.to = Square::new(rook, back);
        }
    }
    mv
}

/// Renders a move for UCI output, undoing the king-takes-own-rook
/// castling encoding.
fn display_move(board: &Board, mv: Move) -> String {
    let side = board.side_to_move();
    let back = Rank::First.relative_to(side);
    let rights = board.castle_rights(side);
    if board.piece_on(mv.from) == Some(Piece::King) && mv.to.rank() == back {
        if Some(mv.to.file()) == rights.short {
            return Move {
                from: mv.from,
                to: Square::new(File::G, back),
                promotion: None,
            }
            .to_string();
        }
        if Some(mv.to.file()) == rights.long {
            return Move {
                from: mv.from,
                to: Square::new(File::C, back),
                promotion: None,
            }
            .to_string();
        }
    }
    mv.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_startpos_with_moves() {
        let board = parse_position(&["startpos", "moves", "e2e4", "e7e5"]).unwrap();
        let mut expected = Board::default();
        expected.play("e2e4".parse().unwrap());
        expected.play("e7e5".parse().unwrap());
        assert_eq!(board.to_string(), expected.to_string());
    }

    #[test]
    fn parses_fen_position() {
        let fen = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";
        let parts: Vec<&str> = std::iter::once("fen").chain(fen.split(' ')).collect();
        let board = parse_position(&parts).unwrap();
        assert_eq!(board.to_string(), fen);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_position(&["fen", "not", "a", "fen"]).is_err());
        assert!(parse_position(&["startpos", "moves", "e2e5"]).is_err());
        assert!(parse_position(&[]).is_err());
    }

    #[test]
    fn accepts_uci_castling_notation() {
        let board: Board = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4"
            .parse()
            .unwrap();
        let mv = parse_move(&board, "e1g1").expect("short castle should be legal");
        assert_eq!(mv.to.to_string(), "h1");
        assert_eq!(display_move(&board, mv), "e1g1");
    }

    #[test]
    fn info_score_is_from_the_automated_side() {
        // A queen up for White reads as +900 for White, -900 for Black.
        assert_eq!(relative_cp(900 * SCORE_SCALE, Color::White), 900);
        assert_eq!(relative_cp(900 * SCORE_SCALE, Color::Black), -900);
        // Sub-centipawn mobility units truncate toward zero.
        assert_eq!(relative_cp(-55, Color::Black), 5);
    }

    #[test]
    fn depth_option_is_clamped() {
        let mut params = SearchParams::default();
        set_option(&mut params, &["name", "Depth", "value", "99"]);
        assert_eq!(params.depth, 8);
        set_option(&mut params, &["name", "Depth", "value", "2"]);
        assert_eq!(params.depth, 2);
        set_option(&mut params, &["name", "Other", "value", "5"]);
        assert_eq!(params.depth, 2);
    }
}
