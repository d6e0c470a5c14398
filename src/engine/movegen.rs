//! Move generation.
//!
//! Two explicitly separate generation modes:
//!
//! 1. *Pseudo-legal*: movement-pattern destinations only, ignoring whether
//!    the mover's own king ends up attacked. This is what opponent-reply and
//!    attacked-square queries use.
//! 2. *Legal*: pseudo-legal candidates (plus castling, for kings), each
//!    filtered by a one-level simulation — teleport the piece on a snapshot
//!    and ask whether the opponent's pseudo-legal replies reach the mover's
//!    king.
//!
//! Pseudo-legal generation never calls into the legal variant, so the
//! simulation recursion is bounded to depth one by structure, not by a flag.

use crate::engine::board::Board;
use crate::engine::types::{PieceKind, Side, Square};

// =========================================================================
// Direction and offset tables
// =========================================================================

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Ray directions for sliding pieces; empty for everything else.
const fn slide_dirs(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Bishop => &BISHOP_DIRS,
        PieceKind::Rook => &ROOK_DIRS,
        PieceKind::Queen => &QUEEN_DIRS,
        _ => &[],
    }
}

// =========================================================================
// Whole-side aggregate
// =========================================================================

/// Pseudo-legal answer for an entire side.
#[derive(Clone, Debug, Default)]
pub struct SideMoves {
    /// Union of every piece's pseudo-legal destinations.
    pub destinations: Vec<Square>,
    /// Some destination lands on a square holding the opposing king. This is
    /// the crate's check detector, reused for castling legality and for
    /// mate/stalemate classification.
    pub enemy_king_attacked: bool,
}

impl SideMoves {
    #[inline]
    fn reaches(&self, sq: Square) -> bool {
        self.destinations.contains(&sq)
    }
}

// =========================================================================
// Public API
// =========================================================================

/// Pseudo-legal destinations for the piece on `sq`. Empty when the square is
/// unoccupied or off the board.
pub fn pseudo_moves(board: &Board, sq: Square) -> Vec<Square> {
    let side = board.color(sq);
    if !side.is_player() {
        return Vec::new();
    }
    let kind = board.piece(sq);
    match kind {
        PieceKind::Pawn => pawn_moves(board, sq, side),
        PieceKind::Knight => leaper_moves(board, sq, side, &KNIGHT_OFFSETS),
        PieceKind::King => leaper_moves(board, sq, side, &KING_OFFSETS),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_moves(board, sq, side, slide_dirs(kind))
        }
        PieceKind::None => Vec::new(),
    }
}

/// Pseudo-legal destinations for every piece of `side`, with the
/// opposing-king-attacked flag.
pub fn side_pseudo_moves(board: &Board, side: Side) -> SideMoves {
    let mut aggregate = SideMoves::default();
    if !side.is_player() {
        return aggregate;
    }

    for row in 0..8 {
        for file in 0..8 {
            let from = Square::new(row, file);
            if board.color(from) != side {
                continue;
            }
            let dests = pseudo_moves(board, from);
            for &to in &dests {
                if board.piece(to) == PieceKind::King && board.color(to) == side.opponent() {
                    aggregate.enemy_king_attacked = true;
                }
            }
            aggregate.destinations.extend(dests);
        }
    }
    aggregate
}

/// Is `side`'s king attacked by the opponent's pseudo-legal replies?
#[inline]
pub fn is_in_check(board: &Board, side: Side) -> bool {
    side_pseudo_moves(board, side.opponent()).enemy_king_attacked
}

/// Legal destinations for the piece on `sq`: pseudo-legal moves, castling
/// candidates when the piece is a king, minus everything that would leave the
/// mover's own king attacked.
pub fn legal_moves(board: &Board, sq: Square) -> Vec<Square> {
    let side = board.color(sq);
    if !side.is_player() {
        return Vec::new();
    }

    let mut candidates = pseudo_moves(board, sq);
    if board.piece(sq) == PieceKind::King {
        candidates.extend(castle_candidates(board, sq, side));
    }

    // One-level look-ahead: raw relocation on a snapshot, then the
    // opponent's pseudo-legal replies decide. The reply generation must not
    // recurse into this function or generation would diverge.
    candidates.retain(|&to| {
        let mut sim = board.snapshot();
        sim.teleport(sq, to);
        !side_pseudo_moves(&sim, side.opponent()).enemy_king_attacked
    });
    candidates
}

/// Whether `side` has at least one legal move anywhere.
pub fn side_has_legal_move(board: &Board, side: Side) -> bool {
    if !side.is_player() {
        return false;
    }
    for row in 0..8 {
        for file in 0..8 {
            let from = Square::new(row, file);
            if board.color(from) == side && !legal_moves(board, from).is_empty() {
                return true;
            }
        }
    }
    false
}

// =========================================================================
// Pawn moves
// =========================================================================

fn pawn_moves(board: &Board, sq: Square, side: Side) -> Vec<Square> {
    let mut moves = Vec::new();
    let (dir, start_row): (i8, i8) = match side {
        Side::White => (1, 1),
        _ => (-1, 6),
    };

    // Forward steps: one square, and two from the start row when both
    // intervening squares are empty.
    let one = sq.offset(dir, 0);
    if one.in_bounds() && board.color(one) == Side::None {
        moves.push(one);
        let two = sq.offset(dir * 2, 0);
        if sq.row == start_row && board.color(two) == Side::None {
            moves.push(two);
        }
    }

    // Diagonal captures onto enemy-occupied squares. Off-board diagonals
    // answer `Side::None` and drop out naturally.
    for d_file in [-1, 1] {
        let diag = sq.offset(dir, d_file);
        if board.color(diag) == side.opponent() {
            moves.push(diag);
        }
    }

    // A live en-passant target diagonally ahead is an extra capture, provided
    // the victim belongs to the other player.
    if let Some(ep) = board.en_passant {
        if ep.target.row == sq.row + dir
            && (ep.target.file - sq.file).abs() == 1
            && board.color(ep.victim) == side.opponent()
        {
            moves.push(ep.target);
        }
    }

    moves
}

// =========================================================================
// Leaper moves (knight, king)
// =========================================================================

fn leaper_moves(board: &Board, sq: Square, side: Side, offsets: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(d_row, d_file) in offsets {
        let to = sq.offset(d_row, d_file);
        if to.in_bounds() && board.color(to) != side {
            moves.push(to);
        }
    }
    moves
}

// =========================================================================
// Slider moves (bishop, rook, queen)
// =========================================================================

fn slider_moves(board: &Board, sq: Square, side: Side, dirs: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(d_row, d_file) in dirs {
        for step in 1..8 {
            let to = sq.offset(d_row * step, d_file * step);
            if !to.in_bounds() {
                break;
            }
            let occupant = board.color(to);
            if occupant != side {
                moves.push(to);
            }
            if occupant != Side::None {
                break;
            }
        }
    }
    moves
}

// =========================================================================
// Castling
// =========================================================================

/// Castling destinations for the king on `king_sq`. Conditions: the king has
/// not moved and is not in check; per rook side, the rook-home flag is unset,
/// the squares between king and rook are empty, and no square the king
/// transits (its own included) is reachable by an opponent pseudo-legal move.
fn castle_candidates(board: &Board, king_sq: Square, side: Side) -> Vec<Square> {
    let record = board.castle_record(side);
    if record.king_moved {
        return Vec::new();
    }

    let threats = side_pseudo_moves(board, side.opponent());
    if threats.enemy_king_attacked {
        return Vec::new();
    }

    let mut moves = Vec::new();
    if !record.kingside_rook_moved {
        if let Some(to) = castle_toward(board, king_sq, 7, &threats) {
            moves.push(to);
        }
    }
    if !record.queenside_rook_moved {
        if let Some(to) = castle_toward(board, king_sq, 0, &threats) {
            moves.push(to);
        }
    }
    moves
}

/// One castling side: walk from the king toward the rook's home file.
fn castle_toward(
    board: &Board,
    king_sq: Square,
    rook_file: i8,
    threats: &SideMoves,
) -> Option<Square> {
    let row = king_sq.row;
    let dir: i8 = if rook_file > king_sq.file { 1 } else { -1 };

    // Squares strictly between king and rook must be empty. A king sitting
    // on or past the rook's file never walks onto it; bail out instead.
    let mut file = king_sq.file + dir;
    while file != rook_file {
        if !(0..8).contains(&file) {
            return None;
        }
        if board.piece(Square::new(row, file)) != PieceKind::None {
            return None;
        }
        file += dir;
    }

    // The king crosses its own square and two more; none may be attacked.
    for step in 0..=2 {
        let transit = Square::new(row, king_sq.file + dir * step);
        if !transit.in_bounds() || threats.reaches(transit) {
            return None;
        }
    }

    Some(Square::new(row, king_sq.file + dir * 2))
}

// =========================================================================
// Tests
// =========================================================================
