//! Mailbox chess position representation.
//!
//! `Board` stores piece placement as two parallel row-major 64-entry grids —
//! one of `PieceKind`, one of `Side` — plus en-passant state, per-side
//! castling records, and the promotion preference. Row 0 is White's home
//! rank; row 7 is Black's.
//!
//! Every well-behaved write goes through [`Board::set_piece`], which keeps
//! the core invariant: a square's kind is `None` exactly when its color is
//! `None`. Writing the grids independently can break it; [`Board::validate`]
//! reports such a breach as the crate's one fatal error.

use crate::engine::types::{CastleRecord, EngineError, PieceKind, Side, Square};

// ---------------------------------------------------------------------------
// EnPassant
// ---------------------------------------------------------------------------

/// A live en-passant opportunity, armed by the pawn double-step that just
/// happened. `target` is the square the pawn skipped over (where the capture
/// lands); `victim` is the pawn's actual square (what the capture removes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnPassant {
    pub target: Square,
    pub victim: Square,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A complete mutable chess position.
#[derive(Clone, Debug)]
pub struct Board {
    /// Piece kinds, row-major (`row * 8 + file`).
    pub pieces: [PieceKind; 64],
    /// Piece owners, parallel to `pieces`.
    pub colors: [Side; 64],

    /// Capture opportunity from the immediately preceding double-step, if any.
    /// Disarmed at the start of every move application.
    pub en_passant: Option<EnPassant>,

    pub white_castle: CastleRecord,
    pub black_castle: CastleRecord,

    /// What a pawn reaching its last rank turns into.
    promotion: PieceKind,
}

/// White's home rank layout, files 0..=7. Black mirrors it on row 7.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            pieces: [PieceKind::None; 64],
            colors: [Side::None; 64],
            en_passant: None,
            white_castle: CastleRecord::default(),
            black_castle: CastleRecord::default(),
            promotion: PieceKind::Queen,
        }
    }

    /// The standard starting position.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for file in 0..8 {
            board.set_piece(Square::new(0, file), BACK_RANK[file as usize], Side::White);
            board.set_piece(Square::new(1, file), PieceKind::Pawn, Side::White);
            board.set_piece(Square::new(6, file), PieceKind::Pawn, Side::Black);
            board.set_piece(Square::new(7, file), BACK_RANK[file as usize], Side::Black);
        }
        board
    }

    // -----------------------------------------------------------------------
    // Square accessors
    // -----------------------------------------------------------------------

    /// Piece kind on a square; `None` outside the board.
    #[inline]
    pub fn piece(&self, sq: Square) -> PieceKind {
        if sq.in_bounds() {
            self.pieces[sq.index()]
        } else {
            PieceKind::None
        }
    }

    /// Piece owner on a square; `None` outside the board.
    #[inline]
    pub fn color(&self, sq: Square) -> Side {
        if sq.in_bounds() {
            self.colors[sq.index()]
        } else {
            Side::None
        }
    }

    /// Write a square. No-op outside the board. Both grids are written
    /// together so the kind/color invariant is preserved.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, kind: PieceKind, side: Side) {
        if !sq.in_bounds() {
            return;
        }
        self.pieces[sq.index()] = kind;
        self.colors[sq.index()] = side;
    }

    /// Relocate whatever is on `from` to `to`, ignoring all chess rules.
    /// The source square becomes empty. Used for simulation snapshots and for
    /// the already-validated halves of castling and en passant.
    pub fn teleport(&mut self, from: Square, to: Square) {
        let kind = self.piece(from);
        let side = self.color(from);
        self.set_piece(to, kind, side);
        self.set_piece(from, PieceKind::None, Side::None);
    }

    /// Independent value copy for simulation. Mutating the copy never
    /// touches the live board.
    #[inline]
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    // -----------------------------------------------------------------------
    // Castling records
    // -----------------------------------------------------------------------

    /// The castling record for a player. `Side::None` answers a default
    /// (fully available) record that belongs to nobody.
    #[inline]
    pub fn castle_record(&self, side: Side) -> CastleRecord {
        match side {
            Side::White => self.white_castle,
            Side::Black => self.black_castle,
            Side::None => CastleRecord::default(),
        }
    }

    fn castle_record_mut(&mut self, side: Side) -> Option<&mut CastleRecord> {
        match side {
            Side::White => Some(&mut self.white_castle),
            Side::Black => Some(&mut self.black_castle),
            Side::None => None,
        }
    }

    // -----------------------------------------------------------------------
    // Promotion preference
    // -----------------------------------------------------------------------

    /// The kind a promoting pawn converts to.
    #[inline]
    pub fn promotion_preference(&self) -> PieceKind {
        self.promotion
    }

    /// Change the promotion preference. Only Queen, Rook, Bishop and Knight
    /// are accepted.
    pub fn set_promotion_preference(&mut self, kind: PieceKind) -> Result<(), EngineError> {
        if !kind.is_promotable() {
            return Err(EngineError::InvalidPromotion(kind));
        }
        self.promotion = kind;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Consistency
    // -----------------------------------------------------------------------

    /// Check the core invariant on every square: kind is `None` iff color is
    /// `None`. A breach means the representation is corrupt, not that a rule
    /// was broken, and is reported as the crate's fatal error.
    pub fn validate(&self) -> Result<(), EngineError> {
        for row in 0..8 {
            for file in 0..8 {
                let sq = Square::new(row, file);
                let empty_kind = self.pieces[sq.index()] == PieceKind::None;
                let empty_color = self.colors[sq.index()] == Side::None;
                if empty_kind != empty_color {
                    return Err(EngineError::Inconsistent { row, file });
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Move application (position-level)
    // -----------------------------------------------------------------------

    /// Apply an already-validated move: relocate the piece and resolve every
    /// special case in order — en-passant capture, en-passant re-arm,
    /// promotion, castling rook relocation, castling-rights bookkeeping.
    ///
    /// Legality is the caller's responsibility ([`crate::engine::Game`] checks
    /// turn order and legal destinations before calling this).
    pub fn apply_move(&mut self, from: Square, to: Square) {
        let mover_side = self.color(from);

        // Any move disarms the previous double-step window; only a fresh
        // double-step below re-arms it.
        let armed = self.en_passant.take();

        self.teleport(from, to);

        if self.piece(to) == PieceKind::Pawn {
            // Landing on a live target executes the capture: the victim sits
            // on a different square than the destination.
            if let Some(ep) = armed {
                if ep.target == to {
                    self.set_piece(ep.victim, PieceKind::None, Side::None);
                }
            }

            // Double-step: record the square passed over as the new target.
            if (from.row - to.row).abs() > 1 {
                let passed = match mover_side {
                    Side::White => to.offset(-1, 0),
                    _ => to.offset(1, 0),
                };
                self.en_passant = Some(EnPassant {
                    target: passed,
                    victim: to,
                });
            }

            // Promotion on the farthest rank for the mover.
            let last_row = match mover_side {
                Side::White => 7,
                _ => 0,
            };
            if to.row == last_row {
                self.set_piece(to, self.promotion, mover_side);
            }
        }

        // A king travelling more than one file is a castle: bring the rook
        // to the far side of the king.
        if self.piece(to) == PieceKind::King && (from.file - to.file).abs() > 1 {
            if to.file > from.file {
                self.teleport(Square::new(to.row, 7), Square::new(to.row, to.file - 1));
            } else {
                self.teleport(Square::new(to.row, 0), Square::new(to.row, to.file + 1));
            }
        }

        // Rights bookkeeping. King flag follows the mover; rook flags follow
        // the vacated home corner, whatever vacated it (a later piece leaving
        // a corner whose rook was captured still burns that flag).
        if self.piece(to) == PieceKind::King {
            if let Some(record) = self.castle_record_mut(mover_side) {
                record.king_moved = true;
            }
        }
        match (from.row, from.file) {
            (0, 0) => self.white_castle.queenside_rook_moved = true,
            (0, 7) => self.white_castle.kingside_rook_moved = true,
            (7, 0) => self.black_castle.queenside_rook_moved = true,
            (7, 7) => self.black_castle.kingside_rook_moved = true,
            _ => {}
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl std::fmt::Display for Board {
    /// 8-line text grid, farthest row first, `.` for empty squares.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..8).rev() {
            write!(f, "{row} ")?;
            for file in 0..8 {
                let sq = Square::new(row, file);
                let ch = self.piece(sq).to_char(self.color(sq)).unwrap_or('.');
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   0 1 2 3 4 5 6 7")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ===================================================================
    // Starting position
    // ===================================================================

    #[test]
    fn starting_back_ranks() {
        let board = Board::starting();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as i8;
            assert_eq!(board.piece(Square::new(0, file)), kind);
            assert_eq!(board.color(Square::new(0, file)), Side::White);
            assert_eq!(board.piece(Square::new(7, file)), kind);
            assert_eq!(board.color(Square::new(7, file)), Side::Black);
        }
    }

    #[test]
    fn starting_pawn_ranks() {
        let board = Board::starting();
        for file in 0..8 {
            assert_eq!(board.piece(Square::new(1, file)), PieceKind::Pawn);
            assert_eq!(board.color(Square::new(1, file)), Side::White);
            assert_eq!(board.piece(Square::new(6, file)), PieceKind::Pawn);
            assert_eq!(board.color(Square::new(6, file)), Side::Black);
        }
    }

    #[test]
    fn starting_middle_is_empty() {
        let board = Board::starting();
        for row in 2..6 {
            for file in 0..8 {
                let sq = Square::new(row, file);
                assert_eq!(board.piece(sq), PieceKind::None, "expected empty {sq}");
                assert_eq!(board.color(sq), Side::None);
            }
        }
    }

    #[test]
    fn starting_has_no_en_passant() {
        assert_eq!(Board::starting().en_passant, None);
    }

    // ===================================================================
    // Bounds behavior
    // ===================================================================

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let board = Board::starting();
        for sq in [
            Square::new(-1, 0),
            Square::new(0, -1),
            Square::new(8, 4),
            Square::new(4, 8),
        ] {
            assert_eq!(board.piece(sq), PieceKind::None);
            assert_eq!(board.color(sq), Side::None);
        }
    }

    #[test]
    fn out_of_bounds_write_is_noop() {
        let mut board = Board::empty();
        board.set_piece(Square::new(-3, 2), PieceKind::Queen, Side::White);
        board.set_piece(Square::new(2, 9), PieceKind::Queen, Side::White);
        assert!(board.validate().is_ok());
        for row in 0..8 {
            for file in 0..8 {
                assert_eq!(board.piece(Square::new(row, file)), PieceKind::None);
            }
        }
    }

    // ===================================================================
    // set_piece / teleport
    // ===================================================================

    #[test]
    fn set_and_clear_square() {
        let mut board = Board::empty();
        let sq = Square::new(3, 4);
        board.set_piece(sq, PieceKind::Knight, Side::Black);
        assert_eq!(board.piece(sq), PieceKind::Knight);
        assert_eq!(board.color(sq), Side::Black);

        board.set_piece(sq, PieceKind::None, Side::None);
        assert_eq!(board.piece(sq), PieceKind::None);
        assert_eq!(board.color(sq), Side::None);
    }

    #[test]
    fn teleport_moves_and_empties_source() {
        let mut board = Board::empty();
        let from = Square::new(0, 0);
        let to = Square::new(5, 5);
        board.set_piece(from, PieceKind::Rook, Side::White);

        board.teleport(from, to);
        assert_eq!(board.piece(to), PieceKind::Rook);
        assert_eq!(board.color(to), Side::White);
        assert_eq!(board.piece(from), PieceKind::None);
        assert_eq!(board.color(from), Side::None);
    }

    #[test]
    fn teleport_ignores_rules() {
        // A pawn "moving" backwards across the whole board — teleport does
        // not care.
        let mut board = Board::empty();
        board.set_piece(Square::new(6, 2), PieceKind::Pawn, Side::White);
        board.teleport(Square::new(6, 2), Square::new(0, 7));
        assert_eq!(board.piece(Square::new(0, 7)), PieceKind::Pawn);
    }

    // ===================================================================
    // Snapshot isolation
    // ===================================================================

    #[test]
    fn snapshot_is_independent() {
        let board = Board::starting();
        let mut copy = board.snapshot();
        copy.teleport(Square::new(0, 0), Square::new(4, 4));

        assert_eq!(board.piece(Square::new(0, 0)), PieceKind::Rook);
        assert_eq!(board.piece(Square::new(4, 4)), PieceKind::None);
        assert_eq!(copy.piece(Square::new(4, 4)), PieceKind::Rook);
    }

    // ===================================================================
    // Consistency
    // ===================================================================

    #[test]
    fn starting_board_is_consistent() {
        assert!(Board::starting().validate().is_ok());
    }

    #[test]
    fn validate_detects_mismatched_grids() {
        let mut board = Board::empty();
        // Corrupt a single entry behind set_piece's back.
        board.pieces[Square::new(2, 3).index()] = PieceKind::Bishop;
        match board.validate() {
            Err(EngineError::Inconsistent { row, file }) => {
                assert_eq!((row, file), (2, 3));
            }
            other => panic!("expected Inconsistent, got {other:?}"),
        }
    }

    // ===================================================================
    // Promotion preference
    // ===================================================================

    #[test]
    fn promotion_defaults_to_queen() {
        assert_eq!(Board::empty().promotion_preference(), PieceKind::Queen);
    }

    #[test]
    fn promotion_preference_accepts_minor_pieces() {
        let mut board = Board::empty();
        board.set_promotion_preference(PieceKind::Knight).unwrap();
        assert_eq!(board.promotion_preference(), PieceKind::Knight);
    }

    #[test]
    fn promotion_preference_rejects_king_and_pawn() {
        let mut board = Board::empty();
        assert!(board.set_promotion_preference(PieceKind::King).is_err());
        assert!(board.set_promotion_preference(PieceKind::Pawn).is_err());
        assert!(board.set_promotion_preference(PieceKind::None).is_err());
        assert_eq!(board.promotion_preference(), PieceKind::Queen);
    }

    // ===================================================================
    // apply_move: en passant bookkeeping
    // ===================================================================

    #[test]
    fn double_step_arms_en_passant() {
        let mut board = Board::starting();
        board.apply_move(Square::new(1, 4), Square::new(3, 4));
        let ep = board.en_passant.expect("double step should arm en passant");
        assert_eq!(ep.target, Square::new(2, 4));
        assert_eq!(ep.victim, Square::new(3, 4));
    }

    #[test]
    fn single_step_does_not_arm_en_passant() {
        let mut board = Board::starting();
        board.apply_move(Square::new(1, 4), Square::new(2, 4));
        assert_eq!(board.en_passant, None);
    }

    #[test]
    fn any_following_move_disarms_en_passant() {
        let mut board = Board::starting();
        board.apply_move(Square::new(1, 4), Square::new(3, 4));
        assert!(board.en_passant.is_some());
        board.apply_move(Square::new(6, 0), Square::new(5, 0));
        assert_eq!(board.en_passant, None);
    }

    #[test]
    fn en_passant_capture_removes_victim() {
        // White pawn on (4,4); Black answers with a double step to (4,3).
        let mut board = Board::empty();
        board.set_piece(Square::new(4, 4), PieceKind::Pawn, Side::White);
        board.set_piece(Square::new(6, 3), PieceKind::Pawn, Side::Black);
        board.apply_move(Square::new(6, 3), Square::new(4, 3));

        let target = board.en_passant.unwrap().target;
        assert_eq!(target, Square::new(5, 3));

        board.apply_move(Square::new(4, 4), target);
        assert_eq!(board.piece(target), PieceKind::Pawn);
        assert_eq!(board.color(target), Side::White);
        // The victim on (4,3) is gone, not the target square's occupant.
        assert_eq!(board.piece(Square::new(4, 3)), PieceKind::None);
    }

    // ===================================================================
    // apply_move: promotion
    // ===================================================================

    #[test]
    fn white_pawn_promotes_on_row_7() {
        let mut board = Board::empty();
        board.set_piece(Square::new(6, 2), PieceKind::Pawn, Side::White);
        board.apply_move(Square::new(6, 2), Square::new(7, 2));
        assert_eq!(board.piece(Square::new(7, 2)), PieceKind::Queen);
        assert_eq!(board.color(Square::new(7, 2)), Side::White);
    }

    #[test]
    fn black_pawn_promotes_on_row_0() {
        let mut board = Board::empty();
        board.set_promotion_preference(PieceKind::Rook).unwrap();
        board.set_piece(Square::new(1, 5), PieceKind::Pawn, Side::Black);
        board.apply_move(Square::new(1, 5), Square::new(0, 5));
        assert_eq!(board.piece(Square::new(0, 5)), PieceKind::Rook);
        assert_eq!(board.color(Square::new(0, 5)), Side::Black);
    }

    #[test]
    fn pawn_mid_board_does_not_promote() {
        let mut board = Board::starting();
        board.apply_move(Square::new(1, 0), Square::new(2, 0));
        assert_eq!(board.piece(Square::new(2, 0)), PieceKind::Pawn);
    }

    // ===================================================================
    // apply_move: castling
    // ===================================================================

    #[test]
    fn kingside_castle_relocates_rook() {
        let mut board = Board::empty();
        board.set_piece(Square::new(0, 4), PieceKind::King, Side::White);
        board.set_piece(Square::new(0, 7), PieceKind::Rook, Side::White);
        board.apply_move(Square::new(0, 4), Square::new(0, 6));

        assert_eq!(board.piece(Square::new(0, 6)), PieceKind::King);
        assert_eq!(board.piece(Square::new(0, 5)), PieceKind::Rook);
        assert_eq!(board.piece(Square::new(0, 7)), PieceKind::None);
    }

    #[test]
    fn queenside_castle_relocates_rook() {
        let mut board = Board::empty();
        board.set_piece(Square::new(7, 4), PieceKind::King, Side::Black);
        board.set_piece(Square::new(7, 0), PieceKind::Rook, Side::Black);
        board.apply_move(Square::new(7, 4), Square::new(7, 2));

        assert_eq!(board.piece(Square::new(7, 2)), PieceKind::King);
        assert_eq!(board.piece(Square::new(7, 3)), PieceKind::Rook);
        assert_eq!(board.piece(Square::new(7, 0)), PieceKind::None);
    }

    #[test]
    fn king_move_burns_both_rights() {
        let mut board = Board::starting();
        board.set_piece(Square::new(1, 4), PieceKind::None, Side::None);
        board.apply_move(Square::new(0, 4), Square::new(1, 4));
        assert!(board.white_castle.king_moved);
        assert!(!board.white_castle.kingside_rook_moved);
        assert!(board.black_castle == CastleRecord::default());
    }

    #[test]
    fn rook_home_departure_burns_its_flag() {
        let mut board = Board::starting();
        board.set_piece(Square::new(1, 0), PieceKind::None, Side::None);
        board.apply_move(Square::new(0, 0), Square::new(1, 0));
        assert!(board.white_castle.queenside_rook_moved);
        assert!(!board.white_castle.kingside_rook_moved);
        assert!(!board.white_castle.king_moved);
    }

    #[test]
    fn rights_survive_unrelated_moves() {
        let mut board = Board::starting();
        board.apply_move(Square::new(1, 3), Square::new(3, 3));
        board.apply_move(Square::new(6, 3), Square::new(4, 3));
        assert_eq!(board.white_castle, CastleRecord::default());
        assert_eq!(board.black_castle, CastleRecord::default());
    }

    // ===================================================================
    // Display
    // ===================================================================

    #[test]
    fn display_starting_position() {
        let text = Board::starting().to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "7  r n b q k b n r");
        assert_eq!(lines.next().unwrap(), "6  p p p p p p p p");
        assert!(text.ends_with("   0 1 2 3 4 5 6 7"));
    }
}
