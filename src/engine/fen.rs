//! Piece-placement serialization — the board field of FEN.
//!
//! Only the placement field is handled: ranks from row 7 down to row 0
//! separated by `/`, runs of empty squares as decimal digits, pieces as
//! single letters (uppercase White, lowercase Black). Side to move, castling
//! rights, en-passant target and move clocks are not part of this encoding.

use crate::engine::board::Board;
use crate::engine::types::{PieceKind, Side, Square};

impl Board {
    /// Encode the current placement.
    pub fn encode_fen(&self) -> String {
        let mut fen = String::with_capacity(72);
        for row in (0..8).rev() {
            let mut empty_run = 0u8;
            for file in 0..8 {
                let sq = Square::new(row, file);
                match self.piece(sq).to_char(self.color(sq)) {
                    Some(c) => {
                        if empty_run > 0 {
                            fen.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        fen.push(c);
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                fen.push((b'0' + empty_run) as char);
            }
            if row > 0 {
                fen.push('/');
            }
        }
        fen
    }

    /// Replace the placement from an encoded string.
    ///
    /// The grids are cleared first. `/` drops to the next rank down, a digit
    /// advances the file cursor by that many empty squares, a recognized
    /// letter places a piece and advances by one, and any other character is
    /// ignored. Writes that run off the board are dropped by the
    /// bounds-checked setter. En-passant and castling state are untouched;
    /// the placement field does not carry them.
    pub fn decode_fen(&mut self, fen: &str) {
        for row in 0..8 {
            for file in 0..8 {
                self.set_piece(Square::new(row, file), PieceKind::None, Side::None);
            }
        }

        let mut row: i8 = 7;
        let mut file: i8 = 0;
        for ch in fen.chars() {
            if ch == '/' {
                row -= 1;
                file = 0;
            } else if let Some(digit) = ch.to_digit(10) {
                file += digit as i8;
            } else if let Some((side, kind)) = PieceKind::from_char(ch) {
                self.set_piece(Square::new(row, file), kind, side);
                file += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn encode_starting_position() {
        assert_eq!(Board::starting().encode_fen(), STARTING);
    }

    #[test]
    fn encode_empty_board() {
        assert_eq!(Board::empty().encode_fen(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn decode_starting_position() {
        let mut board = Board::empty();
        board.decode_fen(STARTING);

        assert_eq!(board.piece(Square::new(0, 4)), PieceKind::King);
        assert_eq!(board.color(Square::new(0, 4)), Side::White);
        assert_eq!(board.piece(Square::new(7, 3)), PieceKind::Queen);
        assert_eq!(board.color(Square::new(7, 3)), Side::Black);
        assert_eq!(board.piece(Square::new(4, 4)), PieceKind::None);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn round_trip_starting() {
        let mut board = Board::empty();
        board.decode_fen(STARTING);
        assert_eq!(board.encode_fen(), STARTING);
    }

    #[test]
    fn round_trip_mid_game_placement() {
        let placement = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R";
        let mut board = Board::empty();
        board.decode_fen(placement);
        assert_eq!(board.encode_fen(), placement);
    }

    #[test]
    fn round_trip_sparse_endgame() {
        let placement = "8/2p5/3p4/1P5r/1R3p1k/8/4P1P1/8";
        let mut board = Board::empty();
        board.decode_fen(placement);
        assert_eq!(board.encode_fen(), placement);
    }

    #[test]
    fn decode_replaces_previous_placement() {
        let mut board = Board::starting();
        board.decode_fen("4k3/8/8/8/8/8/8/4K3");
        assert_eq!(board.encode_fen(), "4k3/8/8/8/8/8/8/4K3");
        assert_eq!(board.piece(Square::new(1, 0)), PieceKind::None);
    }

    #[test]
    fn decode_ignores_unrecognized_characters() {
        let mut board = Board::empty();
        board.decode_fen("4k3/8/8/8/8/8/8/4K3 _ ?!");
        assert_eq!(board.piece(Square::new(7, 4)), PieceKind::King);
        assert_eq!(board.piece(Square::new(0, 4)), PieceKind::King);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn decode_digits_skip_squares() {
        let mut board = Board::empty();
        board.decode_fen("8/8/8/3n4/8/8/8/8");
        assert_eq!(board.piece(Square::new(4, 3)), PieceKind::Knight);
        assert_eq!(board.color(Square::new(4, 3)), Side::Black);
        assert_eq!(board.encode_fen(), "8/8/8/3n4/8/8/8/8");
    }

    #[test]
    fn decode_preserves_castle_and_en_passant_state() {
        let mut board = Board::starting();
        board.white_castle.king_moved = true;
        board.decode_fen(STARTING);
        assert!(board.white_castle.king_moved);
    }
}
