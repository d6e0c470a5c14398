use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// The owner of a square: one of the two players, or nobody.
///
/// `None` is a real member of the vocabulary, not an absence wrapper — the
/// board stores it directly in the color grid for empty squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    None,
    White,
    Black,
}

impl Side {
    /// The opposing player. `None` has no opponent and maps to itself.
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::None => Side::None,
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// True for White and Black, false for the empty sentinel.
    #[inline]
    pub const fn is_player(self) -> bool {
        !matches!(self, Side::None)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::None => write!(f, "none"),
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six chess piece kinds plus the empty sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    #[default]
    None,
    Pawn,
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PieceKind {
    /// Single FEN letter: uppercase for White, lowercase for Black.
    /// Empty squares and sideless pieces have no letter.
    pub fn to_char(self, side: Side) -> Option<char> {
        let c = match self {
            PieceKind::None => return None,
            PieceKind::Pawn => 'p',
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
        };
        match side {
            Side::White => Some(c.to_ascii_uppercase()),
            Side::Black => Some(c),
            Side::None => None,
        }
    }

    /// Parse a FEN piece letter; case picks the side.
    pub fn from_char(c: char) -> Option<(Side, PieceKind)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            _ => return None,
        };
        Some((side, kind))
    }

    /// Whether a pawn may promote to this kind.
    #[inline]
    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::None => write!(f, "none"),
            PieceKind::Pawn => write!(f, "pawn"),
            PieceKind::King => write!(f, "king"),
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Knight => write!(f, "knight"),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A (row, file) board coordinate. Row 0 is White's home rank.
///
/// Squares are plain coordinates and may lie off the board; every board
/// accessor bounds-checks and answers with the empty sentinels outside
/// [0,7]×[0,7]. Signed components keep offset arithmetic panic-free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub file: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, file: i8) -> Self {
        Square { row, file }
    }

    /// Both coordinates within [0,7].
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row >= 0 && self.row <= 7 && self.file >= 0 && self.file <= 7
    }

    /// Row-major grid index. Only meaningful for in-bounds squares.
    #[inline]
    pub const fn index(self) -> usize {
        (self.row * 8 + self.file) as usize
    }

    /// The square displaced by (d_row, d_file), possibly off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_file: i8) -> Square {
        Square {
            row: self.row + d_row,
            file: self.file + d_file,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.file)
    }
}

// ---------------------------------------------------------------------------
// CastleRecord
// ---------------------------------------------------------------------------

/// Per-side castling bookkeeping. Flags only ever transition false→true:
/// once a right is lost it stays lost, even if the pieces return home.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleRecord {
    pub king_moved: bool,
    /// The a-file rook's home square has been vacated.
    pub queenside_rook_moved: bool,
    /// The h-file rook's home square has been vacated.
    pub kingside_rook_moved: bool,
}

impl CastleRecord {
    #[inline]
    pub fn kingside_available(self) -> bool {
        !self.king_moved && !self.kingside_rook_moved
    }

    #[inline]
    pub fn queenside_available(self) -> bool {
        !self.king_moved && !self.queenside_rook_moved
    }
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Fatal engine errors.
///
/// Rule infractions are not errors — an illegal move request is answered with
/// `Ok(false)` and no state change. Errors are reserved for corrupted
/// representation, which aborts further play in the session.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The piece and color grids disagree: exactly one of them holds the
    /// empty sentinel for this square.
    #[error("inconsistent board state at ({row}, {file}): piece and color grids disagree")]
    Inconsistent { row: i8, file: i8 },

    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(PieceKind),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
