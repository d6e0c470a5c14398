//! Stateful game session wrapping a [`Board`].
//!
//! `Game` owns the board plus the turn record, is the rule-checked move entry
//! point, and classifies the position (checkmate / stalemate) after every
//! applied move. It is the type the presentation layer interacts with.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::board::Board;
use crate::engine::movegen;
use crate::engine::types::{EngineError, PieceKind, Side, Square};

// =========================================================================
// TurnState
// =========================================================================

/// Whose move it is and how the game stands. Mutated only by
/// [`Game::make_move`] after a successful application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TurnState {
    /// The side whose move it is.
    pub active: Side,
    /// Half-moves applied since the session started.
    pub turn: u32,
    /// No legal move exists for the active side.
    pub game_over: bool,
    /// The checkmated side; `Side::None` while the game runs or after a
    /// stalemate.
    pub mated: Side,
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState {
            active: Side::White,
            turn: 0,
            game_over: false,
            mated: Side::None,
        }
    }
}

// =========================================================================
// Game
// =========================================================================

/// One chess session: a board, its turn record, and session metadata.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    state: TurnState,

    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// New session from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::starting())
    }

    /// New session over an arbitrary prepared board.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            state: TurnState::default(),
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for collaborators preparing custom positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current turn record.
    pub fn turn_state(&self) -> TurnState {
        self.state
    }

    /// The side whose move it is.
    pub fn active_side(&self) -> Side {
        self.state.active
    }

    /// Half-moves applied so far.
    pub fn turn_count(&self) -> u32 {
        self.state.turn
    }

    /// Whether the active side has run out of legal moves.
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// The checkmated side, if the game ended in mate.
    pub fn mated_side(&self) -> Side {
        self.state.mated
    }

    /// Legal destinations of the piece on `sq` (for highlighting).
    pub fn legal_destinations(&self, sq: Square) -> Vec<Square> {
        movegen::legal_moves(&self.board, sq)
    }

    /// Is `side` currently in check?
    pub fn in_check(&self, side: Side) -> bool {
        movegen::is_in_check(&self.board, side)
    }

    /// Piece-placement string of the current board.
    pub fn placement(&self) -> String {
        self.board.encode_fen()
    }

    // -----------------------------------------------------------------
    // Collaborator inputs
    // -----------------------------------------------------------------

    /// Change what a promoting pawn becomes. Takes effect for every later
    /// promotion until changed again.
    pub fn set_promotion_preference(&mut self, kind: PieceKind) -> Result<(), EngineError> {
        self.board.set_promotion_preference(kind)
    }

    /// Replace the board placement from a piece-placement string and restart
    /// the turn record. Castling and en-passant state are left to the caller;
    /// the placement field does not carry them.
    pub fn load_placement(&mut self, placement: &str) {
        self.board.decode_fen(placement);
        self.state = TurnState::default();
    }

    // -----------------------------------------------------------------
    // Move entry point
    // -----------------------------------------------------------------

    /// Try to play `from` → `to` for the active side.
    ///
    /// Returns `Ok(false)` with no state change when the request breaks a
    /// rule (wrong side, illegal destination). Returns an error only when the
    /// board representation itself is corrupt, which ends meaningful play.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<bool, EngineError> {
        self.board.validate()?;

        // Only the active side's pieces may move.
        if self.board.color(from) != self.state.active {
            debug!(%from, %to, active = %self.state.active, "rejected: not the mover's turn");
            return Ok(false);
        }

        // Re-derive legality; the collaborator's highlight list is advisory.
        if !movegen::legal_moves(&self.board, from).contains(&to) {
            debug!(%from, %to, "rejected: illegal destination");
            return Ok(false);
        }

        self.board.apply_move(from, to);

        self.state.active = self.state.active.opponent();
        self.state.turn += 1;
        debug!(
            turn = self.state.turn,
            next = %self.state.active,
            %from,
            %to,
            "move applied"
        );

        // Classify the position facing the new active side.
        if !movegen::side_has_legal_move(&self.board, self.state.active) {
            self.state.game_over = true;
            if movegen::is_in_check(&self.board, self.state.active) {
                self.state.mated = self.state.active;
                info!(mated = %self.state.active, turn = self.state.turn, "checkmate");
            } else {
                info!(turn = self.state.turn, "stalemate");
            }
        }

        Ok(true)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
