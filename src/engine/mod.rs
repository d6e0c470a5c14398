pub mod board;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod types;

pub use board::{Board, EnPassant};
pub use game::{Game, TurnState};
pub use movegen::{legal_moves, pseudo_moves, side_pseudo_moves, SideMoves};
pub use types::*;
