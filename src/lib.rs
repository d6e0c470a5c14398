//! Chess rules engine.
//!
//! The crate owns the board position, generates legal moves, applies moves
//! with full chess bookkeeping (castling rights, en passant, promotion,
//! check/checkmate/stalemate detection), and serializes the piece-placement
//! portion of a position. Rendering and input handling are left to an
//! external presentation layer that talks to [`engine::Game`].

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::{Board, Game};
