use crate::engine::PieceKind;

/// Engine configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// What a promoting pawn becomes unless the collaborator overrides it.
    pub promotion_default: PieceKind,
    /// Optional piece-placement string to start sessions from instead of the
    /// standard position.
    pub start_placement: Option<String>,
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        EngineConfig {
            promotion_default: std::env::var("CHESS_PROMOTION_DEFAULT")
                .ok()
                .and_then(|v| parse_promotion(&v))
                .unwrap_or(PieceKind::Queen),
            start_placement: std::env::var("CHESS_START_PLACEMENT").ok(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            promotion_default: PieceKind::Queen,
            start_placement: None,
        }
    }
}

/// Parse a promotion piece name (case-insensitive). Only the four kinds a
/// pawn may become are accepted.
pub fn parse_promotion(s: &str) -> Option<PieceKind> {
    match s.to_lowercase().as_str() {
        "queen" => Some(PieceKind::Queen),
        "rook" => Some(PieceKind::Rook),
        "bishop" => Some(PieceKind::Bishop),
        "knight" => Some(PieceKind::Knight),
        _ => None,
    }
}
