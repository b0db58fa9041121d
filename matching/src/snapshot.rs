use serde::Serialize;

use crate::game::RoundPhase;
use crate::types::{AssetId, Position};

/// Complete, immutable view of a game.
/// Produced after every state change; views render from this and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub difficulty: Option<String>,
    pub tiles: Vec<TileView>,
    pub status: String,
    pub progress: f64,
    pub complete: bool,
    pub phase: RoundPhase,
    pub attempts: u32,
}

/// A single slot of the arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub position: Position,
    pub asset: AssetId,
    pub matched: bool,
    pub selected: bool,
}

impl GameSnapshot {
    /// True while a first pick awaits its partner.
    pub fn pick_pending(&self) -> bool {
        self.tiles.iter().any(|t| t.selected)
    }

    pub fn matched_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.matched).count()
    }
}
