//! Core of the sock matching activity: a memory game where the player taps two
//! face-down tiles at a time looking for pairs.
//!
//! [`MatchingGame`] is the whole state machine. Views drive it through three
//! commands and render from [`GameSnapshot`].

pub mod catalog;
pub mod game;
pub mod shuffle;
pub mod snapshot;
pub mod types;

pub use catalog::{Catalog, CatalogError, Level};
pub use game::{
    FirstPick, GameError, MatchingGame, RoundPhase, TapOutcome, STATUS_COMPLETE,
    STATUS_FIRST_PICK, STATUS_MATCH, STATUS_MISMATCH, STATUS_NEW_ROUND, STATUS_SAME_ITEM,
    STATUS_WELCOME,
};
pub use snapshot::{GameSnapshot, TileView};
pub use types::{AssetId, GroupKey, Item, Position};
