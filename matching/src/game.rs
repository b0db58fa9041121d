use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::shuffle::{permutation, reshuffle_free_slots};
use crate::snapshot::{GameSnapshot, TileView};
use crate::types::{GroupKey, Item, Position};

pub const STATUS_WELCOME: &str = "Tap a sock to start.";
pub const STATUS_NEW_ROUND: &str = "New round. Tap a sock.";
pub const STATUS_FIRST_PICK: &str = "Good. Now find the matching sock.";
pub const STATUS_SAME_ITEM: &str = "Pick a different sock.";
pub const STATUS_MATCH: &str = "That's a pair. Well spotted.";
pub const STATUS_MISMATCH: &str = "Not the same yet. Try again.";
/// Shown by views once [`MatchingGame::is_complete`] turns true.
pub const STATUS_COMPLETE: &str = "All pairs found. Well done.";

/// Round-level lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    /// No round has been dealt yet.
    Uninitialized,
    /// Fresh arrangement, nothing tapped.
    Ready,
    InProgress,
    /// Every position is matched.
    Complete,
}

/// A selection awaiting its partner tap.
///
/// The group key is captured at pick time, so the comparison on the second tap
/// never depends on what currently sits at `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstPick {
    pub position: Position,
    pub group: GroupKey,
}

/// What a single tap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// First half of an attempt recorded.
    FirstPicked,
    /// Same tile tapped twice; the pick stays pending.
    SameItem,
    Matched { first: Position, second: Position },
    Mismatched { first: Position, second: Position },
    /// Tap on an already matched position. Normal user behaviour, not an error.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid position {position} (arrangement has {len} tiles)")]
    InvalidPosition { position: Position, len: usize },
    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),
    #[error("Cannot reshuffle while a pick is pending")]
    PickPending,
}

/// The matching-game state machine.
///
/// Owns the arrangement, the matched positions, the pending first pick and the
/// status message. All mutation goes through [`reset_round`](Self::reset_round),
/// [`reshuffle_unmatched`](Self::reshuffle_unmatched) and [`tap`](Self::tap).
#[derive(Debug, Clone)]
pub struct MatchingGame<R = StdRng> {
    catalog: Catalog,
    rng: R,
    difficulty: Option<String>,
    arrangement: Vec<Item>,
    matched: BTreeSet<Position>,
    first_pick: Option<FirstPick>,
    status: String,
    attempts: u32,
    tapped: bool,
}

impl MatchingGame<StdRng> {
    /// Create an engine seeded from OS entropy. No round is dealt yet.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }
}

impl<R: Rng> MatchingGame<R> {
    /// Create an engine drawing randomness from `rng`.
    pub fn with_rng(catalog: Catalog, rng: R) -> Self {
        Self {
            catalog,
            rng,
            difficulty: None,
            arrangement: Vec::new(),
            matched: BTreeSet::new(),
            first_pick: None,
            status: STATUS_WELCOME.to_string(),
            attempts: 0,
            tapped: false,
        }
    }

    /// Deal a fresh round for `difficulty`.
    ///
    /// The arrangement becomes a uniform random permutation of the level's
    /// items; matched positions and any pending pick are cleared. An unknown
    /// difficulty leaves the current state untouched.
    pub fn reset_round(&mut self, difficulty: &str) -> Result<(), GameError> {
        let items = self
            .catalog
            .items_for(difficulty)
            .ok_or_else(|| GameError::InvalidDifficulty(difficulty.to_string()))?;

        self.arrangement = permutation(items, &mut self.rng);
        self.matched.clear();
        self.first_pick = None;
        self.status = STATUS_NEW_ROUND.to_string();
        self.attempts = 0;
        self.tapped = false;
        self.difficulty = Some(difficulty.to_string());

        tracing::info!(
            difficulty,
            tiles = self.arrangement.len(),
            "New round dealt"
        );
        Ok(())
    }

    /// Re-randomize the items at unmatched positions.
    ///
    /// Matched positions keep their items. Rejected while a first pick is
    /// pending, since moving items would detach the pick from its tile.
    pub fn reshuffle_unmatched(&mut self) -> Result<(), GameError> {
        if self.first_pick.is_some() {
            return Err(GameError::PickPending);
        }
        self.shuffle_free();
        Ok(())
    }

    /// Tap a position.
    ///
    /// Resolving an attempt (match or mismatch) clears the pick and reshuffles
    /// the remaining unmatched items.
    pub fn tap(&mut self, position: Position) -> Result<TapOutcome, GameError> {
        let item = self
            .arrangement
            .get(position)
            .ok_or(GameError::InvalidPosition {
                position,
                len: self.arrangement.len(),
            })?;

        if self.matched.contains(&position) {
            tracing::debug!(position, "Ignoring tap on matched position");
            return Ok(TapOutcome::Ignored);
        }
        self.tapped = true;

        let Some(first) = self.first_pick.clone() else {
            self.first_pick = Some(FirstPick {
                position,
                group: item.group.clone(),
            });
            self.status = STATUS_FIRST_PICK.to_string();
            tracing::debug!(position, group = %item.group, "First pick");
            return Ok(TapOutcome::FirstPicked);
        };

        if first.position == position {
            self.status = STATUS_SAME_ITEM.to_string();
            return Ok(TapOutcome::SameItem);
        }

        let outcome = if first.group == item.group {
            self.matched.insert(first.position);
            self.matched.insert(position);
            self.status = STATUS_MATCH.to_string();
            TapOutcome::Matched {
                first: first.position,
                second: position,
            }
        } else {
            self.status = STATUS_MISMATCH.to_string();
            TapOutcome::Mismatched {
                first: first.position,
                second: position,
            }
        };
        tracing::debug!(?outcome, "Attempt resolved");

        self.first_pick = None;
        self.attempts += 1;
        self.shuffle_free();

        if self.is_complete() {
            tracing::info!(attempts = self.attempts, "Round complete");
        }
        Ok(outcome)
    }

    fn shuffle_free(&mut self) {
        let free = reshuffle_free_slots(&mut self.arrangement, &self.matched, &mut self.rng);
        tracing::debug!(free, "Reshuffled unmatched positions");
    }
}

impl<R> MatchingGame<R> {
    /// True once every position of a dealt round is matched.
    pub fn is_complete(&self) -> bool {
        !self.arrangement.is_empty() && self.matched.len() == self.arrangement.len()
    }

    /// Fraction of positions matched, in `0.0..=1.0`. Zero before the first round.
    pub fn progress(&self) -> f64 {
        if self.arrangement.is_empty() {
            return 0.0;
        }
        self.matched.len() as f64 / self.arrangement.len() as f64
    }

    pub fn phase(&self) -> RoundPhase {
        if self.difficulty.is_none() {
            RoundPhase::Uninitialized
        } else if self.is_complete() {
            RoundPhase::Complete
        } else if self.tapped {
            RoundPhase::InProgress
        } else {
            RoundPhase::Ready
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn arrangement(&self) -> &[Item] {
        &self.arrangement
    }

    pub fn matched(&self) -> &BTreeSet<Position> {
        &self.matched
    }

    pub fn first_pick(&self) -> Option<&FirstPick> {
        self.first_pick.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Resolved two-tap attempts this round.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let selected = self.first_pick.as_ref().map(|p| p.position);
        let tiles = self
            .arrangement
            .iter()
            .enumerate()
            .map(|(position, item)| TileView {
                position,
                asset: item.asset.clone(),
                matched: self.matched.contains(&position),
                selected: selected == Some(position),
            })
            .collect();

        GameSnapshot {
            difficulty: self.difficulty.clone(),
            tiles,
            status: self.status.clone(),
            progress: self.progress(),
            complete: self.is_complete(),
            phase: self.phase(),
            attempts: self.attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    fn test_game() -> MatchingGame<ChaCha8Rng> {
        let mut game = MatchingGame::with_rng(Catalog::builtin(), ChaCha8Rng::seed_from_u64(11));
        game.reset_round("easy").unwrap();
        game
    }

    /// Two distinct positions currently holding items of `group`.
    fn positions_of(game: &MatchingGame<ChaCha8Rng>, group: &str) -> (Position, Position) {
        let found: Vec<_> = game
            .arrangement()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.group.as_str() == group)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(found.len(), 2);
        (found[0], found[1])
    }

    #[test]
    fn test_new_game_is_uninitialized() {
        let game = MatchingGame::new(Catalog::builtin());
        assert_eq!(game.phase(), RoundPhase::Uninitialized);
        assert_eq!(game.status(), STATUS_WELCOME);
        assert_eq!(game.progress(), 0.0);
        assert!(!game.is_complete());
    }

    #[test]
    fn test_tap_before_first_round() {
        let mut game = MatchingGame::new(Catalog::builtin());
        assert_eq!(
            game.tap(0),
            Err(GameError::InvalidPosition { position: 0, len: 0 })
        );
    }

    #[test]
    fn test_reset_round() {
        let game = test_game();
        assert_eq!(game.arrangement().len(), 4);
        assert_eq!(game.phase(), RoundPhase::Ready);
        assert_eq!(game.status(), STATUS_NEW_ROUND);
        assert!(game.matched().is_empty());
        assert!(game.first_pick().is_none());
        assert_eq!(game.difficulty(), Some("easy"));
    }

    #[test]
    fn test_reset_unknown_difficulty_keeps_state() {
        let mut game = test_game();
        let before = game.arrangement().to_vec();
        assert_eq!(
            game.reset_round("expert"),
            Err(GameError::InvalidDifficulty("expert".to_string()))
        );
        assert_eq!(game.arrangement(), before.as_slice());
        assert_eq!(game.difficulty(), Some("easy"));
    }

    #[test]
    fn test_first_pick() {
        let mut game = test_game();
        let group = game.arrangement()[2].group.clone();
        assert_eq!(game.tap(2), Ok(TapOutcome::FirstPicked));
        assert_eq!(
            game.first_pick(),
            Some(&FirstPick { position: 2, group })
        );
        assert_eq!(game.status(), STATUS_FIRST_PICK);
        assert_eq!(game.phase(), RoundPhase::InProgress);
    }

    #[test]
    fn test_same_item_keeps_pick() {
        let mut game = test_game();
        game.tap(1).unwrap();
        let before = game.arrangement().to_vec();

        assert_eq!(game.tap(1), Ok(TapOutcome::SameItem));
        assert_eq!(game.first_pick().map(|p| p.position), Some(1));
        assert_eq!(game.status(), STATUS_SAME_ITEM);
        assert!(game.matched().is_empty());
        assert_eq!(game.arrangement(), before.as_slice());
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_match() {
        let mut game = test_game();
        let (a0, a1) = positions_of(&game, "A");
        game.tap(a0).unwrap();
        assert_eq!(
            game.tap(a1),
            Ok(TapOutcome::Matched { first: a0, second: a1 })
        );
        assert_eq!(game.matched(), &BTreeSet::from([a0, a1]));
        assert!(game.first_pick().is_none());
        assert_eq!(game.status(), STATUS_MATCH);
        assert_eq!(game.progress(), 0.5);
        assert!(!game.is_complete());
        // Matched tiles stay put through the reshuffle.
        assert_eq!(game.arrangement()[a0].group.as_str(), "A");
        assert_eq!(game.arrangement()[a1].group.as_str(), "A");
    }

    #[test]
    fn test_mismatch() {
        let mut game = test_game();
        let (a0, _) = positions_of(&game, "A");
        let (b0, _) = positions_of(&game, "B");
        let mut before: Vec<_> = game.arrangement().to_vec();

        game.tap(a0).unwrap();
        assert_eq!(
            game.tap(b0),
            Ok(TapOutcome::Mismatched { first: a0, second: b0 })
        );
        assert!(game.matched().is_empty());
        assert!(game.first_pick().is_none());
        assert_eq!(game.status(), STATUS_MISMATCH);
        assert_eq!(game.attempts(), 1);

        let mut after = game.arrangement().to_vec();
        before.sort_by(|x, y| x.asset.cmp(&y.asset));
        after.sort_by(|x, y| x.asset.cmp(&y.asset));
        assert_eq!(before, after);
    }

    #[test]
    fn test_full_round() {
        let mut game = test_game();
        let (a0, a1) = positions_of(&game, "A");
        game.tap(a0).unwrap();
        game.tap(a1).unwrap();

        let (b0, b1) = positions_of(&game, "B");
        game.tap(b0).unwrap();
        game.tap(b1).unwrap();

        assert!(game.is_complete());
        assert_eq!(game.matched().len(), 4);
        assert_eq!(game.progress(), 1.0);
        assert_eq!(game.phase(), RoundPhase::Complete);
    }

    #[test]
    fn test_tap_matched_is_ignored() {
        let mut game = test_game();
        let (a0, a1) = positions_of(&game, "A");
        game.tap(a0).unwrap();
        game.tap(a1).unwrap();

        let status = game.status().to_string();
        assert_eq!(game.tap(a0), Ok(TapOutcome::Ignored));
        assert!(game.first_pick().is_none());
        assert_eq!(game.status(), status);

        // Also ignored while a pick is pending; the pick survives.
        let (b0, _) = positions_of(&game, "B");
        game.tap(b0).unwrap();
        assert_eq!(game.tap(a1), Ok(TapOutcome::Ignored));
        assert_eq!(game.first_pick().map(|p| p.position), Some(b0));
    }

    #[test]
    fn test_out_of_bounds_tap_is_rejected() {
        let mut game = test_game();
        game.tap(0).unwrap();
        let before = game.snapshot();
        assert_eq!(
            game.tap(4),
            Err(GameError::InvalidPosition { position: 4, len: 4 })
        );
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_reshuffle_rejected_while_pick_pending() {
        let mut game = test_game();
        game.tap(0).unwrap();
        let before = game.arrangement().to_vec();
        assert_eq!(game.reshuffle_unmatched(), Err(GameError::PickPending));
        assert_eq!(game.arrangement(), before.as_slice());
    }

    #[test]
    fn test_reshuffle_after_complete_is_noop() {
        let mut game = test_game();
        for group in ["A", "B"] {
            let (x, y) = positions_of(&game, group);
            game.tap(x).unwrap();
            game.tap(y).unwrap();
        }
        let before = game.arrangement().to_vec();
        game.reshuffle_unmatched().unwrap();
        assert_eq!(game.arrangement(), before.as_slice());
    }

    #[test]
    fn test_difficulty_change_resets() {
        let mut game = test_game();
        let (a0, a1) = positions_of(&game, "A");
        game.tap(a0).unwrap();
        game.tap(a1).unwrap();
        let (b0, _) = positions_of(&game, "B");
        game.tap(b0).unwrap();

        game.reset_round("medium").unwrap();
        assert_eq!(game.arrangement().len(), 6);
        assert!(game.matched().is_empty());
        assert!(game.first_pick().is_none());
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.phase(), RoundPhase::Ready);
    }

    #[test]
    fn test_snapshot_marks_selection_and_matches() {
        let mut game = test_game();
        let (a0, a1) = positions_of(&game, "A");
        game.tap(a0).unwrap();
        game.tap(a1).unwrap();
        let (b0, _) = positions_of(&game, "B");
        game.tap(b0).unwrap();

        let snap = game.snapshot();
        assert_eq!(snap.tiles.len(), 4);
        assert!(snap.tiles[a0].matched && snap.tiles[a1].matched);
        assert!(snap.tiles[b0].selected);
        assert!(snap.pick_pending());
        assert_eq!(snap.matched_count(), 2);
        assert_eq!(snap.difficulty.as_deref(), Some("easy"));
        assert!(!snap.complete);
    }
}
