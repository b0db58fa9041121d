use std::collections::HashMap;

use matching::{Catalog, GameError, Item, MatchingGame, Position, TapOutcome};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn dealt(level: &str, seed: u64) -> MatchingGame<ChaCha8Rng> {
    let mut game = MatchingGame::with_rng(Catalog::builtin(), ChaCha8Rng::seed_from_u64(seed));
    game.reset_round(level).unwrap();
    game
}

fn group_counts(items: &[Item]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.group.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

fn sorted_assets(items: &[Item], positions: impl Iterator<Item = Position>) -> Vec<String> {
    let mut assets: Vec<_> = positions
        .map(|p| items[p].asset.as_str().to_string())
        .collect();
    assets.sort();
    assets
}

fn partner_of(game: &MatchingGame<ChaCha8Rng>, position: Position) -> Position {
    let group = &game.arrangement()[position].group;
    game.arrangement()
        .iter()
        .enumerate()
        .position(|(i, item)| i != position && &item.group == group)
        .unwrap()
}

proptest! {
    #[test]
    fn reset_deals_every_pair_exactly_once(seed in any::<u64>(), medium in any::<bool>()) {
        let level = if medium { "medium" } else { "easy" };
        let game = dealt(level, seed);
        let expected = Catalog::builtin().level(level).unwrap().groups.len();

        prop_assert_eq!(game.arrangement().len(), expected * 2);
        let counts = group_counts(game.arrangement());
        prop_assert_eq!(counts.len(), expected);
        prop_assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn tap_sequences_keep_invariants(
        seed in any::<u64>(),
        taps in prop::collection::vec(0usize..8, 0..60),
    ) {
        let mut game = dealt("medium", seed);
        for position in taps {
            let before = game.snapshot();
            match game.tap(position) {
                Ok(_) => {}
                Err(GameError::InvalidPosition { .. }) => {
                    prop_assert!(position >= 6);
                    prop_assert_eq!(game.snapshot(), before);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }

            let matched = game.matched();
            prop_assert_eq!(matched.len() % 2, 0);
            prop_assert!(matched.iter().all(|&p| p < game.arrangement().len()));
            if let Some(pick) = game.first_pick() {
                prop_assert!(!matched.contains(&pick.position));
            }
            prop_assert_eq!(group_counts(game.arrangement()).len(), 3);
        }
    }

    #[test]
    fn reshuffle_keeps_matched_slots_and_free_multiset(seed in any::<u64>()) {
        let mut game = dealt("medium", seed);
        let first = 0;
        let second = partner_of(&game, first);
        game.tap(first).unwrap();
        game.tap(second).unwrap();

        let before = game.arrangement().to_vec();
        let matched = game.matched().clone();
        game.reshuffle_unmatched().unwrap();
        let after = game.arrangement();

        for &p in &matched {
            prop_assert_eq!(&after[p], &before[p]);
        }
        let free: Vec<Position> = (0..after.len()).filter(|p| !matched.contains(p)).collect();
        prop_assert_eq!(
            sorted_assets(after, free.iter().copied()),
            sorted_assets(&before, free.iter().copied())
        );
    }

    #[test]
    fn equal_groups_at_distinct_positions_always_match(seed in any::<u64>(), start in 0usize..6) {
        let mut game = dealt("medium", seed);
        let partner = partner_of(&game, start);

        game.tap(start).unwrap();
        let outcome = game.tap(partner).unwrap();

        prop_assert_eq!(outcome, TapOutcome::Matched { first: start, second: partner });
        prop_assert!(game.matched().contains(&start));
        prop_assert!(game.matched().contains(&partner));
        prop_assert!(game.first_pick().is_none());
    }

    #[test]
    fn double_tap_never_changes_matched(seed in any::<u64>(), position in 0usize..4) {
        let mut game = dealt("easy", seed);
        game.tap(position).unwrap();
        game.tap(position).unwrap();

        prop_assert!(game.matched().is_empty());
        prop_assert_eq!(game.first_pick().map(|p| p.position), Some(position));
    }
}
