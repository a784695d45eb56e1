// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::OrderSnapshot;
use crate::tests::helpers::{QUEST_3, QUEST_3S, names};

#[test]
fn test_normalized_prunes_environments_of_unselected_games() {
    let mut snapshot: OrderSnapshot = OrderSnapshot {
        games: names(&["Memory"]),
        ..OrderSnapshot::default()
    };
    snapshot
        .environments
        .insert(String::from("Memory"), String::from("Modern Office"));
    snapshot
        .environments
        .insert(String::from("Simon Says"), String::from("Ancient Temple"));

    let normalized: OrderSnapshot = snapshot.normalized();
    assert_eq!(normalized.environments.len(), 1);
    assert!(normalized.environments.contains_key("Memory"));
}

#[test]
fn test_normalized_drops_zero_quantities() {
    let snapshot: OrderSnapshot = OrderSnapshot {
        devices: [(QUEST_3S.to_string(), 0), (QUEST_3.to_string(), 2)]
            .into_iter()
            .collect(),
        ..OrderSnapshot::default()
    };
    let normalized: OrderSnapshot = snapshot.normalized();
    assert!(!normalized.devices.contains_key(QUEST_3S));
    assert_eq!(normalized.total_devices(), 2);
}

#[test]
fn test_normalized_derives_multi_game_from_game_count() {
    let single: OrderSnapshot = OrderSnapshot {
        games: names(&["Memory"]),
        multi_game: true,
        ..OrderSnapshot::default()
    };
    assert!(!single.normalized().multi_game);

    let double: OrderSnapshot = OrderSnapshot {
        games: names(&["Memory", "Simon Says"]),
        multi_game: false,
        ..OrderSnapshot::default()
    };
    assert!(double.normalized().multi_game);
}

#[test]
fn test_normalized_collapses_duplicate_games() {
    let snapshot: OrderSnapshot = OrderSnapshot {
        games: names(&["Memory", "Memory"]),
        ..OrderSnapshot::default()
    };
    let normalized: OrderSnapshot = snapshot.normalized();
    assert_eq!(normalized.games, names(&["Memory"]));
    assert!(!normalized.multi_game);
}

#[test]
fn test_default_snapshot_has_one_event_day() {
    assert_eq!(OrderSnapshot::default().event_days, 1);
}
