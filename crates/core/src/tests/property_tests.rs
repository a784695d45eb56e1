// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::QUEST_3S;
use crate::{OrderSnapshot, PricingResult, calculate_pricing, classify_tier};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use vr_config_domain::catalog::{DEVICES, ENVIRONMENTS, GAMES, OPTIONS};
use vr_config_domain::{Tier, find_device};

fn game_name() -> impl Strategy<Value = String> {
    prop::sample::select(GAMES.iter().map(|game| game.name).collect::<Vec<&str>>())
        .prop_map(str::to_string)
}

fn environment_name() -> impl Strategy<Value = String> {
    prop::sample::select(ENVIRONMENTS.iter().map(|env| env.name).collect::<Vec<&str>>())
        .prop_map(str::to_string)
}

fn device_name() -> impl Strategy<Value = String> {
    prop::sample::select(DEVICES.iter().map(|device| device.name).collect::<Vec<&str>>())
        .prop_map(str::to_string)
}

fn option_name() -> impl Strategy<Value = String> {
    prop::sample::select(OPTIONS.iter().map(|option| option.name).collect::<Vec<&str>>())
        .prop_map(str::to_string)
}

prop_compose! {
    fn arb_snapshot()(
        games in prop::collection::vec(game_name(), 0..=2),
        environments in prop::collection::btree_map(game_name(), environment_name(), 0..=3),
        devices in prop::collection::btree_map(device_name(), 0_u32..=4, 0..=2),
        event_days in 1_u32..=30,
        wants_custom_3d in any::<bool>(),
        custom_3d_count in 0_u32..=10,
        options in prop::collection::btree_set(option_name(), 0..=4),
    ) -> OrderSnapshot {
        OrderSnapshot {
            multi_game: games.len() > 1,
            games,
            environments,
            devices,
            event_days,
            wants_custom_3d,
            custom_3d_count,
            options,
        }
    }
}

fn bronze_only_snapshot() -> OrderSnapshot {
    let mut environments: BTreeMap<String, String> = BTreeMap::new();
    environments.insert(String::from("Memory"), String::from("Modern Office"));
    OrderSnapshot {
        games: vec![String::from("Memory")],
        environments,
        ..OrderSnapshot::default()
    }
}

proptest! {
    #[test]
    fn base_price_matches_tier(snapshot in arb_snapshot()) {
        let result: PricingResult = calculate_pricing(&snapshot);
        prop_assert!(Tier::ALL.contains(&result.tier));
        prop_assert_eq!(result.base_price, result.tier.base_price());
    }

    #[test]
    fn total_is_base_plus_device_rental(snapshot in arb_snapshot()) {
        let result: PricingResult = calculate_pricing(&snapshot);
        let expected_devices: u64 = snapshot
            .devices
            .iter()
            .map(|(name, quantity)| {
                let rate: u64 = u64::from(find_device(name).unwrap().price_per_day);
                rate * u64::from(*quantity) * u64::from(snapshot.event_days)
            })
            .sum();
        prop_assert_eq!(result.device_price, expected_devices);
        prop_assert_eq!(result.total_price, result.base_price + result.device_price);
    }

    #[test]
    fn engine_is_idempotent(snapshot in arb_snapshot()) {
        prop_assert_eq!(calculate_pricing(&snapshot), calculate_pricing(&snapshot));
    }

    #[test]
    fn normalization_does_not_change_result(snapshot in arb_snapshot()) {
        let normalized: OrderSnapshot = snapshot.normalized();
        prop_assert_eq!(normalized.normalized(), normalized.clone());
        prop_assert_eq!(calculate_pricing(&normalized), calculate_pricing(&snapshot));
    }

    #[test]
    fn reason_agrees_with_tier(snapshot in arb_snapshot()) {
        let classification = classify_tier(&snapshot);
        match classification.reason {
            Some(reason) => prop_assert_eq!(reason.tier(), classification.tier),
            None => prop_assert_eq!(classification.tier, Tier::Bronze),
        }
    }

    #[test]
    fn any_gold_trigger_dominates_silver_selections(
        silver_options in prop::collection::btree_set(
            prop::sample::select(vec!["Leaderboard", "Live chat support during event", "VR game trailer creation"])
                .prop_map(str::to_string),
            0..=3,
        ),
        custom_3d_count in 1_u32..=5,
        trigger in 0_usize..5,
    ) {
        let mut snapshot: OrderSnapshot = OrderSnapshot {
            games: vec![String::from("Build the product")],
            wants_custom_3d: true,
            custom_3d_count,
            options: silver_options,
            ..OrderSnapshot::default()
        };
        match trigger {
            0 => snapshot.games.push(String::from("Memory")),
            1 => snapshot.games = vec![String::from("Wheel of fortune")],
            2 => {
                snapshot
                    .environments
                    .insert(String::from("Build the product"), String::from("Ancient Temple"));
            }
            3 => {
                snapshot.devices.insert(QUEST_3S.to_string(), 3);
            }
            _ => {
                snapshot.options.insert(String::from("24/7 AI chat support"));
            }
        }
        prop_assert_eq!(classify_tier(&snapshot).tier, Tier::Gold);
    }

    #[test]
    fn device_quantity_monotonicity(event_days in 1_u32..=30) {
        let tiers: Vec<Tier> = (1_u32..=3)
            .map(|quantity| {
                let mut snapshot: OrderSnapshot = bronze_only_snapshot();
                snapshot.devices.insert(QUEST_3S.to_string(), quantity);
                snapshot.event_days = event_days;
                classify_tier(&snapshot).tier
            })
            .collect();
        prop_assert_eq!(tiers, vec![Tier::Bronze, Tier::Silver, Tier::Gold]);
    }

    #[test]
    fn removing_all_options_never_raises_tier(snapshot in arb_snapshot()) {
        let without: OrderSnapshot = OrderSnapshot {
            options: BTreeSet::new(),
            ..snapshot.clone()
        };
        prop_assert!(classify_tier(&without).tier <= classify_tier(&snapshot).tier);
    }
}
