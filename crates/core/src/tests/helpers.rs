// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, OrderSnapshot, OrderState, TransitionResult, apply};
use time::OffsetDateTime;
use time::macros::datetime;
use vr_config_domain::{OrderId, UserDetails};

pub const QUEST_3S: &str = "Meta Quest 3s standard device package";
pub const QUEST_3: &str = "Meta Quest 3 standard device package";
pub const QUEST_3S_RATE: u64 = 30;
pub const QUEST_3_RATE: u64 = 55;

pub fn create_test_timestamp() -> OffsetDateTime {
    datetime!(2026-03-14 09:30:00 UTC)
}

pub fn create_test_order() -> OrderState {
    OrderState::new(OrderId::new(), create_test_timestamp())
}

pub fn create_test_user_details() -> UserDetails {
    UserDetails::new("Grace Hopper", "Compilers Inc", "grace@compilers.io")
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Applies a sequence of commands, panicking on the first failure.
pub fn apply_all(state: &OrderState, commands: Vec<Command>) -> OrderState {
    commands.into_iter().fold(state.clone(), |current, command| {
        let result: TransitionResult = apply(&current, command).unwrap();
        result.new_state
    })
}

pub fn snapshot_with_devices(devices: &[(&str, u32)], event_days: u32) -> OrderSnapshot {
    OrderSnapshot {
        devices: devices
            .iter()
            .map(|(name, quantity)| ((*name).to_string(), *quantity))
            .collect(),
        event_days,
        ..OrderSnapshot::default()
    }
}
