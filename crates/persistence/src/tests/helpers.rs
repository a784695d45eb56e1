// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use vr_config::{Command, OrderState, SelectionSet, TransitionResult, apply};
use vr_config_domain::UserDetails;

pub const QUEST_3S: &str = "Meta Quest 3s standard device package";
pub const QUEST_3: &str = "Meta Quest 3 standard device package";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_user_details() -> UserDetails {
    UserDetails::new("Ada Lovelace", "Analytical Engines", "ada@engines.io")
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Applies a command to the stored order and saves every changed category,
/// the way the service layer does.
pub fn apply_and_save(persistence: &mut Persistence, order: &OrderState, command: Command) -> OrderState {
    let result: TransitionResult = apply(order, command).unwrap();
    for category in &result.changed {
        let set: SelectionSet = result.new_state.selection_set(*category);
        persistence.save_selections(&order.id, &set).unwrap();
    }
    persistence.get_complete_order(&order.id).unwrap()
}
