// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Custom3DSelection, DeviceLine, DomainError, EnvironmentCompatibility, GameSelection, OrderId,
    Tier, UserDetails, WizardStep, find_device, find_game,
};
use std::str::FromStr;

#[test]
fn test_tier_ordering_and_base_prices() {
    assert!(Tier::Bronze < Tier::Silver);
    assert!(Tier::Silver < Tier::Gold);
    assert_eq!(Tier::Bronze.max(Tier::Gold), Tier::Gold);
    assert_eq!(Tier::Bronze.base_price(), 3499);
    assert_eq!(Tier::Silver.base_price(), 5999);
    assert_eq!(Tier::Gold.base_price(), 9999);
}

#[test]
fn test_tier_parse_round_trip_labels() {
    for tier in Tier::ALL {
        assert_eq!(Tier::from_str(tier.as_str()).unwrap(), tier);
    }
    assert!(matches!(
        Tier::from_str("Platinum"),
        Err(DomainError::InvalidTier(_))
    ));
}

#[test]
fn test_tier_serializes_as_label() {
    assert_eq!(serde_json::to_string(&Tier::Silver).unwrap(), "\"Silver\"");
}

#[test]
fn test_wizard_step_bounds() {
    assert!(WizardStep::new(0).is_err());
    assert!(WizardStep::new(8).is_err());
    assert_eq!(WizardStep::new(7).unwrap(), WizardStep::LAST);
    assert_eq!(WizardStep::LAST.next(), None);
    assert_eq!(WizardStep::FIRST.previous(), None);
    assert_eq!(WizardStep::FIRST.next().unwrap().value(), 2);
}

#[test]
fn test_wizard_step_deserialize_rejects_out_of_range() {
    let result: Result<WizardStep, _> = serde_json::from_str("9");
    assert!(result.is_err());
    let step: WizardStep = serde_json::from_str("3").unwrap();
    assert_eq!(step.value(), 3);
}

#[test]
fn test_order_id_parse() {
    let id: OrderId = OrderId::new();
    let parsed: OrderId = OrderId::from_str(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
    assert!(matches!(
        OrderId::from_str("not-a-uuid"),
        Err(DomainError::InvalidOrderId(_))
    ));
}

#[test]
fn test_user_details_trims_input() {
    let details: UserDetails = UserDetails::new("  Ada  ", " Acme ", " ada@acme.io ");
    assert_eq!(details.name, "Ada");
    assert_eq!(details.company, "Acme");
    assert_eq!(details.email, "ada@acme.io");
}

#[test]
fn test_compatibility_storage_form() {
    let only: EnvironmentCompatibility = EnvironmentCompatibility::Only(vec![
        String::from("Ancient Temple"),
        String::from("Autumn Forest"),
    ]);
    assert_eq!(only.to_storage(), "Ancient Temple,Autumn Forest");
    assert_eq!(
        EnvironmentCompatibility::from_storage("Ancient Temple,Autumn Forest"),
        only
    );
    assert_eq!(
        EnvironmentCompatibility::from_storage("All"),
        EnvironmentCompatibility::All
    );
}

#[test]
fn test_game_selection_captures_catalog_attributes() {
    let selection: GameSelection = GameSelection::from(find_game("Branded objects hunt").unwrap());
    assert_eq!(selection.tier, Tier::Gold);
    assert_eq!(selection.custom_3d_models, 3);
    assert!(selection.compatibility.allows("Autumn Forest"));
    assert!(!selection.compatibility.allows("Modern Office"));
}

#[test]
fn test_device_line_cost() {
    let line: DeviceLine = DeviceLine::new(
        find_device("Meta Quest 3 standard device package").unwrap(),
        2,
    );
    assert_eq!(line.line_cost(3), 330);
}

#[test]
fn test_custom_3d_not_wanted_forces_zero_count() {
    let selection: Custom3DSelection = Custom3DSelection::new(false, 7);
    assert_eq!(selection.count, 0);
    assert_eq!(Custom3DSelection::new(true, 7).count, 7);
}
