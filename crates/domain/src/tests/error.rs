// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_too_many_devices_message() {
    let error: DomainError = DomainError::TooManyDevices {
        requested: 5,
        max: 4,
    };
    assert_eq!(
        error.to_string(),
        "Cannot rent 5 devices: at most 4 devices per order"
    );
}

#[test]
fn test_incompatible_environment_message() {
    let error: DomainError = DomainError::IncompatibleEnvironment {
        game: String::from("Branded objects hunt"),
        environment: String::from("Modern Office"),
    };
    assert_eq!(
        error.to_string(),
        "Environment 'Modern Office' is not compatible with game 'Branded objects hunt'"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let error: Box<dyn std::error::Error> = Box::new(DomainError::ConflictingAnalyticsOptions);
    assert!(error.to_string().contains("cannot be selected together"));
}
