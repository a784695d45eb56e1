// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use vr_config::Command;
use vr_config_persistence::Persistence;

use crate::{
    CommandResponse, DeviceQuantity, NavigateRequest, OrderView, ReplaceOptionsRequest,
    SaveUserDetailsRequest, SelectEnvironmentRequest, SelectGamesRequest, SetCustom3DRequest,
    SetDevicesRequest, WizardSession, execute_command, start_order,
};

pub const QUEST_3S: &str = "Meta Quest 3s standard device package";
pub const QUEST_3: &str = "Meta Quest 3 standard device package";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn start_test_session(persistence: &mut Persistence) -> WizardSession {
    let view: OrderView = start_order(persistence).unwrap();
    WizardSession::new(view.order_id)
}

pub fn create_test_user_request() -> SaveUserDetailsRequest {
    SaveUserDetailsRequest {
        name: String::from("Katherine Johnson"),
        company: String::from("Orbital Mechanics"),
        email: String::from("katherine@orbital.example"),
    }
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

pub fn run(
    persistence: &mut Persistence,
    session: &WizardSession,
    command: impl Into<Command>,
) -> CommandResponse {
    execute_command(persistence, session, command.into()).unwrap()
}

pub fn next_step() -> Command {
    NavigateRequest::Next { focused_game: None }
        .into_command()
        .unwrap()
}

/// Walks a fresh order through every step with a minimal Bronze setup,
/// leaving it on the review step.
pub fn advance_to_review(persistence: &mut Persistence, session: &WizardSession) -> CommandResponse {
    run(persistence, session, create_test_user_request());
    run(persistence, session, next_step());
    run(
        persistence,
        session,
        SelectGamesRequest {
            games: names(&["Memory"]),
            multi_game: false,
        },
    );
    run(persistence, session, next_step());
    run(
        persistence,
        session,
        SelectEnvironmentRequest {
            game: String::from("Memory"),
            environment: String::from("Modern Office"),
        },
    );
    run(persistence, session, next_step());
    run(
        persistence,
        session,
        SetDevicesRequest {
            devices: vec![DeviceQuantity {
                device: QUEST_3S.to_string(),
                quantity: 1,
            }],
            event_days: 2,
        },
    );
    run(persistence, session, next_step());
    run(
        persistence,
        session,
        SetCustom3DRequest {
            wanted: false,
            count: 0,
        },
    );
    run(persistence, session, next_step());
    run(
        persistence,
        session,
        ReplaceOptionsRequest {
            options: Vec::new(),
        },
    );
    run(persistence, session, next_step())
}
