// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vr_config_domain::{BRONZE_BASE_PRICE, Tier, WizardStep};
use vr_config_persistence::Persistence;

use crate::{
    ApiError, CommandResponse, FinishedOrder, OrderView, SelectGamesRequest, SubmissionRecord,
    WizardSession, execute_command, finish_order, resume_order,
};

use super::helpers::{
    QUEST_3S, advance_to_review, create_test_persistence, create_test_user_request, names,
    next_step, run, start_test_session,
};

#[test]
fn test_walkthrough_reaches_review_step() {
    let mut persistence: Persistence = create_test_persistence();
    let session: WizardSession = start_test_session(&mut persistence);

    let response: CommandResponse = advance_to_review(&mut persistence, &session);

    assert_eq!(response.order.step, WizardStep::LAST);
    assert_eq!(response.order.pricing.tier, Tier::Bronze);
    assert_eq!(response.order.pricing.device_price, 60);
    assert_eq!(response.order.pricing.total_price, BRONZE_BASE_PRICE + 60);
}

#[test]
fn test_finish_order_completes_and_builds_record() {
    let mut persistence: Persistence = create_test_persistence();
    let session: WizardSession = start_test_session(&mut persistence);
    advance_to_review(&mut persistence, &session);

    let finished: FinishedOrder = finish_order(&mut persistence, &session).unwrap();

    assert!(finished.order.completed_at.is_some());
    let record: SubmissionRecord = finished.record;
    assert_eq!(record.order_id, *session.order_id());
    assert_eq!(record.user.email, "katherine@orbital.example");
    assert_eq!(record.tier, Tier::Bronze);
    assert_eq!(record.base_price, BRONZE_BASE_PRICE);
    assert_eq!(record.device_price, 60);
    assert_eq!(record.total_price, BRONZE_BASE_PRICE + 60);
    assert_eq!(record.games.len(), 1);
    assert_eq!(record.environments[0].environment, "Modern Office");
    assert_eq!(record.devices[0].device, QUEST_3S);
    assert_eq!(record.devices[0].event_days, 2);
    assert_eq!(record.devices[0].line_cost, 60);
    assert!(record.options.is_empty());

    let view: OrderView = resume_order(&mut persistence, &session).unwrap();
    assert_eq!(view.completed_at, finished.order.completed_at);
}

#[test]
fn test_finish_order_before_review_step_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let session: WizardSession = start_test_session(&mut persistence);
    run(&mut persistence, &session, create_test_user_request());

    let result: Result<FinishedOrder, ApiError> = finish_order(&mut persistence, &session);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "finish_step"
    ));
    let view: OrderView = resume_order(&mut persistence, &session).unwrap();
    assert!(view.completed_at.is_none());
}

#[test]
fn test_finish_order_twice_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let session: WizardSession = start_test_session(&mut persistence);
    advance_to_review(&mut persistence, &session);
    finish_order(&mut persistence, &session).unwrap();

    let result: Result<FinishedOrder, ApiError> = finish_order(&mut persistence, &session);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "order_completed"
    ));
}

#[test]
fn test_completed_order_rejects_further_commands() {
    let mut persistence: Persistence = create_test_persistence();
    let session: WizardSession = start_test_session(&mut persistence);
    advance_to_review(&mut persistence, &session);
    let finished: FinishedOrder = finish_order(&mut persistence, &session).unwrap();

    let result: Result<CommandResponse, ApiError> = execute_command(
        &mut persistence,
        &session,
        SelectGamesRequest {
            games: names(&["Wheel of fortune"]),
            multi_game: false,
        }
        .into(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "order_completed"
    ));
    let view: OrderView = resume_order(&mut persistence, &session).unwrap();
    assert_eq!(view.pricing, finished.order.pricing);
}

#[test]
fn test_review_step_cannot_advance() {
    let mut persistence: Persistence = create_test_persistence();
    let session: WizardSession = start_test_session(&mut persistence);
    advance_to_review(&mut persistence, &session);

    let result: Result<CommandResponse, ApiError> =
        execute_command(&mut persistence, &session, next_step());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "navigation"
    ));
}
