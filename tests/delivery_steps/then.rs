//! Then steps for message delivery BDD scenarios.

use super::world::{DeliveryWorld, run_async};
use herald::delivery::{
    domain::{DeliveryReport, MessageStatus},
    ports::{AttemptLog, MessageStore},
    services::DeliveryServiceError,
};
use rstest_bdd_macros::then;
use std::time::Duration;

fn stored_status(world: &DeliveryWorld) -> Result<MessageStatus, eyre::Report> {
    let report = world.report()?;
    let message = run_async(world.messages.find_by_id(report.message_id()))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("reported message was not stored"))?;
    Ok(message.status())
}

fn rejection(world: &DeliveryWorld) -> Result<&DeliveryServiceError, eyre::Report> {
    match world.last_submit_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(report)) => Err(eyre::eyre!("expected rejection, got {report:?}")),
        None => Err(eyre::eyre!("missing submission result in scenario world")),
    }
}

#[then("the message is delivered on attempt {attempts:u32}")]
fn message_delivered(world: &DeliveryWorld, attempts: u32) -> Result<(), eyre::Report> {
    let report = world.report()?;
    eyre::ensure!(report.is_delivered(), "expected delivery, got {report:?}");
    eyre::ensure!(
        report.attempts() == attempts,
        "expected {attempts} attempts, found {}",
        report.attempts()
    );
    eyre::ensure!(
        stored_status(world)? == MessageStatus::Delivered,
        "stored message is not delivered"
    );
    Ok(())
}

#[then(r#"the message failed after {attempts:u32} attempts with last error "{last_error}""#)]
fn message_failed(
    world: &DeliveryWorld,
    attempts: u32,
    last_error: String,
) -> Result<(), eyre::Report> {
    let report = world.report()?;
    let DeliveryReport::Failed {
        attempts: reported,
        last_error: reported_error,
        ..
    } = report
    else {
        return Err(eyre::eyre!("expected failure, got {report:?}"));
    };
    eyre::ensure!(*reported == attempts, "expected {attempts} attempts, found {reported}");
    eyre::ensure!(
        *reported_error == last_error,
        "expected last error {last_error:?}, found {reported_error:?}"
    );
    eyre::ensure!(
        stored_status(world)? == MessageStatus::Failed,
        "stored message is not failed"
    );
    Ok(())
}

#[then(r#"the attempt log records outcomes "{outcomes}""#)]
fn attempt_log_outcomes(world: &DeliveryWorld, outcomes: String) -> Result<(), eyre::Report> {
    let report = world.report()?;
    let attempts = run_async(world.attempts.attempts_for(report.message_id()))
        .map_err(|err| eyre::eyre!("attempt log read failed: {err}"))?;
    let recorded: Vec<&str> = attempts
        .iter()
        .map(|attempt| attempt.outcome().as_str())
        .collect();
    let expected: Vec<&str> = outcomes.split(',').map(str::trim).collect();
    eyre::ensure!(
        recorded == expected,
        "expected outcomes {expected:?}, found {recorded:?}"
    );
    Ok(())
}

#[then(r#"the retry waits were "{waits}""#)]
fn retry_waits(world: &DeliveryWorld, waits: String) -> Result<(), eyre::Report> {
    let expected = waits
        .split(',')
        .map(|raw| raw.trim().parse::<u64>().map(Duration::from_secs))
        .collect::<Result<Vec<_>, _>>()?;
    let requested = world.sleeper.requested();
    eyre::ensure!(
        requested == expected,
        "expected waits {expected:?}, found {requested:?}"
    );
    Ok(())
}

#[then("no retry wait was requested")]
fn no_retry_wait(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let requested = world.sleeper.requested();
    eyre::ensure!(requested.is_empty(), "unexpected waits {requested:?}");
    Ok(())
}

#[then("the submission is rejected because the provider is unknown")]
fn rejected_unknown(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    eyre::ensure!(
        matches!(err, DeliveryServiceError::UnknownProvider(_)),
        "expected unknown provider, got {err}"
    );
    Ok(())
}

#[then("the submission is rejected because the provider is inactive")]
fn rejected_inactive(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    eyre::ensure!(
        matches!(err, DeliveryServiceError::ProviderInactive { .. }),
        "expected inactive provider, got {err}"
    );
    Ok(())
}

#[then("the submission is rejected as invalid")]
fn rejected_invalid(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    eyre::ensure!(
        matches!(err, DeliveryServiceError::InvalidRequest(_)),
        "expected invalid request, got {err}"
    );
    Ok(())
}

#[then("no message is stored")]
fn no_message_stored(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let messages = world
        .messages
        .messages()
        .map_err(|err| eyre::eyre!("message store read failed: {err}"))?;
    eyre::ensure!(messages.is_empty(), "found {} stored messages", messages.len());
    Ok(())
}
