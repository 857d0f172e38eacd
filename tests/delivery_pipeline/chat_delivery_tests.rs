//! Chat relay deliveries through the full pipeline.

use super::helpers::{DEFAULT_CHAT_PATH, Pipeline, TELEGRAM_PATH, chat_credentials};
use herald::channel::adapters::normalize_recipient;
use herald::delivery::{
    domain::{AttemptOutcome, DeliveryReport, MessageStatus},
    ports::MessageStore,
    services::SubmitMessageRequest,
};
use herald::provider::domain::CredentialBundle;
use rstest::rstest;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn confirmed() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "done" }))
}

fn greeting() -> SubmitMessageRequest {
    SubmitMessageRequest::new("telegram_bot", "+7 999 123-45-67", "hello")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_relay_delivers_on_first_attempt() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TELEGRAM_PATH))
        .and(query_param("profile_id", "profile-1"))
        .and(header("authorization", "relay-token"))
        .and(body_json(json!({
            "recipient": normalize_recipient("+7 999 123-45-67"),
            "body": "hello"
        })))
        .respond_with(confirmed())
        .expect(1)
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("telegram_bot", "telegram_bot", chat_credentials())?;

    let report = pipeline.orchestrator.submit(greeting()).await?;

    eyre::ensure!(
        matches!(report, DeliveryReport::Delivered { attempts: 1, .. }),
        "unexpected report {report:?}"
    );
    let stored = pipeline
        .messages
        .find_by_id(report.message_id())
        .await?
        .ok_or_else(|| eyre::eyre!("message was not stored"))?;
    eyre::ensure!(stored.status() == MessageStatus::Delivered, "status mismatch");
    eyre::ensure!(stored.recipient() == "+7 999 123-45-67", "recipient was rewritten");
    let attempts = pipeline.attempts_for(report.message_id()).await?;
    eyre::ensure!(attempts.len() == 1, "expected one attempt, found {}", attempts.len());
    eyre::ensure!(pipeline.retry_sleeper.requested().is_empty(), "unexpected retry wait");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transient_relay_failure_is_retried() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TELEGRAM_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TELEGRAM_PATH))
        .respond_with(confirmed())
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("telegram_bot", "telegram_bot", chat_credentials())?;

    let report = pipeline.orchestrator.submit(greeting()).await?;

    eyre::ensure!(
        matches!(report, DeliveryReport::Delivered { attempts: 2, .. }),
        "unexpected report {report:?}"
    );
    let attempts = pipeline.attempts_for(report.message_id()).await?;
    let observed: Vec<_> = attempts
        .iter()
        .map(|attempt| (attempt.outcome(), attempt.response_code()))
        .collect();
    eyre::ensure!(
        observed == vec![(AttemptOutcome::Failed, Some(503)), (AttemptOutcome::Success, Some(200))],
        "unexpected attempts {observed:?}"
    );
    eyre::ensure!(
        pipeline.retry_sleeper.requested() == vec![Duration::from_secs(1)],
        "unexpected waits {:?}",
        pipeline.retry_sleeper.requested()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unconfirmed_relay_exhausts_the_schedule() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TELEGRAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "queued" })))
        .expect(3)
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("telegram_bot", "telegram_bot", chat_credentials())?;

    let report = pipeline.orchestrator.submit(greeting()).await?;

    match &report {
        DeliveryReport::Failed {
            attempts,
            last_error,
            ..
        } => {
            eyre::ensure!(*attempts == 3, "expected three attempts, found {attempts}");
            eyre::ensure!(
                last_error == "Provider returned status 500",
                "unexpected last error {last_error}"
            );
        }
        DeliveryReport::Delivered { .. } => return Err(eyre::eyre!("expected a failed report")),
    }
    let stored = pipeline
        .messages
        .find_by_id(report.message_id())
        .await?
        .ok_or_else(|| eyre::eyre!("message was not stored"))?;
    eyre::ensure!(stored.status() == MessageStatus::Failed, "status mismatch");
    eyre::ensure!(stored.completed_at().is_none(), "failed message has completion time");
    eyre::ensure!(
        pipeline.retry_sleeper.requested() == vec![Duration::from_secs(1), Duration::from_secs(3)],
        "unexpected waits {:?}",
        pipeline.retry_sleeper.requested()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_credential_keys_reach_the_default_endpoint() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEFAULT_CHAT_PATH))
        .and(query_param("profile_id", "wa-1"))
        .and(header("authorization", "wa-token"))
        .respond_with(confirmed())
        .expect(1)
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register(
        "wappi_relay",
        "wappi",
        CredentialBundle::default()
            .with("wappi_token", "wa-token")
            .with("wappi_profile_id", "wa-1"),
    )?;

    let report = pipeline
        .orchestrator
        .submit(SubmitMessageRequest::new("wappi_relay", "79991234567", "hi"))
        .await?;

    eyre::ensure!(report.is_delivered(), "unexpected report {report:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_credentials_fail_every_attempt_without_traffic() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(confirmed())
        .expect(0)
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("telegram_bot", "telegram_bot", CredentialBundle::default())?;

    let report = pipeline.orchestrator.submit(greeting()).await?;

    eyre::ensure!(
        matches!(report, DeliveryReport::Failed { attempts: 3, .. }),
        "unexpected report {report:?}"
    );
    let attempts = pipeline.attempts_for(report.message_id()).await?;
    eyre::ensure!(
        attempts
            .iter()
            .all(|attempt| attempt.outcome() == AttemptOutcome::Failed),
        "expected only failed attempts"
    );
    Ok(())
}
