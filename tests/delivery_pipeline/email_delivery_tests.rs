//! Signed email deliveries through the full pipeline.

use super::helpers::{EMAIL_PATH, Pipeline, email_credentials};
use herald::delivery::{domain::DeliveryReport, services::SubmitMessageRequest};
use rstest::rstest;
use serde_json::{Map, Value, json};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn sent_payloads(server: &MockServer) -> Result<Vec<Value>, eyre::Report> {
    let requests = server
        .received_requests()
        .await
        .ok_or_else(|| eyre::eyre!("request recording is disabled"))?;
    requests
        .iter()
        .map(|request| serde_json::from_slice(&request.body).map_err(eyre::Report::from))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn template_email_is_signed_and_delivered() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMAIL_PATH))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "MessageId": "m-1" })))
        .expect(1)
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("postbox", "yandex_postbox", email_credentials())?;
    let mut data = Map::new();
    data.insert("name".to_owned(), json!("Ada"));

    let report = pipeline
        .orchestrator
        .submit(
            SubmitMessageRequest::new("postbox", "user@example.com", "fallback text")
                .with_template("welcome", data),
        )
        .await?;

    eyre::ensure!(
        matches!(report, DeliveryReport::Delivered { attempts: 1, .. }),
        "unexpected report {report:?}"
    );
    let payloads = sent_payloads(&server).await?;
    let payload = payloads
        .first()
        .ok_or_else(|| eyre::eyre!("no email request recorded"))?;
    eyre::ensure!(
        payload["Content"]["Template"]["TemplateName"] == json!("welcome"),
        "template name missing from {payload}"
    );
    eyre::ensure!(
        payload["Destination"]["ToAddresses"] == json!(["user@example.com"]),
        "destination missing from {payload}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plain_email_uses_the_default_subject() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "MessageId": "m-2" })))
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("postbox", "yandex_postbox", email_credentials())?;

    let report = pipeline
        .orchestrator
        .submit(SubmitMessageRequest::new("postbox", "user@example.com", "Your code is 1234"))
        .await?;

    eyre::ensure!(report.is_delivered(), "unexpected report {report:?}");
    let payloads = sent_payloads(&server).await?;
    let simple = payloads
        .first()
        .map(|payload| payload["Content"]["Simple"].clone())
        .ok_or_else(|| eyre::eyre!("no email request recorded"))?;
    eyre::ensure!(
        simple["Subject"]["Data"] == json!("Notification"),
        "unexpected subject in {simple}"
    );
    eyre::ensure!(
        simple["Body"]["Text"]["Data"] == json!("Your code is 1234"),
        "unexpected body in {simple}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_email_is_retried_until_exhausted() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMAIL_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("signature mismatch"))
        .expect(3)
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("postbox", "yandex_postbox", email_credentials())?;

    let report = pipeline
        .orchestrator
        .submit(
            SubmitMessageRequest::new("postbox", "user@example.com", "hello")
                .with_subject("Welcome"),
        )
        .await?;

    let DeliveryReport::Failed { last_error, .. } = &report else {
        return Err(eyre::eyre!("expected a failed report, got {report:?}"));
    };
    eyre::ensure!(
        last_error == "Provider returned status 403",
        "unexpected last error {last_error}"
    );
    let attempts = pipeline.attempts_for(report.message_id()).await?;
    eyre::ensure!(
        attempts
            .iter()
            .all(|attempt| attempt.response_body() == "signature mismatch"),
        "response bodies were not recorded"
    );
    Ok(())
}
