//! Unintegrated provider types routed through the simulated channel.

use super::helpers::Pipeline;
use herald::delivery::{
    domain::{AttemptOutcome, DeliveryReport},
    services::SubmitMessageRequest,
};
use herald::provider::domain::CredentialBundle;
use rstest::rstest;
use std::time::Duration;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[rstest]
#[case::sms("sms")]
#[case::blank_type("")]
#[case::unknown_vendor("carrier_pigeon")]
#[tokio::test(flavor = "multi_thread")]
async fn unintegrated_types_never_reach_the_network(
    #[case] provider_type: &str,
) -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let pipeline = Pipeline::against(&server, 1.0)?;
    pipeline.register("sms_gateway", provider_type, CredentialBundle::default())?;

    let report = pipeline
        .orchestrator
        .submit(SubmitMessageRequest::new("sms_gateway", "79991234567", "hello"))
        .await?;

    eyre::ensure!(
        matches!(report, DeliveryReport::Delivered { attempts: 1, .. }),
        "unexpected report {report:?}"
    );
    eyre::ensure!(
        pipeline.latency_sleeper.requested() == vec![Duration::from_millis(100)],
        "simulated latency was not applied"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn simulated_outage_fails_after_every_attempt() -> Result<(), eyre::Report> {
    let server = MockServer::start().await;
    let pipeline = Pipeline::against(&server, 0.0)?;
    pipeline.register("sms_gateway", "sms", CredentialBundle::default())?;

    let report = pipeline
        .orchestrator
        .submit(SubmitMessageRequest::new("sms_gateway", "79991234567", "hello"))
        .await?;

    eyre::ensure!(
        matches!(report, DeliveryReport::Failed { attempts: 3, .. }),
        "unexpected report {report:?}"
    );
    let attempts = pipeline.attempts_for(report.message_id()).await?;
    eyre::ensure!(attempts.len() == 3, "expected three attempts");
    for attempt in &attempts {
        eyre::ensure!(attempt.outcome() == AttemptOutcome::Failed, "unexpected outcome");
        eyre::ensure!(
            attempt.response_body().contains("Provider temporary unavailable"),
            "unexpected body {}",
            attempt.response_body()
        );
    }
    eyre::ensure!(
        pipeline.retry_sleeper.requested() == vec![Duration::from_secs(1), Duration::from_secs(3)],
        "unexpected waits {:?}",
        pipeline.retry_sleeper.requested()
    );
    Ok(())
}
