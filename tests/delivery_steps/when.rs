//! When steps for message delivery BDD scenarios.

use super::world::{DeliveryWorld, run_async};
use herald::delivery::services::SubmitMessageRequest;
use rstest_bdd_macros::when;

fn submit(world: &mut DeliveryWorld, request: SubmitMessageRequest) -> Result<(), eyre::Report> {
    let orchestrator = world.orchestrator()?;
    world.last_submit_result = Some(run_async(orchestrator.submit(request)));
    Ok(())
}

#[when(r#"a message "{body}" is submitted to "{provider}" for "{recipient}""#)]
fn message_submitted(
    world: &mut DeliveryWorld,
    body: String,
    provider: String,
    recipient: String,
) -> Result<(), eyre::Report> {
    submit(world, SubmitMessageRequest::new(provider, recipient, body))
}

#[when(r#"a message "{body}" without a recipient is submitted to "{provider}""#)]
fn message_without_recipient_submitted(
    world: &mut DeliveryWorld,
    body: String,
    provider: String,
) -> Result<(), eyre::Report> {
    submit(world, SubmitMessageRequest::new(provider, "", body))
}
