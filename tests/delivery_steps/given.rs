//! Given steps for message delivery BDD scenarios.

use super::world::DeliveryWorld;
use eyre::WrapErr;
use herald::channel::{adapters::ScriptedChannel, domain::ChannelResponse};
use herald::provider::domain::{CredentialBundle, Provider, ProviderCode, ProviderKind};
use rstest_bdd_macros::given;

fn scripted_response(status: u16) -> ChannelResponse {
    if status == 200 {
        ChannelResponse::accepted(status, r#"{"status":"done"}"#)
    } else {
        ChannelResponse::rejected(status, r#"{"error":"unavailable"}"#)
    }
}

#[given(r#"an active chat provider "{code}""#)]
fn active_chat_provider(world: &mut DeliveryWorld, code: String) -> Result<(), eyre::Report> {
    let provider = Provider::new(
        ProviderCode::new(code.as_str())?,
        "Telegram",
        ProviderKind::from_type(Some("telegram_bot")),
    )?
    .with_credentials(
        CredentialBundle::default()
            .with("token", "token-v1")
            .with("profile_id", "profile-1"),
    );
    world
        .directory
        .upsert(provider)
        .wrap_err("seed chat provider")?;
    Ok(())
}

#[given(r#"an inactive provider "{code}""#)]
fn inactive_provider(world: &mut DeliveryWorld, code: String) -> Result<(), eyre::Report> {
    let provider = Provider::new(
        ProviderCode::new(code.as_str())?,
        "SMS Gateway",
        ProviderKind::from_type(Some("sms")),
    )?
    .with_active(false);
    world
        .directory
        .upsert(provider)
        .wrap_err("seed inactive provider")?;
    Ok(())
}

#[given(r#"the channel answers with statuses "{statuses}""#)]
fn channel_answers_with(world: &mut DeliveryWorld, statuses: String) -> Result<(), eyre::Report> {
    let responses = statuses
        .split(',')
        .map(|raw| {
            raw.trim()
                .parse::<u16>()
                .map(scripted_response)
                .wrap_err_with(|| format!("invalid status {raw:?}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    world.channel = Some(ScriptedChannel::sequence(responses));
    Ok(())
}

#[given("the channel always fails with status {status:u16}")]
fn channel_always_fails(world: &mut DeliveryWorld, status: u16) {
    world.channel = Some(ScriptedChannel::always(scripted_response(status)));
}
