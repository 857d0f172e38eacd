//! Simulated channel for providers without a real integration.

use crate::channel::{
    domain::{ChannelRequest, ChannelResponse},
    ports::ChannelAdapter,
    settings::SimulatedSettings,
};
use crate::clock::Sleeper;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// Channel that waits briefly and succeeds at a fixed probability.
///
/// Outcomes come from a seedable generator so test runs can be reproduced.
pub struct SimulatedChannel {
    delay: std::time::Duration,
    success_rate: f64,
    sleeper: Arc<dyn Sleeper>,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for SimulatedChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedChannel")
            .field("delay", &self.delay)
            .field("success_rate", &self.success_rate)
            .finish_non_exhaustive()
    }
}

impl SimulatedChannel {
    /// Creates a simulated channel, seeding from settings or the OS.
    #[must_use]
    pub fn new(settings: &SimulatedSettings, sleeper: Arc<dyn Sleeper>) -> Self {
        let rng = settings
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            delay: settings.delay(),
            success_rate: sanitize_rate(settings.success_rate),
            sleeper,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the effective success probability.
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    fn roll(&self) -> bool {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(self.success_rate),
            Err(poisoned) => poisoned.into_inner().gen_bool(self.success_rate),
        }
    }
}

#[async_trait]
impl ChannelAdapter for SimulatedChannel {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn send(&self, request: &ChannelRequest<'_>) -> ChannelResponse {
        self.sleeper.sleep(self.delay).await;
        let succeeded = self.roll();
        debug!(
            provider = %request.provider.code(),
            succeeded,
            "simulated delivery"
        );
        if succeeded {
            ChannelResponse::accepted(
                200,
                json!({ "success": true, "message_id": Uuid::new_v4().to_string() }).to_string(),
            )
        } else {
            ChannelResponse::rejected(
                ChannelResponse::SYNTHETIC_FAILURE_STATUS,
                json!({ "success": false, "error": "Provider temporary unavailable" }).to_string(),
            )
        }
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}
