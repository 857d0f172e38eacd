//! Application services for message delivery.

mod orchestrator;
mod retry;

pub use orchestrator::{
    DeliveryOrchestrator, DeliveryServiceError, DeliveryServiceResult, SubmitMessageRequest,
};
pub use retry::{AttemptLogDurability, MAX_ATTEMPTS, RetryPolicy, RetryPolicyError};
