use async_trait::async_trait;

use super::request::GenerationRequest;
use crate::error::Result;

/// The outbound call to a hosted generative model.
///
/// Implementations make exactly one attempt per call and return the model's
/// raw text. Transport problems are reported as `PlannerError::Transport`.
#[async_trait]
pub trait GenerationService: Send + Sync + std::fmt::Debug {
    async fn generate(&self, api_key: &str, request: &GenerationRequest) -> Result<String>;
}
