use std::sync::Arc;

use tracing::{error, info, warn};

use super::{
    config::PlannerConfig,
    request::{build_generation_request, GenerationRequest},
    service::GenerationService,
};
use crate::{
    error::{PlannerError, Result},
    services::{openrouter_client::OpenRouterClient, response_parser::parse_trip_payload},
    types::{TripPlan, TripPreferences},
};

/// Turns trip preferences into a complete `TripPlan` with one model call.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    config: PlannerConfig,
    service: Arc<dyn GenerationService>,
}

impl TripPlanner {
    /// Planner backed by the OpenAI-compatible HTTP client.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        let client = OpenRouterClient::new(config.model(), config.timeout())?
            .with_base_url(config.base_url())
            .with_max_tokens(config.max_tokens());
        Ok(Self::with_service(config, Arc::new(client)))
    }

    /// Planner backed by any generation service.
    pub fn with_service(config: PlannerConfig, service: Arc<dyn GenerationService>) -> Self {
        Self { config, service }
    }

    pub fn from_env() -> Result<Self> {
        Self::new(PlannerConfig::from_env())
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate a plan.
    ///
    /// Invalid preferences and a missing credential are reported as they are,
    /// before any call is made. Every other failure becomes
    /// `PlannerError::GenerationFailed`, or the fallback plan in diagnostic
    /// mode.
    pub async fn generate(&self, prefs: &TripPreferences) -> Result<TripPlan> {
        let request = build_generation_request(prefs)?;

        let api_key = self.config.api_key().ok_or_else(|| {
            PlannerError::Config(
                "API Key is missing. Set OPENAI_API_KEY or pass --api-key".to_string(),
            )
        })?;

        match self.request_plan(api_key, &request, prefs).await {
            Ok(plan) => {
                info!(
                    plan_id = %plan.id,
                    destination = %prefs.destination,
                    flights = plan.suggested_flights.len(),
                    hotels = plan.suggested_hotels.len(),
                    transit = plan.transit_options.len(),
                    days = plan.itinerary.len(),
                    "Trip plan generated"
                );
                Ok(plan)
            }
            Err(err) => {
                error!(code = err.error_code(), error = %err, "Trip generation failed");
                if self.config.diagnostic_mode() {
                    warn!("Returning fallback plan due to error");
                    return Ok(TripPlan::fallback(&prefs.destination));
                }
                Err(PlannerError::generation_failed(err))
            }
        }
    }

    async fn request_plan(
        &self,
        api_key: &str,
        request: &GenerationRequest,
        prefs: &TripPreferences,
    ) -> Result<TripPlan> {
        let text = self.service.generate(api_key, request).await?;
        let payload = parse_trip_payload(&text)?;
        Ok(TripPlan::from_payload(payload, prefs.destination.trim()))
    }
}
