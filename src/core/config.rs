use std::time::Duration;

use crate::services::openrouter_client::DEFAULT_BASE_URL;

pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Settings for a `TripPlanner`.
///
/// The credential is an explicit value. Nothing here is read from the
/// environment unless `from_env` is called.
#[derive(Clone, Default)]
pub struct PlannerConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    max_tokens: Option<u32>,
    diagnostic_mode: bool,
}

impl std::fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url())
            .field("model", &self.model())
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .field("diagnostic_mode", &self.diagnostic_mode)
            .finish()
    }
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(Some(api_key.into()))
    }

    /// Resolve settings from process environment variables.
    ///
    /// `OPENAI_API_KEY` (or `API_KEY`), `OPENAI_BASE_URL` (or
    /// `OPENROUTER_BASE_URL`), `TRIP_PLANNER_MODEL`, and diagnostic mode via
    /// `TRIP_PLANNER_DIAGNOSTIC=1` or `TRIP_PLANNER_ENV=development`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with a caller-supplied variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let diagnostic_mode = non_empty("TRIP_PLANNER_DIAGNOSTIC")
            .map(|value| is_truthy(&value))
            .unwrap_or(false)
            || non_empty("TRIP_PLANNER_ENV")
                .map(|value| value.eq_ignore_ascii_case("development"))
                .unwrap_or(false);

        Self {
            api_key: non_empty("OPENAI_API_KEY").or_else(|| non_empty("API_KEY")),
            base_url: non_empty("OPENAI_BASE_URL").or_else(|| non_empty("OPENROUTER_BASE_URL")),
            model: non_empty("TRIP_PLANNER_MODEL"),
            timeout: None,
            max_tokens: None,
            diagnostic_mode,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_diagnostic_mode(mut self, enabled: bool) -> Self {
        self.diagnostic_mode = enabled;
        self
    }

    /// The credential, if one was supplied and is not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn diagnostic_mode(&self) -> bool {
        self.diagnostic_mode
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = PlannerConfig::from_lookup(lookup(&[]));
        assert!(config.api_key().is_none());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert!(!config.diagnostic_mode());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn reads_credential_with_fallback_name() {
        let config = PlannerConfig::from_lookup(lookup(&[("API_KEY", "k-1")]));
        assert_eq!(config.api_key(), Some("k-1"));

        let config = PlannerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "primary"),
            ("API_KEY", "secondary"),
        ]));
        assert_eq!(config.api_key(), Some("primary"));
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let config = PlannerConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "   ")]));
        assert!(config.api_key().is_none());
        assert!(PlannerConfig::new("").api_key().is_none());
    }

    #[test]
    fn diagnostic_mode_switches() {
        let by_flag = PlannerConfig::from_lookup(lookup(&[("TRIP_PLANNER_DIAGNOSTIC", "true")]));
        assert!(by_flag.diagnostic_mode());

        let by_env = PlannerConfig::from_lookup(lookup(&[("TRIP_PLANNER_ENV", "Development")]));
        assert!(by_env.diagnostic_mode());

        let off = PlannerConfig::from_lookup(lookup(&[("TRIP_PLANNER_DIAGNOSTIC", "0")]));
        assert!(!off.diagnostic_mode());
    }

    #[test]
    fn debug_output_redacts_key() {
        let rendered = format!("{:?}", PlannerConfig::new("sk-secret"));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
