//! trip-planner: structured travel plans from a hosted LLM
//!
//! Describe a trip with [`TripPreferences`], hand it to a [`TripPlanner`] and
//! get back a [`TripPlan`] whose every section is present, whatever the model
//! actually returned.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use trip_planner::{PlannerConfig, SearchType, TripPlanner, TripPreferences};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let planner = TripPlanner::new(PlannerConfig::new(api_key))?;
//!
//!     let prefs = TripPreferences::new("Goa, India", NaiveDate::from_ymd_opt(2026, 12, 20).unwrap())
//!         .with_search_type(SearchType::Hotel);
//!     let plan = planner.generate(&prefs).await?;
//!     println!("{}", plan.summary);
//!     Ok(())
//! }
//! ```

extern crate self as trip_planner;

pub mod cities;
pub mod core;
pub mod error;
pub mod schemas;
pub(crate) mod services;
pub mod store;
pub mod types;

pub use cities::{suggest_cities, DEFAULT_SUGGESTION_LIMIT};
pub use core::{
    build_generation_request, parse_trip_payload, search_instructions, strip_code_fence,
    system_instruction, user_prompt, GenerationRequest, GenerationService, PlannerConfig,
    RequestedSections, TripPlanner, DEFAULT_MODEL,
};
pub use error::{PlannerError, Result, GENERATION_FAILED_MESSAGE};
pub use schemas::{ResponseSchema, SchemaDocs, SchemaHandle};
pub use services::openrouter_client::{OpenRouterClient, DEFAULT_BASE_URL};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, ProfileRepository, UserProfile};
pub use trip_planner_macros::response_schema;
pub use types::{
    BudgetBreakdown, BudgetTier, DayActivity, DayItinerary, FlightOption, HotelOption,
    InlineImage, SearchType, TransitOption, TransportMode, TripPlan, TripPlanPayload,
    TripPreferences,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
