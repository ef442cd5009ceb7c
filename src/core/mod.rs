pub mod config;
pub mod planner;
pub mod request;
pub mod service;

pub use crate::services::prompt::{
    search_instructions, system_instruction, user_prompt, RequestedSections,
};
pub use crate::services::response_parser::{parse_trip_payload, strip_code_fence};
pub use config::{PlannerConfig, DEFAULT_MODEL};
pub use planner::TripPlanner;
pub use request::{build_generation_request, GenerationRequest};
pub use service::GenerationService;
