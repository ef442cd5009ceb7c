use tracing::debug;

use crate::{
    error::Result,
    schemas::{ResponseSchema, SchemaHandle},
    services::prompt::{system_instruction, user_prompt, RequestedSections},
    types::{InlineImage, TripPlanPayload, TripPreferences},
};

/// Everything a generation service needs for one call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub image: Option<InlineImage>,
    pub schema: SchemaHandle,
    pub sections: RequestedSections,
}

/// Build the single request for a set of preferences.
///
/// Preferences are validated and any attached image decoded here, so bad
/// input fails before any network activity.
pub fn build_generation_request(prefs: &TripPreferences) -> Result<GenerationRequest> {
    let image = prefs.validate()?;
    let request = GenerationRequest {
        system_instruction: system_instruction(prefs),
        user_prompt: user_prompt(prefs),
        image,
        schema: TripPlanPayload::schema().clone(),
        sections: RequestedSections::for_preferences(prefs),
    };

    debug!(
        search_type = %prefs.search_type,
        has_image = request.image.is_some(),
        instruction_len = request.system_instruction.len(),
        "Built generation request"
    );

    Ok(request)
}
