mod response_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Implements `trip_planner::schema::ResponseSchema` for a named struct.
///
/// The generated impl builds the schemars schema once, copies struct and field
/// doc comments into the schema metadata and caches the resulting
/// `SchemaHandle` for the lifetime of the process.
///
/// ```ignore
/// #[response_schema(name = "TripPlan")]
/// #[derive(Deserialize, JsonSchema)]
/// #[serde(rename_all = "camelCase")]
/// pub struct TripPlanPayload { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn response_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    response_schema::response_schema(attr, item)
}
