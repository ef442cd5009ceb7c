use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use trip_planner::{response_schema, schema::validate_payload, ResponseSchema};

/// Weekend getaway ideas near a city
#[derive(Debug, Deserialize, JsonSchema)]
#[response_schema]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct GetawayIdeas {
    /// Places within driving distance
    nearby_places: Vec<String>,
    /// Best month to go
    #[serde(default)]
    best_month: Option<String>,
    #[serde(rename = "maxHours")]
    max_drive_hours: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[response_schema(name = "StayPick", description = "One hotel choice")]
#[allow(dead_code)]
struct HotelPick {
    name: String,
}

#[test]
fn macro_derives_name_and_description_from_struct() {
    let handle = GetawayIdeas::schema();
    assert_eq!(handle.schema_name(), "GetawayIdeas");
    assert_eq!(handle.type_name(), "GetawayIdeas");

    let schema = handle.schema_json();
    assert_eq!(schema["title"], "GetawayIdeas");
    assert_eq!(schema["description"], "Weekend getaway ideas near a city");
}

#[test]
fn field_docs_follow_serde_renames() {
    let schema = GetawayIdeas::schema().schema_json();
    let properties = &schema["properties"];

    assert_eq!(
        properties["nearbyPlaces"]["description"],
        "Places within driving distance"
    );
    assert_eq!(properties["bestMonth"]["description"], "Best month to go");
    assert!(properties.get("maxHours").is_some());
    assert!(properties.get("nearby_places").is_none());
}

#[test]
fn explicit_arguments_win() {
    let handle = HotelPick::schema();
    assert_eq!(handle.schema_name(), "StayPick");
    assert_eq!(handle.schema_json()["description"], "One hotel choice");
}

#[test]
fn schema_handle_is_cached() {
    assert!(std::ptr::eq(GetawayIdeas::schema(), GetawayIdeas::schema()));
}

#[test]
fn generated_schema_validates_payloads() {
    let good = json!({ "nearbyPlaces": ["Lonavala"], "maxHours": 3 });
    assert!(validate_payload(GetawayIdeas::schema(), &good).is_ok());

    let bad = json!({ "nearbyPlaces": "Lonavala" });
    assert!(validate_payload(GetawayIdeas::schema(), &bad).is_err());
}
