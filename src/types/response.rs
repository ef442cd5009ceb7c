use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::ResponseSchema,
};

/// Deserialize a validated payload into its response type, naming the
/// failing path when the shape does not fit.
pub fn deserialize_payload<T>(payload: Value) -> Result<T>
where
    T: ResponseSchema,
{
    let schema = T::schema();
    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::MalformedPayload(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::trip_plan::TripPlanPayload;
    use serde_json::json;

    #[test]
    fn reports_root_when_payload_is_not_an_object() {
        let err = deserialize_payload::<TripPlanPayload>(json!(["Goa", "Leh"])).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("`TripPlan` at <root>"), "{message}");
    }

    #[test]
    fn loosely_typed_fields_decode() {
        let payload: TripPlanPayload = deserialize_payload(json!({
            "suggestedHotels": [{ "name": "Taj", "rating": 5, "pricePerNight": 12000 }]
        }))
        .unwrap();

        let hotels = payload.suggested_hotels.unwrap();
        assert_eq!(hotels[0].rating, "5");
        assert_eq!(hotels[0].price_per_night, "12000");
    }

    #[test]
    fn ignores_unknown_and_upstream_identity_fields() {
        let payload: TripPlanPayload = deserialize_payload(json!({
            "id": "from-model",
            "createdAt": 1,
            "summary": "Beach week",
            "weather": "sunny"
        }))
        .unwrap();
        assert_eq!(payload.summary.as_deref(), Some("Beach week"));
    }
}
