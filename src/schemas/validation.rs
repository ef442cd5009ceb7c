use crate::{error::PlannerError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Every place `payload` departs from `schema`, each prefixed with the JSON
/// pointer of the offending value. Empty when the payload conforms.
pub fn schema_violations(schema: &SchemaHandle, payload: &Value) -> Result<Vec<String>, PlannerError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            PlannerError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema.schema_name(),
                err
            ))
        })?;

    let violations = match validator.validate(payload) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "<root>".to_string() } else { path };
                format!("{}: {}", path, error)
            })
            .collect(),
    };
    Ok(violations)
}

/// Strict check of a payload against its schema.
///
/// Reports at most three violations.
pub fn validate_payload(schema: &SchemaHandle, payload: &Value) -> Result<(), PlannerError> {
    let violations = schema_violations(schema, payload)?;
    if violations.is_empty() {
        return Ok(());
    }

    let mut detail = violations
        .iter()
        .take(MAX_SCHEMA_ERRORS)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ");
    if violations.len() > MAX_SCHEMA_ERRORS {
        detail.push_str("; additional errors truncated");
    }

    Err(PlannerError::MalformedPayload(format!(
        "payload does not match `{}` schema: {}",
        schema.schema_name(),
        detail
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ResponseSchema;
    use crate::types::trip_plan::TripPlanPayload;
    use serde_json::json;

    #[test]
    fn accepts_sparse_payload() {
        let schema = TripPlanPayload::schema();
        assert!(validate_payload(schema, &json!({ "summary": "x" })).is_ok());
        assert!(schema_violations(schema, &json!({})).unwrap().is_empty());
    }

    #[test]
    fn flags_flight_without_airline() {
        let schema = TripPlanPayload::schema();
        let payload = json!({
            "suggestedFlights": [{ "price": "₹4,500" }]
        });

        let err = validate_payload(schema, &payload).unwrap_err();
        match err {
            PlannerError::MalformedPayload(message) => {
                assert!(message.contains("/suggestedFlights/0"), "{message}");
                assert!(message.contains("airline"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn lists_every_violation() {
        let schema = TripPlanPayload::schema();
        let payload = json!({
            "budget": { "total": "lots", "food": null },
            "suggestedHotels": [{ "name": "Taj", "rating": 4.5, "pricePerNight": 9000 }]
        });

        let violations = schema_violations(schema, &payload).unwrap();
        assert!(violations.len() >= 3, "{violations:?}");
        assert!(violations.iter().any(|v| v.starts_with("/suggestedHotels/0/rating")));
        assert!(violations.iter().any(|v| v.starts_with("/budget")));
    }
}
