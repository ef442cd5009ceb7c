use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    schemas::{schema_violations, ResponseSchema},
    types::{deserialize_payload, TripPlanPayload},
};

const FENCE: &str = "```";

/// Remove a markdown code fence wrapped around model output.
///
/// Surrounding whitespace is trimmed. An opening fence may carry a language
/// tag (```` ```json ````) which is dropped along with the rest of its line.
/// Text without an opening fence is returned trimmed but otherwise untouched,
/// so applying this twice gives the same result as applying it once.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = match after_open.find('\n') {
        Some(newline) => {
            let tag = &after_open[..newline];
            if tag.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                &after_open[newline + 1..]
            } else {
                // Content starts on the fence line itself, e.g. ```{"a":1}```
                after_open
            }
        }
        None => after_open,
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Turn raw model text into a trip plan payload.
pub fn parse_trip_payload(text: &str) -> Result<TripPlanPayload> {
    if text.trim().is_empty() {
        return Err(PlannerError::EmptyResponse);
    }

    let cleaned = strip_code_fence(text);
    if cleaned.len() != text.len() {
        debug!(
            raw_len = text.len(),
            cleaned_len = cleaned.len(),
            "Stripped code fence from model output"
        );
    }
    if cleaned.is_empty() {
        return Err(PlannerError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|err| PlannerError::MalformedPayload(format!("response is not valid JSON: {err}")))?;

    if !value.is_object() {
        return Err(PlannerError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    // Schema departures are only logged; decoding coerces them.
    match schema_violations(TripPlanPayload::schema(), &value) {
        Ok(violations) if !violations.is_empty() => debug!(
            count = violations.len(),
            first = %violations[0],
            "Model output departs from the response schema"
        ),
        Ok(_) => {}
        Err(err) => debug!(error = %err, "Skipped schema check of model output"),
    }
    deserialize_payload(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"summary":"x"}"#;

    #[test]
    fn no_fence_is_returned_as_is() {
        assert_eq!(strip_code_fence(BODY), BODY);
    }

    #[test]
    fn json_tagged_fence_is_removed() {
        assert_eq!(strip_code_fence("```json\n{\"summary\":\"x\"}\n```"), BODY);
    }

    #[test]
    fn untagged_fence_is_removed() {
        assert_eq!(strip_code_fence("```\n{\"summary\":\"x\"}\n```"), BODY);
    }

    #[test]
    fn fence_with_surrounding_whitespace_is_removed() {
        assert_eq!(
            strip_code_fence("  \n```json  \n{\"summary\":\"x\"}\n```  \n\n"),
            BODY
        );
    }

    #[test]
    fn fence_with_crlf_line_endings_is_removed() {
        assert_eq!(strip_code_fence("```json\r\n{\"summary\":\"x\"}\r\n```\r\n"), BODY);
    }

    #[test]
    fn missing_closing_fence_keeps_body() {
        assert_eq!(strip_code_fence("```json\n{\"summary\":\"x\"}"), BODY);
    }

    #[test]
    fn single_line_fence_is_removed() {
        assert_eq!(strip_code_fence("```{\"summary\":\"x\"}```"), BODY);
    }

    #[test]
    fn stripping_is_idempotent() {
        let once = strip_code_fence("```json\n{\"summary\":\"x\"}\n```");
        assert_eq!(strip_code_fence(once), once);
    }

    #[test]
    fn multiline_body_is_preserved() {
        let body = "{\n  \"summary\": \"a\\n```b\"\n}";
        let fenced = format!("```json\n{body}\n```");
        assert_eq!(strip_code_fence(&fenced), body);
    }

    #[test]
    fn parse_rejects_empty_and_non_json() {
        assert!(matches!(parse_trip_payload("   "), Err(PlannerError::EmptyResponse)));
        assert!(matches!(
            parse_trip_payload("```json\n```"),
            Err(PlannerError::EmptyResponse)
        ));
        assert!(matches!(
            parse_trip_payload("Here is your trip!"),
            Err(PlannerError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_trip_payload(r#"{"summary": "x""#),
            Err(PlannerError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_trip_payload("[1, 2]"),
            Err(PlannerError::MalformedPayload(_))
        ));
    }

    #[test]
    fn parse_accepts_fenced_and_plain_alike() {
        let plain = parse_trip_payload(BODY).unwrap();
        let fenced = parse_trip_payload("```json\n{\"summary\":\"x\"}\n```").unwrap();
        assert_eq!(plain.summary, fenced.summary);
        assert_eq!(plain.summary.as_deref(), Some("x"));
        assert!(fenced.suggested_flights.is_none());
    }

    #[test]
    fn parse_coerces_loose_types_instead_of_failing() {
        let payload = parse_trip_payload(
            r#"{
                "suggestedHotels": [{"name": "Taj", "rating": 4.5, "pricePerNight": 9000, "features": null}],
                "suggestedFlights": [{"airline": "IndiGo", "price": 4500}, {"airline": "Akasa"}],
                "budget": {"total": 5000, "food": null, "currency": null},
                "itinerary": [{"day": 1, "title": null, "activities": [{"time": "09:00", "activity": "Fort"}]}],
                "transitOptions": "none",
                "safetyTips": null,
                "summary": 42
            }"#,
        )
        .unwrap();

        let hotels = payload.suggested_hotels.unwrap();
        assert_eq!(hotels[0].rating, "4.5");
        assert_eq!(hotels[0].price_per_night, "9000");
        assert!(hotels[0].features.is_empty());

        let flights = payload.suggested_flights.unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].price, "4500");

        let budget = payload.budget.unwrap();
        assert_eq!(budget.total, 5000.0);
        assert_eq!(budget.food, 0.0);
        assert_eq!(budget.currency, "₹");

        let day = &payload.itinerary.unwrap()[0];
        assert_eq!(day.title, "");
        assert_eq!(day.activities.len(), 1);

        assert!(payload.transit_options.is_none());
        assert!(payload.safety_tips.is_none());
        assert_eq!(payload.summary.as_deref(), Some("42"));
    }
}
