//! Forgiving field decoders for model output.
//!
//! Any JSON value is accepted: scalars are coerced to the field's type,
//! anything unusable becomes the field's default, and list items that do not
//! decode are dropped.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        // "₹12,500" and "12500.50" both count
        Value::String(text) => {
            let digits: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
    .filter(|number: &f64| number.is_finite())
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    let offered = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if kept.len() < offered {
        debug!(
            offered,
            kept = kept.len(),
            item = std::any::type_name::<T>(),
            "Dropped list items that could not be decoded"
        );
    }
    kept
}

pub mod text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
    }
}

pub mod optional_text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_text(Value::deserialize(deserializer)?))
    }
}

pub mod number {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
    }
}

pub mod day_number {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = scalar_number(&Value::deserialize(deserializer)?).unwrap_or(0.0);
        // saturating cast: negatives become 0
        Ok(number.round() as u32)
    }
}

pub mod text_list {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(super::optional_text_list::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// A bare string stands in for a one-item list.
pub mod optional_text_list {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(items.into_iter().filter_map(scalar_text).collect()),
            Value::Null | Value::Object(_) => None,
            scalar => scalar_text(scalar).map(|text| vec![text]),
        })
    }
}

pub mod items {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(super::optional_items::deserialize(deserializer)?.unwrap_or_default())
    }
}

pub mod optional_items {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(decode_items(items)),
            _ => None,
        })
    }
}

/// Non-objects and objects that fail to decode both read as absent.
pub mod optional_object {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            object @ Value::Object(_) => serde_json::from_value(object).ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Loose {
        #[serde(default, with = "text")]
        text: String,
        #[serde(default, with = "optional_text")]
        maybe: Option<String>,
        #[serde(default, with = "number")]
        amount: f64,
        #[serde(default, with = "day_number")]
        day: u32,
        #[serde(default, with = "text_list")]
        tags: Vec<String>,
    }

    fn decode(value: Value) -> Loose {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn scalars_become_text() {
        let loose = decode(json!({ "text": 4.5, "maybe": true }));
        assert_eq!(loose.text, "4.5");
        assert_eq!(loose.maybe.as_deref(), Some("true"));

        let loose = decode(json!({ "text": null, "maybe": null }));
        assert_eq!(loose.text, "");
        assert_eq!(loose.maybe, None);
    }

    #[test]
    fn numbers_accept_formatted_strings() {
        assert_eq!(decode(json!({ "amount": "₹12,500" })).amount, 12500.0);
        assert_eq!(decode(json!({ "amount": "n/a" })).amount, 0.0);
        assert_eq!(decode(json!({ "amount": null })).amount, 0.0);
        assert_eq!(decode(json!({ "day": "2" })).day, 2);
        assert_eq!(decode(json!({ "day": -1 })).day, 0);
    }

    #[test]
    fn text_lists_keep_scalars_only() {
        let loose = decode(json!({ "tags": ["Pool", 24, null, {"a": 1}] }));
        assert_eq!(loose.tags, vec!["Pool", "24"]);
        assert_eq!(decode(json!({ "tags": "Spa" })).tags, vec!["Spa"]);
        assert!(decode(json!({ "tags": null })).tags.is_empty());
    }

    #[test]
    fn undecodable_items_are_dropped() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Named {
            name: String,
        }
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "items::deserialize")]
            named: Vec<Named>,
        }

        let holder: Holder =
            serde_json::from_value(json!({ "named": [{ "name": "a" }, { "other": 1 }, 3] }))
                .unwrap();
        assert_eq!(holder.named, vec![Named { name: "a".to_string() }]);

        let holder: Holder = serde_json::from_value(json!({ "named": "none" })).unwrap();
        assert!(holder.named.is_empty());
    }
}
