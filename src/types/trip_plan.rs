use crate::response_schema;
use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::lenient;

/// Currency symbol every generated price is expressed in.
pub const DEFAULT_CURRENCY: &str = "₹";

/// Identifier of the placeholder plan returned in diagnostic mode.
pub const FALLBACK_PLAN_ID: &str = "error-fallback";

const DEFAULT_SAFETY_TIPS: [&str; 2] = ["Stay safe!", "Keep emergency numbers handy."];
const FALLBACK_SAFETY_TIP: &str = "Please try searching again in a moment.";

/// A flight suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    /// Operating airline name
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub airline: String,
    /// Fare for the whole party, formatted with the currency symbol
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub duration: Option<String>,
    /// Search or booking link for this flight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub booking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub logo_color: Option<String>,
}

/// A hotel suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelOption {
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub name: String,
    /// Star or review rating, e.g. "4.5"
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub rating: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub price_per_night: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub total_price: Option<String>,
    /// Short amenity tags such as "Pool" or "Free breakfast"
    #[serde(default, deserialize_with = "lenient::text_list::deserialize")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub booking_url: Option<String>,
}

/// A ground or mixed-mode transit route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitOption {
    /// Bus, Train, Flight, Car, Ferry, Bike or Walk
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub mode: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub cost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub booking_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub map_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub description: Option<String>,
    /// Highlight label such as "Cheapest" or "Fastest"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub tag: Option<String>,
}

/// One activity within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub time: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub time_spent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub cost_estimate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub booking_link: Option<String>,
}

/// Plan for a single day of the trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DayItinerary {
    /// 1-based day counter
    #[serde(deserialize_with = "lenient::day_number::deserialize")]
    pub day: u32,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub theme: String,
    #[serde(deserialize_with = "lenient::items::deserialize")]
    pub activities: Vec<DayActivity>,
}

/// Estimated spend per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetBreakdown {
    #[serde(deserialize_with = "lenient::number::deserialize")]
    pub transport: f64,
    #[serde(deserialize_with = "lenient::number::deserialize")]
    pub accommodation: f64,
    #[serde(deserialize_with = "lenient::number::deserialize")]
    pub food: f64,
    #[serde(deserialize_with = "lenient::number::deserialize")]
    pub activities: f64,
    #[serde(deserialize_with = "lenient::number::deserialize")]
    pub miscellaneous: f64,
    #[serde(deserialize_with = "lenient::number::deserialize")]
    pub total: f64,
    #[serde(deserialize_with = "currency_or_default")]
    pub currency: String,
}

fn currency_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let currency = lenient::text::deserialize(deserializer)?;
    if currency.trim().is_empty() {
        Ok(DEFAULT_CURRENCY.to_string())
    } else {
        Ok(currency)
    }
}

impl Default for BudgetBreakdown {
    fn default() -> Self {
        Self {
            transport: 0.0,
            accommodation: 0.0,
            food: 0.0,
            activities: 0.0,
            miscellaneous: 0.0,
            total: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Raw trip plan as returned by the model.
///
/// Every section may be missing or loosely typed; decoding never fails for a
/// JSON object. Unusable values read as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[response_schema(name = "TripPlan")]
#[serde(default, rename_all = "camelCase")]
pub struct TripPlanPayload {
    /// Two or three sentence overview of the trip
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub summary: Option<String>,
    /// Short description of the destination
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub destination_info: Option<String>,
    #[serde(deserialize_with = "lenient::optional_items::deserialize")]
    pub suggested_flights: Option<Vec<FlightOption>>,
    #[serde(deserialize_with = "lenient::optional_items::deserialize")]
    pub suggested_hotels: Option<Vec<HotelOption>>,
    #[serde(deserialize_with = "lenient::optional_items::deserialize")]
    pub transit_options: Option<Vec<TransitOption>>,
    /// Day-by-day plan, at most two activities per day
    #[serde(deserialize_with = "lenient::optional_items::deserialize")]
    pub itinerary: Option<Vec<DayItinerary>>,
    #[serde(deserialize_with = "lenient::optional_object::deserialize")]
    pub budget: Option<BudgetBreakdown>,
    #[serde(deserialize_with = "lenient::optional_text_list::deserialize")]
    pub safety_tips: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::optional_text_list::deserialize")]
    pub packing_list: Option<Vec<String>>,
    /// Other destinations or routes worth considering
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub alternatives: Option<String>,
}

/// A complete trip plan. Every list is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub id: String,
    /// Unix epoch milliseconds
    pub created_at: i64,
    pub summary: String,
    pub destination_info: String,
    pub suggested_flights: Vec<FlightOption>,
    pub suggested_hotels: Vec<HotelOption>,
    pub transit_options: Vec<TransitOption>,
    pub itinerary: Vec<DayItinerary>,
    pub budget: BudgetBreakdown,
    pub safety_tips: Vec<String>,
    pub packing_list: Vec<String>,
    pub alternatives: String,
}

impl TripPlan {
    /// Fill every missing section of `payload` with its default.
    ///
    /// The id and timestamp are always fresh; the payload cannot supply them.
    pub fn from_payload(payload: TripPlanPayload, destination: &str) -> Self {
        let summary = payload
            .summary
            .filter(|summary| !summary.trim().is_empty())
            .unwrap_or_else(|| format!("Trip to {}", destination));

        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().timestamp_millis(),
            summary,
            destination_info: payload.destination_info.unwrap_or_default(),
            suggested_flights: payload.suggested_flights.unwrap_or_default(),
            suggested_hotels: payload.suggested_hotels.unwrap_or_default(),
            transit_options: payload.transit_options.unwrap_or_default(),
            itinerary: payload.itinerary.unwrap_or_default(),
            budget: payload.budget.unwrap_or_default(),
            safety_tips: payload
                .safety_tips
                .unwrap_or_else(|| DEFAULT_SAFETY_TIPS.iter().map(|s| s.to_string()).collect()),
            packing_list: payload.packing_list.unwrap_or_default(),
            alternatives: payload.alternatives.unwrap_or_default(),
        }
    }

    /// Placeholder plan used by diagnostic mode when generation fails.
    pub fn fallback(destination: &str) -> Self {
        Self {
            id: FALLBACK_PLAN_ID.to_string(),
            created_at: Utc::now().timestamp_millis(),
            summary: format!(
                "We encountered a hiccup connecting to the AI, but here is a template for your trip to {}",
                destination
            ),
            destination_info: "Beautiful destination".to_string(),
            suggested_flights: Vec::new(),
            suggested_hotels: Vec::new(),
            transit_options: Vec::new(),
            itinerary: Vec::new(),
            budget: BudgetBreakdown::default(),
            safety_tips: vec![FALLBACK_SAFETY_TIP.to_string()],
            packing_list: Vec::new(),
            alternatives: String::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_PLAN_ID
    }

    /// Total number of suggestions across flights, hotels and transit.
    pub fn option_count(&self) -> usize {
        self.suggested_flights.len() + self.suggested_hotels.len() + self.transit_options.len()
    }
}
