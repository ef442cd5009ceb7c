pub mod lenient;
pub mod preferences;
pub mod response;
pub mod trip_plan;

pub use preferences::{BudgetTier, InlineImage, SearchType, TransportMode, TripPreferences};
pub use response::deserialize_payload;
pub use trip_plan::{
    BudgetBreakdown, DayActivity, DayItinerary, FlightOption, HotelOption, TransitOption,
    TripPlan, TripPlanPayload, DEFAULT_CURRENCY, FALLBACK_PLAN_ID,
};
