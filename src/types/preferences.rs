use std::{collections::BTreeSet, fmt, path::Path, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// What the user is searching for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Trip,
    Flight,
    Hotel,
    Train,
    Package,
}

impl SearchType {
    pub const ALL: [SearchType; 5] = [
        SearchType::Trip,
        SearchType::Flight,
        SearchType::Hotel,
        SearchType::Train,
        SearchType::Package,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Trip => "trip",
            SearchType::Flight => "flight",
            SearchType::Hotel => "hotel",
            SearchType::Train => "train",
            SearchType::Package => "package",
        }
    }

    /// Trip and package searches ask for a full plan.
    pub fn is_full_plan(&self) -> bool {
        matches!(self, SearchType::Trip | SearchType::Package)
    }
}

/// Preferred way of getting to the destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Any,
    Flight,
    Train,
    Bus,
    Car,
    Bike,
    Walk,
}

impl TransportMode {
    pub const ALL: [TransportMode; 7] = [
        TransportMode::Any,
        TransportMode::Flight,
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::Car,
        TransportMode::Bike,
        TransportMode::Walk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Any => "any",
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Budget",
            BudgetTier::Moderate => "Moderate",
            BudgetTier::Luxury => "Luxury",
        }
    }
}

macro_rules! impl_str_conversions {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = PlannerError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        let options: Vec<&str> = <$ty>::ALL.iter().map(|c| c.as_str()).collect();
                        PlannerError::Validation(format!(
                            "unknown {} `{}` (expected one of: {})",
                            $label,
                            s,
                            options.join(", ")
                        ))
                    })
            }
        }
    };
}

impl_str_conversions!(SearchType, "search type");
impl_str_conversions!(TransportMode, "transport mode");
impl_str_conversions!(BudgetTier, "budget");

/// Image decoded from a `data:<mime>;base64,<payload>` URL.
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn from_data_url(url: &str) -> Result<Self> {
        let invalid = |reason: &str| PlannerError::Validation(format!("invalid image: {reason}"));

        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| invalid("expected a data URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing payload separator"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("only base64 data URLs are supported"))?;
        if mime_type.is_empty() {
            return Err(invalid("missing mime type"));
        }

        let data = STANDARD
            .decode(payload.trim())
            .map_err(|err| invalid(&format!("bad base64 payload: {err}")))?;
        if data.is_empty() {
            return Err(invalid("empty payload"));
        }

        Ok(Self::new(mime_type, data))
    }

    /// Read an image file, guessing the mime type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let mime_type = match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            other => {
                return Err(PlannerError::Validation(format!(
                    "unsupported image type `{other}` for {}",
                    path.display()
                )))
            }
        };

        let data = std::fs::read(path).map_err(|err| {
            PlannerError::Validation(format!("failed to read {}: {err}", path.display()))
        })?;
        Ok(Self::new(mime_type, data))
    }

    pub fn base64_data(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data())
    }
}

/// Search criteria for one plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    pub search_type: SearchType,
    pub transport_mode: TransportMode,
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    /// Trip length in days
    pub duration: u32,
    pub travelers: u32,
    pub budget: BudgetTier,
    pub traveler_type: String,
    #[serde(default)]
    pub interests: BTreeSet<String>,
    /// Attached photo as a base64 data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl TripPreferences {
    pub fn new(destination: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            search_type: SearchType::default(),
            transport_mode: TransportMode::default(),
            origin: String::new(),
            destination: destination.into(),
            start_date,
            return_date: None,
            duration: 3,
            travelers: 1,
            budget: BudgetTier::default(),
            traveler_type: "Solo".to_string(),
            interests: BTreeSet::new(),
            image: None,
        }
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn with_transport_mode(mut self, transport_mode: TransportMode) -> Self {
        self.transport_mode = transport_mode;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_return_date(mut self, return_date: Option<NaiveDate>) -> Self {
        self.return_date = return_date;
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    pub fn with_budget(mut self, budget: BudgetTier) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_traveler_type(mut self, traveler_type: impl Into<String>) -> Self {
        self.traveler_type = traveler_type.into();
        self
    }

    /// Toggle an interest tag, mirroring a checkbox: adding a present tag removes it.
    pub fn toggle_interest(mut self, interest: impl Into<String>) -> Self {
        let interest = interest.into();
        if !self.interests.remove(&interest) {
            self.interests.insert(interest);
        }
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, image: &InlineImage) -> Self {
        self.image = Some(image.to_data_url());
        self
    }

    pub fn with_image_data_url(mut self, data_url: impl Into<String>) -> Self {
        self.image = Some(data_url.into());
        self
    }

    /// Decode the attached image, if any.
    pub fn decoded_image(&self) -> Result<Option<InlineImage>> {
        self.image
            .as_deref()
            .map(InlineImage::from_data_url)
            .transpose()
    }

    /// Check the preferences, returning the attached image decoded.
    pub fn validate(&self) -> Result<Option<InlineImage>> {
        if self.destination.trim().is_empty() {
            return Err(PlannerError::Validation(
                "destination must not be empty".to_string(),
            ));
        }
        if self.duration == 0 {
            return Err(PlannerError::Validation(
                "duration must be at least 1 day".to_string(),
            ));
        }
        if self.travelers == 0 {
            return Err(PlannerError::Validation(
                "travelers must be at least 1".to_string(),
            ));
        }
        if let Some(return_date) = self.return_date {
            if return_date < self.start_date {
                return Err(PlannerError::Validation(format!(
                    "return date {} is before start date {}",
                    return_date, self.start_date
                )));
            }
        }
        self.decoded_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_enums_case_insensitively() {
        assert_eq!("Hotel".parse::<SearchType>().unwrap(), SearchType::Hotel);
        assert_eq!("bus".parse::<TransportMode>().unwrap(), TransportMode::Bus);
        assert_eq!("luxury".parse::<BudgetTier>().unwrap(), BudgetTier::Luxury);

        let err = "cruise".parse::<SearchType>().unwrap_err();
        assert!(err.to_string().contains("trip, flight, hotel, train, package"));
    }

    #[test]
    fn serializes_with_form_field_names() {
        let prefs = TripPreferences::new("Goa, India", date(2026, 12, 20))
            .with_search_type(SearchType::Hotel)
            .with_budget(BudgetTier::Luxury);
        let value = serde_json::to_value(&prefs).unwrap();

        assert_eq!(value["searchType"], "hotel");
        assert_eq!(value["transportMode"], "any");
        assert_eq!(value["budget"], "Luxury");
        assert_eq!(value["startDate"], "2026-12-20");
        assert!(value.get("image").is_none());
    }

    #[test]
    fn validation_rejects_bad_counts_and_dates() {
        let base = TripPreferences::new("Goa, India", date(2026, 12, 20));
        assert!(base.validate().is_ok());

        assert!(base.clone().with_duration(0).validate().is_err());
        assert!(base.clone().with_travelers(0).validate().is_err());
        assert!(TripPreferences::new("  ", date(2026, 12, 20)).validate().is_err());
        assert!(base
            .clone()
            .with_return_date(Some(date(2026, 12, 1)))
            .validate()
            .is_err());
        assert!(base
            .with_image_data_url("not a data url")
            .validate()
            .is_err());
    }

    #[test]
    fn validation_hands_back_decoded_image() {
        let image = InlineImage::new("image/jpeg", vec![0xff, 0xd8, 0xff]);
        let prefs = TripPreferences::new("Goa, India", date(2026, 12, 20)).with_image(&image);
        assert_eq!(prefs.validate().unwrap(), Some(image));
        assert_eq!(
            TripPreferences::new("Goa, India", date(2026, 12, 20))
                .validate()
                .unwrap(),
            None
        );
    }

    #[test]
    fn interests_toggle_like_checkboxes() {
        let prefs = TripPreferences::new("Goa, India", date(2026, 12, 20))
            .toggle_interest("Beaches")
            .toggle_interest("Food")
            .toggle_interest("Beaches");
        assert_eq!(prefs.interests.len(), 1);
        assert!(prefs.interests.contains("Food"));
    }

    #[test]
    fn data_url_decodes_mime_and_bytes() {
        let image = InlineImage::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, b"\x89PNG\r\n\x1a\n");
        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn data_url_rejects_malformed_input() {
        assert!(InlineImage::from_data_url("image/png;base64,AAAA").is_err());
        assert!(InlineImage::from_data_url("data:image/png,AAAA").is_err());
        assert!(InlineImage::from_data_url("data:;base64,AAAA").is_err());
        assert!(InlineImage::from_data_url("data:image/png;base64,***").is_err());
        assert!(InlineImage::from_data_url("data:image/png;base64,").is_err());
    }

    #[test]
    fn image_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beach.JPG");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let image = InlineImage::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data.len(), 3);

        let other = dir.path().join("notes.txt");
        std::fs::write(&other, "hi").unwrap();
        assert!(InlineImage::from_path(&other).is_err());
    }
}
