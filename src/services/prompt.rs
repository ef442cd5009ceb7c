use crate::types::{TransportMode, TripPreferences};

/// How many items of each section a request asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedSections {
    pub flights: usize,
    pub hotels: usize,
    pub transit: usize,
    pub itinerary: bool,
}

impl RequestedSections {
    const FOCUSED: usize = 3;
    const MIXED: usize = 2;

    pub fn for_preferences(prefs: &TripPreferences) -> Self {
        use crate::types::SearchType::*;

        let none = Self {
            flights: 0,
            hotels: 0,
            transit: 0,
            itinerary: false,
        };

        match prefs.search_type {
            Flight => Self {
                flights: Self::FOCUSED,
                ..none
            },
            Hotel => Self {
                hotels: Self::FOCUSED,
                ..none
            },
            Train => Self {
                transit: Self::FOCUSED,
                ..none
            },
            Trip | Package => match prefs.transport_mode {
                TransportMode::Any => Self {
                    flights: Self::MIXED,
                    hotels: Self::MIXED,
                    transit: Self::MIXED,
                    itinerary: true,
                },
                _ => Self {
                    flights: 0,
                    hotels: Self::MIXED,
                    transit: Self::MIXED,
                    itinerary: true,
                },
            },
        }
    }

    /// Wire names of the list sections this request leaves empty.
    pub fn empty_sections(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        if self.flights == 0 {
            empty.push("suggestedFlights");
        }
        if self.hotels == 0 {
            empty.push("suggestedHotels");
        }
        if self.transit == 0 {
            empty.push("transitOptions");
        }
        if !self.itinerary {
            empty.push("itinerary");
        }
        empty
    }
}

/// The task paragraph that tells the model which sections to fill.
pub fn search_instructions(prefs: &TripPreferences) -> String {
    use crate::types::SearchType::*;

    let sections = RequestedSections::for_preferences(prefs);
    let leave_empty = || quoted_list(&sections.empty_sections());

    match prefs.search_type {
        Flight => format!(
            "User wants FLIGHTS only. Populate 'suggestedFlights' with the top {} options. Leave {} as empty arrays.",
            sections.flights,
            leave_empty()
        ),
        Hotel => format!(
            "User wants HOTELS only. Populate 'suggestedHotels' with the top {} options. Leave {} as empty arrays.",
            sections.hotels,
            leave_empty()
        ),
        Train => format!(
            "User wants TRAINS/BUS only. Populate 'transitOptions' with the top {} options. Leave {} as empty arrays.",
            sections.transit,
            leave_empty()
        ),
        Trip | Package if prefs.transport_mode == TransportMode::Any => format!(
            "Full trip plan. Include the {} best flights, {} best hotels, {} best transit options, and a day-wise itinerary covering {} days.",
            sections.flights, sections.hotels, sections.transit, prefs.duration
        ),
        Trip | Package => format!(
            "Full trip plan focusing on {mode} travel. In 'transitOptions', provide {} {mode} routes. Include {} hotels and a day-wise itinerary covering {} days.",
            sections.transit,
            sections.hotels,
            prefs.duration,
            mode = prefs.transport_mode
        ),
    }
}

/// System instruction: trip context, formatting rules, then the task.
pub fn system_instruction(prefs: &TripPreferences) -> String {
    let origin = if prefs.origin.trim().is_empty() {
        "User Location"
    } else {
        prefs.origin.trim()
    };
    let return_date = prefs
        .return_date
        .map(|date| date.to_string())
        .unwrap_or_else(|| "flexible".to_string());
    let interests = if prefs.interests.is_empty() {
        "General sightseeing".to_string()
    } else {
        prefs
            .interests
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "You are a smart, fast Travel Agent.\n\
         Generate a JSON response following the schema strictly.\n\
         \n\
         CONTEXT:\n\
         Origin: {origin} -> Destination: {destination}\n\
         Dates: {start} to {return_date} ({duration} days)\n\
         Travelers: {travelers} ({traveler_type})\n\
         Mode: {mode}\n\
         Budget: {budget}\n\
         Interests: {interests}\n\
         \n\
         RULES:\n\
         1. Speed: keep descriptions very concise (max 10-15 words).\n\
         2. Booking links: use real-looking URLs (e.g. https://www.google.com/travel/flights?q=...).\n\
         3. Currency: INR (₹) for every price and for the budget.\n\
         4. Output: raw JSON only. Do not wrap it in markdown formatting like ```json.\n\
         5. Empty data: if a section isn't requested, return an empty array [] instead of omitting it.\n\
         6. Itinerary: at most 2 main activities per day.\n\
         \n\
         {task}",
        destination = prefs.destination.trim(),
        start = prefs.start_date,
        duration = prefs.duration,
        travelers = prefs.travelers,
        traveler_type = prefs.traveler_type,
        mode = prefs.transport_mode,
        budget = prefs.budget,
        task = search_instructions(prefs),
    )
}

pub fn user_prompt(prefs: &TripPreferences) -> String {
    format!(
        "Generate plan for {} trip to {}.",
        prefs.search_type,
        prefs.destination.trim()
    )
}

fn quoted_list(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|name| format!("'{name}'")).collect();
    match quoted.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}
