//! Place-name suggestions for origin and destination inputs.

/// Places offered as suggestions, Indian cities first.
#[rustfmt::skip]
pub static CITIES: &[&str] = &[
    "New Delhi, India", "Mumbai, India", "Bangalore, India", "Chennai, India", "Kolkata, India",
    "Hyderabad, India", "Pune, India", "Ahmedabad, India", "Gurgaon, India", "Noida, India",
    "Ghaziabad, India", "Faridabad, India", "Thane, India", "Navi Mumbai, India",
    "Greater Noida, India", "Manesar, India", "Kalyan-Dombivli, India", "Vasai-Virar, India",
    "Jaipur, India", "Udaipur, India", "Jodhpur, India", "Jaisalmer, India", "Ajmer, India",
    "Pushkar, India", "Bikaner, India", "Kota, India", "Mount Abu, India", "Alwar, India",
    "Chittorgarh, India", "Bundi, India", "Mandawa, India", "Neemrana, India",
    "Ranthambore, India", "Bharatpur, India", "Lucknow, India", "Kanpur, India",
    "Varanasi, India", "Agra, India", "Prayagraj (Allahabad), India", "Meerut, India",
    "Bareilly, India", "Aligarh, India", "Moradabad, India", "Jhansi, India", "Mathura, India",
    "Vrindavan, India", "Ayodhya, India", "Gorakhpur, India", "Firozabad, India",
    "Muzaffarnagar, India", "Saharanpur, India", "Chandigarh, India", "Amritsar, India",
    "Ludhiana, India", "Jalandhar, India", "Patiala, India", "Bathinda, India",
    "Pathankot, India", "Hoshiarpur, India", "Kapurthala, India", "Mohali, India",
    "Dehradun, India", "Haridwar, India", "Rishikesh, India", "Nainital, India",
    "Mussoorie, India", "Almora, India", "Ranikhet, India", "Auli, India", "Lansdowne, India",
    "Kedarnath, India", "Badrinath, India", "Joshimath, India", "Mukteshwar, India",
    "Kausani, India", "Bhimtal, India", "Chopta, India", "Shimla, India", "Manali, India",
    "Dharamshala, India", "McLeod Ganj, India", "Dalhousie, India", "Kasol, India",
    "Spiti Valley, India", "Kasauli, India", "Bir Billing, India", "Kullu, India",
    "Chamba, India", "Khajjiar, India", "Palampur, India", "Solan, India", "Mandi, India",
    "Tirthan Valley, India", "Srinagar, India", "Jammu, India", "Leh, India", "Gulmarg, India",
    "Pahalgam, India", "Kargil, India", "Sonamarg, India", "Patnitop, India",
    "Nubra Valley, India", "Goa, India", "Panaji, India", "Madgaon, India",
    "Vasco da Gama, India", "Mapusa, India", "Calangute, India", "Surat, India",
    "Vadodara, India", "Rajkot, India", "Bhavnagar, India", "Jamnagar, India",
    "Gandhinagar, India", "Bhuj, India", "Kutch, India", "Dwarka, India", "Somnath, India",
    "Diu, India", "Daman, India", "Silvassa, India", "Junagadh, India", "Anand, India",
    "Navsari, India", "Vapi, India", "Porbandar, India", "Gir, India", "Nagpur, India",
    "Nashik, India", "Aurangabad, India", "Solapur, India", "Kolhapur, India", "Amravati, India",
    "Lonavala, India", "Mahabaleshwar, India", "Alibaug, India", "Shirdi, India",
    "Ratnagiri, India", "Matheran, India", "Panchgani, India", "Khandala, India", "Lavasa, India",
    "Tarkarli, India", "Malvan, India", "Ganpatipule, India", "Igatpuri, India", "Karjat, India",
    "Bhandardara, India", "Bhopal, India", "Indore, India", "Gwalior, India", "Jabalpur, India",
    "Ujjain, India", "Khajuraho, India", "Pachmarhi, India", "Orchha, India", "Sanchi, India",
    "Bandhavgarh, India", "Kanha, India", "Pench, India", "Mandu, India", "Omkareshwar, India",
    "Maheshwar, India", "Satna, India", "Rewa, India", "Raipur, India", "Bilaspur, India",
    "Bhilai, India", "Jagdalpur, India", "Durg, India", "Korba, India", "Patna, India",
    "Gaya, India", "Muzaffarpur, India", "Bhagalpur, India", "Bodh Gaya, India", "Rajgir, India",
    "Nalanda, India", "Vaishali, India", "Darbhanga, India", "Ranchi, India", "Jamshedpur, India",
    "Dhanbad, India", "Deoghar, India", "Bokaro, India", "Hazaribagh, India", "Giridih, India",
    "Bhubaneswar, India", "Cuttack, India", "Puri, India", "Rourkela, India", "Konark, India",
    "Gopalpur, India", "Sambalpur, India", "Chilika, India", "Paradip, India", "Baripada, India",
    "Darjeeling, India", "Siliguri, India", "Digha, India", "Kalimpong, India",
    "Sundarbans, India", "Mandarmani, India", "Shantiniketan, India", "Murshidabad, India",
    "Kurseong, India", "Mirik, India", "Mayapur, India", "Bishnupur, India", "Asansol, India",
    "Durgapur, India", "Kharagpur, India", "Haldia, India", "Guwahati, India", "Shillong, India",
    "Gangtok, India", "Cherrapunji, India", "Kaziranga, India", "Tawang, India", "Imphal, India",
    "Agartala, India", "Aizawl, India", "Kohima, India", "Dimapur, India", "Ziro, India",
    "Majuli, India", "Mawlynnong, India", "Dawki, India", "Pelling, India", "Lachung, India",
    "Itanagar, India", "Pasighat, India", "Bomdila, India", "Silchar, India", "Tezpur, India",
    "Jorhat, India", "Dibrugarh, India", "Tinsukia, India", "Visakhapatnam, India",
    "Vijayawada, India", "Guntur, India", "Tirupati, India", "Kurnool, India",
    "Rajahmundry, India", "Araku Valley, India", "Nellore, India", "Kakinada, India",
    "Anantapur, India", "Srisailam, India", "Mantralayam, India", "Puttaparthi, India",
    "Lepakshi, India", "Kochi, India", "Thiruvananthapuram, India", "Kozhikode, India",
    "Thrissur, India", "Munnar, India", "Alleppey, India", "Wayanad, India", "Varkala, India",
    "Kovalam, India", "Thekkady, India", "Kumarakom, India", "Kollam, India", "Palakkad, India",
    "Kannur, India", "Kasaragod, India", "Vagamon, India", "Bekal, India", "Guruvayur, India",
    "Sabarimala, India", "Coimbatore, India", "Madurai, India", "Tiruchirappalli, India",
    "Salem, India", "Tirunelveli, India", "Vellore, India", "Ooty, India", "Kodaikanal, India",
    "Rameswaram, India", "Kanyakumari, India", "Mahabalipuram, India", "Thanjavur, India",
    "Yercaud, India", "Erode, India", "Tiruppur, India", "Thoothukudi, India", "Nagercoil, India",
    "Dindigul, India", "Kanchipuram, India", "Chidambaram, India", "Kumbakonam, India",
    "Velankanni, India", "Coonoor, India", "Hogenakkal, India", "Yelagiri, India",
    "Kotagiri, India", "Mysore, India", "Mangalore, India", "Hubli, India", "Belgaum, India",
    "Hampi, India", "Coorg, India", "Gokarna, India", "Udupi, India", "Chikmagalur, India",
    "Dandeli, India", "Murudeshwar, India", "Bijapur, India", "Shimoga, India",
    "Davangere, India", "Bellary, India", "Gulbarga, India", "Bidar, India", "Hassan, India",
    "Sakleshpur, India", "Nandi Hills, India", "Bandipur, India", "Nagarhole, India",
    "Badami, India", "Pattadakal, India", "Aihole, India", "Sringeri, India",
    "Dharmasthala, India", "Kukke Subramanya, India", "Pondicherry, India", "Auroville, India",
    "Karaikal, India", "Mahe, India", "Yanam, India", "Port Blair, Andaman",
    "Havelock Island, Andaman", "Neil Island, Andaman", "Ross Island, Andaman",
    "Baratang Island, Andaman", "Diglipur, Andaman", "Agatti, Lakshadweep",
    "Kavaratti, Lakshadweep", "Bangaram, Lakshadweep", "Minicoy, Lakshadweep",
    "Kalpeni, Lakshadweep", "Dubai, UAE", "Abu Dhabi, UAE", "London, UK", "New York, USA",
    "San Francisco, USA", "Singapore", "Bangkok, Thailand", "Phuket, Thailand", "Krabi, Thailand",
    "Pattaya, Thailand", "Chiang Mai, Thailand", "Bali, Indonesia", "Jakarta, Indonesia",
    "Paris, France", "Rome, Italy", "Venice, Italy", "Zurich, Switzerland",
    "Amsterdam, Netherlands", "Barcelona, Spain", "Tokyo, Japan", "Osaka, Japan",
    "Seoul, South Korea", "Maldives", "Colombo, Sri Lanka", "Kandy, Sri Lanka",
    "Bentota, Sri Lanka", "Ella, Sri Lanka", "Nuwara Eliya, Sri Lanka", "Kathmandu, Nepal",
    "Pokhara, Nepal", "Chitwan, Nepal", "Lumbini, Nepal", "Thimphu, Bhutan", "Paro, Bhutan",
    "Punakha, Bhutan", "Istanbul, Turkey", "Cappadocia, Turkey", "Antalya, Turkey",
    "Cairo, Egypt", "Sharm El Sheikh, Egypt", "Cape Town, South Africa",
    "Johannesburg, South Africa", "Sydney, Australia", "Melbourne, Australia",
    "Gold Coast, Australia",
];

/// Default number of suggestions returned to a caller.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Case-insensitive substring matches for `query`, prefix matches first.
///
/// Within each group the order of `CITIES` is kept. A blank query yields
/// nothing.
pub fn suggest_cities(query: &str, limit: usize) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut matches: Vec<(bool, &'static str)> = CITIES
        .iter()
        .filter_map(|city| {
            let lower = city.to_lowercase();
            lower
                .contains(&needle)
                .then(|| (!lower.starts_with(&needle), *city))
        })
        .collect();

    // Stable sort: `false` (prefix match) sorts before `true`.
    matches.sort_by_key(|(not_prefix, _)| *not_prefix);
    matches.into_iter().take(limit).map(|(_, city)| city).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_has_no_suggestions() {
        assert!(suggest_cities("", 10).is_empty());
        assert!(suggest_cities("   ", 10).is_empty());
        assert!(suggest_cities("goa", 0).is_empty());
    }

    #[test]
    fn prefix_matches_rank_first() {
        let results = suggest_cities("pur", 10);
        assert!(!results.is_empty());
        assert_eq!(results[0], "Puri, India");
        assert!(results.contains(&"Jaipur, India"));
        let first_non_prefix = results
            .iter()
            .position(|city| !city.to_lowercase().starts_with("pur"))
            .unwrap();
        assert!(results[first_non_prefix..]
            .iter()
            .all(|city| !city.to_lowercase().starts_with("pur")));
    }

    #[test]
    fn matching_ignores_case_and_respects_limit() {
        assert_eq!(suggest_cities("GOA", 10)[0], "Goa, India");
        assert_eq!(suggest_cities("india", 10).len(), 10);
        assert_eq!(suggest_cities("india", 3).len(), 3);
    }

    #[test]
    fn list_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        assert!(CITIES.iter().all(|city| seen.insert(*city)));
    }
}
