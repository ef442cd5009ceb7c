use crate::{
    store::{JsonFileStore, ProfileRepository},
    suggest_cities, BudgetTier, InlineImage, PlannerConfig, SearchType, TransportMode, TripPlan,
    TripPlanner, TripPreferences, DEFAULT_SUGGESTION_LIMIT,
};
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{fmt::Write as _, time::Duration};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE_PATH: &str = "trip-planner-profile.json";

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan trips with a hosted LLM and keep the ones you like")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("store")
                .long("store")
                .value_name("PATH")
                .global(true)
                .help("Profile file used for login and saved trips")
                .default_value(DEFAULT_STORE_PATH),
        )
        .subcommand(plan_command())
        .subcommand(
            Command::new("cities")
                .about("Suggest place names matching a query")
                .arg(Arg::new("query").required(true).index(1))
                .arg(
                    Arg::new("limit")
                        .short('l')
                        .long("limit")
                        .value_name("COUNT")
                        .value_parser(value_parser!(usize))
                        .default_value("10"),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in so generated trips can be saved")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .default_value("Google User"),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .value_name("EMAIL")
                        .default_value("user@gmail.com"),
                ),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the stored profile"))
        .subcommand(
            Command::new("trips")
                .about("Manage saved trips")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List saved trips, newest first"))
                .subcommand(
                    Command::new("show")
                        .about("Print a saved trip")
                        .arg(Arg::new("id").required(true).index(1))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a saved trip")
                        .arg(Arg::new("id").required(true).index(1)),
                ),
        )
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the plan as JSON")
}

fn plan_command() -> Command {
    Command::new("plan")
        .about("Generate a trip plan")
        .arg(
            Arg::new("destination")
                .help("Where to go, e.g. \"Goa, India\"")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("origin")
                .short('o')
                .long("origin")
                .value_name("PLACE")
                .help("Where the trip starts (defaults to the user's location)"),
        )
        .arg(
            Arg::new("search-type")
                .short('s')
                .long("search-type")
                .value_name("TYPE")
                .help("trip, flight, hotel, train or package")
                .value_parser(value_parser!(SearchType))
                .default_value("trip"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("MODE")
                .help("any, flight, train, bus, car, bike or walk")
                .value_parser(value_parser!(TransportMode))
                .default_value("any"),
        )
        .arg(
            Arg::new("start-date")
                .long("start-date")
                .value_name("YYYY-MM-DD")
                .value_parser(value_parser!(NaiveDate))
                .help("First day of the trip (defaults to today)"),
        )
        .arg(
            Arg::new("return-date")
                .long("return-date")
                .value_name("YYYY-MM-DD")
                .value_parser(value_parser!(NaiveDate)),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .value_name("DAYS")
                .value_parser(value_parser!(u32))
                .default_value("3"),
        )
        .arg(
            Arg::new("travelers")
                .short('n')
                .long("travelers")
                .value_name("COUNT")
                .value_parser(value_parser!(u32))
                .default_value("1"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("TIER")
                .help("Budget, Moderate or Luxury")
                .value_parser(value_parser!(BudgetTier))
                .default_value("Moderate"),
        )
        .arg(
            Arg::new("traveler-type")
                .long("traveler-type")
                .value_name("TYPE")
                .default_value("Solo"),
        )
        .arg(
            Arg::new("interest")
                .short('i')
                .long("interest")
                .value_name("TAG")
                .action(ArgAction::Append)
                .help("Interest tag; repeat for several"),
        )
        .arg(
            Arg::new("image")
                .long("image")
                .value_name("FILE")
                .help("Photo of a place to find similar destinations"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model name (or set TRIP_PLANNER_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL env vars)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds (none by default)"),
        )
        .arg(
            Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("COUNT")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("diagnostic")
                .long("diagnostic")
                .action(ArgAction::SetTrue)
                .help("Return a placeholder plan instead of failing"),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .action(ArgAction::SetTrue)
                .help("Save the generated plan to the signed-in profile"),
        )
        .arg(json_flag())
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let store_path = matches
        .get_one::<String>("store")
        .cloned()
        .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());
    let profiles = ProfileRepository::new(JsonFileStore::new(store_path));

    match matches.subcommand() {
        Some(("plan", sub)) => run_plan(sub, &profiles).await,
        Some(("cities", sub)) => {
            let query = required(sub, "query")?;
            let limit = sub
                .get_one::<usize>("limit")
                .copied()
                .unwrap_or(DEFAULT_SUGGESTION_LIMIT);
            for city in suggest_cities(query, limit) {
                println!("{city}");
            }
            Ok(())
        }
        Some(("login", sub)) => {
            let profile = profiles.login(required(sub, "name")?, required(sub, "email")?)?;
            println!(
                "Logged in as {} <{}> ({} saved trips)",
                profile.name,
                profile.email,
                profile.trips.len()
            );
            Ok(())
        }
        Some(("logout", _)) => {
            profiles.logout()?;
            println!("Logged out");
            Ok(())
        }
        Some(("trips", sub)) => run_trips(sub, &profiles),
        _ => Err(anyhow!("unknown command")),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument `{id}`"))
}

fn planner_config(matches: &ArgMatches) -> PlannerConfig {
    let mut config = PlannerConfig::from_env();

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(Some(api_key.clone()));
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.clone());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Some(Duration::from_secs(*timeout)));
    }
    if let Some(max_tokens) = matches.get_one::<u32>("max-tokens") {
        config = config.with_max_tokens(Some(*max_tokens));
    }
    if matches.get_flag("diagnostic") {
        config = config.with_diagnostic_mode(true);
    }

    config
}

fn preferences(matches: &ArgMatches) -> anyhow::Result<TripPreferences> {
    let start_date = matches
        .get_one::<NaiveDate>("start-date")
        .copied()
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut prefs = TripPreferences::new(required(matches, "destination")?, start_date)
        .with_return_date(matches.get_one::<NaiveDate>("return-date").copied())
        .with_interests(
            matches
                .get_many::<String>("interest")
                .into_iter()
                .flatten()
                .cloned(),
        );

    if let Some(origin) = matches.get_one::<String>("origin") {
        prefs = prefs.with_origin(origin.clone());
    }
    if let Some(search_type) = matches.get_one::<SearchType>("search-type") {
        prefs = prefs.with_search_type(*search_type);
    }
    if let Some(mode) = matches.get_one::<TransportMode>("mode") {
        prefs = prefs.with_transport_mode(*mode);
    }
    if let Some(duration) = matches.get_one::<u32>("duration") {
        prefs = prefs.with_duration(*duration);
    }
    if let Some(travelers) = matches.get_one::<u32>("travelers") {
        prefs = prefs.with_travelers(*travelers);
    }
    if let Some(budget) = matches.get_one::<BudgetTier>("budget") {
        prefs = prefs.with_budget(*budget);
    }
    if let Some(traveler_type) = matches.get_one::<String>("traveler-type") {
        prefs = prefs.with_traveler_type(traveler_type.clone());
    }
    if let Some(path) = matches.get_one::<String>("image") {
        let image = InlineImage::from_path(path)?;
        prefs = prefs.with_image(&image);
    }

    Ok(prefs)
}

async fn run_plan(
    matches: &ArgMatches,
    profiles: &ProfileRepository<JsonFileStore>,
) -> anyhow::Result<()> {
    let prefs = preferences(matches)?;
    let config = planner_config(matches);

    info!("Planning {} trip to {}", prefs.search_type, prefs.destination);
    info!("Using model: {}", config.model());
    info!("Base URL: {}", config.base_url());

    let planner = TripPlanner::new(config)?;
    let plan = match planner.generate(&prefs).await {
        Ok(plan) => plan,
        Err(e) => {
            error!("Trip planning failed: {}", e);
            return Err(e.into());
        }
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(&plan));
    }

    if matches.get_flag("save") {
        match profiles.save_trip(&plan) {
            Ok(profile) => println!(
                "\nTrip saved to your profile ({} saved)",
                profile.trips.len()
            ),
            Err(e) => warn!("Trip not saved: {}", e),
        }
    }

    Ok(())
}

fn run_trips(matches: &ArgMatches, profiles: &ProfileRepository<JsonFileStore>) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("list", _)) => {
            let Some(profile) = profiles.load()? else {
                println!("Not logged in");
                return Ok(());
            };
            if profile.trips.is_empty() {
                println!("No trips saved yet. Start planning!");
            }
            for trip in &profile.trips {
                let created = chrono::DateTime::from_timestamp_millis(trip.created_at)
                    .map(|at| at.date_naive().to_string())
                    .unwrap_or_default();
                println!(
                    "{}  {}  {} {}  {}",
                    trip.id, created, trip.budget.currency, trip.budget.total, trip.summary
                );
            }
            Ok(())
        }
        Some(("show", sub)) => {
            let id = required(sub, "id")?;
            let plan = profiles
                .find_trip(id)?
                .with_context(|| format!("no saved trip with id {id}"))?;
            if sub.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", render_plan(&plan));
            }
            Ok(())
        }
        Some(("delete", sub)) => {
            let id = required(sub, "id")?;
            if profiles.delete_trip(id)? {
                println!("Deleted {id}");
                Ok(())
            } else {
                Err(anyhow!("no saved trip with id {id}"))
            }
        }
        _ => Err(anyhow!("unknown trips command")),
    }
}

/// Plain-text report of a plan.
pub fn render_plan(plan: &TripPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.summary);
    if !plan.destination_info.is_empty() {
        let _ = writeln!(out, "\n{}", plan.destination_info);
    }

    if !plan.suggested_flights.is_empty() {
        let _ = writeln!(out, "\nFlights:");
        for flight in &plan.suggested_flights {
            let times = match (&flight.departure_time, &flight.arrival_time) {
                (Some(dep), Some(arr)) => format!(" {dep} -> {arr}"),
                _ => String::new(),
            };
            let _ = writeln!(out, "  - {}{}  {}", flight.airline, times, flight.price);
            if let Some(url) = &flight.booking_url {
                let _ = writeln!(out, "    {url}");
            }
        }
    }

    if !plan.suggested_hotels.is_empty() {
        let _ = writeln!(out, "\nHotels:");
        for hotel in &plan.suggested_hotels {
            let _ = writeln!(
                out,
                "  - {} ({}*)  {}/night",
                hotel.name, hotel.rating, hotel.price_per_night
            );
            if !hotel.features.is_empty() {
                let _ = writeln!(out, "    {}", hotel.features.join(", "));
            }
        }
    }

    if !plan.transit_options.is_empty() {
        let _ = writeln!(out, "\nTransit:");
        for option in &plan.transit_options {
            let provider = option.provider.as_deref().unwrap_or("");
            let _ = writeln!(
                out,
                "  - {} {}  {}  {}",
                option.mode, provider, option.duration, option.cost
            );
        }
    }

    for day in &plan.itinerary {
        let _ = writeln!(out, "\nDay {}: {}", day.day, day.title);
        for activity in &day.activities {
            let _ = writeln!(out, "  {}  {}", activity.time, activity.activity);
        }
    }

    let budget = &plan.budget;
    if budget.total > 0.0 {
        let _ = writeln!(
            out,
            "\nBudget: {c}{} total (transport {c}{}, stay {c}{}, food {c}{}, activities {c}{}, misc {c}{})",
            budget.total,
            budget.transport,
            budget.accommodation,
            budget.food,
            budget.activities,
            budget.miscellaneous,
            c = budget.currency
        );
    }

    if !plan.safety_tips.is_empty() {
        let _ = writeln!(out, "\nSafety tips:");
        for tip in &plan.safety_tips {
            let _ = writeln!(out, "  - {tip}");
        }
    }

    if !plan.packing_list.is_empty() {
        let _ = writeln!(out, "\nPack: {}", plan.packing_list.join(", "));
    }
    if !plan.alternatives.is_empty() {
        let _ = writeln!(out, "\nAlternatives: {}", plan.alternatives);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build_generation_request,
        types::{FlightOption, TripPlanPayload},
        PlannerError,
    };

    #[test]
    fn command_definition_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn plan_arguments_become_preferences() {
        let matches = command()
            .try_get_matches_from([
                "trip-planner",
                "plan",
                "Goa, India",
                "--search-type",
                "hotel",
                "--budget",
                "luxury",
                "--start-date",
                "2026-12-20",
                "-i",
                "Beaches",
                "-i",
                "Food",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let prefs = preferences(sub).unwrap();

        assert_eq!(prefs.destination, "Goa, India");
        assert_eq!(prefs.search_type, SearchType::Hotel);
        assert_eq!(prefs.budget, BudgetTier::Luxury);
        assert_eq!(prefs.duration, 3);
        assert_eq!(prefs.interests.len(), 2);
        assert_eq!(prefs.start_date.to_string(), "2026-12-20");
    }

    #[test]
    fn zero_travelers_fail_before_any_call() {
        let matches = command()
            .try_get_matches_from(["trip-planner", "plan", "Goa, India", "-n", "0"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let prefs = preferences(sub).unwrap();
        assert!(matches!(
            build_generation_request(&prefs),
            Err(PlannerError::Validation(_))
        ));
    }

    #[test]
    fn render_lists_sections_present() {
        let mut plan = TripPlan::from_payload(TripPlanPayload::default(), "Goa, India");
        plan.suggested_flights.push(FlightOption {
            airline: "IndiGo".to_string(),
            price: "₹4,500".to_string(),
            flight_number: None,
            departure_time: Some("06:10".to_string()),
            arrival_time: Some("08:40".to_string()),
            duration: None,
            booking_url: None,
            logo_color: None,
        });

        let text = render_plan(&plan);
        assert!(text.starts_with("Trip to Goa, India"));
        assert!(text.contains("IndiGo 06:10 -> 08:40  ₹4,500"));
        assert!(!text.contains("Hotels:"));
        assert!(text.contains("Stay safe!"));
    }
}
