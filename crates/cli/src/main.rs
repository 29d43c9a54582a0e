use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use feed::{Carousels, HomeFeed};
use place_data::{Place, PlaceCategory, PlaceIndex};
use place_filters::{
    DEFAULT_RADIUS_KM, ExploreAction, ExploreCriteria, NearMeCriteria, PriceRange, SortOrder,
    apply_filters, available_subcategories, featured_places, filter_by_category,
    filter_by_category_and_state, filter_by_city, filter_by_country, filter_by_state,
    filter_near_me, search_places,
};
use places_client::{ClientConfig, Geocoder, PlacesClient, PlacesQuery, UserLocation};
use rand::Rng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Places fetched from the API when no snapshot is given
const API_FETCH_LIMIT: usize = 100;

/// Spotnere - discover places near you
#[derive(Parser)]
#[command(name = "spotnere")]
#[command(about = "Browse, filter and search points of interest", long_about = None)]
struct Cli {
    /// Snapshot file or directory of snapshots (otherwise the API is used)
    #[arg(short, long, global = true, env = "SPOTNERE_DATA")]
    data: Option<PathBuf>,

    /// Places API base URL
    #[arg(long, global = true, env = "SPOTNERE_API_URL")]
    api_url: Option<String>,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct Origin {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
}

#[derive(Args)]
struct ExploreArgs {
    /// Category to include; repeat to OR several together
    #[arg(long = "category")]
    categories: Vec<String>,

    #[arg(long)]
    sub_category: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    #[arg(long)]
    min_rating: Option<f64>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    city: Option<String>,

    /// Latitude for a near-me restriction (requires --lon)
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude for a near-me restriction (requires --lat)
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius: f64,

    /// relevance, distance, rating or popularity
    #[arg(long, default_value = "relevance")]
    sort: SortOrder,

    #[arg(long, default_value = "20")]
    limit: usize,
}

impl ExploreArgs {
    /// Fold the flags into Explore criteria through the reducer.
    fn criteria(&self) -> ExploreCriteria {
        let criteria = self
            .categories
            .iter()
            .fold(ExploreCriteria::new(), |criteria, category| {
                criteria.reduce(ExploreAction::ToggleCategory(category.clone()))
            });

        let near = self
            .lat
            .zip(self.lon)
            .map(|(lat, lon)| NearMeCriteria::new(lat, lon, self.radius));
        [
            ExploreAction::SetSubCategory(self.sub_category.clone()),
            ExploreAction::SetPriceRange(PriceRange::new(self.min_price, self.max_price)),
            ExploreAction::SetMinRating(self.min_rating),
            ExploreAction::SetState(self.state.clone()),
            ExploreAction::SetCity(self.city.clone()),
            ExploreAction::SetNearMe(near),
            ExploreAction::SetSort(self.sort),
        ]
        .into_iter()
        .fold(criteria, ExploreCriteria::reduce)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Places within a radius of a point, nearest first
    Near {
        #[command(flatten)]
        origin: Origin,

        /// Radius in kilometers
        #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
        radius: f64,

        /// Maximum number of places to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Places in a city
    City { name: String },

    /// Places in a state or region
    State { name: String },

    /// Places in a country (aliases like USA / United States are equivalent)
    Country { name: String },

    /// Places in a category, optionally within a state
    Category {
        name: String,

        #[arg(long)]
        state: Option<String>,
    },

    /// Combine filters the way the Explore page does
    Explore(ExploreArgs),

    /// Search names, descriptions and cities
    Search {
        query: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Highest-rated places
    Featured {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Landing-page carousels for a location
    Feed {
        #[command(flatten)]
        origin: Origin,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        country: Option<String>,

        /// Look up city, state and country from the coordinates
        #[arg(long, conflicts_with_all = ["city", "state", "country"])]
        geocode: bool,
    },

    /// Details and gallery for one place
    Show { id: String },

    /// Time repeated near-me filtering at random points
    Benchmark {
        #[arg(long, default_value = "1000")]
        iterations: usize,

        #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
        radius: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; warn by default so command output stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Near { origin, radius, limit } => {
            let places = load_places(&cli).await?;
            let mut near = filter_near_me(&places, origin.lat, origin.lon, *radius);
            near.truncate(*limit);
            let title = format!("Within {} km of ({}, {})", radius, origin.lat, origin.lon);
            print_places(&title, &near, cli.json)?;
        }
        Commands::City { name } => {
            let places = load_places(&cli).await?;
            print_places(&format!("Places in {}", name), &filter_by_city(&places, name), cli.json)?;
        }
        Commands::State { name } => {
            let places = load_places(&cli).await?;
            print_places(&format!("Places in {}", name), &filter_by_state(&places, name), cli.json)?;
        }
        Commands::Country { name } => {
            let places = load_places(&cli).await?;
            print_places(&format!("Places in {}", name), &filter_by_country(&places, name), cli.json)?;
        }
        Commands::Category { name, state } => {
            let places = load_places(&cli).await?;
            let (title, matched) = match state {
                Some(state) => (
                    format!("{} in {}", name, state),
                    filter_by_category_and_state(&places, name, state),
                ),
                None => (name.clone(), filter_by_category(&places, name)),
            };
            print_places(&title, &matched, cli.json)?;
        }
        Commands::Explore(args) => handle_explore(&cli, args).await?,
        Commands::Search { query, limit } => handle_search(&cli, query, *limit).await?,
        Commands::Featured { limit } => handle_featured(&cli, *limit).await?,
        Commands::Feed {
            origin,
            city,
            state,
            country,
            geocode,
        } => {
            let location = if *geocode {
                Geocoder::with_config(client_config(&cli)?)?
                    .reverse(origin.lat, origin.lon)
                    .await
                    .context("Reverse geocoding failed")?
            } else {
                let mut location = UserLocation::at(origin.lat, origin.lon);
                if let Some(city) = city {
                    location = location.with_city(city.as_str());
                }
                if let Some(state) = state {
                    location = location.with_state(state.as_str());
                }
                if let Some(country) = country {
                    location = location.with_country(country.as_str());
                }
                location
            };
            handle_feed(&cli, &location).await?;
        }
        Commands::Show { id } => handle_show(&cli, id).await?,
        Commands::Benchmark { iterations, radius } => {
            let places = load_places(&cli).await?;
            handle_benchmark(&places, *iterations, *radius)?;
        }
    }

    Ok(())
}

/// Client configuration from the environment, with `--api-url` on top.
fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    Ok(config)
}

fn api_client(cli: &Cli) -> Result<PlacesClient> {
    PlacesClient::with_config(client_config(cli)?).context("Failed to create API client")
}

/// Places from the snapshot when `--data` is set, otherwise from the API.
async fn load_places(cli: &Cli) -> Result<Vec<Place>> {
    let start = Instant::now();
    let places = match &cli.data {
        Some(path) => PlaceIndex::load(path)
            .with_context(|| format!("Failed to load places from {}", path.display()))?
            .into_places(),
        None => {
            let client = api_client(cli)?;
            client
                .get_places(&PlacesQuery::new().limit(API_FETCH_LIMIT))
                .await
                .with_context(|| format!("Failed to fetch places from {}", client.base_url()))?
                .places
        }
    };
    info!("Loaded {} places in {:?}", places.len(), start.elapsed());
    Ok(places)
}

/// Handle the 'explore' command
async fn handle_explore(cli: &Cli, args: &ExploreArgs) -> Result<()> {
    let criteria = args.criteria();
    if let Some(sub) = &args.sub_category {
        let offered = available_subcategories(&criteria);
        if !offered.iter().any(|o| o.eq_ignore_ascii_case(sub.trim())) {
            warn!(
                "Subcategory '{}' is not offered for the selected categories ({})",
                sub,
                offered.join(", ")
            );
        }
    }

    let places = load_places(cli).await?;
    let total = places.len();
    let mut results = apply_filters(places, &criteria);
    let matched = results.len();
    results.truncate(args.limit);

    let title = format!(
        "{} of {} places match {} filter(s), sorted by {}",
        matched,
        total,
        criteria.active_filters(),
        criteria.sort
    );
    print_places(&title, &results, cli.json)
}

/// Handle the 'search' command
async fn handle_search(cli: &Cli, query: &str, limit: Option<usize>) -> Result<()> {
    let results = match &cli.data {
        Some(_) => search_places(&load_places(cli).await?, query, limit),
        None => {
            api_client(cli)?
                .search_places(query, limit)
                .await
                .context("Search request failed")?
                .places
        }
    };
    print_places(&format!("Search results for '{}'", query), &results, cli.json)
}

/// Handle the 'featured' command
async fn handle_featured(cli: &Cli, limit: usize) -> Result<()> {
    let results = match &cli.data {
        Some(_) => featured_places(&load_places(cli).await?, limit),
        None => {
            api_client(cli)?
                .get_featured_places(limit)
                .await
                .context("Featured request failed")?
                .places
        }
    };
    print_places("Featured places", &results, cli.json)
}

/// Handle the 'feed' command
async fn handle_feed(cli: &Cli, location: &UserLocation) -> Result<()> {
    let carousels = match &cli.data {
        Some(path) => {
            let index = PlaceIndex::load(path)
                .with_context(|| format!("Failed to load places from {}", path.display()))?;
            HomeFeed::new(index).build(location).await?
        }
        None => HomeFeed::new(api_client(cli)?).build(location).await?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&carousels)?);
        return Ok(());
    }
    print_feed(location, &carousels);
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(cli: &Cli, id: &str) -> Result<()> {
    let (place, gallery) = match &cli.data {
        Some(path) => {
            let index = PlaceIndex::load(path)
                .with_context(|| format!("Failed to load places from {}", path.display()))?;
            let place = index
                .get_place(id)
                .cloned()
                .ok_or_else(|| anyhow!("Place {} not found in {}", id, path.display()))?;
            let gallery = place.images.clone();
            (place, gallery)
        }
        None => {
            let client = api_client(cli)?;
            let (place, gallery) = tokio::join!(client.get_place(id), client.get_place_gallery(id));
            (place?, gallery?)
        }
    };

    if cli.json {
        let value = serde_json::json!({ "place": place, "gallery": gallery });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    print_place_details(&place, &gallery);
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(places: &[Place], iterations: usize, radius: f64) -> Result<()> {
    let anchors: Vec<_> = places.iter().filter_map(Place::position).collect();
    if anchors.is_empty() {
        bail!("No places with coordinates to benchmark against");
    }
    if iterations == 0 {
        bail!("--iterations must be at least 1");
    }

    // Query points scattered around real places so results are non-trivial
    let mut rng = rand::rng();
    let points: Vec<(f64, f64)> = (0..iterations)
        .map(|_| {
            let anchor = anchors[rng.random_range(0..anchors.len())];
            (
                anchor.lat + rng.random_range(-0.5..0.5),
                anchor.lng + rng.random_range(-0.5..0.5),
            )
        })
        .collect();

    let start = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(iterations);
    let mut matched = 0usize;
    for (lat, lon) in points {
        let t = Instant::now();
        matched += filter_near_me(places, lat, lon, radius).len();
        timings.push(t.elapsed());
    }
    let total_time = start.elapsed();

    timings.sort();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];
    let avg_latency = total_time / iterations as u32;
    let throughput = iterations as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Places: {} ({} with coordinates)", places.len(), anchors.len());
    println!("Iterations: {} (radius {} km)", iterations, radius);
    println!("Average matches per query: {:.1}", matched as f64 / iterations as f64);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} queries/second", throughput);

    Ok(())
}

/// Print a titled list of places
fn print_places(title: &str, places: &[Place], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(places)?);
        return Ok(());
    }

    println!("{}", title.bold().blue());
    if places.is_empty() {
        println!("  {}", "No places found".dimmed());
        return Ok(());
    }
    for (i, place) in places.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), place_line(place));
    }
    Ok(())
}

fn place_line(place: &Place) -> String {
    let location = [place.city.as_str(), place.state.as_deref().unwrap_or(""), place.country.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let mut line = format!(
        "{} ({}) {} {}",
        place.name.bold(),
        category_badge(place),
        location,
        format!("★ {:.1}", place.rating).yellow()
    );
    if let Some(price) = place.avg_price {
        line.push_str(&format!(" ~{:.0}", price));
    }
    if let Some(km) = place.distance_km {
        line.push_str(&format!(" {}", format!("{:.1} km", km).cyan()));
    }
    line
}

/// The category label, colored by its broad kind.
fn category_badge(place: &Place) -> ColoredString {
    let label = place.category.as_str();
    match place.category_kind() {
        PlaceCategory::Cafe => label.yellow(),
        PlaceCategory::Restaurant => label.red(),
        PlaceCategory::Park => label.green(),
        PlaceCategory::Museum => label.magenta(),
        PlaceCategory::Nightlife => label.purple(),
        PlaceCategory::Event => label.cyan(),
        PlaceCategory::Other => label.normal(),
    }
}

fn print_feed(location: &UserLocation, carousels: &Carousels) {
    let known = |value: &Option<String>| value.clone().unwrap_or_else(|| "?".to_string());
    println!(
        "{} ({:.4}, {:.4}) city={} state={} country={}",
        "Feed for".bold().blue(),
        location.latitude,
        location.longitude,
        known(&location.city),
        known(&location.state),
        known(&location.country)
    );
    println!("Derived from {} places\n", carousels.fetched);

    for carousel in carousels.iter().filter(|c| !c.is_empty()) {
        println!("{} {}", "▸".green(), carousel.title.bold());
        for place in &carousel.places {
            println!("    {}", place_line(place));
        }
    }
}

fn print_place_details(place: &Place, gallery: &[String]) {
    println!("{}", place.name.bold().blue());
    println!("{}Category: {}", "• ".green(), category_badge(place));
    if let Some(sub) = &place.sub_category {
        println!("{}Subcategory: {}", "• ".green(), sub);
    }
    println!("{}Rating: {:.1} ({} reviews)", "• ".green(), place.rating, place.review_count);
    if let Some(price) = place.avg_price {
        println!("{}Average price: {:.2}", "• ".green(), price);
    }
    if !place.address.is_empty() {
        println!("{}Address: {}", "• ".cyan(), place.address);
    }
    if let Some(position) = place.position() {
        println!("{}Coordinates: {:.5}, {:.5}", "• ".cyan(), position.lat, position.lng);
    }
    if let Some(website) = &place.website {
        println!("{}Website: {}", "• ".cyan(), website);
    }
    if let Some(phone) = &place.phone_number {
        println!("{}Phone: {}", "• ".cyan(), phone);
    }
    for hours in &place.hours {
        println!("  {} {}-{}", hours.day, hours.open, hours.close);
    }
    if !place.description.is_empty() {
        println!("\n{}", place.description);
    }
    if !gallery.is_empty() {
        println!("\n{} ({} images)", "Gallery".bold(), gallery.len());
        for image in gallery {
            println!("  {}", image);
        }
    }
}
