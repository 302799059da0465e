use clap::{Args, Parser, Subcommand};
use nearby_cities::config::{
    AppConfig, ENV_DATA, ENV_GEOCODER_URL, ENV_GEOCODE_TIMEOUT, ENV_MAPBOX_TOKEN,
};
use nearby_cities::dataset::load_sources;
use nearby_cities::geocode::{DEFAULT_GEOCODER_URL, DEFAULT_TIMEOUT_SECS};
use nearby_cities::search::CitySearch;
use nearby_cities::server::NearbyResponse;
use nearby_cities::suggest::suggest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Nearby Cities — find the cities within 100 miles of a place.
///
/// Looks the place up in the local dataset first and falls back to the
/// Mapbox geocoder for anything the dataset does not know.
///
/// Examples:
///   nearby suggest spring
///   nearby search "Springfield, IL"
///   nearby search "Oakland, CA" --json
///   MAPBOX_ACCESS_TOKEN=pk.... nearby serve --port 8080
#[derive(Parser)]
#[command(name = "nearby", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalOpts {
    /// City dataset files (JSON arrays). Defaults to the bundled datasets.
    #[arg(long = "data", global = true, env = ENV_DATA, value_delimiter = ',')]
    data: Vec<PathBuf>,

    /// Mapbox access token for the geocoding fallback.
    #[arg(long, global = true, env = ENV_MAPBOX_TOKEN, hide_env_values = true)]
    mapbox_token: Option<String>,

    /// Geocoding API base URL.
    #[arg(long, global = true, env = ENV_GEOCODER_URL, default_value = DEFAULT_GEOCODER_URL)]
    geocoder_url: String,

    /// Geocoding request timeout in seconds.
    #[arg(long, global = true, env = ENV_GEOCODE_TIMEOUT, default_value_t = DEFAULT_TIMEOUT_SECS)]
    geocode_timeout: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web UI and JSON API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, short = 'p', default_value_t = 8080)]
        port: u16,
    },
    /// Print autocomplete suggestions for a partial city name.
    Suggest {
        query: String,
    },
    /// Print the cities within 100 miles of a place.
    Search {
        /// "City" or "City, State". Multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the outcome as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::new(
        cli.global.data,
        cli.global.mapbox_token,
        cli.global.geocoder_url,
        cli.global.geocode_timeout,
    );

    match cli.command {
        Command::Serve { host, port } => {
            let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
                eprintln!("Error: Cannot start async runtime: {}", e);
                std::process::exit(1);
            });
            runtime.block_on(nearby_cities::server::start(&host, port, config));
        }
        Command::Suggest { query } => {
            let report = load_sources(&config.dataset_sources());
            for city in suggest(&report.store, &query) {
                println!("{}", city.label());
            }
        }
        Command::Search { query, json } => {
            let report = load_sources(&config.dataset_sources());
            let geocoder = config.build_geocoder();
            let outcome = CitySearch::new(&report.store, &geocoder).search(&query.join(" "));

            if json {
                match serde_json::to_string_pretty(&NearbyResponse::from(&outcome)) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", outcome.render());
            }
        }
    }
}
