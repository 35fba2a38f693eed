use clap::Parser;
use placekit::places::{
    extract_address_fields, parse_components_payload, parse_fields_spec, AddressComponent,
    FieldsToExtract, PlaceResolver, PlacesClient, PlacesError,
};
use std::fs;
use std::path::PathBuf;

/// placekit v0.3 — typed address-field extraction for places payloads
///
/// Extracts requested address fields from a provider's place details and
/// derives {country, state, city, street} guesses from autocomplete
/// predictions.
///
/// Examples:
///   placekit "Bangladesh Border Road"
///   placekit --place-id ChIJOwg_06VPwokR --fields sublocality=long_name,postal_code=long_name
///   placekit --input details.json --fields administrative_area_level_1=short_name
///   placekit --offline --place-id ChIJOwg_06VPwokR --fields country=long_name
///   placekit --serve --port 8080
#[derive(Parser)]
#[command(name = "placekit", version, about, long_about = None)]
struct Cli {
    /// Free-text place query (positional). Runs autocomplete and prints
    /// the {country, state, city, street} guess.
    #[arg(index = 1)]
    query: Option<String>,

    /// Provider place id to fetch details for.
    #[arg(long)]
    place_id: Option<String>,

    /// Fields to extract, as comma-separated tag=form pairs.
    /// Example: --fields sublocality=long_name,postal_code=long_name
    #[arg(long, value_parser = parse_fields_cli)]
    fields: Option<FieldsToExtract>,

    /// Read a place-details payload (full envelope or bare component
    /// array) from a local JSON file instead of the network.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Offline mode: only use the cache and local input.
    #[arg(long)]
    offline: bool,

    /// Provider API key. Falls back to the PLACES_API_KEY environment
    /// variable.
    #[arg(long)]
    api_key: Option<String>,

    /// Run the HTTP server instead of a one-shot extraction.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn parse_fields_cli(s: &str) -> Result<FieldsToExtract, String> {
    parse_fields_spec(s)
}

fn main() {
    let cli = Cli::parse();

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let resolver = make_resolver(&cli);
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(placekit::server::start(&cli.host, cli.port, resolver));
        return;
    }

    // ── Local input file: extraction without the network ────────

    if let Some(ref path) = cli.input {
        let fields = require_fields(&cli);
        let components = read_components_file(path);
        let result = extract_address_fields(&components, &fields);
        print_json(&result);
        return;
    }

    // ── Place id: resolver-backed extraction ────────────────────

    if let Some(ref place_id) = cli.place_id {
        let fields = require_fields(&cli);
        let mut resolver = make_resolver(&cli);
        let result = resolver
            .fields_for_place(place_id, &fields)
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
        print_json(&result);
        return;
    }

    // ── Free-text query: autocomplete guess ─────────────────────

    if let Some(ref query) = cli.query {
        let mut resolver = make_resolver(&cli);
        let guess = resolver.guess_for_query(query).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        print_json(&guess);
        return;
    }

    // ── Nothing provided ────────────────────────────────────────

    eprintln!("Error: {}", PlacesError::NoInput);
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  placekit \"Bangladesh Border Road\"");
    eprintln!("  placekit --place-id <ID> --fields sublocality=long_name,postal_code=long_name");
    eprintln!("  placekit --input details.json --fields country=long_name");
    eprintln!("  placekit --serve --port 8080");
    std::process::exit(1);
}

fn make_resolver(cli: &Cli) -> PlaceResolver {
    let client = if cli.offline {
        None
    } else {
        match &cli.api_key {
            Some(key) => Some(PlacesClient::new(key.clone())),
            None => PlacesClient::from_env().ok(),
        }
    };

    let mut resolver = PlaceResolver::new(client);
    if cli.offline {
        resolver.set_offline(true);
    }
    resolver
}

fn require_fields(cli: &Cli) -> FieldsToExtract {
    cli.fields.clone().unwrap_or_else(|| {
        eprintln!("Error: --fields is required for extraction.");
        eprintln!("Example: --fields sublocality=long_name,postal_code=long_name");
        std::process::exit(1);
    })
}

/// Accept either the full details envelope or a bare component array.
fn read_components_file(path: &PathBuf) -> Vec<AddressComponent> {
    let data = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot read {}: {}", path.display(), e);
        std::process::exit(1);
    });
    parse_components_payload(&data).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}
