use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use proximate::config::AppConfig;
use proximate::error::AppError;
use proximate::search::store::{listings_from_path, MemoryListingStore};
use proximate::search::{search_router, SearchOutcome, SearchService};
use proximate::telemetry;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Proximate Search Service",
    about = "Run the intelligent housing search service or exercise it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a query and print the ranked results
    Search(SearchArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Seed the listing store from a CSV export instead of the demo inventory
    #[arg(long)]
    listings_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Free-text housing query, e.g. "2 bedroom house with parking under $1200"
    query: String,
    /// Seed the listing store from a CSV export instead of the demo inventory
    #[arg(long)]
    listings_csv: Option<PathBuf>,
    /// Treat the query as a voice transcript with this recognition confidence
    #[arg(long)]
    voice_confidence: Option<f32>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Search(args) => run_search(args),
    }
}

fn build_store(csv_path: Option<PathBuf>) -> Result<MemoryListingStore, AppError> {
    match csv_path {
        Some(path) => {
            let listings = listings_from_path(path)?;
            Ok(MemoryListingStore::new(listings))
        }
        None => Ok(MemoryListingStore::with_demo_listings()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let csv_path = args.listings_csv.take().or(config.listings.csv_path.clone());
    let store = Arc::new(build_store(csv_path)?);
    info!(listings = store.len(), "listing store seeded");
    let service = Arc::new(SearchService::new(store));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops_state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let ops_routes = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(ops_state);

    let app = ops_routes
        .merge(search_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "intelligent housing search ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        query,
        listings_csv,
        voice_confidence,
    } = args;

    let store = Arc::new(build_store(listings_csv)?);
    let service = SearchService::new(store);

    let outcome = match voice_confidence {
        Some(confidence) => service.voice_search(&query, confidence)?,
        None => service.search(&query)?,
    };

    render_search_outcome(&outcome);
    Ok(())
}

fn render_search_outcome(outcome: &SearchOutcome) {
    println!("Query: {}", outcome.query);
    println!(
        "Classified as {} / {} (confidence {:.2})",
        outcome.classification.intent.label(),
        outcome.classification.housing_type.label(),
        outcome.classification.confidence
    );

    if outcome.classification.extracted_entities.is_empty() {
        println!("\nExtracted entities: none");
    } else {
        println!("\nExtracted entities");
        for entity in &outcome.classification.extracted_entities {
            println!(
                "- {:?}: {:?} (confidence {:.2})",
                entity.kind, entity.value, entity.confidence
            );
        }
    }

    let filters = &outcome.search_filters;
    println!("\nSearch filters");
    println!(
        "- price: {}..{}, distance <= {} miles",
        filters.price_range.min, filters.price_range.max, filters.distance_to_campus
    );
    if !filters.bedrooms.is_empty() {
        println!("- bedrooms: {:?}", filters.bedrooms);
    }
    if !filters.amenities.is_empty() {
        println!("- amenities: {}", filters.amenities.join(", "));
    }

    if outcome.results.is_empty() {
        println!("\nResults: none");
        return;
    }

    println!("\nTop {} result(s)", outcome.results.len());
    for result in &outcome.results {
        let listing = &result.enhanced.listing;
        let marker = if result.exact_bedroom_match { "*" } else { " " };
        println!(
            "{marker} {} | ${}/mo | {} bd / {} ba | {:.1} mi | score {:.2}",
            listing.title,
            listing.price,
            listing.bedrooms,
            listing.bathrooms,
            listing.distance_to_campus,
            result.relevance_score
        );
        println!("    {}", result.enhanced.smart_description);
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
