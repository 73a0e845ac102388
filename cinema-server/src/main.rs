use std::process;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cinema_server::config::ServerConfig;
use cinema_server::dataset::DatasetCache;
use cinema_server::finder::SearchConfig;
use cinema_server::geocode::{Geocoder, MockGeocoder, PostcodeClient};
use cinema_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinema_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    // Load the cinema table up front (fail fast if it is missing or malformed)
    let dataset = DatasetCache::new(&config.data_file);
    match dataset.get().await {
        Ok(loaded) => {
            if loaded.is_empty() {
                warn!(path = %config.data_file.display(), "cinema dataset has no usable rows");
            }
        }
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }

    // Live postcodes.io client, or a fixed table for offline use
    let geocoder: Arc<dyn Geocoder> = match &config.mock_postcodes {
        Some(path) => match MockGeocoder::from_file(path) {
            Ok(mock) => {
                info!(path = %path.display(), postcodes = mock.len(), "using mock postcodes");
                Arc::new(mock)
            }
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        None => match PostcodeClient::new(config.postcode_client()) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
    };

    let state = AppState {
        dataset: Arc::new(dataset),
        geocoder,
        config: Arc::new(SearchConfig::default()),
    };

    let app = create_router(state, &config.static_dir);

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "failed to bind: {e}");
            process::exit(1);
        }
    };

    println!("UK Cinema Finder listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health                    - Health check");
    println!("  GET  /about                     - About page");
    println!("  GET  /api/cinemas/nearest       - Nearest cinemas (HTML or JSON)");
    println!("  GET  /api/cinemas/nearest.csv   - Nearest cinemas as CSV");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        process::exit(1);
    }
}
