use axum::Router;
use landroute::config::Config;
use landroute::services::land_check::LandVerifier;
use landroute::services::nominatim::NominatimClient;
use landroute::services::polyline::PolylineCodec;
use landroute::services::route_generator::RouteGenerator;
use landroute::services::routing::RouteProvider;
use landroute::services::valhalla::ValhallaClient;
use landroute::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting landroute API server");
    tracing::info!(
        bounding_boxes = config.route_generator.bounding_boxes.len(),
        range = %config.route_generator.distance_range,
        max_attempts = config.route_generator.max_attempts,
        "Configuration loaded: {} bounding boxes, {}",
        config.route_generator.bounding_boxes.len(),
        config.route_generator.distance_range
    );

    // Initialize collaborators
    let land_verifier: Arc<dyn LandVerifier> = Arc::new(NominatimClient::new(
        &config.nominatim,
        config.route_generator.land_check_timeout,
    )?);
    let route_provider: Arc<dyn RouteProvider> = Arc::new(ValhallaClient::new(
        config.valhalla.url.clone(),
        config.route_generator.route_fetch_timeout,
    )?);
    let codec = PolylineCodec::new(config.valhalla.shape_precision)?;

    tracing::info!(
        nominatim = %config.nominatim.base_url,
        valhalla = %config.valhalla.url,
        "Land checks via {}, routing via {}",
        config.nominatim.base_url, config.valhalla.url
    );

    let route_generator = RouteGenerator::new(
        land_verifier,
        route_provider,
        codec,
        config.route_generator.clone(),
    );

    // Create application state
    let state = Arc::new(AppState { route_generator });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", landroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
