// PH Weather API v0.1
use std::net::SocketAddr;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod helpers;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;
use services::pipeline::WeatherPipeline;

/// PH Weather API OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PH Weather API",
        version = "0.1.0",
        description = "Current weather for Philippine cities with a synthesized hourly and \
            five-day forecast. Coordinates are snapped to the nearest of ten reference \
            cities before the upstream lookup.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Weather", description = "Current weather and forecast by city or coordinates"),
        (name = "Activities", description = "Weather- and location-based activity suggestions"),
    ),
    paths(
        routes::health::health_check,
        routes::weather::get_weather_by_city,
        routes::weather::get_weather_by_coords,
        routes::activities::get_activities,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::weather::WeatherResponse,
            routes::weather::WeatherData,
            routes::weather::ForecastData,
            routes::weather::ForecastEntry,
            routes::weather::ForecastCityInfo,
            routes::weather::WeatherCondition,
            routes::weather::MainReadings,
            routes::weather::Wind,
            routes::weather::Clouds,
            routes::weather::Sys,
            services::geo::Coordinates,
            routes::activities::ActivitiesResponse,
            routes::activities::ActivityItem,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ph_weather_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    init_tracing(config.log_json);

    let pipeline =
        WeatherPipeline::new(&config.upstream).expect("Failed to create upstream weather client");
    tracing::info!(
        "Upstream weather service at {} (timeout {:?})",
        config.upstream.base_url,
        config.upstream.timeout
    );

    let app_state = AppState {
        pipeline,
        default_city: config.default_city.clone(),
        upstream_url: config.upstream.base_url.clone(),
    };

    // CORS: read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let app = routes::router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
