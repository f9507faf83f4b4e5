use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use delventto_quote::{calendar::Calendar, config::AppConfig, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("delventto_quote=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let calendar = Calendar::colombia().context("Failed to load calendar tables")?;
    let addr = format!("{}:{}", config.host, config.port);

    info!(
        seasons = calendar.seasons.ranges().len(),
        holiday_years = calendar.holidays.years().count(),
        max_stay_nights = config.pricing.max_stay_nights,
        "Calendar loaded"
    );

    let app = routes::app(AppState::new(config, calendar))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
