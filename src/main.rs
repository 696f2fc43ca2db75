use tracing_subscriber::EnvFilter;

use cine_client::models::{DurationRange, MovieFilters};
use cine_client::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration (.env + environment)
    let config = AppConfig::from_env()?;
    tracing::info!(
        "Backend: {}, users service: {}, page size: {}",
        config.backend_url,
        config.users_url,
        config.search_page_size
    );

    let state = AppState::new(config)?;
    let search = &state.movie_search;

    // 浏览整个目录
    let first = search.search(Some(MovieFilters::default()), 1).await?;
    tracing::info!("Catalog has {} movies", first.total);
    while search.load_more().await?.is_some() {}
    for movie in search.results() {
        tracing::info!("  {} ({})", movie.title, movie.year.map(|y| y.to_string()).unwrap_or_default());
    }

    // 带条件搜索
    let filters = MovieFilters::default()
        .with_search_text("nolan")
        .with_duration(DurationRange::at_least(140));
    let result = search.search(Some(filters), 1).await?;
    let labels: Vec<String> = search.active_filters().into_iter().map(|f| f.label).collect();
    tracing::info!(
        "Filters [{}] matched {} movies: {}",
        labels.join(", "),
        result.total,
        serde_json::to_string(&result.movies)?
    );

    Ok(())
}
