use std::{net::TcpListener, sync::Arc, time::Duration};

use env_logger::Env;
use herald::{
    configuration::get_configuration,
    services::{
        run_request_handler, ApifySearch, CompanyPipeline, OpenaiClient, PgResearchCache,
        RunRequest, RunRequestSender, StrategyResolver, WebFetcher,
    },
    startup::run,
};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let pool_options = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(15 * 60)) // 15 minutes
        .max_lifetime(None);

    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());
    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let openai_client = Arc::new(OpenaiClient::new(configuration.api_keys.openai));
    let search_provider = Arc::new(ApifySearch::new(configuration.api_keys.apify));
    let content_fetcher = Arc::new(WebFetcher::new());
    let research_cache = Arc::new(PgResearchCache::new(
        connection_pool.clone(),
        configuration.research.cache_expiry_days,
    ));

    let resolver = StrategyResolver::new(
        search_provider,
        content_fetcher,
        openai_client.clone(),
        configuration.research.clone(),
    );
    let pipeline = CompanyPipeline::new(
        resolver,
        research_cache,
        openai_client,
        configuration.research,
    );

    let (run_request_sender, run_request_receiver) = mpsc::unbounded_channel::<RunRequest>();

    // Spawn background task
    let pool_clone = connection_pool.clone();
    tokio::spawn(async move {
        run_request_handler(run_request_receiver, pipeline, pool_clone).await
    });

    run(
        listener,
        connection_pool,
        RunRequestSender {
            sender: run_request_sender,
        },
    )?
    .await
}
