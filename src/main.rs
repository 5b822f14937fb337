use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use hobby_match::config::{LoggingSettings, Settings, StoreBackend, StoreSettings};
use hobby_match::core::MatchRanker;
use hobby_match::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use hobby_match::services::{
    CachedGateway, DocumentStoreClient, GatewayError, InMemoryStore, LikeStore, ProfileGateway,
    StoreCollections,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

type Backends = (Arc<dyn ProfileGateway>, Arc<dyn LikeStore>);

async fn build_store(store: &StoreSettings) -> Result<Backends, GatewayError> {
    match store.backend {
        StoreBackend::Memory => {
            let memory = match &store.seed_file {
                Some(path) => InMemoryStore::from_seed_file(path).await?,
                None => InMemoryStore::default(),
            };
            let memory = Arc::new(memory);
            let gateway: Arc<dyn ProfileGateway> = memory.clone();
            let likes: Arc<dyn LikeStore> = memory;
            Ok((gateway, likes))
        }
        StoreBackend::DocumentStore => {
            let client = Arc::new(DocumentStoreClient::new(
                store.endpoint.clone(),
                store.api_key.clone(),
                store.project_id.clone(),
                store.database_id.clone(),
                StoreCollections {
                    profiles: store.profiles_collection.clone(),
                    likes: store.likes_collection.clone(),
                },
                store.page_size,
                Duration::from_secs(store.timeout_secs),
            )?);
            let gateway: Arc<dyn ProfileGateway> = client.clone();
            let likes: Arc<dyn LikeStore> = client;
            Ok((gateway, likes))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_tracing(
        &settings
            .as_ref()
            .map(|s| s.logging.clone())
            .unwrap_or_default(),
    );

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    info!("Starting Hobby Match ranking service...");

    let (gateway, likes) = build_store(&settings.store).await.map_err(|e| {
        error!("Failed to initialize profile store: {}", e);
        std::io::Error::other(format!("Profile store error: {}", e))
    })?;

    info!("Profile store initialized ({:?} backend)", settings.store.backend);

    let gateway: Arc<dyn ProfileGateway> = if settings.cache.enabled {
        info!(
            "Profile cache enabled ({} entries, TTL: {}s)",
            settings.cache.max_entries, settings.cache.ttl_secs
        );
        Arc::new(CachedGateway::new(
            gateway,
            settings.cache.max_entries,
            settings.cache.ttl_secs,
        ))
    } else {
        gateway
    };

    let options = settings.matching.ranking_options();
    let ranker = MatchRanker::new(gateway, options);

    info!("Ranker initialized with options: {:?}", options);

    let app_state = AppState {
        ranker,
        likes,
        max_top_n: settings.matching.max_top_n,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
