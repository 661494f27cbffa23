//! Portfolio Store Backend
//!
//! Persists the portfolio site's blog posts, projects, technology catalog and community topics
//! as JSON documents in a SQLite-backed key-value store, and serves them over a REST API.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod repository;
mod storage;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use repository::{PostRepository, ProjectRepository, TechnologyRepository, TopicRepository};
use storage::{SqliteStore, Storage};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostRepository<SqliteStore>>,
    pub projects: Arc<ProjectRepository<SqliteStore>>,
    pub technologies: Arc<TechnologyRepository<SqliteStore>>,
    pub topics: Arc<TopicRepository<SqliteStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build every repository on top of one shared store.
    pub fn new(store: SqliteStore, config: Config) -> Self {
        let storage = Storage::new(store);
        Self {
            posts: Arc::new(PostRepository::new(
                storage.clone(),
                config.default_author.clone(),
            )),
            projects: Arc::new(ProjectRepository::new(storage.clone())),
            technologies: Arc::new(TechnologyRepository::new(storage.clone())),
            topics: Arc::new(TopicRepository::new(storage)),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Portfolio Store Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (PORTFOLIO_API_PSK). Owner routes are open!");
    }

    let store = SqliteStore::open(&config.db_path).await?;
    let bind_addr = config.bind_addr;
    let state = AppState::new(store, config);

    if state.config.seed_defaults {
        state.posts.seed_defaults().await?;
        state.technologies.seed_defaults().await?;
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();
    let owner_only =
        middleware::from_fn(move |req, next| auth::require_owner(psk.clone(), req, next));

    let api_routes = Router::new()
        .route("/categories", get(api::list_categories))
        // Posts
        .route(
            "/posts",
            get(api::list_posts).merge(post(api::create_post).route_layer(owner_only.clone())),
        )
        .route("/posts/recent", get(api::recent_posts))
        .route(
            "/posts/{id}",
            put(api::update_post)
                .delete(api::delete_post)
                .route_layer(owner_only.clone()),
        )
        // Projects
        .route(
            "/projects",
            get(api::list_projects).merge(post(api::save_project).route_layer(owner_only.clone())),
        )
        .route(
            "/projects/{id}",
            put(api::update_project)
                .delete(api::delete_project)
                .route_layer(owner_only.clone()),
        )
        // Technologies
        .route("/technologies", get(api::list_technologies))
        .route(
            "/technologies/{tech_id}",
            put(api::update_technology).route_layer(owner_only),
        )
        // Topics
        .route(
            "/technologies/{tech_id}/topics",
            get(api::list_topics).post(api::create_topic),
        )
        .route(
            "/technologies/{tech_id}/topics/{topic_id}",
            put(api::update_topic).delete(api::delete_topic),
        )
        .route(
            "/technologies/{tech_id}/topics/{topic_id}/vote",
            post(api::vote_topic),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
