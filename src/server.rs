//! HTTP transport — serves the schema over axum.
//!
//! - `POST /graphql` executes an operation
//! - `GET /graphql` serves GraphiQL
//! - `GET /health` reports store counts

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::catalog::{HttpCatalog, MovieCatalog};
use crate::config::Config;
use crate::error::Result;
use crate::graphql::{build_schema, TweetSchema};
use crate::store::{IdPolicy, RelationStore, Seed, StoreStats};

#[derive(Clone)]
pub struct AppState {
    pub schema: TweetSchema,
    pub store: Arc<RelationStore>,
}

impl AppState {
    /// Wire store, catalog and schema from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let seed = match &config.store.seed_file {
            Some(path) => Seed::load(path)?,
            None => Seed::default(),
        };
        let store = Arc::new(RelationStore::new(seed, config.store.id_policy)?);
        let catalog: Arc<dyn MovieCatalog> = Arc::new(HttpCatalog::from_config(&config.catalog)?);
        Ok(Self::new(store, catalog, config))
    }

    pub fn new(store: Arc<RelationStore>, catalog: Arc<dyn MovieCatalog>, config: &Config) -> Self {
        let schema = build_schema(Arc::clone(&store), catalog, &config.server);
        Self { schema, store }
    }
}

/// Build the router for an app state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .with_state(state)
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let request = req.into_inner();
    debug!(operation = ?request.operation_name, "graphql request");
    state.schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    #[serde(flatten)]
    stats: StoreStats,
    id_policy: IdPolicy,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.stats() {
        Ok(stats) => {
            let health = Health {
                status: "ok",
                stats,
                id_policy: state.store.policy(),
            };
            (StatusCode::OK, Json(json!(health)))
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": e.to_string() })),
            )
        }
    }
}

/// Serve on an already-bound listener until Ctrl-C.
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shut down");
    Ok(())
}

/// Build everything from config and serve on `server.listen`.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    info!(
        catalog = %config.catalog.base_url,
        id_policy = %state.store.policy(),
        "store and catalog ready"
    );
    let listener = TcpListener::bind(config.listen_addr()?).await?;
    serve_on(listener, state).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
