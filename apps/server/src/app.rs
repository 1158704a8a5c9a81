//! HTTP application: shared state, routes and the serve loop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use romdex_archive::{ArchiveIndex, ExistenceResolver};
use romdex_browse::{BrowseError, BrowseResult, Browser, SystemFolder};
use romdex_scanner::{IndexedFile, ScanError, Scanner, dedupe_by_base_name, system_paths};
use romdex_systems::Catalog;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Runs the server until shutdown is requested.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let state = AppState::new(Arc::new(Catalog::builtin()), config.games_folders);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("SIGINT received, shutting down");
        }
        shutdown.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;

    Ok(())
}

/// Components shared by every request.
///
/// One archive index backs the browser, the scanner and the resolver.
#[derive(Debug, Clone)]
pub struct AppState {
    roots: Arc<[PathBuf]>,
    archives: Arc<ArchiveIndex>,
    browser: Browser,
    scanner: Scanner,
    resolver: ExistenceResolver,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, roots: Vec<PathBuf>) -> Self {
        let archives = Arc::new(ArchiveIndex::new());
        Self {
            browser: Browser::new(Arc::clone(&catalog), roots.clone(), Arc::clone(&archives)),
            scanner: Scanner::new(catalog, Arc::clone(&archives)),
            resolver: ExistenceResolver::new(Arc::clone(&archives)),
            archives,
            roots: roots.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/games/browse", post(browse))
        .route("/games/systems", get(systems))
        .route("/games/index", post(index))
        .route("/games/exists", post(exists))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// -- Requests and responses --

#[derive(Debug, Deserialize)]
pub struct PathRequest {
    pub path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexRequest {
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub total: usize,
    pub files: Vec<IndexedFile>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

// -- Errors --

/// Failure of a request, rendered as a status code and plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Browse(#[from] BrowseError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Browse(BrowseError::InvalidPath(_)) => StatusCode::BAD_REQUEST,
            ApiError::Browse(BrowseError::UnknownSystem(_))
            | ApiError::Scan(ScanError::UnknownSystem(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

// -- Handlers --

async fn browse(
    State(state): State<AppState>,
    Json(req): Json<PathRequest>,
) -> Result<Json<BrowseResult>, ApiError> {
    let browser = state.browser.clone();
    let result = tokio::task::spawn_blocking(move || browser.list(&req.path)).await??;
    Ok(Json(result))
}

async fn systems(State(state): State<AppState>) -> Result<Json<Vec<SystemFolder>>, ApiError> {
    let browser = state.browser.clone();
    let folders = tokio::task::spawn_blocking(move || browser.system_folders()).await?;
    Ok(Json(folders))
}

async fn index(
    State(state): State<AppState>,
    Json(req): Json<IndexRequest>,
) -> Result<Json<IndexResponse>, ApiError> {
    let scanner = state.scanner.clone();
    let roots = Arc::clone(&state.roots);
    let archives = Arc::clone(&state.archives);

    let files = tokio::task::spawn_blocking(move || {
        // Every full index starts from an empty archive cache.
        archives.clear();
        let paths = system_paths(scanner.catalog(), &roots);
        let files = scanner.scan_all(&paths, |system, root| {
            tracing::info!(system, root = %root.display(), "indexing");
        })?;
        Ok::<_, ScanError>(if req.unique {
            dedupe_by_base_name(files)
        } else {
            files
        })
    })
    .await??;

    tracing::info!(total = files.len(), unique = req.unique, "index complete");
    Ok(Json(IndexResponse {
        total: files.len(),
        files,
    }))
}

async fn exists(
    State(state): State<AppState>,
    Json(req): Json<PathRequest>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let resolver = state.resolver.clone();
    let exists =
        tokio::task::spawn_blocking(move || resolver.exists(Path::new(&req.path))).await?;
    Ok(Json(ExistsResponse { exists }))
}
