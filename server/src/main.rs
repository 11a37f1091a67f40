use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use drop4::{suggest_move, Game, MoveRequest, Snapshot};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod session;

use config::Config;
use session::SessionState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::parse();
    let state = SessionState::new(new_game(&config), config.ai_delay());
    let app = app_router(&config, state);

    let listener = TcpListener::bind(config.addr).await?;
    info!("Listening on http://{}", config.addr);
    info!("Serving static files from {}", config.static_dir.display());
    axum::serve(listener, app).await?;
    Ok(())
}

fn new_game(config: &Config) -> Game {
    match config.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn app_router(config: &Config, state: Arc<SessionState>) -> Router {
    let api = Router::new()
        .route("/game", get(get_game))
        .route("/game/legal", get(get_legal))
        .route("/game/move", post(post_move))
        .route("/game/ai-move", post(post_ai_move))
        .route("/game/reset", post(post_reset))
        .route("/move", get(handle_move))
        .with_state(state);
    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(&config.static_dir).append_index_html_on_directories(true))
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
struct MoveBody {
    column: usize,
}

#[derive(Debug, Deserialize, Serialize)]
struct LegalColumns {
    columns: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct MoveQuery {
    position: String,
}

async fn get_game(State(state): State<Arc<SessionState>>) -> Json<Snapshot> {
    Json(state.snapshot())
}

async fn get_legal(State(state): State<Arc<SessionState>>) -> Json<LegalColumns> {
    Json(LegalColumns {
        columns: state.legal_columns(),
    })
}

async fn post_move(
    State(state): State<Arc<SessionState>>,
    Json(body): Json<MoveBody>,
) -> Json<Snapshot> {
    Json(state.submit_move(body.column))
}

async fn post_ai_move(State(state): State<Arc<SessionState>>) -> Json<Snapshot> {
    Json(state.automated_move())
}

async fn post_reset(State(state): State<Arc<SessionState>>) -> Json<Snapshot> {
    Json(state.reset())
}

async fn handle_move(Query(query): Query<MoveQuery>) -> Result<impl IntoResponse, ApiError> {
    let req = MoveRequest {
        position: query.position,
    };
    let mv = suggest_move(req, &mut rand::thread_rng())?;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(mv)))
}

#[derive(Debug)]
struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let body = format!("{}", self.0);
        (status, body).into_response()
    }
}
