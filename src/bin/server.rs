use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use cut_planner::{Action, Observation, Planner, PlannerConfig, Problem, Strategy};
use serde::Deserialize;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize)]
struct ActionRequest {
    observation: Observation,
    strategy: Strategy,
    #[serde(default)]
    node_budget: Option<u64>,
}

async fn decide(Json(req): Json<ActionRequest>) -> Result<Json<Action>, (StatusCode, String)> {
    tracing::info!(
        strategy = %req.strategy,
        products = req.observation.products.len(),
        stocks = req.observation.stocks.len(),
        "POST /action"
    );

    let problem =
        Problem::try_from(&req.observation).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let planner = Planner::new(PlannerConfig {
        strategy: req.strategy,
        node_budget: req.node_budget,
    });
    // Branch and bound can run for a long time; keep it off the async workers
    let action = tokio::task::spawn_blocking(move || planner.decide(&problem))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(%action, "decided");
    Ok(Json(action))
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/action", post(decide))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
