use moodrec::{init_tracing, AppState, Config, ServiceError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[arg(short, long)]
    log_level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    message: String,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Success".to_string(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message,
        }
    }
}

struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<moodrec::ParseError> for ApiError {
    fn from(err: moodrec::ParseError) -> Self {
        Self(ServiceError::Parse(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::MissingLocation | ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Parse(_) | ServiceError::Webhook(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("Request failed: {}", self.0);
        (status, Json(ApiResponse::<()>::error(self.0.user_message()))).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Deserialize)]
struct AnalyzeBody {
    #[serde(default)]
    interactions: Vec<moodrec::Interaction>,
    #[serde(default)]
    preferences: Vec<moodrec::ExplicitPreference>,
    mood: moodrec::Mood,
    #[serde(default)]
    strategy: moodrec::StrategyKind,
}

#[derive(Debug, Deserialize)]
struct DetailsBody {
    text: String,
}

async fn health_check() -> Json<ApiResponse<HashMap<String, String>>> {
    let mut status = HashMap::new();
    status.insert("status".to_string(), "healthy".to_string());
    status.insert("service".to_string(), "moodrec".to_string());
    status.insert("version".to_string(), env!("CARGO_PKG_VERSION").to_string());

    Json(ApiResponse::success(status))
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> ApiResult<moodrec::PreferenceAnalysis> {
    let input = moodrec::AnalysisInput::new(&body.interactions, &body.preferences, body.mood);
    Ok(Json(ApiResponse::success(state.analyzer.analyze(body.strategy, &input))))
}

async fn parse(body: String) -> ApiResult<moodrec::RecommendationResponse> {
    let response = moodrec::parse_recommendation_response(&body)?;
    Ok(Json(ApiResponse::success(response)))
}

async fn details(Json(body): Json<DetailsBody>) -> ApiResult<moodrec::ExtractedDetails> {
    Ok(Json(ApiResponse::success(moodrec::extract_recommendation_details(&body.text))))
}

async fn record_interaction(
    State(state): State<AppState>,
    Json(interaction): Json<moodrec::Interaction>,
) -> ApiResult<String> {
    state.recommendation_service.record_interaction(interaction).await?;
    Ok(Json(ApiResponse::success("Interaction recorded successfully".to_string())))
}

async fn save_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(answers): Json<Vec<moodrec::PreferenceAnswer>>,
) -> ApiResult<Vec<moodrec::ExplicitPreference>> {
    let saved = state.recommendation_service.save_preferences(user_id, answers).await?;
    Ok(Json(ApiResponse::success(saved)))
}

async fn get_recommendations(
    State(state): State<AppState>,
    Json(request): Json<moodrec::RecommendationRequest>,
) -> ApiResult<moodrec::RecommendationResponse> {
    let response = state.recommendation_service.get_recommendations(&request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_group_recommendations(
    State(state): State<AppState>,
    Json(request): Json<moodrec::RecommendationRequest>,
) -> ApiResult<moodrec::RecommendationResponse> {
    let response = state.recommendation_service.get_group_recommendations(&request).await?;
    Ok(Json(ApiResponse::success(response)))
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .route("/parse", post(parse))
        .route("/details", post(details))
        .route("/interactions", post(record_interaction))
        .route("/preferences/:user_id", post(save_preferences))
        .route("/recommendations", post(get_recommendations))
        .route("/groups/recommendations", post(get_group_recommendations))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
        )
        .with_state(state)
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::from_file(path)
    } else {
        info!("Config file not found, using default configuration");
        Ok(Config::default())
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let state = AppState::new(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(level) = &args.log_level {
        std::env::set_var("RUST_LOG", level);
    }
    init_tracing();

    let config = load_config(&args.config)?;
    info!("Starting moodrec server with config: {:?}", config.server);

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?
        .block_on(serve(config))
}
