use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use underwrite_ai::config::AppConfig;
use underwrite_ai::error::AppError;
use underwrite_ai::telemetry;
use underwrite_ai::workflows::underwriting::{
    batch, ApplicantRecord, DecisionPolicy, EligibilityReport, LogisticModel, UnderwritingError,
    UnderwritingService,
};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    service: Arc<UnderwritingService<LogisticModel>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Insurance Eligibility Service",
    about = "Score insurance eligibility submissions from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one submission from a JSON file and print the report
    Predict(PredictArgs),
    /// Score a CSV sheet of submissions and print one report per row
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Override the configured model artifact path
    #[arg(long)]
    model: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// JSON file holding one applicant record
    #[arg(long)]
    input: PathBuf,
    /// Override the configured model artifact path
    #[arg(long)]
    model: Option<PathBuf>,
    /// Override the configured approval threshold
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV sheet of applicant records, one per row
    #[arg(long)]
    csv: PathBuf,
    /// Override the configured model artifact path
    #[arg(long)]
    model: Option<PathBuf>,
    /// Override the configured approval threshold
    #[arg(long)]
    threshold: Option<f64>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Batch(args) => run_batch(args),
    }
}

/// Load the artifact once; the service shares it read-only afterwards.
fn build_service(
    config: &AppConfig,
    model_override: Option<PathBuf>,
    threshold_override: Option<f64>,
) -> Result<UnderwritingService<LogisticModel>, AppError> {
    let path = model_override.unwrap_or_else(|| config.model.artifact_path.clone());
    let model = LogisticModel::from_path(&path)?;

    let policy = match (config.model.policy, threshold_override) {
        (DecisionPolicy::ProbabilityThreshold { .. }, Some(threshold)) => {
            DecisionPolicy::ProbabilityThreshold { threshold }
        }
        (policy, _) => policy,
    };

    info!(artifact = %path.display(), ?policy, "classifier artifact loaded");
    Ok(UnderwritingService::new(model, policy))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let service = Arc::new(build_service(&config, args.model.take(), None)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        service,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/underwriting/predict", post(predict_endpoint))
        .layer(prometheus_layer)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "underwriting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.model, args.threshold)?;

    let raw = std::fs::read_to_string(&args.input)?;
    let applicant: ApplicantRecord = serde_json::from_str(&raw).map_err(AppError::Input)?;

    let outcome = service.assess(&applicant)?;
    let report = EligibilityReport::new(&outcome, Local::now().date_naive());
    println!("{}", report.render_text());

    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.model, args.threshold)?;

    let file = std::fs::File::open(&args.csv)?;
    let applicants = batch::parse_applicants(file)?;
    let today = Local::now().date_naive();

    for (row, applicant) in applicants.iter().enumerate() {
        match service.assess(applicant) {
            Ok(outcome) => {
                let report = EligibilityReport::new(&outcome, today);
                println!("{}\n", report.render_text());
            }
            // A bad row should not sink the rest of the sheet.
            Err(UnderwritingError::Intake(violation)) => {
                println!(
                    "Row {}: submission rejected at intake: {}\n",
                    row + 1,
                    violation
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn predict_endpoint(
    State(state): State<AppState>,
    Json(applicant): Json<ApplicantRecord>,
) -> Result<Json<EligibilityReport>, AppError> {
    let outcome = state.service.assess(&applicant)?;
    let report = EligibilityReport::new(&outcome, Local::now().date_naive());
    Ok(Json(report))
}
