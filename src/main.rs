use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metalbank_onboarding::config::AppConfig;
use metalbank_onboarding::error::AppError;
use metalbank_onboarding::onboarding::presenter::{
    FormField, FormSession, SessionEvent, SessionView,
};
use metalbank_onboarding::onboarding::{
    ApplicantSubmission, EvaluationsClient, OnboardingService, Outcome,
};
use metalbank_onboarding::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    onboarding: Arc<OnboardingService>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Metal Bank Onboarding",
    about = "Collect applicant details and run them through Alloy identity verification",
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
    /// Submit one applicant from the command line and print the decision
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// Address line 1
    #[arg(long)]
    line1: String,
    /// Address line 2 (optional)
    #[arg(long)]
    line2: Option<String>,
    #[arg(long)]
    city: String,
    /// Two-letter US state code
    #[arg(long)]
    state: String,
    #[arg(long)]
    postal: String,
    /// Nine-digit SSN
    #[arg(long)]
    ssn: String,
    #[arg(long)]
    email: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: String,
}

#[derive(Debug, Serialize)]
struct OutcomeResponse {
    outcome: Outcome,
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
        Command::Submit(args) => run_submit(args).await,
    }
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let onboarding = Arc::new(OnboardingService::new(EvaluationsClient::new(
        config.alloy.clone(),
    )));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        onboarding,
    };

    let app = app_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "applicant onboarding service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/applicant-details", post(applicant_details_endpoint))
        .with_state(state)
}

async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = OnboardingService::new(EvaluationsClient::new(config.alloy.clone()));

    let SubmitArgs {
        first_name,
        last_name,
        line1,
        line2,
        city,
        state,
        postal,
        ssn,
        email,
        date_of_birth,
    } = args;

    let mut edits = vec![
        (FormField::FirstName, first_name),
        (FormField::LastName, last_name),
        (FormField::AddressLine1, line1),
        (FormField::City, city),
        (FormField::State, state),
        (FormField::PostalCode, postal),
        (FormField::Ssn, ssn),
        (FormField::EmailAddress, email),
        (FormField::DateOfBirth, date_of_birth),
    ];
    if let Some(line2) = line2 {
        edits.push((FormField::AddressLine2, line2));
    }

    let session = edits
        .into_iter()
        .fold(FormSession::new(), |session, (field, value)| {
            session.apply(SessionEvent::FieldChanged { field, value })
        });

    let event = match service.submit(session.draft()).await {
        Ok(outcome) => SessionEvent::DecisionReceived(outcome),
        Err(err) => SessionEvent::SubmissionFailed(AppError::from(err).to_string()),
    };

    match session.apply(event).view() {
        SessionView::Decision { message } => println!("{message}"),
        SessionView::Form { alert } => {
            let alert = alert.unwrap_or_default();
            println!("Error occurred calling API: {alert}");
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

async fn applicant_details_endpoint(
    State(state): State<AppState>,
    Json(submission): Json<Option<ApplicantSubmission>>,
) -> Result<Json<OutcomeResponse>, AppError> {
    match state.onboarding.submit(submission.as_ref()).await {
        Ok(outcome) => Ok(Json(OutcomeResponse { outcome })),
        Err(err) => {
            let err = AppError::from(err);
            warn!(error = %err, "applicant submission failed");
            Err(err)
        }
    }
}
