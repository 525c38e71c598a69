//! Router assembly and the serve loop with bounded graceful shutdown.

use crate::error::AppError;
use crate::handlers::healthz;
use crate::routes::{auth_routes, common_routes, protected_routes};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method, Uri},
    routing::get,
    Router,
};
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{error, info, warn, Level};

pub const API_PREFIX: &str = "/api/v1";

/// Time in-flight requests get after the shutdown signal before they are abandoned.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: versioned API, root liveness probe, 404 fallback, CORS, tracing.
pub fn build_router(state: AppState) -> Router {
    let settings = state.settings.clone();
    let verbose = !settings.app.is_production();

    let api = Router::new()
        .merge(common_routes(state))
        .merge(auth_routes())
        .merge(protected_routes());

    Router::new()
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors_layer(&settings.cors_allowed_origins))
        .layer(trace_layer(verbose))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Allow the configured origins. A `*` entry allows any origin, without credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(12 * 60 * 60));

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}

type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Verbose mode records request headers on the span; terse mode only method, path, status, latency.
fn trace_layer(verbose: bool) -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(verbose),
        )
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

/// Serve until SIGINT/SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    serve_with_shutdown(listener, app, shutdown_signal()).await
}

/// Serve until `signal` resolves. After that no new connections are accepted;
/// in-flight requests get [`SHUTDOWN_GRACE`] to finish before they are abandoned.
pub async fn serve_with_shutdown<F>(listener: TcpListener, app: Router, signal: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        signal.await;
        info!("shutdown signal received, draining connections");
        let _ = tx.send(true);
    });

    let mut drain_rx = rx.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        wait_for_shutdown(&mut drain_rx).await;
    });

    let mut grace_rx = rx;
    let grace = async move {
        wait_for_shutdown(&mut grace_rx).await;
        tokio::time::sleep(SHUTDOWN_GRACE).await;
    };

    tokio::select! {
        res = server.into_future() => res?,
        _ = grace => warn!(grace = ?SHUTDOWN_GRACE, "grace period elapsed, abandoning in-flight requests"),
    }
    info!("server stopped");
    Ok(())
}

async fn wait_for_shutdown(rx: &mut watch::Receiver<bool>) {
    // A dropped sender means no signal will ever arrive.
    if rx.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Resolves on Ctrl+C or SIGTERM. If a handler cannot be installed the error is logged and
/// that source is ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
