use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use bytes::Bytes;
use futures::stream;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, instrument};

use autosign_infrastructure::logging::{RunLogger, StreamSink};

use crate::presentation::state::AppState;

/// Every path and method lands in one handler
pub fn router(state: Arc<AppState>) -> Router {
    Router::new().fallback(handle_request).with_state(state)
}

/// Serve the HTTP trigger until `shutdown` resolves
pub async fn serve<F>(listen: &str, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {}", listen))?;
    info!("HTTP trigger listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

#[instrument(skip_all, fields(path = %uri.path()))]
async fn handle_request(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    if state.is_trigger_path(uri.path()) {
        start_streaming_run(state)
    } else {
        redirect(&state.homepage)
    }
}

/// Kick off a run in the background and stream its log as the body.
/// The body ends once the run drops its logger.
fn start_streaming_run(state: Arc<AppState>) -> Response {
    info!("On-demand run requested");
    let (sink, rx) = StreamSink::channel();

    tokio::spawn(async move {
        let logger = RunLogger::streaming(sink);
        let summary = state.job.run(&logger).await;
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            already_signed = summary.already_signed,
            "On-demand run finished"
        );
    });

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Body::from_stream(log_stream(rx)),
    )
        .into_response()
}

fn log_stream(
    rx: UnboundedReceiver<Bytes>,
) -> impl futures::Stream<Item = Result<Bytes, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (Ok(chunk), rx))
    })
}

fn redirect(homepage: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, homepage.to_string())]).into_response()
}
