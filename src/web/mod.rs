//! Browser UI served over HTTP
//!
//! The page is rendered server-side. Running research holds the session lock
//! until every search call has returned, so interactions are handled one at
//! a time and a second run waits for the first.

mod charts;
mod templates;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    error::Result,
    report::{MarketReport, TEXT_EXPORT_FILENAME},
    research::MarketResearcher,
};
pub use templates::{Notice, PageView, DEFAULT_PRODUCT};
use templates::render_index;

/// Largest accepted request body (PDF uploads)
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

// --- App State ---

/// Per-process UI cache, wiped by the Clear All action
#[derive(Debug, Default)]
pub struct Session {
    pub last_report: Option<MarketReport>,
    pub uploaded_pdf: Option<String>,
}

pub struct AppState {
    researcher: MarketResearcher,
    session: Mutex<Session>,
}

impl AppState {
    pub fn new(researcher: MarketResearcher) -> Self {
        Self {
            researcher,
            session: Mutex::new(Session::default()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResearchForm {
    #[serde(default)]
    product: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/research", post(run_research))
        .route("/upload", post(upload_pdf))
        .route("/clear", post(clear_session))
        .route("/report.txt", get(download_text))
        .route("/report.json", get(download_json))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

/// Bind `addr` and serve the UI until the process is stopped
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Market research UI listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// --- Handlers ---

fn render_session(
    session: &Session,
    product: Option<&str>,
    notice: Option<&Notice>,
) -> Html<String> {
    let product = product
        .or_else(|| session.last_report.as_ref().map(|r| r.product.as_str()))
        .unwrap_or(DEFAULT_PRODUCT);

    Html(render_index(&PageView {
        product,
        report: session.last_report.as_ref(),
        uploaded_pdf: session.uploaded_pdf.as_deref(),
        notice,
    }))
}

async fn index_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    render_session(&session, None, None)
}

async fn run_research(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ResearchForm>,
) -> impl IntoResponse {
    let product = form.product.trim();
    let mut session = state.session.lock().await;

    if product.is_empty() {
        let notice = Notice::Warning("Please enter a product name.".to_string());
        return (
            StatusCode::BAD_REQUEST,
            render_session(&session, Some(""), Some(&notice)),
        );
    }

    log::info!("research started for {product:?}");
    let report = state.researcher.research(product).await;
    log::info!(
        "research finished for {product:?}: {} competitors",
        report.competitors.len()
    );

    session.last_report = Some(report);
    let notice = Notice::Success(format!("Market Research Completed for {product}"));
    (StatusCode::OK, render_session(&session, Some(product), Some(&notice)))
}

async fn upload_pdf(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut uploaded = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                log::warn!("rejected upload: {e}");
                return upload_rejected(&state, "The upload could not be read.").await;
            }
        };

        let file_name = match (field.name(), field.file_name()) {
            (Some("pdf"), Some(name)) if !name.is_empty() => Some(name.to_string()),
            _ => None,
        };

        // Only the file name is kept; the body is drained and dropped
        if let Err(e) = field.bytes().await {
            log::warn!("rejected upload: {e}");
            return upload_rejected(&state, "The upload could not be read.").await;
        }

        if file_name.is_some() {
            uploaded = file_name;
        }
    }

    match uploaded {
        Some(name) if name.to_lowercase().ends_with(".pdf") => {
            log::info!("accepted upload {name:?}");
            state.session.lock().await.uploaded_pdf = Some(name);
            Redirect::to("/").into_response()
        }
        Some(_) => upload_rejected(&state, "Only PDF files are accepted.").await,
        None => upload_rejected(&state, "No file was selected.").await,
    }
}

async fn upload_rejected(state: &AppState, message: &str) -> Response {
    let session = state.session.lock().await;
    let notice = Notice::Warning(message.to_string());
    (StatusCode::BAD_REQUEST, render_session(&session, None, Some(&notice))).into_response()
}

async fn clear_session(State(state): State<Arc<AppState>>) -> Redirect {
    *state.session.lock().await = Session::default();
    log::info!("session cleared");
    Redirect::to("/")
}

async fn download_text(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session.lock().await;
    match &session.last_report {
        Some(report) => {
            let disposition = format!("attachment; filename=\"{TEXT_EXPORT_FILENAME}\"");
            (
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                report.to_text(),
            )
                .into_response()
        }
        None => no_report(),
    }
}

async fn download_json(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session.lock().await;
    let Some(report) = &session.last_report else {
        return no_report();
    };

    match report.to_json() {
        Ok(json) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"market_research_report.json\"",
                ),
            ],
            json,
        )
            .into_response(),
        Err(e) => {
            log::warn!("failed to serialize report: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export report").into_response()
        }
    }
}

fn no_report() -> Response {
    (StatusCode::NOT_FOUND, "No research report available yet").into_response()
}
