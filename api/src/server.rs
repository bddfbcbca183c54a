use crate::ask_payload::AskPayload;
use crate::db::ResponseLog;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use rag_system::AnswerPipeline;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_PAGE: &str = "project.html";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
    pub response_log: Arc<dyn ResponseLog>,
}

impl AppState {
    pub fn new(pipeline: Arc<AnswerPipeline>, response_log: Arc<dyn ResponseLog>) -> Self {
        Self {
            pipeline,
            response_log,
        }
    }
}

// Any pipeline failure, reported to the client as a bare 500.
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::error!("Failed to answer question: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to answer the question",
        )
            .into_response()
    }
}

pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(public_dir.join(INDEX_PAGE)))
        .route("/ask", post(ask))
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
}

pub async fn ask(State(state): State<AppState>, payload: AskPayload) -> Result<String, ApiError> {
    let question = payload.question;
    log::info!("Received question ({} chars)", question.chars().count());

    let answer = state.pipeline.answer(&question).await?;

    let response_log = state.response_log.clone();
    let record = (question, answer.clone());
    tokio::spawn(async move {
        let (question, answer) = record;
        let _ = record_answer(response_log.as_ref(), &question, &answer).await;
    });

    Ok(answer)
}

// A failed insert is only reported to the operator log.
pub async fn record_answer(
    response_log: &dyn ResponseLog,
    question: &str,
    answer: &str,
) -> anyhow::Result<()> {
    let result = response_log.record(question, answer).await;
    if let Err(err) = &result {
        log::error!("Failed to record answer: {:#}", err);
    }
    result
}
