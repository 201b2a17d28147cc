//! API routes for the answering server

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::engine::{AnswerEngine, ConversationReply, IngestOutcome};

/// Build all API routes.
pub fn api_routes() -> Router<AnswerEngine> {
    Router::new()
        .route("/get-response", post(get_response))
        .route("/add-question", post(add_question))
}

/// Request body for `POST /get-response`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The user's free-text question. Absent and empty are treated alike.
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /get-response - answer a query.
async fn get_response(
    State(engine): State<AnswerEngine>,
    Json(request): Json<QueryRequest>,
) -> Json<ConversationReply> {
    let message = request.message.unwrap_or_default();
    Json(engine.answer(&message).await)
}

/// Request body for `POST /add-question`.
#[derive(Debug, Deserialize)]
pub struct AddQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// POST /add-question - add a Q&A pair to the knowledge base.
async fn add_question(
    State(engine): State<AnswerEngine>,
    Json(request): Json<AddQuestionRequest>,
) -> Json<IngestOutcome> {
    let question = request.question.unwrap_or_default();
    let answer = request.answer.unwrap_or_default();
    Json(engine.ingest(&question, &answer).await)
}
