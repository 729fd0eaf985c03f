//! Companion HTTP surface.
//!
//! A stateless request/response adapter over the prompt compiler and the
//! chat-session factory: each POST creates one session, sends once, and
//! renders the outcome. It deliberately does not share the interactive
//! session state machine.

pub mod markdown;
pub mod pages;

use std::error::Error;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::api::{model_options, ChatCreator, GeminiClient};
use crate::core::app::commands::{send_prompt, SendMode};
use crate::core::config::{Config, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::web::markdown::markdown_to_html;

const BIND_ADDR: &str = "127.0.0.1:8080";

pub struct WebState {
    chat: Arc<dyn ChatCreator>,
    version: String,
}

impl WebState {
    pub fn new(chat: Arc<dyn ChatCreator>, version: &str) -> Self {
        Self {
            chat,
            version: version.to_string(),
        }
    }
}

pub async fn serve(config: Config, version: &'static str) -> Result<(), Box<dyn Error>> {
    let state = Arc::new(WebState::new(
        Arc::new(GeminiClient::new(config.api_key)),
        version,
    ));

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    println!("Starting web server on http://{BIND_ADDR}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub fn router(state: Arc<WebState>) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/prompt", post(handle_prompt))
        .route("/execute", post(handle_execute))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    model: String,
}

async fn handle_index(State(state): State<Arc<WebState>>) -> Html<String> {
    let model_ids: Vec<&str> = model_options().iter().map(|option| option.id).collect();
    Html(pages::index_page(&state.version, DEFAULT_MODEL, &model_ids))
}

/// Phase 1: refine the user's rough text into an optimized prompt.
async fn handle_prompt(
    State(state): State<Arc<WebState>>,
    Form(form): Form<PromptForm>,
) -> Html<String> {
    if form.prompt.is_empty() || form.model.is_empty() {
        return Html(pages::error_fragment("Prompt and model cannot be empty."));
    }

    match send_prompt(
        state.chat.as_ref(),
        &form.model,
        DEFAULT_TEMPERATURE,
        &form.prompt,
        SendMode::Craft,
    )
    .await
    {
        Ok(crafted) => Html(pages::crafted_prompt_fragment(
            &markdown_to_html(&crafted),
            &crafted,
            &form.model,
        )),
        Err(err) => {
            error!("failed to generate prompt: {err}");
            Html(pages::error_fragment(
                "The AI failed to generate a response. Please try again.",
            ))
        }
    }
}

/// Phase 2: execute crafted text unmodified for a final answer.
async fn handle_execute(
    State(state): State<Arc<WebState>>,
    Form(form): Form<PromptForm>,
) -> Html<String> {
    if form.prompt.is_empty() || form.model.is_empty() {
        return Html(pages::error_fragment("Prompt and model cannot be empty."));
    }

    match send_prompt(
        state.chat.as_ref(),
        &form.model,
        DEFAULT_TEMPERATURE,
        &form.prompt,
        SendMode::Direct,
    )
    .await
    {
        Ok(answer) => Html(pages::final_answer_fragment(&markdown_to_html(&answer))),
        Err(err) => {
            error!("failed to execute prompt: {err}");
            Html(pages::error_fragment(
                "The AI failed to execute the prompt. Please try again.",
            ))
        }
    }
}
