//! Webhook HTTP server.
//!
//! Receives Telegram updates, acknowledges them immediately, and hands the
//! actual sticker work to a detached task so the webhook never blocks.
//! Malformed or photo-less updates are acknowledged with 200 so Telegram
//! stops re-delivering them.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use stickpress_core::normalize_bytes;

use crate::telegram::{TelegramClient, TelegramError, Update};

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub telegram: Arc<TelegramClient>,
}

/// Create the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(state)
}

async fn status_handler() -> &'static str {
    "ok"
}

/// POST /webhook - one Telegram update per request.
async fn webhook_handler(
    State(state): State<AppState>,
    payload: Result<Json<Update>, JsonRejection>,
) -> StatusCode {
    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => {
            tracing::warn!("could not decode incoming update: {rejection}");
            return StatusCode::OK;
        }
    };

    let Some(message) = update.message else {
        tracing::warn!(update_id = update.update_id, "update carries no message");
        return StatusCode::OK;
    };
    let Some(photo) = message.largest_photo().cloned() else {
        tracing::warn!(
            update_id = update.update_id,
            "no photos included in the message"
        );
        return StatusCode::OK;
    };

    let chat_id = message.chat.id;
    tracing::info!(
        chat_id,
        width = photo.width,
        height = photo.height,
        "accepted photo for sticker conversion"
    );

    tokio::spawn(async move {
        if let Err(e) = process_photo(&state, chat_id, &photo.file_id).await {
            tracing::error!(chat_id, "sticker conversion failed: {e:#}");
            notify_failure(&state, chat_id).await;
        }
    });

    StatusCode::ACCEPTED
}

/// Download the photo, run it through the normalizer, and send the result
/// back to the originating chat.
async fn process_photo(state: &AppState, chat_id: i64, file_id: &str) -> anyhow::Result<()> {
    let file = state.telegram.get_file(file_id).await?;
    let path = file
        .file_path
        .ok_or_else(|| TelegramError::NoFilePath(file.file_id.clone()))?;

    tracing::info!(chat_id, %path, "downloading photo");
    let original = state.telegram.download_file(&path).await?;

    // The pipeline is CPU-bound; keep it off the async workers.
    let png = tokio::task::spawn_blocking(move || {
        let mut out = Vec::new();
        normalize_bytes(&original, &mut out).map(|()| out)
    })
    .await??;

    tracing::info!(chat_id, bytes = png.len(), "sending sticker back to chat");
    state.telegram.send_photo(chat_id, png).await?;
    Ok(())
}

async fn notify_failure(state: &AppState, chat_id: i64) {
    let text = "Sorry, that image could not be turned into a sticker.";
    if let Err(e) = state.telegram.send_message(chat_id, text).await {
        tracing::warn!(chat_id, "failed to notify chat about the error: {e}");
    }
}
