//! Telegram Bot API client.
//!
//! Covers the handful of methods the sticker flow needs: resolving a photo
//! to a downloadable file, fetching its bytes, and replying with a photo or
//! a plain-text message. Failures are never retried here; the webhook layer
//! decides what to do with them.

mod types;

pub use types::{ApiResponse, Chat, Document, FileInfo, Message, PhotoSize, Update};

use reqwest::multipart::{Form, Part};

const API_BASE: &str = "https://api.telegram.org";

/// Unified error type for Bot API calls.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Telegram API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("file {0} has no downloadable path")]
    NoFilePath(String),
}

/// Bot API client bound to a single bot token.
pub struct TelegramClient {
    http: reqwest::Client,
    method_base: String,
    file_base: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            method_base: format!("{API_BASE}/bot{token}"),
            file_base: format!("{API_BASE}/file/bot{token}"),
        }
    }

    /// Resolve a file id to a downloadable path via `getFile`.
    pub async fn get_file(&self, file_id: &str) -> Result<FileInfo, TelegramError> {
        let url = format!("{}/getFile", self.method_base);
        let resp = self
            .http
            .get(&url)
            .query(&[("file_id", file_id)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: ApiResponse<FileInfo> = serde_json::from_str(&body)?;
        if !envelope.ok {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: envelope.description.unwrap_or(body),
            });
        }
        envelope.result.ok_or(TelegramError::Api {
            status: status.as_u16(),
            message: "getFile returned an empty result".to_string(),
        })
    }

    /// Download a file's bytes from the file endpoint.
    pub async fn download_file(&self, file_path: &str) -> Result<Vec<u8>, TelegramError> {
        let url = format!("{}/{}", self.file_base, file_path);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Send `png` back to the chat as a photo via a multipart `sendPhoto`.
    pub async fn send_photo(&self, chat_id: i64, png: Vec<u8>) -> Result<(), TelegramError> {
        let url = format!("{}/sendPhoto", self.method_base);
        let part = Part::bytes(png)
            .file_name("sticker.png")
            .mime_str("image/png")?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);

        let resp = self.http.post(&url).multipart(form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }

    /// Send a plain-text message to the chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/sendMessage", self.method_base);
        let chat_id = chat_id.to_string();
        let resp = self
            .http
            .post(&url)
            .form(&[("chat_id", chat_id.as_str()), ("text", text)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }
}
