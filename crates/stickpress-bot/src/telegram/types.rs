//! Serde models for webhook updates and Bot API responses.
//!
//! Field names follow the Bot API wire format. Everything the bot does not
//! use is simply left out; serde ignores unknown fields.

use serde::Deserialize;

/// One incoming webhook update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

/// A chat message carried by an update.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: String,
    pub chat: Chat,
    #[serde(default)]
    pub document: Option<Document>,
    /// Variants of the same photo, one entry per resolution.
    #[serde(default, rename = "photo")]
    pub photos: Vec<PhotoSize>,
}

impl Message {
    /// The highest-resolution photo variant, by pixel area.
    ///
    /// The Bot API sends variants sorted smallest-first, but selection does
    /// not depend on that ordering.
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photos
            .iter()
            .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
    }
}

/// The conversation a message belongs to.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// One resolution variant of a photo.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

/// An attached document (a file sent uncompressed).
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `getFile` result payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    /// Relative path on the file endpoint, valid for at least an hour.
    #[serde(default)]
    pub file_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_UPDATE: &str = r#"{
        "update_id": 645341831,
        "message": {
            "message_id": 12,
            "from": {"id": 77, "is_bot": false, "first_name": "Tester"},
            "chat": {"id": 1, "type": "private"},
            "date": 1628000000,
            "text": "test message",
            "photo": [
                {"file_id": "small-file", "file_unique_id": "u1", "width": 90, "height": 51, "file_size": 1393},
                {"file_id": "big-file", "file_unique_id": "u2", "width": 320, "height": 184, "file_size": 15237}
            ]
        }
    }"#;

    #[test]
    fn parses_update_with_photos() {
        let update: Update = serde_json::from_str(SAMPLE_UPDATE).unwrap();

        assert_eq!(update.update_id, 645341831);
        let message = update.message.unwrap();
        assert_eq!(message.text, "test message");
        assert_eq!(message.chat.id, 1);
        assert_eq!(message.photos.len(), 2);
    }

    #[test]
    fn selects_largest_photo_by_area() {
        let update: Update = serde_json::from_str(SAMPLE_UPDATE).unwrap();
        let message = update.message.unwrap();

        assert_eq!(message.largest_photo().unwrap().file_id, "big-file");
    }

    #[test]
    fn largest_photo_ignores_array_order() {
        let message: Message = serde_json::from_str(
            r#"{
                "chat": {"id": 5},
                "photo": [
                    {"file_id": "big", "width": 800, "height": 600},
                    {"file_id": "small", "width": 90, "height": 68}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(message.largest_photo().unwrap().file_id, "big");
    }

    #[test]
    fn parses_update_without_message() {
        let update: Update = serde_json::from_str(r#"{"update_id": 3}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn photoless_message_has_no_largest_photo() {
        let message: Message = serde_json::from_str(
            r#"{"chat": {"id": 9}, "text": "hello"}"#,
        )
        .unwrap();

        assert!(message.photos.is_empty());
        assert!(message.largest_photo().is_none());
    }

    #[test]
    fn parses_document_message() {
        let message: Message = serde_json::from_str(
            r#"{
                "chat": {"id": 9},
                "document": {"file_id": "doc-1", "file_name": "brocc.jpg"}
            }"#,
        )
        .unwrap();

        let document = message.document.unwrap();
        assert_eq!(document.file_id, "doc-1");
        assert_eq!(document.file_name.as_deref(), Some("brocc.jpg"));
    }

    #[test]
    fn parses_get_file_envelope() {
        let envelope: ApiResponse<FileInfo> = serde_json::from_str(
            r#"{"ok": true, "result": {"file_id": "abc", "file_path": "photos/file_0.jpg"}}"#,
        )
        .unwrap();

        assert!(envelope.ok);
        let file = envelope.result.unwrap();
        assert_eq!(file.file_path.as_deref(), Some("photos/file_0.jpg"));
    }

    #[test]
    fn parses_error_envelope() {
        let envelope: ApiResponse<FileInfo> = serde_json::from_str(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: file is too big"}"#,
        )
        .unwrap();

        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(
            envelope.description.as_deref(),
            Some("Bad Request: file is too big")
        );
    }
}
