//! Content-feed board source
//!
//! HTTP client for the remote devotional-content service. One deployment
//! consumes that feed instead of a seeded board: each entry is mapped -
//! lossily - into a single-task column. The mapping follows what that
//! deployment shipped, minus its string-coercion artifacts; see
//! `board_from_entries`.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::board::{Attachment, Board, Column, Task};
use crate::Result;

/// Default feed endpoint
pub const DEFAULT_FEED_URL: &str = "https://devo-casa-de-mi-padre.onrender.com";

const LIST_PATH: &str = "/devocionales-list";

/// Paginated response envelope
#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    data: FeedPage,
}

/// One page of feed results
#[derive(Debug, Deserialize)]
struct FeedPage {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
    results: Vec<FeedEntry>,
}

/// One content entry (subset of fields the board cares about)
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    pub id: String,
    pub titulo: String,
    pub fecha: String,
    #[serde(default)]
    pub devocional: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default)]
    pub soundcloud_link: Option<String>,
}

/// Client for the remote content feed
pub struct FeedClient {
    base_url: String,
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the content listing and map it into board shape
    pub async fn fetch_board(&self) -> Result<Board> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), LIST_PATH);
        debug!("fetching content feed from {url}");

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| {
                warn!("content feed request failed: {err}");
                err
            })?
            .text()
            .await
            .map_err(|err| {
                warn!("content feed read failed: {err}");
                err
            })?;
        let envelope = decode_envelope(&body)?;

        if envelope.data.next.is_some() {
            debug!(
                count = ?envelope.data.count,
                previous = ?envelope.data.previous,
                "feed is paginated; mapping first page only"
            );
        }

        Ok(board_from_entries(envelope.data.results))
    }
}

/// Decode the response body; malformed payloads surface as JSON errors,
/// distinct from transport failures
fn decode_envelope(body: &str) -> Result<FeedEnvelope> {
    serde_json::from_str(body).map_err(|err| {
        warn!("content feed decode failed: {err}");
        crate::Error::from(err)
    })
}

/// Map feed entries into board shape
///
/// One column and one task per entry, sharing the entry id. Media links
/// become attachments (empty url when absent) and labels. The feed carries
/// no authorship, so the entry date stands in for `author_id` - that is
/// what the feed-backed deployment shipped. An entry with no body gets a
/// bare-date description rather than the garbled date+missing-body
/// concatenation that deployment produced.
pub fn board_from_entries(entries: Vec<FeedEntry>) -> Board {
    let mut board = Board::default();

    for entry in entries {
        board.columns.push(Column {
            id: entry.id.clone(),
            name: entry.titulo.clone(),
            task_ids: vec![entry.id.clone()],
        });

        let description = match entry.devocional {
            Some(ref body) => format!("{}{}", entry.fecha, body),
            None => entry.fecha.clone(),
        };
        let labels = [entry.video_link.clone(), entry.soundcloud_link.clone()]
            .into_iter()
            .flatten()
            .collect();

        board.tasks.push(Task {
            id: entry.id.clone(),
            column_id: entry.id,
            name: entry.titulo,
            description: Some(description),
            due: None,
            is_subscribed: false,
            labels,
            assignees_ids: Vec::new(),
            attachments: vec![
                Attachment {
                    name: "Podcast".into(),
                    url: entry.soundcloud_link.unwrap_or_default(),
                },
                Attachment {
                    name: "Video".into(),
                    url: entry.video_link.unwrap_or_default(),
                },
            ],
            checklists: Vec::new(),
            comments: Vec::new(),
            author_id: entry.fecha,
        });
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> FeedEntry {
        FeedEntry {
            id: id.into(),
            titulo: format!("Entry {id}"),
            fecha: "2024-03-01".into(),
            devocional: Some(" body text".into()),
            video_link: Some("https://example.com/video".into()),
            soundcloud_link: None,
        }
    }

    #[test]
    fn test_envelope_decode() {
        let body = r#"{
            "data": {
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"id": "d1", "titulo": "Uno", "fecha": "2024-03-01",
                     "devocional": "texto", "video_link": null,
                     "soundcloud_link": "https://sc.example/1"}
                ]
            }
        }"#;
        let envelope = decode_envelope(body).unwrap();
        assert_eq!(envelope.data.count, Some(2));
        assert_eq!(envelope.data.results.len(), 1);
        assert_eq!(envelope.data.results[0].titulo, "Uno");
        assert!(envelope.data.results[0].video_link.is_none());
    }

    #[test]
    fn test_malformed_body_surfaces_as_json_error() {
        let err = decode_envelope("<html>service down</html>").unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));

        // a well-formed body missing the envelope is still a decode failure
        let err = decode_envelope(r#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_mapping_one_column_one_task_per_entry() {
        let board = board_from_entries(vec![entry("d1"), entry("d2")]);

        assert_eq!(board.columns.len(), 2);
        assert_eq!(board.tasks.len(), 2);
        assert!(board.members.is_empty());

        let column = board.column("d1").unwrap();
        assert_eq!(column.task_ids, vec!["d1".to_string()]);

        let task = board.task("d1").unwrap();
        assert_eq!(task.column_id, "d1");
        assert_eq!(task.description.as_deref(), Some("2024-03-01 body text"));
        assert_eq!(task.labels, vec!["https://example.com/video".to_string()]);
    }

    #[test]
    fn test_mapping_bodyless_entry_keeps_bare_date_description() {
        let mut bodyless = entry("d3");
        bodyless.devocional = None;

        let board = board_from_entries(vec![bodyless]);
        let task = board.task("d3").unwrap();
        assert_eq!(task.description.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_mapping_attachments_use_empty_url_when_absent() {
        let board = board_from_entries(vec![entry("d1")]);
        let task = board.task("d1").unwrap();

        assert_eq!(task.attachments.len(), 2);
        assert_eq!(task.attachments[0].name, "Podcast");
        assert_eq!(task.attachments[0].url, "");
        assert_eq!(task.attachments[1].name, "Video");
        assert_eq!(task.attachments[1].url, "https://example.com/video");
    }
}
