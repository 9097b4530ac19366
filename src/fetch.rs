//! Word frequency fetch from the dashboard backend
//!
//! One best-effort GET per trigger: no retries, no timeouts, no cancellation.
//! Every outcome is resolved into a terminal `ChartState` by the caller.

use crate::types::{ErrorBody, WordEntry};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx response; message taken from the body's `error` field when
    /// the body is JSON, else from the status line.
    #[error("Error fetching data: {message}")]
    Http { message: String },

    #[error("invalid word frequency payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

/// Fetch and decode the word frequency payload.
///
/// A JSON `null` body counts as an empty dataset, matching the backend's
/// behavior before any text has been ingested.
pub async fn fetch_word_frequencies(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<WordEntry>, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    debug!(status = %status, "Word frequency response received");

    if !status.is_success() {
        let status_text = status.canonical_reason().unwrap_or("Unknown Error");
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err_body) => err_body.error.unwrap_or_else(|| status_text.to_string()),
            Err(_) => format!("{} {}", status.as_u16(), status_text),
        };
        return Err(FetchError::Http { message });
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries = serde_json::from_str::<Option<Vec<WordEntry>>>(&body)?;
    Ok(entries.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartState;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve a single canned HTTP response on an ephemeral port and return
    /// the endpoint URL.
    fn spawn_one_shot_server(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });
        format!("http://{}/data/word_frequency", addr)
    }

    #[tokio::test]
    async fn ok_response_parses_entries() {
        let url = spawn_one_shot_server(
            "200 OK",
            r#"[{"name":"data","weight":5},{"name":"cloud","weight":2}]"#,
        );
        let client = reqwest::Client::new();

        let entries = fetch_word_frequencies(&client, &url).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "data");
        assert_eq!(entries[0].weight, 5.0);
        assert_eq!(entries[1].name, "cloud");
        assert_eq!(entries[1].weight, 2.0);
    }

    #[tokio::test]
    async fn empty_array_is_ok_and_empty() {
        let url = spawn_one_shot_server("200 OK", "[]");
        let client = reqwest::Client::new();

        let entries = fetch_word_frequencies(&client, &url).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn null_body_counts_as_empty() {
        let url = spawn_one_shot_server("200 OK", "null");
        let client = reqwest::Client::new();

        let entries = fetch_word_frequencies(&client, &url).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn absent_body_counts_as_empty() {
        let url = spawn_one_shot_server("200 OK", "");
        let client = reqwest::Client::new();

        let entries = fetch_word_frequencies(&client, &url).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn error_field_is_extracted_from_json_body() {
        let url =
            spawn_one_shot_server("500 Internal Server Error", r#"{"error":"db unavailable"}"#);
        let client = reqwest::Client::new();

        let err = fetch_word_frequencies(&client, &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Http { .. }));
        assert_eq!(err.to_string(), "Error fetching data: db unavailable");
    }

    #[tokio::test]
    async fn json_error_body_without_field_uses_status_text() {
        let url = spawn_one_shot_server("404 Not Found", r#"{"detail":"no such route"}"#);
        let client = reqwest::Client::new();

        let err = fetch_word_frequencies(&client, &url).await.unwrap_err();
        assert_eq!(err.to_string(), "Error fetching data: Not Found");
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_status_line() {
        let url = spawn_one_shot_server("503 Service Unavailable", "<html>oops</html>");
        let client = reqwest::Client::new();

        let err = fetch_word_frequencies(&client, &url).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn malformed_success_payload_is_a_decode_error() {
        let url = spawn_one_shot_server("200 OK", r#"{"name":"not an array"}"#);
        let client = reqwest::Client::new();

        let err = fetch_word_frequencies(&client, &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        // Bind then drop to get a port with nothing listening on it.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = reqwest::Client::new();

        let err = fetch_word_frequencies(&client, &format!("http://{}/data/word_frequency", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    // End-to-end: fetch outcome resolved into the display region's state.

    #[tokio::test]
    async fn error_response_resolves_to_failed_notice() {
        let url =
            spawn_one_shot_server("500 Internal Server Error", r#"{"error":"db unavailable"}"#);
        let client = reqwest::Client::new();

        let state = ChartState::from_fetch(fetch_word_frequencies(&client, &url).await);
        match state {
            ChartState::Failed(message) => {
                assert_eq!(
                    message,
                    "Could not load chart: Error fetching data: db unavailable"
                );
            }
            other => panic!("expected Failed state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_response_resolves_to_no_data() {
        let url = spawn_one_shot_server("200 OK", "[]");
        let client = reqwest::Client::new();

        let state = ChartState::from_fetch(fetch_word_frequencies(&client, &url).await);
        assert_eq!(state, ChartState::NoData);
    }

    #[tokio::test]
    async fn repeated_loads_reach_the_same_terminal_state() {
        let body = r#"[{"name":"data","weight":5},{"name":"cloud","weight":2}]"#;
        let client = reqwest::Client::new();

        let first_url = spawn_one_shot_server("200 OK", body);
        let first = ChartState::from_fetch(fetch_word_frequencies(&client, &first_url).await);

        let second_url = spawn_one_shot_server("200 OK", body);
        let second = ChartState::from_fetch(fetch_word_frequencies(&client, &second_url).await);

        assert_eq!(first, second);
        assert!(matches!(first, ChartState::Ready(_)));
    }
}
