//! Mode-parameterized summarization.
//!
//! Takes the extracted [`TextBundle`] and a [`SummaryMode`], bounds the
//! input, and asks the completion service for a summary. This component
//! never fails the request: without a credential it answers with a labeled
//! mock summary, and any completion-service failure is rendered as a
//! degraded text answer. Callers can tell the cases apart through
//! [`SummaryKind`].

use crate::completion::CompletionClient;
use crate::pdf::TextBundle;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Hard character budget for the text submitted to the completion service.
/// A raw character cut, not token-aware; accepted imprecision that keeps
/// cost and latency bounded.
pub const MAX_INPUT_CHARS: usize = 30_000;

/// Marker appended when the input was cut at [`MAX_INPUT_CHARS`]
pub const TRUNCATION_MARKER: &str = "\n\n[Input truncated...]";

/// How much of the full text a mock summary echoes back
pub const MOCK_PREVIEW_CHARS: usize = 500;

/// Summary verbosity/style selector.
///
/// Unrecognized mode strings are not rejected; they fall back to
/// [`SummaryMode::Medium`]. That fallback is policy, not an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl SummaryMode {
    /// Parse a mode string, falling back to `Medium` for anything
    /// unrecognized
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "short" => SummaryMode::Short,
            "detailed" => SummaryMode::Detailed,
            _ => SummaryMode::Medium,
        }
    }

    /// Fixed system instruction for this mode
    pub fn instruction(&self) -> &'static str {
        match self {
            SummaryMode::Short => {
                "Summarize the following text in a concise TL;DR paragraph."
            }
            SummaryMode::Medium => {
                "Create detailed study notes from the following text. \
                 Use bullet points and highlight key concepts."
            }
            SummaryMode::Detailed => {
                "Provide a comprehensive summary of the text, maintaining \
                 the original structure and key sections."
            }
        }
    }
}

impl std::fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryMode::Short => write!(f, "short"),
            SummaryMode::Medium => write!(f, "medium"),
            SummaryMode::Detailed => write!(f, "detailed"),
        }
    }
}

/// How a summary was produced
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// Real answer from the completion service
    Generated,
    /// No credential configured; labeled placeholder, no network call
    Mock,
    /// The completion call failed; the text describes the failure
    Degraded,
}

/// Summarization result: always text, never an error
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Summary {
    pub text: String,
    pub kind: SummaryKind,
    pub mode: SummaryMode,
}

/// Summarize a text bundle in the given mode.
///
/// Infallible by design: failures of the external call are absorbed into a
/// `Degraded` summary so the surrounding request can still answer.
pub async fn summarize(
    client: &CompletionClient,
    bundle: &TextBundle,
    mode: SummaryMode,
) -> Summary {
    if !client.has_credentials() {
        info!("No completion credential configured, returning mock summary");
        return Summary {
            text: mock_summary(bundle, mode),
            kind: SummaryKind::Mock,
            mode,
        };
    }

    let input = bounded_input(&bundle.full_text);

    match client
        .complete(mode.instruction(), &format!("Text:\n{input}"))
        .await
    {
        Ok(text) => Summary {
            text,
            kind: SummaryKind::Generated,
            mode,
        },
        Err(e) => {
            warn!("Completion call failed, degrading to text answer: {e}");
            Summary {
                text: format!("Error generating summary: {e}"),
                kind: SummaryKind::Degraded,
                mode,
            }
        }
    }
}

/// Bound `text` to [`MAX_INPUT_CHARS`] characters, appending the
/// truncation marker when a cut happened. Text at or under the budget is
/// returned unchanged.
pub fn bounded_input(text: &str) -> String {
    let mut iter = text.char_indices();
    match iter.nth(MAX_INPUT_CHARS) {
        None => text.to_string(),
        Some((byte_idx, _)) => {
            let mut cut = text[..byte_idx].to_string();
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
    }
}

fn mock_summary(bundle: &TextBundle, mode: SummaryMode) -> String {
    let preview: String = bundle.full_text.chars().take(MOCK_PREVIEW_CHARS).collect();
    format!(
        "[MOCK SUMMARY] No completion-service API key configured.\n\n\
         Mode: {mode}\nContent first {MOCK_PREVIEW_CHARS} chars: {preview}..."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletionConfig;
    use httpmock::prelude::*;

    fn bundle_with(text: &str) -> TextBundle {
        TextBundle {
            full_text: text.to_string(),
            ..Default::default()
        }
    }

    fn mockless_client() -> CompletionClient {
        CompletionClient::new(&CompletionConfig {
            // An unroutable address; mock mode must never dial it.
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: None,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_mode_parsing_with_fallback() {
        assert_eq!(SummaryMode::parse("short"), SummaryMode::Short);
        assert_eq!(SummaryMode::parse("Detailed"), SummaryMode::Detailed);
        assert_eq!(SummaryMode::parse("medium"), SummaryMode::Medium);
        // Unrecognized modes silently fall back
        assert_eq!(SummaryMode::parse("verbose"), SummaryMode::Medium);
        assert_eq!(SummaryMode::parse(""), SummaryMode::Medium);
    }

    #[test]
    fn test_mode_instructions_are_distinct() {
        let short = SummaryMode::Short.instruction();
        let medium = SummaryMode::Medium.instruction();
        let detailed = SummaryMode::Detailed.instruction();
        assert_ne!(short, medium);
        assert_ne!(medium, detailed);
        assert_ne!(short, detailed);
        // Fallback uses the medium instruction
        assert_eq!(SummaryMode::parse("unknown").instruction(), medium);
    }

    #[test]
    fn test_bounded_input_under_budget_unchanged() {
        let text = "x".repeat(MAX_INPUT_CHARS);
        assert_eq!(bounded_input(&text), text);
        assert_eq!(bounded_input("short text"), "short text");
    }

    #[test]
    fn test_bounded_input_cuts_and_marks() {
        let text = "x".repeat(MAX_INPUT_CHARS + 1000);
        let bounded = bounded_input(&text);
        assert_eq!(
            bounded,
            format!("{}{}", "x".repeat(MAX_INPUT_CHARS), TRUNCATION_MARKER)
        );
    }

    #[test]
    fn test_bounded_input_counts_chars_not_bytes() {
        // Multi-byte characters must not panic the cut
        let text = "é".repeat(MAX_INPUT_CHARS + 10);
        let bounded = bounded_input(&text);
        assert!(bounded.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            bounded.chars().count(),
            MAX_INPUT_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[tokio::test]
    async fn test_mock_mode_is_deterministic() {
        let client = mockless_client();
        let bundle = bundle_with("Hello World content for the mock.");

        let summary = summarize(&client, &bundle, SummaryMode::Short).await;

        assert_eq!(summary.kind, SummaryKind::Mock);
        assert!(summary.text.contains("short"));
        assert!(summary.text.contains("Hello World content for the mock."));

        let again = summarize(&client, &bundle, SummaryMode::Short).await;
        assert_eq!(summary.text, again.text);
    }

    #[tokio::test]
    async fn test_mock_preview_uses_pretruncation_text() {
        let client = mockless_client();
        let long = "y".repeat(MAX_INPUT_CHARS + 100);
        let bundle = bundle_with(&long);

        let summary = summarize(&client, &bundle, SummaryMode::Medium).await;

        assert!(summary.text.contains(&"y".repeat(MOCK_PREVIEW_CHARS)));
        assert!(!summary.text.contains(TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_generated_summary_passes_through() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "The gist."}}
                ]
            }));
        });

        let client = CompletionClient::new(&CompletionConfig {
            base_url: server.base_url(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();

        let summary =
            summarize(&client, &bundle_with("Some document text."), SummaryMode::Detailed)
                .await;

        assert_eq!(summary.kind, SummaryKind::Generated);
        assert_eq!(summary.text, "The gist.");
    }

    #[tokio::test]
    async fn test_failure_degrades_to_text_answer() {
        // Credentialed client pointed at a dead endpoint
        let client = CompletionClient::new(&CompletionConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: Some("sk-test".to_string()),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        let summary =
            summarize(&client, &bundle_with("Some text."), SummaryMode::Short).await;

        assert_eq!(summary.kind, SummaryKind::Degraded);
        assert!(summary.text.starts_with("Error generating summary:"));
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_text_answer() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .delay(std::time::Duration::from_millis(2500))
                .json_body(serde_json::json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "too late"}}
                    ]
                }));
        });

        let client = CompletionClient::new(&CompletionConfig {
            base_url: server.base_url(),
            api_key: Some("sk-test".to_string()),
            timeout_secs: 1,
            ..Default::default()
        })
        .unwrap();

        let summary =
            summarize(&client, &bundle_with("Some text."), SummaryMode::Medium).await;

        assert_eq!(summary.kind, SummaryKind::Degraded);
        assert!(summary.text.starts_with("Error generating summary:"));
        assert!(summary.text.contains("timed out after 1 seconds"));
    }

    #[tokio::test]
    async fn test_truncated_input_is_what_gets_submitted() {
        let server = MockServer::start();
        let long = "z".repeat(MAX_INPUT_CHARS + 50);
        let expected_input = format!("Text:\n{}", bounded_input(&long));

        let mock = server.mock(move |when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains(TRUNCATION_MARKER.trim());
            then.status(200).json_body(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "ok"}}
                ]
            }));
        });

        let client = CompletionClient::new(&CompletionConfig {
            base_url: server.base_url(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();

        let summary = summarize(&client, &bundle_with(&long), SummaryMode::Medium).await;

        mock.assert();
        assert_eq!(summary.kind, SummaryKind::Generated);
        assert!(expected_input.ends_with(TRUNCATION_MARKER));
    }
}
