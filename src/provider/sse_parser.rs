//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.
//!
//! The upstream wraps each text delta in a `data: {json}` event. This module
//! unwraps them so the proxy can forward plain, unframed text.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use crate::assistant::Utf8StreamDecoder;
use crate::error::{AssistError, Result};

const DONE_MARKER: &str = "[DONE]";

/// Response structure for streaming chat completions.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// A single parsed SSE line.
#[derive(Debug, PartialEq, Eq)]
enum SseLine {
    Content(String),
    Done,
    Skip,
}

/// Converts a raw SSE byte stream into a stream of text deltas.
///
/// Bytes go through the incremental UTF-8 decoder before line splitting, so
/// a multi-byte character split between network chunks is not mangled. The
/// stream ends at `data: [DONE]`, at end of input, or after the first
/// transport error.
pub fn sse_to_text_stream<S, E>(byte_stream: S) -> impl Stream<Item = Result<String>> + Send
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send,
{
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut decoder = Utf8StreamDecoder::new();
        let mut buffer = String::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(AssistError::Stream(e.to_string()));
                    return;
                }
            };

            buffer.push_str(&decoder.decode(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line: String = buffer.drain(..=line_end).collect();

                match parse_sse_line(line.trim()) {
                    SseLine::Content(content) => yield Ok(content),
                    SseLine::Done => return,
                    SseLine::Skip => {}
                }
            }
        }

        // Some servers close the connection without a trailing newline.
        buffer.push_str(&decoder.finish());
        if let SseLine::Content(content) = parse_sse_line(buffer.trim()) {
            yield Ok(content);
        }
    }
}

/// Parses a single trimmed SSE line.
///
/// Comments, blank lines, non-data fields, invalid JSON and empty deltas are
/// all skipped.
fn parse_sse_line(line: &str) -> SseLine {
    let Some(data) = line.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let data = data.trim_start();

    if data == DONE_MARKER {
        return SseLine::Done;
    }

    let Ok(response) = serde_json::from_str::<StreamResponse>(data) else {
        tracing::trace!(line, "skipping unparseable SSE data");
        return SseLine::Skip;
    };

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        SseLine::Skip
    } else {
        SseLine::Content(content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::{StreamExt, stream};

    fn content(s: &str) -> SseLine {
        SseLine::Content(s.to_string())
    }

    #[test]
    fn test_parse_sse_line_with_content() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hola"}}]}"#;
        assert_eq!(parse_sse_line(line), content("Hola"));
    }

    #[test]
    fn test_parse_sse_line_without_space_after_colon() {
        let line = r#"data:{"choices":[{"delta":{"content":"Hola"}}]}"#;
        assert_eq!(parse_sse_line(line), content("Hola"));
    }

    #[test]
    fn test_parse_sse_line_with_empty_or_null_content() {
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"content":""}}]}"#),
            SseLine::Skip
        );
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{}}]}"#),
            SseLine::Skip
        );
    }

    #[test]
    fn test_parse_sse_line_multiple_choices() {
        let line =
            r#"data: {"choices":[{"delta":{"content":"Buenos"}},{"delta":{"content":" días"}}]}"#;
        assert_eq!(parse_sse_line(line), content("Buenos días"));
    }

    #[test]
    fn test_parse_sse_line_done_marker() {
        assert_eq!(parse_sse_line("data: [DONE]"), SseLine::Done);
    }

    #[test]
    fn test_parse_sse_line_skips_non_data() {
        assert_eq!(parse_sse_line(""), SseLine::Skip);
        assert_eq!(parse_sse_line(": keep-alive"), SseLine::Skip);
        assert_eq!(parse_sse_line("event: message"), SseLine::Skip);
        assert_eq!(parse_sse_line("data: not json"), SseLine::Skip);
    }

    fn sse_body(
        chunks: Vec<&'static [u8]>,
    ) -> impl Stream<Item = std::result::Result<Bytes, String>> {
        stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from_static(c))))
    }

    async fn collect_text(chunks: Vec<&'static [u8]>) -> String {
        sse_to_text_stream(sse_body(chunks))
            .map(|r| r.unwrap())
            .collect::<Vec<_>>()
            .await
            .concat()
    }

    #[tokio::test]
    async fn test_stream_joins_events_split_across_chunks() {
        let text = collect_text(vec![
            &b"data: {\"choices\":[{\"delta\":{\"con"[..],
            &b"tent\":\"Bonj\"}}]}\n\n"[..],
            &b"data: {\"choices\":[{\"delta\":{\"content\":\"our\"}}]}\n"[..],
            &b"\ndata: [DONE]\n\n"[..],
        ])
        .await;
        assert_eq!(text, "Bonjour");
    }

    #[tokio::test]
    async fn test_stream_keeps_multibyte_characters_split_across_chunks() {
        // "é" is 0xC3 0xA9; the chunk boundary falls between the two bytes.
        let text = collect_text(vec![
            &b"data: {\"choices\":[{\"delta\":{\"content\":\"caf\xC3"[..],
            &b"\xA9\"}}]}\n\n"[..],
        ])
        .await;
        assert_eq!(text, "café");
    }

    #[tokio::test]
    async fn test_stream_stops_at_done_marker() {
        let text = collect_text(vec![
            &b"data: {\"choices\":[{\"delta\":{\"content\":\"fin\"}}]}\n\n"[..],
            &b"data: [DONE]\n\n"[..],
            &b"data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n\n"[..],
        ])
        .await;
        assert_eq!(text, "fin");
    }

    #[tokio::test]
    async fn test_stream_handles_missing_trailing_newline() {
        let text =
            collect_text(vec![&b"data: {\"choices\":[{\"delta\":{\"content\":\"end\"}}]}"[..]])
                .await;
        assert_eq!(text, "end");
    }

    #[tokio::test]
    async fn test_stream_error_ends_the_stream() {
        let body = stream::iter(vec![
            Ok(Bytes::from_static(
                b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n",
            )),
            Err("socket closed".to_string()),
        ]);

        let items: Vec<_> = sse_to_text_stream(body).collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), "a");
        assert!(matches!(items[1], Err(AssistError::Stream(_))));
    }
}
