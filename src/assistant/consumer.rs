//! Stream consumer: turns a chunked response body into text increments.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

use super::decoder::Utf8StreamDecoder;
use crate::error::Result;

/// Response body as delivered by the transport, one chunk per item.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// How a consumed stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// The source signalled completion.
    Completed { increments: usize },
    /// The cancellation token fired before completion.
    Cancelled { increments: usize },
}

impl ConsumeOutcome {
    pub const fn increments(self) -> usize {
        match self {
            Self::Completed { increments } | Self::Cancelled { increments } => increments,
        }
    }
}

/// Decodes a byte stream into a lazy sequence of non-empty text increments.
///
/// Chunks are pulled one at a time and handed on as soon as they decode.
/// Only the bytes of a character split across chunks are held back. The first
/// transport error is yielded and ends the sequence.
pub fn text_increments(byte_stream: ByteStream) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        let mut byte_stream = byte_stream;
        let mut decoder = Utf8StreamDecoder::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let text = decoder.decode(&chunk);
            if !text.is_empty() {
                yield Ok(text);
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            yield Ok(tail);
        }
    }
}

/// Reads `body` to the end, calling `on_text` with every decoded increment in order.
///
/// A missing body returns immediately without calling `on_text`. Cancellation
/// is checked while waiting for each chunk and ends the read without error.
pub async fn consume<F>(
    body: Option<ByteStream>,
    cancel: &CancellationToken,
    mut on_text: F,
) -> Result<ConsumeOutcome>
where
    F: FnMut(&str),
{
    let Some(body) = body else {
        tracing::debug!("response has no body");
        return Ok(ConsumeOutcome::Completed { increments: 0 });
    };

    let mut increments = std::pin::pin!(text_increments(body));
    let mut count = 0;

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(increments = count, "stream cancelled");
                return Ok(ConsumeOutcome::Cancelled { increments: count });
            }
            next = increments.next() => next,
        };

        match next {
            Some(Ok(text)) => {
                on_text(&text);
                count += 1;
            }
            Some(Err(e)) => return Err(e),
            None => {
                tracing::debug!(increments = count, "stream completed");
                return Ok(ConsumeOutcome::Completed { increments: count });
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AssistError;
    use futures_util::stream;

    fn body_from_chunks(chunks: Vec<Vec<u8>>) -> ByteStream {
        Box::pin(stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok::<_, AssistError>(Bytes::from(c))),
        ))
    }

    fn chunked(text: &str, size: usize) -> Vec<Vec<u8>> {
        text.as_bytes().chunks(size).map(<[u8]>::to_vec).collect()
    }

    async fn collect(body: Option<ByteStream>) -> (String, Vec<String>) {
        let mut result = String::new();
        let mut calls = Vec::new();
        consume(body, &CancellationToken::new(), |text| {
            result.push_str(text);
            calls.push(text.to_string());
        })
        .await
        .unwrap();
        (result, calls)
    }

    #[tokio::test]
    async fn test_consume_three_chunks_three_callbacks() {
        let body = body_from_chunks(vec![
            b"Bonj".to_vec(),
            b"our, ".to_vec(),
            b"le monde".to_vec(),
        ]);

        let (result, calls) = collect(Some(body)).await;

        assert_eq!(result, "Bonjour, le monde");
        assert_eq!(calls, vec!["Bonj", "our, ", "le monde"]);
    }

    #[tokio::test]
    async fn test_consume_missing_body_never_calls_back() {
        let (result, calls) = collect(None).await;
        assert!(result.is_empty());
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn test_consume_zero_length_final_chunk() {
        let body = body_from_chunks(vec![b"done".to_vec(), Vec::new()]);

        let outcome = consume(Some(body), &CancellationToken::new(), |_| {})
            .await
            .unwrap();

        assert_eq!(outcome, ConsumeOutcome::Completed { increments: 1 });
    }

    #[tokio::test]
    async fn test_chunk_boundaries_do_not_change_the_result() {
        let text = "Crème brûlée は美味しい 🍮 ~ ¡olé!";

        let (one_byte, _) = collect(Some(body_from_chunks(chunked(text, 1)))).await;
        let (three_bytes, _) = collect(Some(body_from_chunks(chunked(text, 3)))).await;
        let (large, _) = collect(Some(body_from_chunks(chunked(text, 64)))).await;

        assert_eq!(one_byte, text);
        assert_eq!(three_bytes, text);
        assert_eq!(large, text);
    }

    #[tokio::test]
    async fn test_split_character_is_delivered_once_complete() {
        let bytes = "añb".as_bytes();
        let body = body_from_chunks(vec![bytes[..2].to_vec(), bytes[2..].to_vec()]);

        let (result, calls) = collect(Some(body)).await;

        assert_eq!(result, "añb");
        assert_eq!(calls, vec!["a", "ñb"]);
    }

    #[tokio::test]
    async fn test_transport_error_stops_the_stream() {
        let body: ByteStream = Box::pin(stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(AssistError::Stream("connection reset".to_string())),
            Ok(Bytes::from_static(b"never seen")),
        ]));

        let mut seen = String::new();
        let result = consume(Some(body), &CancellationToken::new(), |t| seen.push_str(t)).await;

        assert!(matches!(result, Err(AssistError::Stream(_))));
        assert_eq!(seen, "partial");
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_before_reading() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let body = body_from_chunks(vec![b"ignored".to_vec()]);

        let mut calls = 0;
        let outcome = consume(Some(body), &cancel, |_| calls += 1).await.unwrap();

        assert_eq!(outcome, ConsumeOutcome::Cancelled { increments: 0 });
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_text_increments_is_lazy_and_ordered() {
        let body = body_from_chunks(vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        let increments: Vec<String> = text_increments(body)
            .map(|r| r.unwrap())
            .collect()
            .await;
        assert_eq!(increments, vec!["a", "b", "c"]);
    }
}
