//! Incremental UTF-8 decoding for chunked response bodies.
//!
//! Transports split bodies wherever they like, so a multi-byte character can
//! arrive in two (or more) chunks. The decoder keeps the incomplete tail of a
//! chunk and prepends it to the next one instead of decoding each chunk on
//! its own.

use std::str;

const REPLACEMENT: char = '\u{FFFD}';

/// Stateful UTF-8 decoder. Invalid sequences become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    // Incomplete trailing sequence from the previous chunk (at most 3 bytes).
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        if chunk.is_empty() {
            return String::new();
        }

        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();

        loop {
            match str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    // `valid_up_to` guarantees this prefix is valid UTF-8.
                    out.push_str(str::from_utf8(valid).unwrap_or_default());

                    match e.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            rest = &after[len..];
                        }
                        None => {
                            // Truncated sequence at the end: wait for more bytes.
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Returns `true` if bytes of an unfinished character are buffered.
    pub const fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Flushes the decoder at end of stream.
    ///
    /// A dangling incomplete sequence is reported as a single U+FFFD.
    pub fn finish(self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            REPLACEMENT.to_string()
        }
    }
}
