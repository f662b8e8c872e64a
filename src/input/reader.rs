use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal, Read};

/// Upper bound for a topic read from stdin.
pub const MAX_TOPIC_SIZE: usize = 64 * 1024;

pub struct TopicReader;

impl TopicReader {
    /// Returns the topic argument, or reads it from stdin when absent.
    ///
    /// An interactive stdin with no argument yields an empty topic rather
    /// than blocking on the terminal.
    pub fn read(topic: Option<&str>) -> Result<String> {
        if let Some(topic) = topic {
            return Ok(topic.to_string());
        }

        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Ok(String::new());
        }

        Self::read_from(stdin.lock())
    }

    /// Reads a topic from any reader, enforcing [`MAX_TOPIC_SIZE`].
    pub fn read_from(mut reader: impl Read) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];

        loop {
            let bytes_read = reader
                .read(&mut chunk)
                .context("Failed to read topic from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_TOPIC_SIZE {
                bail!(
                    "Topic size ({} KiB) exceeds maximum allowed size ({} KiB).",
                    buffer.len() / 1024,
                    MAX_TOPIC_SIZE / 1024
                );
            }
        }

        let topic = String::from_utf8(buffer).context("Topic is not valid UTF-8")?;

        // Piped input almost always ends with a newline that is not part of the topic.
        Ok(topic
            .strip_suffix('\n')
            .map(|t| t.strip_suffix('\r').unwrap_or(t))
            .unwrap_or(&topic)
            .to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_prefers_argument() {
        let topic = TopicReader::read(Some("French cuisine")).unwrap();
        assert_eq!(topic, "French cuisine");
    }

    #[test]
    fn test_read_from_strips_single_trailing_newline() {
        let topic = TopicReader::read_from(Cursor::new("French cuisine\n")).unwrap();
        assert_eq!(topic, "French cuisine");

        let topic = TopicReader::read_from(Cursor::new("line one\nline two\r\n")).unwrap();
        assert_eq!(topic, "line one\nline two");
    }

    #[test]
    fn test_read_from_keeps_inner_whitespace() {
        let topic = TopicReader::read_from(Cursor::new("  subjuntivo  \n\n")).unwrap();
        assert_eq!(topic, "  subjuntivo  \n");
    }

    #[test]
    fn test_read_from_empty() {
        let topic = TopicReader::read_from(Cursor::new("")).unwrap();
        assert!(topic.is_empty());
    }

    #[test]
    fn test_read_from_unicode() {
        let topic = TopicReader::read_from(Cursor::new("敬語の使い方🌸")).unwrap();
        assert_eq!(topic, "敬語の使い方🌸");
    }

    #[test]
    fn test_read_from_at_max_size() {
        let content = "x".repeat(MAX_TOPIC_SIZE);
        let topic = TopicReader::read_from(Cursor::new(content)).unwrap();
        assert_eq!(topic.len(), MAX_TOPIC_SIZE);
    }

    #[test]
    fn test_read_from_exceeds_max_size() {
        let content = "x".repeat(MAX_TOPIC_SIZE + 1);
        let err = TopicReader::read_from(Cursor::new(content)).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_from_invalid_utf8() {
        let err = TopicReader::read_from(Cursor::new(vec![0x66, 0xFF, 0x6F])).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
