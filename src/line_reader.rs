use async_trait::async_trait;
use std::io::Error as IoError;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::warn;

/// Source of newline-delimited protocol messages.
#[async_trait]
pub trait LineReader {
    /// Read a single line and return it without its terminator. Returns
    /// `None` once the stream has ended. Invalid UTF-8 is replaced rather
    /// than reported, so one bad line never ends the stream.
    async fn read_line(&mut self) -> Result<Option<String>, IoError>;
}

pub struct StreamLineReader<R> {
    reader: BufReader<R>,
}

impl<R: AsyncRead + Unpin + Send> StreamLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> LineReader for StreamLineReader<R> {
    async fn read_line(&mut self) -> Result<Option<String>, IoError> {
        let mut buffer = Vec::with_capacity(128);
        if self.reader.read_until(b'\n', &mut buffer).await? == 0 {
            return Ok(None);
        }
        while matches!(buffer.last(), Some(b'\n' | b'\r')) {
            buffer.pop();
        }
        let line = match String::from_utf8(buffer) {
            Ok(line) => line,
            Err(error) => {
                warn!("Replacing invalid UTF-8 in a received line.");
                String::from_utf8_lossy(error.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }
}
