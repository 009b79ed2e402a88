//! Incremental SSE line decoding for chunked HTTP streams
//!
//! The secondary provider's streaming endpoint emits newline-delimited
//! records prefixed `data: `, terminated by a literal `[DONE]` sentinel.
//! Network chunks can split a record anywhere, so bytes are buffered until
//! a full line is available.

/// Buffers raw body bytes and yields complete lines
///
/// Bytes are kept raw until a newline arrives: a chunk boundary can fall
/// inside a multi-byte UTF-8 character, so decoding happens per complete
/// line, never per chunk.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a network chunk and drain any lines it completed
    ///
    /// Lines are returned trimmed, in arrival order. A partial trailing
    /// line stays buffered for the next chunk.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = String::from_utf8_lossy(&self.buffer[..newline]).trim().to_string();
            self.buffer.drain(..=newline);
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines
    }
}

/// The payload of an SSE data line, if it is one
pub fn data_payload(line: &str) -> Option<&str> {
    line.strip_prefix("data: ")
}

/// End-of-stream sentinel on the secondary provider's streams
pub const DONE_SENTINEL: &str = "[DONE]";
