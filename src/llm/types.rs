//! Shared adapter types

/// Streaming chunk for progressive conversation rendering
///
/// Chunks arrive strictly in provider emission order; the consumer appends
/// each delta to its growing reply. No reordering or deduplication is
/// needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// Incremental reply text
    TextDelta(String),

    /// Stream finished cleanly
    Done,

    /// Error during streaming (the adapter also returns Err)
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_delta_carries_text() {
        let chunk = StreamChunk::TextDelta("Hel".to_string());
        assert_eq!(chunk, StreamChunk::TextDelta("Hel".to_string()));
        assert_ne!(chunk, StreamChunk::Done);
    }
}
