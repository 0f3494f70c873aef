//! Inbound line framing.

use tokio_util::{
    bytes::BytesMut,
    codec::{Decoder, LinesCodec, LinesCodecError},
};

/// `LinesCodec` that drops unreadable lines instead of failing the stream.
///
/// A line over the length limit, or one that is not UTF-8, is logged and
/// skipped; decoding resumes with the next line already in the buffer.
/// Only I/O failures of the socket reach the caller.
pub struct InboundLineCodec {
    inner: LinesCodec,
}

impl InboundLineCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn skip_unreadable(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Option<Result<Option<String>, LinesCodecError>> {
        match result {
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                tracing::warn!("Skipping inbound line over the length limit");
                None
            }
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!("Skipping inbound line that is not UTF-8");
                None
            }
            other => Some(other),
        }
    }
}

impl Decoder for InboundLineCodec {
    type Item = String;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, LinesCodecError> {
        // every skip consumes input, so this ends
        loop {
            if let Some(result) = Self::skip_unreadable(self.inner.decode(buf)) {
                return result;
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, LinesCodecError> {
        loop {
            if let Some(result) = Self::skip_unreadable(self.inner.decode_eof(buf)) {
                return result;
            }
        }
    }
}
