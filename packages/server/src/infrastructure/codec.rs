//! Chat line codec: frames a TCP byte stream into `\n`-terminated lines.
//!
//! Wraps [`LinesCodec`] so that an over-long line or a line that is not valid
//! UTF-8 surfaces as an item instead of a stream error. `FramedRead` ends the
//! stream after any decode error, which would make a bad line
//! indistinguishable from EOF.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

/// One decoded input frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    /// A complete line without its `\n` (and without a trailing `\r`).
    Line(String),
    /// A line longer than the configured maximum. Its bytes are discarded up
    /// to and including the next `\n`.
    TooLong,
    /// A complete line that is not valid UTF-8. Its bytes are discarded.
    InvalidUtf8,
}

/// A tokio codec that decodes bounded lines and encodes lines with `\n`.
#[derive(Debug, Clone)]
pub struct ChatLineCodec {
    inner: LinesCodec,
}

impl ChatLineCodec {
    pub fn new(max_line_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_line_length),
        }
    }

    fn map(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<InboundLine>, std::io::Error> {
        match result {
            Ok(line) => Ok(line.map(InboundLine::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(InboundLine::TooLong)),
            // LinesCodec has already consumed the offending line
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(InboundLine::InvalidUtf8))
            }
            Err(LinesCodecError::Io(e)) => Err(e),
        }
    }
}

impl Decoder for ChatLineCodec {
    type Item = InboundLine;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::map(self.inner.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::map(self.inner.decode_eof(src))
    }
}

impl<T: AsRef<str>> Encoder<T> for ChatLineCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.inner.encode(item, dst).map_err(|e| match e {
            LinesCodecError::Io(e) => e,
            LinesCodecError::MaxLineLengthExceeded => {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "line too long")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Decoder ──────────────────────────────────────────────────

    #[test]
    fn decode_complete_lines() {
        let mut codec = ChatLineCodec::new(64);
        let mut buf = BytesMut::from("NICK alice\nhello\r\n");

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Line("NICK alice".into()))
        );
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Line("hello".into()))
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn decode_partial_line_waits() {
        let mut codec = ChatLineCodec::new(64);
        let mut buf = BytesMut::from("hel");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"lo\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Line("hello".into()))
        );
    }

    #[test]
    fn decode_empty_line() {
        let mut codec = ChatLineCodec::new(64);
        let mut buf = BytesMut::from("\n");

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Line(String::new()))
        );
    }

    #[test]
    fn decode_invalid_utf8_then_recovers() {
        let mut codec = ChatLineCodec::new(64);
        let mut buf = BytesMut::from(&b"caf\xe9\nstill here\n"[..]);

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(InboundLine::InvalidUtf8));
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Line("still here".into()))
        );
    }

    #[test]
    fn decode_eof_invalid_utf8_tail() {
        let mut codec = ChatLineCodec::new(64);
        let mut buf = BytesMut::from(&b"\xff\xfe"[..]);

        assert_eq!(
            codec.decode_eof(&mut buf).unwrap(),
            Some(InboundLine::InvalidUtf8)
        );
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn decode_too_long_then_recovers() {
        let mut codec = ChatLineCodec::new(8);
        let mut buf = BytesMut::from("0123456789abcdef\nok\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(InboundLine::TooLong));
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Line("ok".into()))
        );
    }

    #[test]
    fn decode_too_long_across_reads() {
        let mut codec = ChatLineCodec::new(4);
        let mut buf = BytesMut::from("abcdefgh");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(InboundLine::TooLong));
        // Still discarding: more of the long line arrives, then a short one.
        buf.extend_from_slice(b"ijk\nhi\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Line("hi".into()))
        );
    }

    // ── Encoder ──────────────────────────────────────────────────

    #[test]
    fn encode_appends_newline() {
        let mut codec = ChatLineCodec::new(64);
        let mut buf = BytesMut::new();

        codec.encode("Welcome alice", &mut buf).unwrap();

        assert_eq!(&buf[..], b"Welcome alice\n");
    }
}
