//! Error types for linksim operations

/// Errors that can occur while encoding or decoding a link-layer stream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// Manchester decoding was handed an odd number of symbols
    #[error("Manchester symbol stream has odd length {0}")]
    OddSymbolCount(usize),

    /// A character other than '0' or '1' appeared in a wire bit-string
    #[error("invalid character {0:?} in wire bit string")]
    BadWireChar(char),

    /// Byte-granular processing was handed a stream that is not a whole
    /// number of octets
    #[error("bit stream of {0} bits is not byte aligned")]
    NotByteAligned(usize),

    /// A frame header declared a length the remaining stream cannot satisfy
    #[error("frame header declares {declared} bytes, only {remaining} remain")]
    TruncatedFrame {
        /// Bytes the header claims the frame spans.
        declared: usize,
        /// Bytes actually left in the stream.
        remaining: usize,
    },

    /// A character-count header declared a length smaller than the header
    /// itself, or a frame grew past what the length byte can express
    #[error("frame header declares impossible length {0}")]
    BadFrameLength(usize),

    /// A frame is too short for a mandatory field
    #[error("frame of {len} bits is too short for a {needed}-bit field")]
    ShortFrame {
        /// Bits present in the frame.
        len: usize,
        /// Bits the field requires.
        needed: usize,
    },

    /// Constellation lookup guard; unreachable with binary input
    #[error("no 8-QAM constellation point for tuple index {0}")]
    BadConstellationPoint(usize),

    /// Transport failure reported by a channel implementation
    #[error("channel error: {0}")]
    Channel(String),
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        LinkError::Channel(err.to_string())
    }
}
