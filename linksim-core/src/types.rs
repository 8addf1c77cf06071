//! Scheme selectors, pipeline configuration and frame-level types

use serde::{Deserialize, Serialize};

/// Line-coding scheme: how logical bits map to symbol levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCode {
    /// Polar NRZ: 1 maps to +1, 0 maps to -1
    Nrz,
    /// Manchester: each bit becomes a two-symbol transition
    Manchester,
    /// Bipolar AMI: 0 maps to 0, marks alternate polarity starting at +1
    Bipolar,
}

/// Frame delimiting scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingScheme {
    /// Length-prefixed frames: one byte of frame length, one of padding
    CharacterCount,
    /// Byte-granular frames delimited by the flag octet
    ByteInsertion,
    /// Bit-granular frames delimited by the flag octet
    BitsInsertion,
}

impl FramingScheme {
    /// Whether frame content must be padded to whole octets
    pub const fn byte_aligned(&self) -> bool {
        matches!(
            self,
            FramingScheme::CharacterCount | FramingScheme::ByteInsertion
        )
    }
}

/// Error-control scheme applied per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorControl {
    /// One appended bit making the total 1-count even (detection only)
    EvenParity,
    /// 32-bit cyclic redundancy check (detection only)
    Crc,
    /// Hamming single-error-correcting code
    Hamming,
}

impl ErrorControl {
    /// Whether the scheme records a filler count that bit-stuffed frames
    /// must carry as an explicit header
    pub const fn records_filler(&self) -> bool {
        matches!(self, ErrorControl::Crc)
    }
}

/// Modulation scheme for the rendered signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModScheme {
    /// Amplitude shift keying
    Ask,
    /// Frequency shift keying
    Fsk,
    /// 8-point quadrature amplitude modulation, baseband
    #[serde(rename = "8qam")]
    Qam8,
}

/// Scheme selection shared by both ends of the link
///
/// Both `transmit` and `receive` must be handed the same configuration;
/// a mismatch is a caller error and is not detected on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Line-coding scheme
    pub line: LineCode,
    /// Framing scheme
    pub framing: FramingScheme,
    /// Error-control scheme
    pub error: ErrorControl,
    /// Modulation scheme
    pub modulation: ModScheme,
}

impl LinkConfig {
    /// Bundle the four scheme selections
    pub const fn new(
        line: LineCode,
        framing: FramingScheme,
        error: ErrorControl,
        modulation: ModScheme,
    ) -> Self {
        Self {
            line,
            framing,
            error,
            modulation,
        }
    }
}

/// One frame's content bits plus its in-band padding count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameBody {
    /// Content bits as they sit between the frame delimiters
    pub bits: Vec<u8>,
    /// Trailing filler recorded in the frame header: byte-alignment
    /// padding for parity/Hamming, CRC block filler for CRC
    pub padding: u8,
}

impl FrameBody {
    /// Frame body with an explicit padding count
    pub fn new(bits: Vec<u8>, padding: u8) -> Self {
        Self { bits, padding }
    }

    /// Frame body with no recorded padding
    pub fn unpadded(bits: Vec<u8>) -> Self {
        Self { bits, padding: 0 }
    }
}

/// Outcome of checking one frame's redundancy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Cleaned payload bits, returned best-effort even when an error was flagged
    pub bits: Vec<u8>,
    /// True when parity or CRC flagged the frame, or Hamming could not correct
    pub error_detected: bool,
    /// Codeword position repaired by Hamming, if a correction happened
    pub corrected: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_names_follow_the_wire_vocabulary() {
        let json = serde_json::to_string(&LinkConfig::new(
            LineCode::Nrz,
            FramingScheme::BitsInsertion,
            ErrorControl::EvenParity,
            ModScheme::Qam8,
        ))
        .unwrap();

        assert!(json.contains("\"nrz\""));
        assert!(json.contains("\"bits_insertion\""));
        assert!(json.contains("\"even_parity\""));
        assert!(json.contains("\"8qam\""));
    }

    #[test]
    fn byte_alignment_by_scheme() {
        assert!(FramingScheme::CharacterCount.byte_aligned());
        assert!(FramingScheme::ByteInsertion.byte_aligned());
        assert!(!FramingScheme::BitsInsertion.byte_aligned());
    }
}
