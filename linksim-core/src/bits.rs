//! Bit-array helpers: text conversion, byte packing and wire-string rendering
//!
//! Bit sequences are `Vec<u8>` holding 0/1 values, most significant bit
//! first within each octet.

use crate::error::LinkError;
use crate::Result;
use tracing::warn;

/// Convert text into its UTF-8 bit sequence, eight bits per code unit
pub fn text_to_bits(text: &str) -> Vec<u8> {
    let mut bits = Vec::with_capacity(text.len() * 8);
    for byte in text.as_bytes() {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Reassemble text from a bit sequence
///
/// Payloads that arrived garbled decode lossily; the caller still gets the
/// per-frame detection flags alongside. An incomplete trailing byte group
/// is dropped.
pub fn bits_to_text(bits: &[u8]) -> String {
    let whole = bits.len() / 8 * 8;
    if whole != bits.len() {
        warn!(
            "dropping {} trailing bits short of a full byte",
            bits.len() - whole
        );
    }
    let bytes: Vec<u8> = bits[..whole].chunks_exact(8).map(byte_value).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Value of up to eight bits read most significant first
pub fn byte_value(bits: &[u8]) -> u8 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | b)
}

/// Expand one byte into its bits, most significant first
pub fn byte_to_bits(byte: u8) -> [u8; 8] {
    let mut bits = [0u8; 8];
    for (i, slot) in bits.iter_mut().enumerate() {
        *slot = (byte >> (7 - i)) & 1;
    }
    bits
}

/// Pack a byte-aligned bit sequence into bytes
pub fn to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(LinkError::NotByteAligned(bits.len()));
    }
    Ok(bits.chunks_exact(8).map(byte_value).collect())
}

/// Render a bit sequence as the '0'/'1' string shipped over the channel
pub fn to_wire_string(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 1 { '1' } else { '0' }).collect()
}

/// Parse a wire string back into a bit sequence
pub fn from_wire_string(wire: &str) -> Result<Vec<u8>> {
    wire.chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(LinkError::BadWireChar(other)),
        })
        .collect()
}
