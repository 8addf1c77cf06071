//! Frame delimiting: character count, byte stuffing and bit stuffing
//!
//! Neither stuffing discipline escapes flag-valued payload content: a
//! payload byte (or bit run) equal to `01111110` is indistinguishable
//! from a real delimiter. This matches the wire format linksim speaks
//! and is a known protocol limitation; character-count framing is the
//! transparent choice.

use crate::bits::{byte_to_bits, byte_value, to_bytes};
use crate::constants::{
    BIT_STUFF_CHUNK_BITS, BYTE_STUFF_CHUNK_BYTES, COUNT_CHUNK_BYTES, FLAG_BYTE, FLAG_OCTET,
    MAX_COUNT_DATA_BYTES,
};
use crate::error::LinkError;
use crate::types::{ErrorControl, FrameBody, FramingScheme};
use crate::Result;
use tracing::warn;

/// Split a wire-bit stream into per-frame data chunks
///
/// Character count and byte insertion chunk at byte granularity and
/// require a byte-aligned stream; bit insertion takes 64-bit slices.
pub fn split(bits: &[u8], scheme: FramingScheme) -> Result<Vec<Vec<u8>>> {
    match scheme {
        FramingScheme::CharacterCount => chunk_bytes(bits, COUNT_CHUNK_BYTES),
        FramingScheme::ByteInsertion => chunk_bytes(bits, BYTE_STUFF_CHUNK_BYTES),
        FramingScheme::BitsInsertion => Ok(bits
            .chunks(BIT_STUFF_CHUNK_BITS)
            .map(<[u8]>::to_vec)
            .collect()),
    }
}

fn chunk_bytes(bits: &[u8], max_bytes: usize) -> Result<Vec<Vec<u8>>> {
    if bits.len() % 8 != 0 {
        return Err(LinkError::NotByteAligned(bits.len()));
    }
    Ok(bits.chunks(max_bytes * 8).map(<[u8]>::to_vec).collect())
}

/// Pad a frame body with trailing zeros up to the next octet boundary,
/// recording the filler in the body's padding count
///
/// Bodies that already carry a CRC filler count arrive byte aligned, so
/// the recorded value is never overwritten.
pub fn align_to_bytes(mut body: FrameBody) -> FrameBody {
    let rem = body.bits.len() % 8;
    if rem != 0 {
        let pad = 8 - rem;
        body.bits.resize(body.bits.len() + pad, 0);
        body.padding = pad as u8;
    }
    body
}

/// Assemble protected frame bodies into one delimited wire-bit stream
pub fn assemble(
    bodies: &[FrameBody],
    scheme: FramingScheme,
    error: ErrorControl,
) -> Result<Vec<u8>> {
    let mut wire = Vec::new();
    for body in bodies {
        match scheme {
            FramingScheme::CharacterCount => {
                let content = to_bytes(&body.bits)?;
                let total = content.len() + 2;
                if content.len() > MAX_COUNT_DATA_BYTES || total > u8::MAX as usize {
                    return Err(LinkError::BadFrameLength(total));
                }
                wire.extend(byte_to_bits(total as u8));
                wire.extend(byte_to_bits(body.padding));
                wire.extend_from_slice(&body.bits);
            }
            FramingScheme::ByteInsertion => {
                // content must be byte aligned so the closing flag stays on
                // an octet boundary
                to_bytes(&body.bits)?;
                wire.extend(FLAG_OCTET);
                wire.extend(byte_to_bits(body.padding));
                wire.extend_from_slice(&body.bits);
                wire.extend(FLAG_OCTET);
            }
            FramingScheme::BitsInsertion => {
                wire.extend(FLAG_OCTET);
                if error.records_filler() {
                    wire.extend(byte_to_bits(body.padding));
                }
                wire.extend_from_slice(&body.bits);
                wire.extend(FLAG_OCTET);
            }
        }
    }
    Ok(wire)
}

/// Recover frame bodies and their declared padding counts from a wire stream
///
/// A malformed header aborts decoding of the remaining stream; trailing
/// content with no closing flag is discarded with a warning.
pub fn deframe(
    bits: &[u8],
    scheme: FramingScheme,
    error: ErrorControl,
) -> Result<Vec<FrameBody>> {
    match scheme {
        FramingScheme::CharacterCount => deframe_count(bits),
        FramingScheme::ByteInsertion => deframe_byte_stuffed(bits),
        FramingScheme::BitsInsertion => deframe_bit_stuffed(bits, error.records_filler()),
    }
}

fn deframe_count(bits: &[u8]) -> Result<Vec<FrameBody>> {
    let bytes = to_bytes(bits)?;
    let mut frames = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let declared = bytes[pos] as usize;
        if declared < 2 {
            return Err(LinkError::BadFrameLength(declared));
        }
        if pos + declared > bytes.len() {
            return Err(LinkError::TruncatedFrame {
                declared,
                remaining: bytes.len() - pos,
            });
        }
        let padding = bytes[pos + 1];
        let payload: Vec<u8> = bytes[pos + 2..pos + declared]
            .iter()
            .flat_map(|&b| byte_to_bits(b))
            .collect();
        frames.push(FrameBody::new(payload, padding));
        pos += declared;
    }
    Ok(frames)
}

fn deframe_byte_stuffed(bits: &[u8]) -> Result<Vec<FrameBody>> {
    let bytes = to_bytes(bits)?;
    let mut frames = Vec::new();
    let mut content: Vec<u8> = Vec::new();
    for &byte in &bytes {
        if byte == FLAG_BYTE {
            if !content.is_empty() {
                let padding = content[0];
                let payload: Vec<u8> = content[1..]
                    .iter()
                    .flat_map(|&b| byte_to_bits(b))
                    .collect();
                frames.push(FrameBody::new(payload, padding));
                content.clear();
            }
        } else {
            content.push(byte);
        }
    }
    if !content.is_empty() {
        warn!(
            "discarding unterminated byte-stuffed frame of {} bytes",
            content.len()
        );
    }
    Ok(frames)
}

fn deframe_bit_stuffed(bits: &[u8], filler_header: bool) -> Result<Vec<FrameBody>> {
    let mut frames = Vec::new();
    let mut content: Vec<u8> = Vec::new();
    // padding declared at the opening flag, owed to the frame that the
    // next flag will close
    let mut pending: Option<u8> = None;
    let mut pos = 0;
    while pos < bits.len() {
        if bits[pos..].starts_with(&FLAG_OCTET) {
            pos += FLAG_OCTET.len();
            if !content.is_empty() {
                frames.push(FrameBody::new(
                    std::mem::take(&mut content),
                    pending.take().unwrap_or(0),
                ));
            } else if pending.is_none() {
                let padding = if filler_header {
                    if pos + 8 > bits.len() {
                        return Err(LinkError::ShortFrame {
                            len: bits.len() - pos,
                            needed: 8,
                        });
                    }
                    let value = byte_value(&bits[pos..pos + 8]);
                    pos += 8;
                    value
                } else {
                    0
                };
                pending = Some(padding);
            }
        } else {
            content.push(bits[pos]);
            pos += 1;
        }
    }
    if !content.is_empty() {
        warn!(
            "discarding unterminated bit-stuffed frame of {} bits",
            content.len()
        );
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::text_to_bits;

    fn bodies() -> Vec<FrameBody> {
        vec![
            FrameBody::new(text_to_bits("Hi"), 0),
            FrameBody::new(text_to_bits("ok!"), 3),
        ]
    }

    #[test]
    fn split_respects_chunk_budgets() {
        let bits = text_to_bits("abcdefghij"); // 10 bytes
        let count = split(&bits, FramingScheme::CharacterCount).unwrap();
        assert_eq!(count.iter().map(Vec::len).collect::<Vec<_>>(), [56, 24]);

        let stuffed = split(&bits, FramingScheme::ByteInsertion).unwrap();
        assert_eq!(stuffed.iter().map(Vec::len).collect::<Vec<_>>(), [48, 32]);

        let raw = split(&bits, FramingScheme::BitsInsertion).unwrap();
        assert_eq!(raw.iter().map(Vec::len).collect::<Vec<_>>(), [64, 16]);
    }

    #[test]
    fn split_rejects_ragged_byte_streams() {
        assert_eq!(
            split(&[1, 0, 1], FramingScheme::CharacterCount),
            Err(LinkError::NotByteAligned(3))
        );
    }

    #[test]
    fn character_count_round_trip_reports_padding() {
        let wire = assemble(&bodies(), FramingScheme::CharacterCount, ErrorControl::EvenParity)
            .unwrap();
        let recovered =
            deframe(&wire, FramingScheme::CharacterCount, ErrorControl::EvenParity).unwrap();
        assert_eq!(recovered, bodies());
    }

    #[test]
    fn byte_stuffing_round_trip() {
        let wire =
            assemble(&bodies(), FramingScheme::ByteInsertion, ErrorControl::Hamming).unwrap();
        let recovered =
            deframe(&wire, FramingScheme::ByteInsertion, ErrorControl::Hamming).unwrap();
        assert_eq!(recovered, bodies());
    }

    #[test]
    fn bit_stuffing_round_trip_without_filler_header() {
        // padding is implicitly zero for parity and Hamming
        let raw = vec![FrameBody::unpadded(vec![1, 0, 1, 1, 0])];
        let wire =
            assemble(&raw, FramingScheme::BitsInsertion, ErrorControl::EvenParity).unwrap();
        assert_eq!(wire.len(), 8 + 5 + 8);
        let recovered =
            deframe(&wire, FramingScheme::BitsInsertion, ErrorControl::EvenParity).unwrap();
        assert_eq!(recovered, raw);
    }

    #[test]
    fn bit_stuffing_carries_filler_header_for_crc() {
        let raw = vec![FrameBody::new(vec![1, 0, 1, 1, 0, 0, 1, 0, 1], 4)];
        let wire = assemble(&raw, FramingScheme::BitsInsertion, ErrorControl::Crc).unwrap();
        assert_eq!(wire.len(), 8 + 8 + 9 + 8);
        let recovered = deframe(&wire, FramingScheme::BitsInsertion, ErrorControl::Crc).unwrap();
        assert_eq!(recovered, raw);
    }

    #[test]
    fn count_header_longer_than_stream_is_fatal() {
        let mut wire = byte_to_bits(9).to_vec(); // declares 9 bytes
        wire.extend(byte_to_bits(0));
        wire.extend(text_to_bits("ab")); // only 4 bytes present in total
        assert_eq!(
            deframe(&wire, FramingScheme::CharacterCount, ErrorControl::EvenParity),
            Err(LinkError::TruncatedFrame {
                declared: 9,
                remaining: 4
            })
        );
    }

    #[test]
    fn count_header_below_header_size_is_fatal() {
        let mut wire = byte_to_bits(1).to_vec();
        wire.extend(byte_to_bits(0));
        assert_eq!(
            deframe(&wire, FramingScheme::CharacterCount, ErrorControl::EvenParity),
            Err(LinkError::BadFrameLength(1))
        );
    }

    #[test]
    fn unterminated_stuffed_content_is_discarded() {
        let mut wire = FLAG_OCTET.to_vec();
        wire.extend([1, 0, 1]); // no closing flag
        let frames =
            deframe(&wire, FramingScheme::BitsInsertion, ErrorControl::EvenParity).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn alignment_padding_is_recorded() {
        let body = align_to_bytes(FrameBody::unpadded(vec![1; 57]));
        assert_eq!(body.bits.len(), 64);
        assert_eq!(body.padding, 7);

        let already = align_to_bytes(FrameBody::new(vec![0; 64], 8));
        assert_eq!(already.padding, 8);
    }
}
