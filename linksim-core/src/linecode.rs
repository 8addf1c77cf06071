//! Line coding: logical bits to symbol levels and back
//!
//! Symbols are `i8` levels: NRZ uses {-1, 1}, Bipolar {-1, 0, 1} and
//! Manchester emits a bit pair per source bit.

use crate::error::LinkError;
use crate::types::LineCode;
use crate::Result;

/// Encode logical bits into line symbols
pub fn encode(bits: &[u8], scheme: LineCode) -> Vec<i8> {
    match scheme {
        LineCode::Nrz => bits
            .iter()
            .map(|&b| if b == 1 { 1 } else { -1 })
            .collect(),
        LineCode::Manchester => {
            let mut symbols = Vec::with_capacity(bits.len() * 2);
            for &bit in bits {
                if bit == 0 {
                    symbols.extend([0, 1]);
                } else {
                    symbols.extend([1, 0]);
                }
            }
            symbols
        }
        LineCode::Bipolar => {
            // marks alternate polarity starting with +1
            let mut level = 1i8;
            bits.iter()
                .map(|&b| {
                    if b == 1 {
                        let symbol = level;
                        level = -level;
                        symbol
                    } else {
                        0
                    }
                })
                .collect()
        }
    }
}

/// Decode line symbols back into logical bits
///
/// Bipolar decoding does not police the alternation: any nonzero level is
/// a 1. Manchester requires an even number of symbols.
pub fn decode(symbols: &[i8], scheme: LineCode) -> Result<Vec<u8>> {
    match scheme {
        LineCode::Nrz => Ok(symbols.iter().map(|&s| u8::from(s == 1)).collect()),
        LineCode::Manchester => {
            if symbols.len() % 2 != 0 {
                return Err(LinkError::OddSymbolCount(symbols.len()));
            }
            Ok(symbols
                .chunks_exact(2)
                .map(|pair| u8::from(pair != [0, 1]))
                .collect())
        }
        LineCode::Bipolar => Ok(symbols.iter().map(|&s| u8::from(s != 0)).collect()),
    }
}

/// Map symbols to the bit representation actually placed on the wire
pub fn wire_bits(symbols: &[i8], scheme: LineCode) -> Vec<u8> {
    match scheme {
        LineCode::Nrz => symbols.iter().map(|&s| u8::from(s == 1)).collect(),
        LineCode::Bipolar => symbols.iter().map(|&s| u8::from(s != 0)).collect(),
        LineCode::Manchester => symbols.iter().map(|&s| s as u8).collect(),
    }
}

/// Recover logical bits from the wire representation on the receive side
///
/// NRZ and Bipolar wire bits already equal the source bits; Manchester
/// arrives as bit pairs and is folded back down.
pub fn decode_wire(bits: &[u8], scheme: LineCode) -> Result<Vec<u8>> {
    match scheme {
        LineCode::Nrz | LineCode::Bipolar => Ok(bits.to_vec()),
        LineCode::Manchester => {
            if bits.len() % 2 != 0 {
                return Err(LinkError::OddSymbolCount(bits.len()));
            }
            Ok(bits
                .chunks_exact(2)
                .map(|pair| u8::from(pair != [0, 1]))
                .collect())
        }
    }
}
