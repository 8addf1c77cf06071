//! Fuzzing placeholder for the linksim-core receive path
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_receive

use linksim_core::{ErrorControl, FramingScheme, LineCode, LinkConfig, ModScheme};

const LINES: [LineCode; 3] = [LineCode::Nrz, LineCode::Manchester, LineCode::Bipolar];
const FRAMINGS: [FramingScheme; 3] = [
    FramingScheme::CharacterCount,
    FramingScheme::ByteInsertion,
    FramingScheme::BitsInsertion,
];
const ERRORS: [ErrorControl; 3] = [
    ErrorControl::EvenParity,
    ErrorControl::Crc,
    ErrorControl::Hamming,
];

/// Feed arbitrary bytes to every receive configuration - must never panic
pub fn fuzz_receive(data: &[u8]) {
    let wire: String = data
        .iter()
        .map(|&b| if b & 1 == 1 { '1' } else { '0' })
        .collect();

    for line in LINES {
        for framing in FRAMINGS {
            for error in ERRORS {
                let config = LinkConfig::new(line, framing, error, ModScheme::Ask);
                let _ = linksim_core::receive(&wire, &config);
            }
        }
    }
}

/// Deframe arbitrary bit streams directly - must never panic
pub fn fuzz_deframe(data: &[u8]) {
    let bits: Vec<u8> = data.iter().map(|&b| b & 1).collect();
    for framing in FRAMINGS {
        for error in ERRORS {
            let _ = linksim_core::framing::deframe(&bits, framing, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzz_receive_empty() {
        fuzz_receive(&[]);
    }

    #[test]
    fn fuzz_receive_random_bytes() {
        fuzz_receive(&[0x12, 0x34, 0x56, 0x78, 0xff, 0x7e]);
    }

    #[test]
    fn fuzz_deframe_flag_soup() {
        fuzz_deframe(&[1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn fuzz_deframe_empty() {
        fuzz_deframe(&[]);
    }
}
