//! Constants and limits for the linksim wire format

/// Flag octet delimiting byte- and bit-stuffed frames, as individual bits
pub const FLAG_OCTET: [u8; 8] = [0, 1, 1, 1, 1, 1, 1, 0];

/// Flag octet as a byte value
pub const FLAG_BYTE: u8 = 0b0111_1110;

/// IEEE 802 CRC-32 generator polynomial including its implicit leading 1 bit
pub const CRC32_GENERATOR: u64 = 0x1_04C1_1DB7;

/// Width of the CRC field in bits
pub const CRC32_WIDTH: usize = 32;

/// Minimum payload length fed to the CRC division; shorter payloads are
/// extended with an alternating 0/1 filler sequence first
pub const CRC_MIN_BLOCK_BITS: usize = 64;

/// Data bytes per character-count frame (8-byte frame budget including the count header)
pub const COUNT_CHUNK_BYTES: usize = 7;

/// Data bytes per byte-stuffed frame (8-byte frame budget including both flags)
pub const BYTE_STUFF_CHUNK_BYTES: usize = 6;

/// Data bits per bit-stuffed frame
pub const BIT_STUFF_CHUNK_BITS: usize = 64;

/// Ceiling on the data bytes a character-count frame may carry; the
/// one-byte length header must also cover the two header bytes themselves
pub const MAX_COUNT_DATA_BYTES: usize = 254;

/// Samples synthesized per bit (ASK/FSK) or per 3-bit baud (8-QAM)
pub const SAMPLES_PER_SYMBOL: usize = 100;

/// ASK/FSK carrier amplitude
pub const CARRIER_AMPLITUDE: f64 = 1.0;

/// ASK carrier frequency; also the FSK mark frequency (bit 1)
pub const CARRIER_FREQ: f64 = 1.0;

/// FSK space frequency (bit 0)
pub const FSK_SPACE_FREQ: f64 = 2.0;

/// 8-QAM modulation rate in bauds per unit of simulated time
pub const QAM_MODULATION_RATE: f64 = 8.0;

/// 8-QAM transmission rate used for the cumulative time axis
pub const QAM_TRANSMISSION_RATE: f64 = 24.0;

/// Bits per 8-QAM baud
pub const QAM_BITS_PER_BAUD: usize = 3;
