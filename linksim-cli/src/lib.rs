//! Library entry for linksim-cli used by integration tests and embedding.

pub mod commands;
pub mod transport;

use linksim_core::{ErrorControl, FramingScheme, LineCode, LinkConfig, ModScheme};

/// Line-coding scheme flag
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum LineArg {
    /// Polar NRZ levels
    Nrz,
    /// Manchester transitions
    Manchester,
    /// Bipolar AMI
    Bipolar,
}

/// Framing scheme flag
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum FramingArg {
    /// Length-prefixed frames
    CharacterCount,
    /// Flag-delimited frames at byte granularity
    ByteInsertion,
    /// Flag-delimited frames at bit granularity
    BitsInsertion,
}

/// Error-control scheme flag
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum ErrorArg {
    /// Even parity bit per frame
    EvenParity,
    /// CRC-32 per frame
    Crc,
    /// Hamming single-error correction per frame
    Hamming,
}

/// Modulation scheme flag
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum ModArg {
    /// Amplitude shift keying
    Ask,
    /// Frequency shift keying
    Fsk,
    /// 8-QAM baseband
    #[value(name = "8qam")]
    Qam8,
}

impl From<LineArg> for LineCode {
    fn from(arg: LineArg) -> Self {
        match arg {
            LineArg::Nrz => LineCode::Nrz,
            LineArg::Manchester => LineCode::Manchester,
            LineArg::Bipolar => LineCode::Bipolar,
        }
    }
}

impl From<FramingArg> for FramingScheme {
    fn from(arg: FramingArg) -> Self {
        match arg {
            FramingArg::CharacterCount => FramingScheme::CharacterCount,
            FramingArg::ByteInsertion => FramingScheme::ByteInsertion,
            FramingArg::BitsInsertion => FramingScheme::BitsInsertion,
        }
    }
}

impl From<ErrorArg> for ErrorControl {
    fn from(arg: ErrorArg) -> Self {
        match arg {
            ErrorArg::EvenParity => ErrorControl::EvenParity,
            ErrorArg::Crc => ErrorControl::Crc,
            ErrorArg::Hamming => ErrorControl::Hamming,
        }
    }
}

impl From<ModArg> for ModScheme {
    fn from(arg: ModArg) -> Self {
        match arg {
            ModArg::Ask => ModScheme::Ask,
            ModArg::Fsk => ModScheme::Fsk,
            ModArg::Qam8 => ModScheme::Qam8,
        }
    }
}

/// Scheme selection flags shared by every subcommand
///
/// Both ends of a link must run with identical selections; a mismatch is
/// not detectable on the wire.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct SchemeArgs {
    /// Line-coding scheme
    #[arg(long, value_enum, default_value = "nrz")]
    pub line: LineArg,

    /// Framing scheme
    #[arg(long, value_enum, default_value = "character-count")]
    pub framing: FramingArg,

    /// Error-control scheme
    #[arg(long, value_enum, default_value = "even-parity")]
    pub error: ErrorArg,

    /// Modulation scheme
    #[arg(long, value_enum, default_value = "ask")]
    pub modulation: ModArg,
}

impl SchemeArgs {
    /// Bundle the flags into a core pipeline configuration
    pub fn to_config(self) -> LinkConfig {
        LinkConfig::new(
            self.line.into(),
            self.framing.into(),
            self.error.into(),
            self.modulation.into(),
        )
    }
}
