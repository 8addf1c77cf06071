//! # Linksim Core
//!
//! A simplified data-link stack simulator: text is turned into a
//! bitstream, line-coded, framed, protected with error-control
//! redundancy and modulated onto a sampled signal; the receive side
//! reverses every step to recover the text or flag corruption.
//!
//! ## Modules
//!
//! - `constants`: Wire format constants and limits
//! - `types`: Scheme selectors, configuration and frame bodies
//! - `bits`: Text ↔ bit-array conversion helpers
//! - `linecode`: NRZ / Manchester / Bipolar line coding
//! - `framing`: Character-count, byte-stuffing and bit-stuffing framing
//! - `fec`: Even parity, CRC-32 and Hamming error control
//! - `modulation`: ASK / FSK / 8-QAM signal synthesis
//! - `pipeline`: Transmit and receive orchestration
//! - `channel`: Transport collaborator contract

#![warn(missing_docs)]

pub mod bits;
pub mod channel;
pub mod constants;
pub mod error;
pub mod fec;
pub mod framing;
pub mod linecode;
pub mod modulation;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use error::LinkError;
pub use pipeline::{receive, transmit, FrameVerdict, RxReport, TxReport};
pub use types::{ErrorControl, FramingScheme, LineCode, LinkConfig, ModScheme};

/// Result type alias for linksim operations
pub type Result<T> = core::result::Result<T, LinkError>;
