//! Subcommand implementations

pub mod listen;
pub mod receive;
pub mod roundtrip;
pub mod transmit;
