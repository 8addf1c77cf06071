//! Modulators: ASK, FSK and 8-QAM baseband synthesis
//!
//! Modulation is transmit-only rendering support. The receive path works
//! from the wire bit-string delivered by the channel; no demodulator
//! exists here.

use crate::constants::{
    CARRIER_AMPLITUDE, CARRIER_FREQ, FSK_SPACE_FREQ, QAM_BITS_PER_BAUD, QAM_MODULATION_RATE,
    QAM_TRANSMISSION_RATE, SAMPLES_PER_SYMBOL,
};
use crate::error::LinkError;
use crate::types::ModScheme;
use crate::Result;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Sampled 8-QAM baseband waveform plus its rendering axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QamBaseband {
    /// Number of 3-bit bauds synthesized
    pub bauds: usize,
    /// Cumulative time axis, one entry per sample
    pub time: Vec<f64>,
    /// Complex baseband samples, 100 per baud
    pub samples: Vec<Complex64>,
}

/// A sampled signal handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    /// Real-valued carrier samples (ASK/FSK), 100 per bit
    Real(Vec<f64>),
    /// Complex 8-QAM baseband
    Qam(QamBaseband),
}

impl Signal {
    /// Total number of samples in the signal
    pub fn len(&self) -> usize {
        match self {
            Signal::Real(samples) => samples.len(),
            Signal::Qam(baseband) => baseband.samples.len(),
        }
    }

    /// True when no samples were produced
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Modulate a protected wire bit-stream into a sampled signal
pub fn modulate(bits: &[u8], scheme: ModScheme) -> Result<Signal> {
    match scheme {
        ModScheme::Ask => Ok(Signal::Real(ask(bits))),
        ModScheme::Fsk => Ok(Signal::Real(fsk(bits))),
        ModScheme::Qam8 => Ok(Signal::Qam(qam8(bits)?)),
    }
}

fn ask(bits: &[u8]) -> Vec<f64> {
    let mut signal = vec![0.0; bits.len() * SAMPLES_PER_SYMBOL];
    for (i, &bit) in bits.iter().enumerate() {
        if bit == 1 {
            for j in 0..SAMPLES_PER_SYMBOL {
                signal[i * SAMPLES_PER_SYMBOL + j] = CARRIER_AMPLITUDE
                    * (2.0 * PI * CARRIER_FREQ * j as f64 / SAMPLES_PER_SYMBOL as f64).sin();
            }
        }
    }
    signal
}

fn fsk(bits: &[u8]) -> Vec<f64> {
    let mut signal = vec![0.0; bits.len() * SAMPLES_PER_SYMBOL];
    for (i, &bit) in bits.iter().enumerate() {
        let freq = if bit == 1 { CARRIER_FREQ } else { FSK_SPACE_FREQ };
        for j in 0..SAMPLES_PER_SYMBOL {
            signal[i * SAMPLES_PER_SYMBOL + j] = CARRIER_AMPLITUDE
                * (2.0 * PI * freq * j as f64 / SAMPLES_PER_SYMBOL as f64).sin();
        }
    }
    signal
}

/// Map a 3-bit tuple onto the 8-QAM constellation
///
/// Real part in {-1, 1}, imaginary part in {-3, -1, 1, 3}. Non-binary
/// input cannot occur on the pipeline path; the guard protects direct
/// callers.
pub fn constellation_point(b0: u8, b1: u8, b2: u8) -> Result<Complex64> {
    let point = match (b0, b1, b2) {
        (0, 0, 0) => Complex64::new(-1.0, -1.0),
        (0, 0, 1) => Complex64::new(-1.0, 1.0),
        (0, 1, 0) => Complex64::new(1.0, -1.0),
        (0, 1, 1) => Complex64::new(1.0, 1.0),
        (1, 0, 0) => Complex64::new(-1.0, -3.0),
        (1, 0, 1) => Complex64::new(-1.0, 3.0),
        (1, 1, 0) => Complex64::new(1.0, -3.0),
        (1, 1, 1) => Complex64::new(1.0, 3.0),
        _ => {
            let index = ((b0 as usize) << 2) | ((b1 as usize) << 1) | b2 as usize;
            return Err(LinkError::BadConstellationPoint(index));
        }
    };
    Ok(point)
}

fn qam8(bits: &[u8]) -> Result<QamBaseband> {
    let mut padded = bits.to_vec();
    while padded.len() % QAM_BITS_PER_BAUD != 0 {
        padded.push(0);
    }

    let mut symbols = Vec::with_capacity(padded.len() / QAM_BITS_PER_BAUD);
    for tuple in padded.chunks_exact(QAM_BITS_PER_BAUD) {
        symbols.push(constellation_point(tuple[0], tuple[1], tuple[2])?);
    }

    let bauds = symbols.len();
    let symbol_period = 1.0 / QAM_MODULATION_RATE;
    let symbol_time = linspace(0.0, symbol_period, SAMPLES_PER_SYMBOL);

    let mut samples = vec![Complex64::new(0.0, 0.0); bauds * SAMPLES_PER_SYMBOL];
    for (i, symbol) in symbols.iter().enumerate() {
        for (j, &t) in symbol_time.iter().enumerate() {
            let carrier = Complex64::new(0.0, 2.0 * PI * QAM_MODULATION_RATE * t).exp();
            samples[i * SAMPLES_PER_SYMBOL + j] = *symbol * carrier;
        }
    }

    let baud_period = 1.0 / QAM_TRANSMISSION_RATE;
    let time = linspace(0.0, baud_period * bauds as f64, bauds * SAMPLES_PER_SYMBOL);

    Ok(QamBaseband {
        bauds,
        time,
        samples,
    })
}

/// Evenly spaced grid of `n` points from `start` to `stop` inclusive
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|k| start + step * k as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constellation_corners() {
        assert_eq!(
            constellation_point(1, 1, 1).unwrap(),
            Complex64::new(1.0, 3.0)
        );
        assert_eq!(
            constellation_point(0, 0, 0).unwrap(),
            Complex64::new(-1.0, -1.0)
        );
    }

    #[test]
    fn constellation_guards_non_binary_tuples() {
        assert_eq!(
            constellation_point(2, 0, 0),
            Err(LinkError::BadConstellationPoint(8))
        );
    }

    #[test]
    fn ask_silences_zero_bits() {
        let Signal::Real(samples) = modulate(&[1, 0], ModScheme::Ask).unwrap() else {
            panic!("ASK must produce a real signal");
        };
        assert_eq!(samples.len(), 200);
        assert!(samples[..100].iter().any(|&s| s != 0.0));
        assert!(samples[100..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn fsk_always_carries() {
        let Signal::Real(samples) = modulate(&[1, 0], ModScheme::Fsk).unwrap() else {
            panic!("FSK must produce a real signal");
        };
        assert!(samples[..100].iter().any(|&s| s != 0.0));
        assert!(samples[100..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn qam_pads_to_full_bauds() {
        let Signal::Qam(baseband) = modulate(&[1, 1, 1, 1], ModScheme::Qam8).unwrap() else {
            panic!("8-QAM must produce a complex signal");
        };
        // 4 bits round up to two bauds; the tail baud is (1, 0, 0)
        assert_eq!(baseband.bauds, 2);
        assert_eq!(baseband.samples.len(), 200);
        assert_eq!(baseband.time.len(), 200);
        assert_eq!(baseband.samples[0], Complex64::new(1.0, 3.0));
        assert_eq!(baseband.samples[100], Complex64::new(-1.0, -3.0));
    }

    #[test]
    fn linspace_matches_endpoint_semantics() {
        let grid = linspace(0.0, 1.0, 5);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
