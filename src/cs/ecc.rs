//! Error correction code implementations.
//!
//! This module provides a parameterized binary Hamming code built from explicit
//! generator and parity-check matrices over GF(2), together with the pieces needed to
//! exercise it:
//! - [`BinaryVector`], the validated bit vector used for messages, codewords and syndromes
//! - [`BitMatrix`], dense GF(2) matrices
//! - [`HammingCode`], encoding, syndrome decoding and single-bit correction
//! - [`channel`], random error injection
//! - [`framing`], string to bit packing and chunking
//!
//! # Examples
//!
//! ```rust
//! use hamming_gf2::cs::ecc::{BinaryVector, HammingCode, Mode};
//!
//! let code = HammingCode::from_mode_str(4, "detect").unwrap();
//! let codeword = code.encode(&"1011".parse::<BinaryVector>().unwrap()).unwrap();
//! assert_eq!(codeword.to_string(), "1011010");
//!
//! let received = codeword.flipped(6).unwrap();
//! assert!(code.check_correct(&received).is_err());
//! assert_eq!(code.mode(), Mode::Detect);
//! ```

use crate::cs::error::Error;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for binary block codes mapping k-bit messages to n-bit codewords
pub trait BlockCode {
    /// Message length k
    fn message_len(&self) -> usize;

    /// Codeword length n
    fn codeword_len(&self) -> usize;

    /// Encode a k-bit message
    fn encode(&self, message: &BinaryVector) -> Result<BinaryVector>;

    /// Project an n-bit codeword back to its message bits
    fn decode(&self, codeword: &BinaryVector) -> Result<BinaryVector>;

    /// Detect, and where possible correct, errors in an n-bit codeword
    fn check_correct(&self, codeword: &BinaryVector) -> Result<BinaryVector>;
}

pub mod binary;
pub mod channel;
pub mod framing;
pub mod gf2;
pub mod hamming;

pub use binary::BinaryVector;
pub use channel::ErrorInjector;
pub use gf2::BitMatrix;
pub use hamming::{
    create_hamming, create_hamming_7_4, minimal_parity_bits, CodeParameters, Corrector, Encoder,
    HammingCode, Mode,
};
