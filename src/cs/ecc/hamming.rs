//! Hamming error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! A Hamming code can either correct any single-bit error or detect (without correcting) one- and
//! two-bit errors. The most common variant is the (7,4) code, which encodes 4 message bits into
//! 7 bits by adding 3 parity bits.
//!
//! This implementation builds a systematic code for an arbitrary message length `k`:
//! - `p` is the smallest parity-bit count with `2^p - p - 1 >= k`
//! - `P` (k×p) holds the first `k` vectors of length `p` with Hamming weight at least 2
//! - `G = [I_k | P]ᵀ` (n×k) copies the message into the first `k` codeword bits
//! - `H = [Pᵀ | I_p]` (p×n) maps a codeword to its syndrome
//!
//! Column `j` of `H` is the syndrome produced by an error at bit `j`, so decoding is a lookup
//! of the syndrome among the columns of `H`.
//!
//! In [`Mode::Correct`] a two-bit error is silently "corrected" to the wrong codeword: its
//! syndrome is indistinguishable from that of some single-bit error. [`Mode::Detect`] reports any
//! nonzero syndrome as [`Error::Uncorrectable`] instead of guessing.
//!
//! # Examples
//!
//! ```
//! use hamming_gf2::cs::ecc::{BinaryVector, HammingCode, Mode};
//!
//! let code = HammingCode::new(4, Mode::Correct).unwrap();
//! let message = BinaryVector::from_values(&[1, 0, 1, 1]).unwrap();
//!
//! let codeword = code.encode(&message).unwrap();
//! let received = codeword.flipped(2).unwrap();
//!
//! let corrected = code.check_correct(&received).unwrap();
//! assert_eq!(corrected, codeword);
//! assert_eq!(code.decode(&corrected).unwrap(), message);
//! ```
//!
//! # Applications
//!
//! - Computer memory (ECC RAM)
//! - Satellite communications
//! - Data storage systems

use crate::cs::ecc::binary::BinaryVector;
use crate::cs::ecc::channel::flip_random_bits;
use crate::cs::ecc::gf2::BitMatrix;
use crate::cs::ecc::{BlockCode, Result};
use crate::cs::error::Error;
use log::{debug, trace, warn};
use rand::Rng;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Smallest number of parity bits `p` such that `2^p - p - 1 >= message_bits`.
///
/// Every one of the `n = k + p` bit positions needs its own nonzero syndrome, and `p` of those
/// syndromes belong to the parity positions themselves.
pub fn minimal_parity_bits(message_bits: usize) -> usize {
    let k = message_bits as u128;
    let mut p: u32 = 0;
    while (1u128 << p) - u128::from(p) - 1 < k {
        p += 1;
    }
    p as usize
}

/// Whether a code repairs single-bit errors or only reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Flip the bit the syndrome points at
    #[default]
    Correct,
    /// Fail on any nonzero syndrome
    Detect,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "correct" => Ok(Mode::Correct),
            "detect" => Ok(Mode::Detect),
            _ => Err(Error::Configuration(format!(
                "mode must be either `correct` or `detect`, got `{}`",
                s
            ))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Correct => f.write_str("correct"),
            Mode::Detect => f.write_str("detect"),
        }
    }
}

/// Structural matrices of a Hamming code for one message length.
///
/// Built once and never mutated, so one instance can be shared by any number of
/// encoders and decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeParameters {
    /// Number of message bits (k)
    message_bits: usize,
    /// Number of parity bits (p)
    parity_bits: usize,
    /// Parity submatrix P, k×p
    parity_submatrix: BitMatrix,
    /// Generator matrix G, n×k
    generator: BitMatrix,
    /// Parity-check matrix H, p×n
    parity_check: BitMatrix,
}

impl CodeParameters {
    /// Builds `P`, `G` and `H` for `message_bits` message bits.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if `message_bits` is zero.
    pub fn new(message_bits: usize) -> Result<Self> {
        if message_bits == 0 {
            return Err(Error::Configuration(
                "message bits must be positive".to_string(),
            ));
        }

        let parity_bits = minimal_parity_bits(message_bits);
        let parity_submatrix = Self::generate_parity_submatrix(message_bits, parity_bits)?;

        let generator =
            BitMatrix::hstack(&BitMatrix::identity(message_bits), &parity_submatrix)?.transpose();
        let parity_check =
            BitMatrix::hstack(&parity_submatrix.transpose(), &BitMatrix::identity(parity_bits))?;

        debug!(
            "built Hamming({}, {}) code with {} parity bits",
            message_bits + parity_bits,
            message_bits,
            parity_bits
        );

        Ok(CodeParameters {
            message_bits,
            parity_bits,
            parity_submatrix,
            generator,
            parity_check,
        })
    }

    /// First `k` vectors of `p` bits (MSB first) with weight >= 2, in ascending numeric order.
    ///
    /// Weight-1 vectors are the columns of `H`'s identity block and cannot be reused for
    /// message positions.
    fn generate_parity_submatrix(message_bits: usize, parity_bits: usize) -> Result<BitMatrix> {
        let rows: Vec<Vec<u8>> = (1u128..(1u128 << parity_bits))
            .filter(|value| value.count_ones() > 1)
            .take(message_bits)
            .map(|value| {
                (0..parity_bits)
                    .rev()
                    .map(|shift| ((value >> shift) & 1) as u8)
                    .collect()
            })
            .collect();

        if rows.len() < message_bits {
            return Err(Error::Construction(format!(
                "only {} parity vectors of weight >= 2 exist for p = {}, need {}",
                rows.len(),
                parity_bits,
                message_bits
            )));
        }

        BitMatrix::from_rows(&rows)
    }

    /// Number of message bits (k)
    pub fn message_bits(&self) -> usize {
        self.message_bits
    }

    /// Number of parity bits (p)
    pub fn parity_bits(&self) -> usize {
        self.parity_bits
    }

    /// Codeword length (n = k + p)
    pub fn codeword_bits(&self) -> usize {
        self.message_bits + self.parity_bits
    }

    /// Ratio of message bits to codeword bits
    pub fn code_rate(&self) -> f64 {
        self.message_bits as f64 / self.codeword_bits() as f64
    }

    /// P, k×p
    pub fn parity_submatrix(&self) -> &BitMatrix {
        &self.parity_submatrix
    }

    /// G, n×k
    pub fn generator(&self) -> &BitMatrix {
        &self.generator
    }

    /// H, p×n
    pub fn parity_check(&self) -> &BitMatrix {
        &self.parity_check
    }

    /// Syndrome `H · codeword` of a length-n codeword
    pub fn syndrome(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        self.check_len(codeword, self.codeword_bits())?;
        let syndrome = self.parity_check.mul_vec(codeword)?;
        trace!("syndrome of {} is {}", codeword, syndrome);
        Ok(syndrome)
    }

    /// Bit position whose single-bit error produces `syndrome`.
    ///
    /// `None` for the zero syndrome, and for syndromes that match no column of `H`, which can
    /// happen for multi-bit errors when `k < 2^p - p - 1`.
    pub fn error_position(&self, syndrome: &BinaryVector) -> Option<usize> {
        if syndrome.is_zero() {
            return None;
        }
        self.parity_check.find_column(syndrome)
    }

    fn check_len(&self, v: &BinaryVector, expected: usize) -> Result<()> {
        if v.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: v.len(),
            });
        }
        Ok(())
    }
}

/// Maps messages to codewords with a borrowed [`CodeParameters`]
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    params: &'a CodeParameters,
}

impl<'a> Encoder<'a> {
    pub fn new(params: &'a CodeParameters) -> Self {
        Encoder { params }
    }

    /// `G · message`, a codeword of n bits whose first k bits are the message.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] unless `message` has exactly k bits.
    pub fn encode(&self, message: &BinaryVector) -> Result<BinaryVector> {
        self.params.check_len(message, self.params.message_bits())?;
        self.params.generator().mul_vec(message)
    }
}

/// Checks, corrects and decodes codewords with a borrowed [`CodeParameters`]
#[derive(Debug, Clone, Copy)]
pub struct Corrector<'a> {
    params: &'a CodeParameters,
    mode: Mode,
}

impl<'a> Corrector<'a> {
    pub fn new(params: &'a CodeParameters, mode: Mode) -> Self {
        Corrector { params, mode }
    }

    /// First k bits of a codeword. No correction is done, so call
    /// [`check_correct`](Self::check_correct) first.
    pub fn decode(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        self.params.check_len(codeword, self.params.codeword_bits())?;
        Ok(codeword.truncated(self.params.message_bits()))
    }

    /// Checks the syndrome of `codeword` and repairs it according to the mode.
    ///
    /// The input is never modified; correction happens on a copy.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] unless `codeword` has exactly n bits
    /// - [`Error::Uncorrectable`] for a nonzero syndrome in [`Mode::Detect`], or for a syndrome
    ///   that matches no column of `H` in [`Mode::Correct`]
    pub fn check_correct(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        let syndrome = self.params.syndrome(codeword)?;
        if syndrome.is_zero() {
            return Ok(codeword.clone());
        }

        if self.mode == Mode::Detect {
            debug!("bit error detected, syndrome {}", syndrome);
            return Err(Error::Uncorrectable {
                syndrome: syndrome.to_string(),
            });
        }

        match self.params.error_position(&syndrome) {
            Some(position) => {
                debug!("correcting bit {} (syndrome {})", position, syndrome);
                codeword.flipped(position)
            }
            None => {
                warn!("syndrome {} matches no single-bit error", syndrome);
                Err(Error::Uncorrectable {
                    syndrome: syndrome.to_string(),
                })
            }
        }
    }
}

/// A Hamming code: shared structural matrices plus a [`Mode`]
#[derive(Debug, Clone)]
pub struct HammingCode {
    params: Arc<CodeParameters>,
    mode: Mode,
}

impl HammingCode {
    /// Creates a code for `message_bits` message bits.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if `message_bits` is zero.
    pub fn new(message_bits: usize, mode: Mode) -> Result<Self> {
        let params = CodeParameters::new(message_bits)?;
        Ok(Self::with_parameters(Arc::new(params), mode))
    }

    /// Creates a code from a mode name (`"correct"` or `"detect"`).
    ///
    /// The mode is checked before any matrix is built.
    pub fn from_mode_str(message_bits: usize, mode: &str) -> Result<Self> {
        let mode = mode.parse()?;
        Self::new(message_bits, mode)
    }

    /// Creates a code over an existing, possibly shared, parameter set
    pub fn with_parameters(params: Arc<CodeParameters>, mode: Mode) -> Self {
        HammingCode { params, mode }
    }

    /// Creates a standard (7,4) Hamming code
    pub fn standard_7_4() -> Self {
        // k = 4 is always valid
        Self::new(4, Mode::Correct).expect("(7,4) parameters are valid")
    }

    pub fn parameters(&self) -> &Arc<CodeParameters> {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn message_bits(&self) -> usize {
        self.params.message_bits()
    }

    pub fn parity_bits(&self) -> usize {
        self.params.parity_bits()
    }

    pub fn codeword_bits(&self) -> usize {
        self.params.codeword_bits()
    }

    pub fn code_rate(&self) -> f64 {
        self.params.code_rate()
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.params)
    }

    pub fn corrector(&self) -> Corrector<'_> {
        Corrector::new(&self.params, self.mode)
    }

    /// Encodes a k-bit message into an n-bit codeword
    pub fn encode(&self, message: &BinaryVector) -> Result<BinaryVector> {
        self.encoder().encode(message)
    }

    /// Extracts the message bits of an n-bit codeword without correcting it
    pub fn decode(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        self.corrector().decode(codeword)
    }

    /// Detects and, in [`Mode::Correct`], repairs a single-bit error
    pub fn check_correct(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        self.corrector().check_correct(codeword)
    }

    /// Syndrome of an n-bit codeword
    pub fn syndrome(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        self.params.syndrome(codeword)
    }

    /// Copy of `codeword` with one random bit flipped, using the thread-local generator
    pub fn simulate_1bit_flip(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        self.simulate_1bit_flip_with(codeword, &mut rand::thread_rng())
    }

    /// Copy of `codeword` with two random bits flipped, using the thread-local generator.
    ///
    /// Both flips may land on the same bit, which leaves the codeword unchanged.
    pub fn simulate_2bit_flip(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        self.simulate_2bit_flip_with(codeword, &mut rand::thread_rng())
    }

    /// [`simulate_1bit_flip`](Self::simulate_1bit_flip) with a caller-supplied generator
    pub fn simulate_1bit_flip_with<R: Rng + ?Sized>(
        &self,
        codeword: &BinaryVector,
        rng: &mut R,
    ) -> Result<BinaryVector> {
        self.params.check_len(codeword, self.codeword_bits())?;
        flip_random_bits(codeword, 1, rng)
    }

    /// [`simulate_2bit_flip`](Self::simulate_2bit_flip) with a caller-supplied generator
    pub fn simulate_2bit_flip_with<R: Rng + ?Sized>(
        &self,
        codeword: &BinaryVector,
        rng: &mut R,
    ) -> Result<BinaryVector> {
        self.params.check_len(codeword, self.codeword_bits())?;
        flip_random_bits(codeword, 2, rng)
    }
}

impl BlockCode for HammingCode {
    fn message_len(&self) -> usize {
        self.message_bits()
    }

    fn codeword_len(&self) -> usize {
        self.codeword_bits()
    }

    fn encode(&self, message: &BinaryVector) -> Result<BinaryVector> {
        HammingCode::encode(self, message)
    }

    fn decode(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        HammingCode::decode(self, codeword)
    }

    fn check_correct(&self, codeword: &BinaryVector) -> Result<BinaryVector> {
        HammingCode::check_correct(self, codeword)
    }
}

/// Creates a standard (7,4) Hamming code
pub fn create_hamming_7_4() -> HammingCode {
    HammingCode::standard_7_4()
}

/// Creates a Hamming code with custom parameters
pub fn create_hamming(message_bits: usize, mode: Mode) -> Result<HammingCode> {
    HammingCode::new(message_bits, mode)
}
