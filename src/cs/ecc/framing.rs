//! Text framing for block codes.
//!
//! Packs a string into bits (8 bits per byte, most significant first), pads the bit stream to a
//! whole number of message blocks and splits it into chunks, then reverses each step on the
//! receiving side. Running the chunks through a code is left to the caller.

use crate::cs::ecc::binary::BinaryVector;
use crate::cs::ecc::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;

/// Bits of the UTF-8 encoding of `message`, MSB first
pub fn str_to_bits(message: &str) -> BinaryVector {
    BinaryVector::from_bits(BitVec::<u8, Msb0>::from_slice(message.as_bytes()))
}

/// Inverse of [`str_to_bits`].
///
/// # Errors
///
/// - [`Error::LengthMismatch`] if the length is not a multiple of 8
/// - [`Error::Validation`] if the bytes are not valid UTF-8
pub fn bits_to_string(bits: &BinaryVector) -> Result<String> {
    if bits.len() % 8 != 0 {
        return Err(Error::LengthMismatch {
            expected: (bits.len() / 8 + 1) * 8,
            actual: bits.len(),
        });
    }

    let bytes: Vec<u8> = bits
        .as_bitslice()
        .chunks(8)
        .map(|byte| byte.iter().by_vals().fold(0u8, |acc, bit| (acc << 1) | u8::from(bit)))
        .collect();
    String::from_utf8(bytes).map_err(|e| Error::Validation(e.to_string()))
}

fn check_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(Error::Configuration(
            "chunk size must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Zero-pads `bits` to a multiple of `chunk_size`.
///
/// Returns the padded vector and the number of zeros appended, which must be stripped again
/// before converting back to text.
pub fn pad_last_chunk(bits: &BinaryVector, chunk_size: usize) -> Result<(BinaryVector, usize)> {
    check_chunk_size(chunk_size)?;

    let remainder = bits.len() % chunk_size;
    let padding = if remainder > 0 { chunk_size - remainder } else { 0 };

    let mut padded = bits.clone().into_bits();
    padded.resize(bits.len() + padding, false);
    Ok((BinaryVector::from_bits(padded), padding))
}

/// Splits `bits` into consecutive chunks of `chunk_size`. The last chunk is shorter when the
/// length is not a multiple of `chunk_size`.
pub fn into_chunks(bits: &BinaryVector, chunk_size: usize) -> Result<Vec<BinaryVector>> {
    check_chunk_size(chunk_size)?;
    Ok(bits
        .as_bitslice()
        .chunks(chunk_size)
        .map(|chunk| BinaryVector::from_bits(chunk.to_bitvec()))
        .collect())
}

/// Concatenates chunks back into one vector
pub fn from_chunks(chunks: &[BinaryVector]) -> BinaryVector {
    chunks.iter().flat_map(BinaryVector::iter).collect()
}
