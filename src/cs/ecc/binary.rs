//! Validated bit vectors.
//!
//! [`BinaryVector`] is the value type passed across every code boundary in this crate:
//! messages, codewords, syndromes and error patterns are all binary vectors. A vector is
//! validated once, when it is built, so the algorithms behind it never see anything other
//! than 0 and 1.
//!
//! # Examples
//!
//! ```
//! use hamming_gf2::cs::ecc::BinaryVector;
//!
//! let v = BinaryVector::from_values(&[1, 0, 1, 1]).unwrap();
//! assert_eq!(v.to_string(), "1011");
//! assert!(BinaryVector::from_values(&[1, 2, 0]).is_err());
//! ```

use crate::cs::ecc::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

/// A fixed-length vector over GF(2)
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BinaryVector {
    bits: BitVec<u8, Msb0>,
}

impl BinaryVector {
    /// Builds a vector from numeric values, rejecting anything that is not exactly 0 or 1.
    ///
    /// Works for any numeric type that can represent 0 and 1, so `&[u8]`, `&[i32]`,
    /// `&[usize]` and `&[f64]` are all accepted as input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending position.
    pub fn from_values<T>(values: &[T]) -> Result<Self>
    where
        T: Copy + PartialEq + From<u8> + Debug,
    {
        let zero = T::from(0);
        let one = T::from(1);

        let mut bits = BitVec::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            if value == zero {
                bits.push(false);
            } else if value == one {
                bits.push(true);
            } else {
                return Err(Error::Validation(format!(
                    "array must contain only 0s and 1s, found {:?} at position {}",
                    value, i
                )));
            }
        }

        Ok(BinaryVector { bits })
    }

    /// Wraps an existing bit vector. Always binary, so this cannot fail.
    pub fn from_bits(bits: BitVec<u8, Msb0>) -> Self {
        BinaryVector { bits }
    }

    /// All-zero vector of the given length
    pub fn zeros(len: usize) -> Self {
        BinaryVector {
            bits: BitVec::repeat(false, len),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    /// Iterates the bits in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Hamming weight
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// True when every bit is 0 (an empty vector counts as zero)
    pub fn is_zero(&self) -> bool {
        self.bits.not_any()
    }

    /// Flips the bit at `index` in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `index` is out of range.
    pub fn flip(&mut self, index: usize) -> Result<()> {
        if index >= self.bits.len() {
            return Err(Error::Validation(format!(
                "bit index {} out of range for vector of length {}",
                index,
                self.bits.len()
            )));
        }
        let current = self.bits[index];
        self.bits.set(index, !current);
        Ok(())
    }

    /// Copy of this vector with the bit at `index` flipped
    pub fn flipped(&self, index: usize) -> Result<Self> {
        let mut copy = self.clone();
        copy.flip(index)?;
        Ok(copy)
    }

    /// Element-wise addition over GF(2)
    pub fn xor(&self, other: &BinaryVector) -> Result<Self> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }

        let bits = self.iter().zip(other.iter()).map(|(a, b)| a ^ b).collect();
        Ok(BinaryVector { bits })
    }

    /// The first `len` bits, or the whole vector if it is shorter
    pub fn truncated(&self, len: usize) -> Self {
        let end = len.min(self.bits.len());
        BinaryVector {
            bits: self.bits[..end].to_bitvec(),
        }
    }

    /// Bits as 0/1 bytes
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().map(u8::from).collect()
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    pub fn into_bits(self) -> BitVec<u8, Msb0> {
        self.bits
    }
}

impl From<BitVec<u8, Msb0>> for BinaryVector {
    fn from(bits: BitVec<u8, Msb0>) -> Self {
        Self::from_bits(bits)
    }
}

impl FromIterator<bool> for BinaryVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        BinaryVector {
            bits: iter.into_iter().collect(),
        }
    }
}

impl FromStr for BinaryVector {
    type Err = Error;

    /// Parses a string of `0` and `1` characters, e.g. `"1011"`
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(i, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::Validation(format!(
                    "expected '0' or '1', found {:?} at position {}",
                    other, i
                ))),
            })
            .collect()
    }
}

impl Display for BinaryVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Debug for BinaryVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryVector({})", self)
    }
}
