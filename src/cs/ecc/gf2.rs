//! Dense matrices over GF(2).
//!
//! Entries are stored as `0`/`1` bytes in an `ndarray::Array2<u8>`. Addition is XOR and
//! multiplication is AND, so products are exact for any size; nothing goes through
//! floating point followed by a modulus.

use crate::cs::ecc::binary::BinaryVector;
use crate::cs::ecc::Result;
use crate::cs::error::Error;
use ndarray::{concatenate, Array2, Axis};

/// A dense binary matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    data: Array2<u8>,
}

impl BitMatrix {
    /// `n`×`n` identity matrix
    pub fn identity(n: usize) -> Self {
        BitMatrix {
            data: Array2::eye(n),
        }
    }

    /// `rows`×`cols` matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        BitMatrix {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Builds a matrix from row vectors.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the rows are ragged or contain anything other than 0 and 1.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(Error::Validation(format!(
                "row {} has {} entries, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        if rows.iter().flatten().any(|&v| v > 1) {
            return Err(Error::Validation(
                "matrix must contain only 0s and 1s".to_string(),
            ));
        }

        let data = Array2::from_shape_fn((rows.len(), cols), |(i, j)| rows[i][j]);
        Ok(BitMatrix { data })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Horizontal concatenation `[a | b]`.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the row counts differ.
    pub fn hstack(a: &BitMatrix, b: &BitMatrix) -> Result<Self> {
        if a.rows() != b.rows() {
            return Err(Error::LengthMismatch {
                expected: a.rows(),
                actual: b.rows(),
            });
        }
        let data = concatenate(Axis(1), &[a.data.view(), b.data.view()])
            .map_err(|e| Error::Construction(e.to_string()))?;
        Ok(BitMatrix { data })
    }

    pub fn transpose(&self) -> Self {
        BitMatrix {
            data: self.data.t().to_owned(),
        }
    }

    /// Matrix-vector product mod 2.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if `v` does not have `cols()` bits.
    pub fn mul_vec(&self, v: &BinaryVector) -> Result<BinaryVector> {
        if v.len() != self.cols() {
            return Err(Error::LengthMismatch {
                expected: self.cols(),
                actual: v.len(),
            });
        }

        let product = self
            .data
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(v.iter())
                    .fold(false, |acc, (&a, b)| acc ^ (a == 1 && b))
            })
            .collect();
        Ok(product)
    }

    /// Matrix product mod 2.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the inner dimensions disagree.
    pub fn mul(&self, other: &BitMatrix) -> Result<BitMatrix> {
        if self.cols() != other.rows() {
            return Err(Error::LengthMismatch {
                expected: self.cols(),
                actual: other.rows(),
            });
        }

        let data = Array2::from_shape_fn((self.rows(), other.cols()), |(i, j)| {
            (0..self.cols()).fold(0u8, |acc, t| acc ^ (self.data[[i, t]] & other.data[[t, j]]))
        });
        Ok(BitMatrix { data })
    }

    /// Column `j` as a vector, or `None` out of range
    pub fn column(&self, j: usize) -> Option<BinaryVector> {
        (j < self.cols()).then(|| self.data.column(j).iter().map(|&v| v == 1).collect())
    }

    /// Row `i` as a vector, or `None` out of range
    pub fn row(&self, i: usize) -> Option<BinaryVector> {
        (i < self.rows()).then(|| self.data.row(i).iter().map(|&v| v == 1).collect())
    }

    /// Index of the first column equal to `v`
    pub fn find_column(&self, v: &BinaryVector) -> Option<usize> {
        if v.len() != self.rows() {
            return None;
        }
        self.data.columns().into_iter().position(|column| {
            column
                .iter()
                .zip(v.iter())
                .all(|(&entry, bit)| (entry == 1) == bit)
        })
    }

    /// True when every entry is 0
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[u8]]) -> BitMatrix {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        BitMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_identity() {
        let i = BitMatrix::identity(3);
        assert_eq!(i, m(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]));
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(matches!(
            BitMatrix::from_rows(&[vec![1, 0], vec![1]]),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            BitMatrix::from_rows(&[vec![1, 2]]),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_hstack_and_transpose() {
        let a = m(&[&[1, 1], &[0, 1]]);
        let b = BitMatrix::identity(2);
        let ab = BitMatrix::hstack(&a, &b).unwrap();
        assert_eq!(ab, m(&[&[1, 1, 1, 0], &[0, 1, 0, 1]]));
        assert_eq!(ab.transpose(), m(&[&[1, 0], &[1, 1], &[1, 0], &[0, 1]]));

        let tall = BitMatrix::identity(3);
        assert!(BitMatrix::hstack(&a, &tall).is_err());
    }

    #[test]
    fn test_mul_vec_is_mod_2() {
        let a = m(&[&[1, 1, 1], &[1, 0, 1]]);
        let v: BinaryVector = "111".parse().unwrap();
        // 1+1+1 = 1, 1+0+1 = 0 over GF(2)
        assert_eq!(a.mul_vec(&v).unwrap().to_string(), "10");

        let wrong: BinaryVector = "11".parse().unwrap();
        assert!(matches!(
            a.mul_vec(&wrong),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_mul() {
        let a = m(&[&[1, 1], &[0, 1]]);
        // a * a = [[1, 0], [0, 1]] over GF(2)
        assert_eq!(a.mul(&a).unwrap(), BitMatrix::identity(2));
        assert!(a.mul(&BitMatrix::identity(3)).is_err());
    }

    #[test]
    fn test_columns_and_rows() {
        let a = m(&[&[1, 0, 1], &[0, 1, 1]]);
        assert_eq!(a.column(2).unwrap().to_string(), "11");
        assert_eq!(a.row(1).unwrap().to_string(), "011");
        assert!(a.column(3).is_none());
        assert!(a.row(2).is_none());

        let target: BinaryVector = "01".parse().unwrap();
        assert_eq!(a.find_column(&target), Some(1));
        let missing: BinaryVector = "00".parse().unwrap();
        assert_eq!(a.find_column(&missing), None);
    }

    #[test]
    fn test_is_zero() {
        assert!(BitMatrix::zeros(2, 3).is_zero());
        assert!(!BitMatrix::identity(2).is_zero());
    }
}
