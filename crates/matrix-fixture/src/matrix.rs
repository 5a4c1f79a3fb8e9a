/*
 * Nox Fluence Peer
 *
 * Copyright (C) 2024 Fluence DAO
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation version 3 of the
 * License.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::ops::Index;

use crate::errors::DimensionError;

/// Side length of a square matrix, always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dimension(NonZeroUsize);

impl Dimension {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for Dimension {
    type Error = DimensionError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        usize::try_from(size)
            .ok()
            .and_then(Self::new)
            .ok_or(DimensionError::NonPositive { size })
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Square integer matrix stored row-major.
///
/// There are no mutating accessors: a matrix is fixed once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    dimension: Dimension,
    entries: Vec<i64>,
}

impl Matrix {
    /// Builds a matrix by calling `f(row, col)` for every cell in row-major order.
    pub fn from_fn(dimension: Dimension, mut f: impl FnMut(usize, usize) -> i64) -> Self {
        let n = dimension.get();
        let mut entries = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                entries.push(f(row, col));
            }
        }

        Self {
            dimension,
            entries,
        }
    }

    pub fn identity(dimension: Dimension) -> Self {
        Self::from_fn(dimension, |row, col| i64::from(row == col))
    }

    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, DimensionError> {
        let dimension =
            Dimension::new(rows.len()).ok_or(DimensionError::NonPositive { size: 0 })?;
        let n = dimension.get();

        let mut entries = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(DimensionError::RaggedRow {
                    row,
                    expected: n,
                    actual: values.len(),
                });
            }
            entries.extend(values);
        }

        Ok(Self {
            dimension,
            entries,
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn entries(&self) -> &[i64] {
        &self.entries
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i64]> + '_ {
        self.entries.chunks_exact(self.dimension.get())
    }

    pub fn is_identity(&self) -> bool {
        let n = self.dimension.get();
        self.entries
            .iter()
            .enumerate()
            .all(|(idx, &value)| value == i64::from(idx / n == idx % n))
    }

    /// Full O(N³) product `self × other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, DimensionError> {
        if self.dimension != other.dimension {
            return Err(DimensionError::ShapeMismatch {
                expected: self.dimension.get(),
                actual: other.dimension.get(),
            });
        }

        let n = self.dimension.get();
        let mut entries = vec![0i64; n * n];
        for (i, row) in self.rows().enumerate() {
            let out = &mut entries[i * n..(i + 1) * n];
            for (k, &lhs) in row.iter().enumerate() {
                if lhs == 0 {
                    continue;
                }
                let rhs_row = &other.entries[k * n..(k + 1) * n];
                for (acc, &rhs) in out.iter_mut().zip(rhs_row) {
                    *acc += lhs * rhs;
                }
            }
        }

        Ok(Matrix {
            dimension: self.dimension,
            entries,
        })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = i64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        let n = self.dimension.get();
        assert!(col < n, "column {col} out of bounds for {n}x{n} matrix");
        &self.entries[row * n + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(n: usize) -> Dimension {
        Dimension::new(n).unwrap()
    }

    #[test]
    fn dimension_rejects_non_positive() {
        assert_eq!(
            Dimension::try_from(0),
            Err(DimensionError::NonPositive { size: 0 })
        );
        assert_eq!(
            Dimension::try_from(-3),
            Err(DimensionError::NonPositive { size: -3 })
        );
        assert_eq!(Dimension::try_from(7).map(Dimension::get), Ok(7));
    }

    #[test]
    fn identity_structure() {
        let eye = Matrix::identity(dim(4));

        assert!(eye.is_identity());
        for (i, row) in eye.rows().enumerate() {
            assert_eq!(row.iter().sum::<i64>(), 1);
            assert_eq!(row[i], 1);
        }
        for col in 0..4 {
            let ones = (0..4).filter(|&row| eye[(row, col)] == 1).count();
            assert_eq!(ones, 1);
        }
    }

    #[test]
    fn from_rows_keeps_row_major_order() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();

        assert_eq!(m.dimension(), dim(2));
        assert_eq!(m.entries(), &[1, 2, 3, 4]);
        assert_eq!(m[(1, 0)], 3);
        assert!(!m.is_identity());
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        assert_eq!(
            Matrix::from_rows(vec![]),
            Err(DimensionError::NonPositive { size: 0 })
        );
        assert_eq!(
            Matrix::from_rows(vec![vec![1, 2], vec![3]]),
            Err(DimensionError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn multiply_small() {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();

        let c = a.multiply(&b).unwrap();

        assert_eq!(
            c,
            Matrix::from_rows(vec![vec![19, 22], vec![43, 50]]).unwrap()
        );
    }

    #[test]
    fn multiply_by_identity_is_noop() {
        let a = Matrix::from_fn(dim(5), |row, col| (row * 5 + col) as i64 % 5 + 1);

        assert_eq!(a.multiply(&Matrix::identity(dim(5))).unwrap(), a);
    }

    #[test]
    fn multiply_rejects_shape_mismatch() {
        let a = Matrix::identity(dim(2));
        let b = Matrix::identity(dim(3));

        assert_eq!(
            a.multiply(&b),
            Err(DimensionError::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }
}
