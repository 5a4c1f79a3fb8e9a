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

//! Plain-text fixture layout.
//!
//! Input file:
//! ```text
//! N
//! <N rows of A>
//! <N rows of B>
//! ```
//! Expected output file: `<N rows of the product>`, no header.
//!
//! Every row is its entries in decimal, separated by single spaces and
//! terminated by `\n`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::errors::{DimensionError, FilesystemError, FixtureError};
use crate::matrix::{Dimension, Matrix};

pub const DEFAULT_INPUT_PATH: &str = "programs/test_inputs/large_matrix_input.txt";
pub const DEFAULT_EXPECTED_OUTPUT_PATH: &str = "programs/test_outputs/large_matrix_output.txt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixturePaths {
    pub input: PathBuf,
    pub expected_output: PathBuf,
}

impl Default for FixturePaths {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_PATH.into(),
            expected_output: DEFAULT_EXPECTED_OUTPUT_PATH.into(),
        }
    }
}

/// Sizes of the files produced by [`write_fixture`], in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    pub input_bytes: u64,
    pub expected_output_bytes: u64,
}

impl WrittenFiles {
    pub fn total_bytes(&self) -> u64 {
        self.input_bytes + self.expected_output_bytes
    }
}

pub fn encode_input<W: Write>(
    dimension: Dimension,
    a: &Matrix,
    b: &Matrix,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "{dimension}")?;
    encode_rows(a, writer)?;
    encode_rows(b, writer)
}

pub fn encode_expected<W: Write>(product: &Matrix, writer: &mut W) -> io::Result<()> {
    encode_rows(product, writer)
}

fn encode_rows<W: Write>(matrix: &Matrix, writer: &mut W) -> io::Result<()> {
    for row in matrix.rows() {
        writeln!(writer, "{}", row.iter().join(" "))?;
    }
    Ok(())
}

fn ensure_dimension(dimension: Dimension, matrix: &Matrix) -> Result<(), DimensionError> {
    if matrix.dimension() == dimension {
        Ok(())
    } else {
        Err(DimensionError::ShapeMismatch {
            expected: dimension.get(),
            actual: matrix.dimension().get(),
        })
    }
}

/// Writes the input and expected-output files, creating parent directories as needed.
///
/// Shapes are checked before anything touches the filesystem. The input file is
/// written and closed before the expected-output file is opened, so a failure on
/// the input leaves the expected-output path untouched. Existing files are
/// overwritten; a file that failed mid-write is left truncated.
pub fn write_fixture(
    paths: &FixturePaths,
    dimension: Dimension,
    a: &Matrix,
    b: &Matrix,
    product: &Matrix,
) -> Result<WrittenFiles, FixtureError> {
    for matrix in [a, b, product] {
        ensure_dimension(dimension, matrix)?;
    }

    for path in [&paths.input, &paths.expected_output] {
        create_parent_dir(path)?;
    }

    let input_bytes = write_file(&paths.input, |writer| {
        encode_input(dimension, a, b, writer)
    })?;
    tracing::debug!(path = %paths.input.display(), bytes = input_bytes, "input fixture written");

    let expected_output_bytes = write_file(&paths.expected_output, |writer| {
        encode_expected(product, writer)
    })?;
    tracing::debug!(
        path = %paths.expected_output.display(),
        bytes = expected_output_bytes,
        "expected output written"
    );

    Ok(WrittenFiles {
        input_bytes,
        expected_output_bytes,
    })
}

fn create_parent_dir(path: &Path) -> Result<(), FilesystemError> {
    fs_utils::create_parent_dir(path).map_err(|err| FilesystemError::CreateDir {
        path: path.parent().unwrap_or(path).to_path_buf(),
        err,
    })
}

fn write_file(
    path: &Path,
    encode: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<u64, FilesystemError> {
    let write = || -> io::Result<u64> {
        let mut writer = BufWriter::new(File::create(path)?);
        encode(&mut writer)?;
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        Ok(file.metadata()?.len())
    };

    write().map_err(|err| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(n: usize) -> Dimension {
        Dimension::new(n).unwrap()
    }

    fn encode_to_string(dimension: Dimension, a: &Matrix, b: &Matrix) -> String {
        let mut buf = Vec::new();
        encode_input(dimension, a, b, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn input_layout() {
        let a = Matrix::from_rows(vec![vec![3, 1], vec![5, 2]]).unwrap();
        let b = Matrix::identity(dim(2));

        assert_eq!(encode_to_string(dim(2), &a, &b), "2\n3 1\n5 2\n1 0\n0 1\n");
    }

    #[test]
    fn expected_layout_has_no_header() {
        let product = Matrix::from_rows(vec![vec![3, 1], vec![5, 2]]).unwrap();
        let mut buf = Vec::new();

        encode_expected(&product, &mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "3 1\n5 2\n");
    }

    #[test]
    fn numbers_have_no_padding() {
        let a = Matrix::from_rows(vec![vec![120, -7], vec![0, 1_000_000]]).unwrap();
        let mut buf = Vec::new();

        encode_expected(&a, &mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "120 -7\n0 1000000\n");
    }

    #[test]
    fn write_fixture_rejects_inconsistent_shapes() {
        let tmp = tempfile::tempdir().expect("Could not create temp dir");
        let paths = FixturePaths {
            input: tmp.path().join("in").join("input.txt"),
            expected_output: tmp.path().join("out").join("output.txt"),
        };
        let a = Matrix::identity(dim(2));
        let b = Matrix::identity(dim(2));

        let result = write_fixture(&paths, dim(3), &a, &b, &a);

        assert!(matches!(
            result,
            Err(FixtureError::InvalidDimension {
                err: DimensionError::ShapeMismatch {
                    expected: 3,
                    actual: 2
                }
            })
        ));
        assert!(!tmp.path().join("in").exists());
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn write_fixture_reports_sizes() {
        let tmp = tempfile::tempdir().expect("Could not create temp dir");
        let paths = FixturePaths {
            input: tmp.path().join("input.txt"),
            expected_output: tmp.path().join("output.txt"),
        };
        let a = Matrix::from_rows(vec![vec![3, 1], vec![5, 2]]).unwrap();
        let b = Matrix::identity(dim(2));

        let written = write_fixture(&paths, dim(2), &a, &b, &a).unwrap();

        assert_eq!(written.input_bytes, "2\n3 1\n5 2\n1 0\n0 1\n".len() as u64);
        assert_eq!(written.expected_output_bytes, "3 1\n5 2\n".len() as u64);
        assert_eq!(written.total_bytes(), 26);
    }

    #[test]
    fn default_paths() {
        let paths = FixturePaths::default();

        assert_eq!(
            paths.input,
            PathBuf::from("programs/test_inputs/large_matrix_input.txt")
        );
        assert_eq!(
            paths.expected_output,
            PathBuf::from("programs/test_outputs/large_matrix_output.txt")
        );
    }
}
