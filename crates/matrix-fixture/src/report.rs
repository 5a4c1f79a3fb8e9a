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

use crate::matrix::Dimension;
use crate::serializer::WrittenFiles;

pub const DEFAULT_BLOCK_SIZE: usize = 32;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Side of the square blocks the downstream system is assumed to split matrices into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSize(NonZeroUsize);

impl BlockSize {
    pub const DEFAULT: Self = match NonZeroUsize::new(DEFAULT_BLOCK_SIZE) {
        Some(size) => Self(size),
        None => panic!("DEFAULT_BLOCK_SIZE must be non-zero"),
    };

    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Advisory: only whole blocks are counted, i.e. `floor(N / block)²`.
pub fn chunk_count(dimension: Dimension, block_size: BlockSize) -> u64 {
    let per_side = (dimension.get() / block_size.get()) as u64;
    per_side * per_side
}

/// Rough size of both files: two bytes per entry of both inputs plus a newline per row.
pub fn projected_file_bytes(dimension: Dimension) -> u64 {
    let n = dimension.get() as u64;
    n * n * 2 * 2 + n * 2
}

#[derive(Clone, Debug, PartialEq)]
pub struct FixtureSummary {
    pub size: usize,
    pub element_count: u64,
    pub block_size: usize,
    pub chunk_count: u64,
    pub projected_bytes: u64,
    pub written: WrittenFiles,
}

impl FixtureSummary {
    pub fn new(dimension: Dimension, block_size: BlockSize, written: WrittenFiles) -> Self {
        let n = dimension.get() as u64;
        Self {
            size: dimension.get(),
            element_count: n * n * 2,
            block_size: block_size.get(),
            chunk_count: chunk_count(dimension, block_size),
            projected_bytes: projected_file_bytes(dimension),
            written,
        }
    }

    pub fn projected_megabytes(&self) -> f64 {
        self.projected_bytes as f64 / BYTES_PER_MB
    }
}

impl Display for FixtureSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let n = self.size;
        let block = self.block_size;
        writeln!(f, "Matrix size: {n}x{n} ({} elements)", self.element_count)?;
        writeln!(
            f,
            "This should generate {} work chunks when using {block}x{block} block size",
            self.chunk_count
        )?;
        writeln!(f, "Expected file size: {:.2} MB", self.projected_megabytes())?;
        write!(
            f,
            "Written: {} bytes input, {} bytes expected output",
            self.written.input_bytes, self.written.expected_output_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(n: usize) -> Dimension {
        Dimension::new(n).unwrap()
    }

    #[test]
    fn default_block_size() {
        assert_eq!(BlockSize::default().get(), 32);
        assert_eq!(BlockSize::default(), BlockSize::DEFAULT);
        assert_eq!(BlockSize::new(DEFAULT_BLOCK_SIZE), Some(BlockSize::DEFAULT));
        assert_eq!(BlockSize::new(0), None);
    }

    #[test]
    fn chunk_projection_floors() {
        let block = BlockSize::default();

        assert_eq!(chunk_count(dim(128), block), 16);
        assert_eq!(chunk_count(dim(100), block), 9);
        assert_eq!(chunk_count(dim(31), block), 0);
        assert_eq!(chunk_count(dim(64), BlockSize::new(16).unwrap()), 16);
    }

    #[test]
    fn summary_for_default_size() {
        let summary = FixtureSummary::new(dim(128), BlockSize::default(), WrittenFiles::default());

        assert_eq!(summary.element_count, 32768);
        assert_eq!(summary.chunk_count, 16);
        assert_eq!(summary.projected_bytes, 65792);

        let text = summary.to_string();
        assert!(text.contains("Matrix size: 128x128 (32768 elements)"));
        assert!(text.contains("16 work chunks when using 32x32 block size"));
        assert!(text.contains("Expected file size: 0.06 MB"));
    }
}
