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

#![warn(rust_2018_idioms)]
#![deny(
    dead_code,
    nonstandard_style,
    unused_imports,
    unused_mut,
    unused_variables,
    unused_unsafe,
    unreachable_patterns
)]

mod errors;
mod generator;
mod matrix;
mod oracle;
mod report;
mod serializer;

pub use errors::{DimensionError, FilesystemError, FixtureError};
pub use generator::{
    construct, FixtureMatrices, MatrixGenerator, DEFAULT_SEED, MAX_ENTRY, MIN_ENTRY,
};
pub use matrix::{Dimension, Matrix};
pub use oracle::expected_product;
pub use report::{
    chunk_count, projected_file_bytes, BlockSize, FixtureSummary, DEFAULT_BLOCK_SIZE,
};
pub use serializer::{
    encode_expected, encode_input, write_fixture, FixturePaths, WrittenFiles,
    DEFAULT_EXPECTED_OUTPUT_PATH, DEFAULT_INPUT_PATH,
};

/// Everything needed to produce one fixture pair on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureRequest {
    pub dimension: Dimension,
    pub seed: u64,
    pub block_size: BlockSize,
    pub paths: FixturePaths,
}

impl FixtureRequest {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            seed: DEFAULT_SEED,
            block_size: BlockSize::default(),
            paths: FixturePaths::default(),
        }
    }

    pub fn with_paths(mut self, paths: FixturePaths) -> Self {
        self.paths = paths;

        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;

        self
    }

    pub fn with_block_size(mut self, block_size: BlockSize) -> Self {
        self.block_size = block_size;

        self
    }
}

/// In-memory fixture: both operands and the expected product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub dimension: Dimension,
    pub a: Matrix,
    pub b: Matrix,
    pub expected: Matrix,
}

impl Fixture {
    pub fn build(dimension: Dimension, seed: u64) -> Result<Self, FixtureError> {
        let FixtureMatrices { a, b } = construct(dimension, seed);
        let expected = expected_product(&a, &b)?;

        Ok(Self {
            dimension,
            a,
            b,
            expected,
        })
    }

    pub fn write(&self, paths: &FixturePaths) -> Result<WrittenFiles, FixtureError> {
        write_fixture(paths, self.dimension, &self.a, &self.b, &self.expected)
    }
}

/// Builds the fixture described by `request`, writes both files and summarizes the run.
#[tracing::instrument(skip_all, fields(size = %request.dimension, seed = request.seed))]
pub fn generate(request: &FixtureRequest) -> Result<FixtureSummary, FixtureError> {
    let fixture = Fixture::build(request.dimension, request.seed)?;
    let written = fixture.write(&request.paths).map_err(|err| {
        if let FixtureError::Filesystem { err: fs_err } = &err {
            tracing::error!(path = %fs_err.path().display(), "cannot write fixture");
        }
        err
    })?;

    let summary = FixtureSummary::new(request.dimension, request.block_size, written);
    tracing::info!(
        elements = summary.element_count,
        chunks = summary.chunk_count,
        bytes = written.total_bytes(),
        "fixture generated"
    );

    Ok(summary)
}
