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

use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::matrix::{Dimension, Matrix};

pub const DEFAULT_SEED: u64 = 42;
pub const MIN_ENTRY: i64 = 1;
pub const MAX_ENTRY: i64 = 5;

/// Deterministic source of fixture matrices.
///
/// The stream is ChaCha8 seeded through `seed_from_u64`, so a given seed yields
/// the same entries on every platform. Entries are drawn in row-major order.
#[derive(Clone, Debug)]
pub struct MatrixGenerator {
    rng: ChaCha8Rng,
    entries: Uniform<i64>,
}

impl MatrixGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            entries: Uniform::new_inclusive(MIN_ENTRY, MAX_ENTRY),
        }
    }

    /// Matrix with every entry drawn uniformly from `MIN_ENTRY..=MAX_ENTRY`.
    pub fn random_matrix(&mut self, dimension: Dimension) -> Matrix {
        let Self { rng, entries } = self;
        Matrix::from_fn(dimension, |_, _| rng.sample(&*entries))
    }
}

impl Default for MatrixGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// The two operands of a fixture: `a` is random, `b` is the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureMatrices {
    pub a: Matrix,
    pub b: Matrix,
}

pub fn construct(dimension: Dimension, seed: u64) -> FixtureMatrices {
    let mut generator = MatrixGenerator::new(seed);
    let a = generator.random_matrix(dimension);
    let b = Matrix::identity(dimension);
    tracing::debug!(%dimension, seed, "constructed fixture matrices");

    FixtureMatrices { a, b }
}
