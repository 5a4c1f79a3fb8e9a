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

use std::path::PathBuf;

use matrix_fixture::{
    DEFAULT_BLOCK_SIZE, DEFAULT_EXPECTED_OUTPUT_PATH, DEFAULT_INPUT_PATH, DEFAULT_SEED,
};

pub fn default_size() -> i64 {
    128
}

pub fn default_input_path() -> PathBuf {
    DEFAULT_INPUT_PATH.into()
}

pub fn default_expected_output_path() -> PathBuf {
    DEFAULT_EXPECTED_OUTPUT_PATH.into()
}

pub fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

pub fn default_seed() -> u64 {
    DEFAULT_SEED
}

pub fn default_log_level() -> String {
    "info".to_string()
}
