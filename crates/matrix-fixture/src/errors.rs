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

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    #[error("Matrix size should be > 0, got {size}")]
    NonPositive { size: i64 },
    #[error("Matrix shape mismatch: expected {expected}x{expected}, got {actual}x{actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("Row {row} has {actual} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("Failed to create directory {path:?}: {err}")]
    CreateDir {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("Failed to write fixture file {path:?}: {err}")]
    WriteFile {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

impl FilesystemError {
    pub fn path(&self) -> &PathBuf {
        match self {
            FilesystemError::CreateDir { path, .. } | FilesystemError::WriteFile { path, .. } => {
                path
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Invalid dimension: {err}")]
    InvalidDimension {
        #[from]
        err: DimensionError,
    },
    #[error(transparent)]
    Filesystem {
        #[from]
        err: FilesystemError,
    },
}
