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

use std::io;
use std::path::Path;

/// Creates `dir` and all of its missing ancestors. Existing directories are left as is.
pub fn create_dir<P: AsRef<Path>>(dir: P) -> io::Result<()> {
    let dir = dir.as_ref();
    tracing::trace!(dir = %dir.display(), "creating directory");
    std::fs::create_dir_all(dir)
}

/// Creates the directory a file at `path` will be written into.
///
/// Bare file names (`out.txt`) have an empty parent and need no directory.
pub fn create_parent_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_parent_dir_creates_missing_ancestors() {
        let tmp = tempfile::tempdir().expect("Could not create temp dir");
        let file = tmp.path().join("a").join("b").join("fixture.txt");

        create_parent_dir(&file).expect("Could not create parent dir");

        assert!(tmp.path().join("a").join("b").is_dir());
        assert!(!file.exists());
    }

    #[test]
    fn create_parent_dir_is_idempotent() {
        let tmp = tempfile::tempdir().expect("Could not create temp dir");
        let file = tmp.path().join("nested").join("fixture.txt");

        create_parent_dir(&file).expect("first call");
        create_parent_dir(&file).expect("second call");
    }

    #[test]
    fn bare_file_name_needs_no_dir() {
        create_parent_dir("fixture.txt").expect("bare file name has no parent to create");
    }

    #[test]
    fn create_dir_fails_under_a_file() {
        let tmp = tempfile::tempdir().expect("Could not create temp dir");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();

        assert!(create_dir(blocker.join("inner")).is_err());
    }
}
