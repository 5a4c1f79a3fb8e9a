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

use std::ffi::OsString;
use std::ops::Deref;
use std::path::PathBuf;

use clap::{Args, Command, FromArgMatches};
use config::{Config, File, FileFormat};
use log_utils::{LogFilterError, LogFormat, LogSpec};
use matrix_fixture::{BlockSize, Dimension, DimensionError, FixturePaths, FixtureRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::args::DerivedArgs;
use crate::defaults::*;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnresolvedConfig {
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default = "default_input_path")]
    pub output: PathBuf,
    #[serde(default = "default_expected_output_path")]
    pub expected_output: PathBuf,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub print_config: bool,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid matrix size: {err}")]
    InvalidDimension {
        #[from]
        err: DimensionError,
    },
    #[error("Block size should be > 0")]
    InvalidBlockSize,
    #[error("Invalid log filter {filter:?}: {err}")]
    InvalidLogFilter {
        filter: String,
        #[source]
        err: LogFilterError,
    },
}

impl UnresolvedConfig {
    pub fn resolve(self) -> Result<ResolvedConfig, ResolveError> {
        let dimension = Dimension::try_from(self.size)?;
        let block_size = BlockSize::new(self.block_size).ok_or(ResolveError::InvalidBlockSize)?;
        let log = LogSpec::parse(&self.log.level)
            .map_err(|err| ResolveError::InvalidLogFilter {
                filter: self.log.level.clone(),
                err,
            })?
            .with_format(self.log.format);

        let paths = FixturePaths {
            input: self.output,
            expected_output: self.expected_output,
        };
        let fixture = FixtureRequest::new(dimension)
            .with_seed(self.seed)
            .with_block_size(block_size)
            .with_paths(paths);

        Ok(ResolvedConfig { fixture, log })
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub fixture: FixtureRequest,
    pub log: LogSpec,
}

impl Deref for ResolvedConfig {
    type Target = FixtureRequest;

    fn deref(&self) -> &Self::Target {
        &self.fixture
    }
}

pub struct ConfigData {
    pub binary_name: String,
    pub version: String,
    pub authors: String,
    pub description: String,
}

/// Loads the configuration from args and an optional config file.
/// The source order is:
///  - Defaults
///  - Load and parse the TOML file provided by --config arg
///  - Load config values from args
/// On each stage the values override the previous ones.
/// Environment variables are not consulted.
pub fn load_config(data: Option<ConfigData>) -> eyre::Result<UnresolvedConfig> {
    let raw_args = std::env::args_os().collect::<Vec<_>>();
    load_config_with_args(raw_args, data)
}

pub fn load_config_with_args(
    raw_args: Vec<OsString>,
    data: Option<ConfigData>,
) -> eyre::Result<UnresolvedConfig> {
    let arg_source = process_args(raw_args, data)?;

    let mut config_builder = Config::builder();
    if let Some(path) = &arg_source.config {
        config_builder =
            config_builder.add_source(File::from(path.clone()).format(FileFormat::Toml));
    }
    let config = config_builder.add_source(arg_source).build()?;

    let config: UnresolvedConfig = config.try_deserialize()?;

    Ok(config)
}

fn process_args(raw_args: Vec<OsString>, data: Option<ConfigData>) -> eyre::Result<DerivedArgs> {
    let command = Command::new("Matrix fixture generator");
    let command = if let Some(data) = data {
        command
            .version(data.version)
            .author(data.authors)
            .about(data.description)
            .override_usage(format!("{} [OPTIONS]", data.binary_name))
    } else {
        command
    };

    let raw_cli_config = DerivedArgs::augment_args(command);
    let matches = raw_cli_config.get_matches_from(raw_args);
    let arg_source = DerivedArgs::from_arg_matches(&matches)?;
    Ok(arg_source)
}
