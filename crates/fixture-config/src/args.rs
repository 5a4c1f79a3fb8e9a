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

use clap::{Args, Parser};
use config::{ConfigError, File, FileFormat, Map, Source, Value};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct LogArgs {
    #[arg(
        long("log-level"),
        id = "LOG_LEVEL",
        help = "log filter, e.g. `info` or `info,matrix_fixture=debug`",
        value_name = "FILTER",
        help_heading = "Logging",
        display_order = 20
    )]
    level: Option<String>,
    #[arg(
        long("log-format"),
        value_parser(["default", "logfmt"]),
        id = "LOG_FORMAT",
        help_heading = "Logging",
        display_order = 21
    )]
    format: Option<String>,
}

impl LogArgs {
    fn is_empty(&self) -> bool {
        self.level.is_none() && self.format.is_none()
    }
}

impl Serialize for LogArgs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut struct_serializer = serializer.serialize_struct("LogConfig", 2)?;

        if let Some(level) = &self.level {
            struct_serializer.serialize_field("level", level)?;
        }
        if let Some(format) = &self.format {
            struct_serializer.serialize_field("format", format)?;
        }
        struct_serializer.end()
    }
}

#[derive(Parser, Debug, Serialize, Clone)]
pub(crate) struct DerivedArgs {
    #[arg(
        short('n'),
        long,
        id = "SIZE",
        help = "size of the square matrices",
        value_name = "N",
        help_heading = "Fixture",
        display_order = 1,
        allow_negative_numbers = true
    )]
    size: Option<i64>,
    #[arg(
        short('o'),
        long("output"),
        id = "OUTPUT",
        help = "input fixture file path",
        value_name = "PATH",
        help_heading = "Fixture",
        display_order = 2
    )]
    output: Option<PathBuf>,
    #[arg(
        short('e'),
        long("expected-output"),
        id = "EXPECTED_OUTPUT",
        help = "expected output file path",
        value_name = "PATH",
        help_heading = "Fixture",
        display_order = 3
    )]
    expected_output: Option<PathBuf>,
    #[arg(
        short('s'),
        long,
        id = "SEED",
        help = "seed of the random stream for matrix A",
        help_heading = "Fixture",
        display_order = 4
    )]
    seed: Option<u64>,
    #[arg(
        short('b'),
        long,
        id = "BLOCK_SIZE",
        help = "block size assumed when projecting the work chunk count",
        value_name = "N",
        help_heading = "Reporting",
        display_order = 10
    )]
    block_size: Option<usize>,

    #[command(flatten)]
    #[serde(skip_serializing_if = "LogArgs::is_empty")]
    log: LogArgs,

    #[arg(
        short('c'),
        long,
        id = "CONFIG_FILE",
        help_heading = "Configuration",
        help = "TOML configuration file",
        value_name = "PATH",
        display_order = 30
    )]
    #[serde(skip)]
    pub(crate) config: Option<PathBuf>,
    #[arg(
        long,
        id = "PRINT_CONFIG",
        help = "Print applied config",
        help_heading = "Configuration",
        display_order = 31,
        action = clap::ArgAction::SetTrue
    )]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub(crate) print_config: bool,
}

impl Source for DerivedArgs {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    // Only the args actually passed end up in the map, so they override
    // file values key by key.
    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let source =
            toml::to_string(self).map_err(|err| ConfigError::Foreign(Box::new(err)))?;

        File::from_str(&source, FileFormat::Toml).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::FromArgMatches;

    fn parse(args: &[&str]) -> DerivedArgs {
        let command = DerivedArgs::augment_args(clap::Command::new("test"));
        let matches = command
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .expect("Could not parse args");
        DerivedArgs::from_arg_matches(&matches).expect("Could not derive args")
    }

    #[test]
    fn absent_args_are_not_collected() {
        let map = parse(&[]).collect().unwrap();

        assert!(map.is_empty());
    }

    #[test]
    fn passed_args_are_collected() {
        let map = parse(&[
            "-n",
            "64",
            "--expected-output",
            "out/expected.txt",
            "--log-format",
            "logfmt",
        ])
        .collect()
        .unwrap();

        assert_eq!(map.get("size").cloned().unwrap().into_int().unwrap(), 64);
        assert_eq!(
            map.get("expected_output").cloned().unwrap().into_string().unwrap(),
            "out/expected.txt"
        );
        let log = map.get("log").cloned().unwrap().into_table().unwrap();
        assert_eq!(log.get("format").cloned().unwrap().into_string().unwrap(), "logfmt");
        assert!(!map.contains_key("output"));
        assert!(!map.contains_key("config"));
    }

    #[test]
    fn negative_size_is_accepted_by_parser() {
        let map = parse(&["--size", "-4"]).collect().unwrap();

        assert_eq!(map.get("size").cloned().unwrap().into_int().unwrap(), -4);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let command = DerivedArgs::augment_args(clap::Command::new("test"));

        assert!(command
            .try_get_matches_from(["test", "--log-format", "json"])
            .is_err());
    }
}
