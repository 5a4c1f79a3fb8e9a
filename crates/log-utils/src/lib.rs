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

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use tracing_subscriber::filter::ParseError as LogFilterError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Logfmt,
    #[default]
    Default,
}

#[derive(Clone, Debug)]
pub struct LogSpec {
    level: LevelFilter,
    directives: Vec<Directive>,
    format: LogFormat,
}

impl Default for LogSpec {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl LogSpec {
    pub fn new(directives: Vec<Directive>) -> Self {
        Self {
            level: LevelFilter::INFO,
            directives,
            format: LogFormat::Default,
        }
    }

    /// Parses a comma-separated filter such as `warn,matrix_fixture=debug`.
    /// A bare level sets the default level, the rest become directives.
    pub fn parse(filter: &str) -> Result<Self, LogFilterError> {
        let mut level = LevelFilter::INFO;
        let mut directives = vec![];
        for ns in filter.split(',').map(str::trim).filter(|ns| !ns.is_empty()) {
            match ns.parse::<LevelFilter>() {
                Ok(bare) => level = bare,
                Err(_) => directives.push(ns.parse::<Directive>()?),
            }
        }

        Ok(Self::default()
            .with_level(level)
            .with_directives(directives))
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;

        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;

        self
    }

    pub fn with_directives(mut self, directives: Vec<Directive>) -> Self {
        self.directives = self.directives.into_iter().chain(directives).collect();

        self
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    fn env_filter(&self) -> EnvFilter {
        // RUST_LOG is not consulted.
        self.directives.iter().cloned().fold(
            EnvFilter::builder()
                .with_default_directive(self.level.into())
                .parse_lossy(""),
            EnvFilter::add_directive,
        )
    }
}

pub fn log_layer<S>(spec: &LogSpec) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let filter = spec.env_filter();

    match spec.format {
        LogFormat::Logfmt => tracing_logfmt::builder()
            .with_target(true)
            .with_span_path(false)
            .with_span_name(false)
            .layer()
            .with_filter(filter)
            .boxed(),
        LogFormat::Default => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    }
}

// Enables logging with the default LogSpec
pub fn enable_logs() {
    enable_logs_for(LogSpec::default())
}

pub fn enable_logs_for(spec: LogSpec) {
    tracing_subscriber::registry()
        .with(log_layer(&spec))
        .try_init()
        .ok();
}
