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

use eyre::WrapErr;

use fixture_config::{load_config, ConfigData};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
const PKG_NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> eyre::Result<()> {
    let config_data = ConfigData {
        binary_name: PKG_NAME.to_string(),
        version: VERSION.to_string(),
        authors: format!("by {AUTHORS}"),
        description: DESCRIPTION.to_string(),
    };
    let config = load_config(Some(config_data))?;

    let resolved = config
        .clone()
        .resolve()
        .wrap_err("invalid configuration")?;
    log_utils::enable_logs_for(resolved.log.clone());

    if config.print_config {
        println!("Loaded config: {config:#?}");
    }

    let n = resolved.dimension;
    println!("Generating {n}x{n} matrix input...");

    let summary =
        matrix_fixture::generate(&resolved).wrap_err("failed to generate matrix fixture")?;

    let paths = &resolved.paths;
    println!("Generated matrix input file at: {}", paths.input.display());
    println!(
        "Generated expected output file at: {}",
        paths.expected_output.display()
    );
    println!("{summary}");

    Ok(())
}
