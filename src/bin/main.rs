// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use point_ledger::{PointService, ReadConsistency, ServiceConfig, UserId};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Point Ledger - Replay point transaction CSV files
///
/// Reads charge/use requests from a CSV file and outputs the resulting
/// balances (or the transaction history) to stdout.
#[derive(Parser, Debug)]
#[command(name = "point-ledger")]
#[command(about = "Replays point charge/use CSVs against an in-memory ledger", long_about = None)]
struct Args {
    /// Path to CSV file with transactions
    ///
    /// Expected format: user,type,amount
    /// Example: cargo run -- requests.csv > balances.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the transaction history instead of the balances
    #[arg(long)]
    history: bool,

    /// Uses are rounded down to a multiple of this unit
    #[arg(long, default_value_t = ServiceConfig::DEFAULT_USE_UNIT)]
    use_unit: NonZeroU64,

    /// Make reads wait for in-flight transactions
    #[arg(long)]
    linearizable_reads: bool,
}

impl Args {
    fn service_config(&self) -> ServiceConfig {
        let read_consistency = if self.linearizable_reads {
            ReadConsistency::Linearizable
        } else {
            ReadConsistency::Relaxed
        };
        ServiceConfig::default()
            .with_use_unit(self.use_unit)
            .with_read_consistency(read_consistency)
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let service = match process_requests(BufReader::new(file), args.service_config()) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error processing transactions: {}", e);
            process::exit(1);
        }
    };

    let stats = service.stats();
    info!(applied = stats.applied, rejected = stats.rejected, "replay finished");

    let written = if args.history {
        write_history(&service, std::io::stdout())
    } else {
        write_balances(&service, std::io::stdout())
    };
    if let Err(e) = written {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays valid CSV.
///
/// Filter is read from `POINT_LEDGER_LOG` and defaults to `info`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("POINT_LEDGER_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Raw CSV record matching the input format.
///
/// Fields: `user, type, amount`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    user: u64,
    #[serde(rename = "type")]
    tx_type: String,
    amount: i64,
}

/// Replays requests from a CSV reader through a fresh [`PointService`].
///
/// Rows are processed one at a time, so the file never has to fit in memory.
/// Malformed rows and rejected transactions are logged and skipped.
///
/// # CSV Format
///
/// Expected columns: `user, type, amount`
/// - `user`: User ID (u64)
/// - `type`: `CHARGE` or `USE`, case-insensitive
/// - `amount`: Requested amount (i64, must not be negative)
///
/// # Example
///
/// ```csv
/// user,type,amount
/// 1,CHARGE,5000
/// 1,USE,1234
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails.
pub fn process_requests<R: Read>(
    reader: R,
    config: ServiceConfig,
) -> Result<PointService, csv::Error> {
    let service = PointService::with_config(config);

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                warn!(error = %e, "skipping malformed row");
                continue;
            }
        };

        let user_id = UserId(record.user);
        if let Err(e) = service.apply_raw(user_id, record.amount, &record.tx_type) {
            warn!(
                user = %user_id,
                tx_type = %record.tx_type,
                amount = record.amount,
                error = %e,
                "skipping rejected transaction"
            );
        }
    }

    Ok(service)
}

/// Writes every balance as CSV.
///
/// # CSV Format
///
/// Columns: `id, point, updated_at`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_balances<W: Write>(service: &PointService, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for point in service.balances() {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the history of every user as CSV, grouped by user.
///
/// # CSV Format
///
/// Columns: `id, user_id, amount, tx_type, recorded_at`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_history<W: Write>(service: &PointService, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for point in service.balances() {
        for entry in service.get_history(point.id) {
            wtr.serialize(entry)?;
        }
    }
    wtr.flush()?;
    Ok(())
}
