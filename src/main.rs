//! MPS7 report CLI
//!
//! Decodes an MPS7 transaction log and prints its summary totals.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- txnlog.dat [--csv] [--watch-user <id>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `MPS7_WATCH_USER`: User id whose balance is reported (overridden by `--watch-user`)

use mps7::{report, Error, LogProcessor, ReportFormat, Result, DEFAULT_WATCH_USER_ID};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

const WATCH_USER_ENV: &str = "MPS7_WATCH_USER";

/// Settings collected from the command line and environment.
#[derive(Debug)]
struct Config {
    input_path: String,
    format: ReportFormat,
    watch_user_id: u64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = parse_args(env::args().skip(1), env::var(WATCH_USER_ENV).ok())?;

    let file = File::open(&config.input_path)?;
    let reader = BufReader::new(file);

    let summary = LogProcessor::new(config.watch_user_id).process(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    report::write_report(&summary.state, config.format, handle)?;

    Ok(())
}

fn parse_args<I>(args: I, env_watch_user: Option<String>) -> Result<Config>
where
    I: IntoIterator<Item = String>,
{
    let mut input_path = None;
    let mut format = ReportFormat::Text;
    let mut watch_user = env_watch_user.map(|value| (WATCH_USER_ENV.to_string(), value));

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--csv" {
            format = ReportFormat::Csv;
        } else if arg == "--watch-user" {
            let value = args.next().ok_or_else(|| Error::InvalidArgument {
                flag: arg.clone(),
                value: String::new(),
            })?;
            watch_user = Some((arg, value));
        } else if input_path.is_none() {
            input_path = Some(arg);
        } else {
            return Err(Error::InvalidArgument {
                flag: "arguments".to_string(),
                value: arg,
            });
        }
    }

    let watch_user_id = match watch_user {
        Some((flag, value)) => match value.trim().parse::<u64>() {
            Ok(id) => id,
            Err(_) => return Err(Error::InvalidArgument { flag, value }),
        },
        None => DEFAULT_WATCH_USER_ID,
    };

    Ok(Config {
        input_path: input_path.ok_or(Error::MissingArgument)?,
        format,
        watch_user_id,
    })
}
