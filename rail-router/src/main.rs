use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use rail_router::config::DEFAULT_STATIONS_PATH;
use rail_router::{Router, RouterConfig};

/// Printed when a request cannot be processed at all.
const ERROR_MESSAGE: &str = "Unable to process request. Terminating application now.";

const FROM_PROMPT: &str = "Enter starting station: ";
const TO_PROMPT: &str = "Enter destination station: ";
const AT_PROMPT: &str = "Enter travel date time (YYYY-MM-DDTHH:mm e.g. 2021-01-28T07:00): ";

/// Find the fastest route between two stations.
///
/// Any of --from, --to and --at that are not given are asked for on stdin.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Station master list (CSV)
    #[arg(long, default_value = DEFAULT_STATIONS_PATH)]
    stations: PathBuf,

    /// Cost table overriding the built-in frequencies (JSON)
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Starting station name
    #[arg(long)]
    from: Option<String>,

    /// Destination station name
    #[arg(long)]
    to: Option<String>,

    /// Travel date time, e.g. 2021-01-28T07:00
    #[arg(long)]
    at: Option<String>,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only prompts and the response.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = RouterConfig::new(&args.stations);
    if let Some(costs) = &args.costs {
        config = config.with_costs_path(costs);
    }

    let router = match Router::from_config(&config) {
        Ok(router) => router,
        Err(e) => {
            error!(error = %e, "failed to set up router");
            println!("{ERROR_MESSAGE}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let inputs = (|| -> io::Result<(String, String, String)> {
        let from = value_or_prompt(args.from, &mut stdin, &mut stdout, FROM_PROMPT)?;
        let to = value_or_prompt(args.to, &mut stdin, &mut stdout, TO_PROMPT)?;
        let at = value_or_prompt(args.at, &mut stdin, &mut stdout, AT_PROMPT)?;
        Ok((from, to, at))
    })();

    let (from, to, at) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => {
            error!(error = %e, "failed to read input");
            println!("{ERROR_MESSAGE}");
            return ExitCode::FAILURE;
        }
    };

    match router.respond(&from, &to, &at) {
        Ok(response) => {
            println!("{response}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to process request");
            println!("{ERROR_MESSAGE}");
            ExitCode::FAILURE
        }
    }
}

/// Use the command-line value if given, otherwise prompt for one line.
///
/// Closed input is an error rather than an empty answer.
fn value_or_prompt(
    value: Option<String>,
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> io::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before a value was entered",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
