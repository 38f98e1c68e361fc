use nbsim::{load_scenario, run, write_report, Engine, ExecutionMode, Scenario};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;

use std::io::{self, Write};
use std::path::PathBuf;

/// Parallel direct-summation 2D n-body simulator
#[derive(Parser, Debug)]
#[command(version, override_usage = "nbsim <config-file-path> <worker-count> [--dt DT] [--eps EPS] [--pool]")]
struct Args {
    /// Scenario file: plain `G N K` + `m x y vx vy` records, or .yaml/.yml
    config: PathBuf,

    /// Number of worker threads sharing the force computation
    #[arg(allow_negative_numbers = true)]
    worker_count: i64,

    /// Step size (overrides the scenario)
    #[arg(long)]
    dt: Option<f64>,

    /// Floor for the cubed distance (overrides the scenario)
    #[arg(long)]
    eps: Option<f64>,

    /// Keep the workers alive for the whole run instead of spawning them every step
    #[arg(long)]
    pool: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                e.print()?;
                return Ok(());
            }
            ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument | ErrorKind::TooManyValues => {
                // wrong argument count: usage on stdout, nothing simulated
                if e.kind() == ErrorKind::UnknownArgument {
                    eprintln!("{e}");
                }
                println!("Usage : nbsim <config-file-path> <worker-count>");
                return Ok(());
            }
            _ => return Err(nbsim::SimError::InvalidConfiguration(e.to_string()).into()),
        },
    };

    let mode = if args.pool { ExecutionMode::PersistentPool } else { ExecutionMode::SpawnPerStep };
    let engine = Engine::from_worker_count(args.worker_count, mode)?;

    let mut cfg = load_scenario(&args.config)?;
    if args.dt.is_some() {
        cfg.parameters.dt = args.dt;
    }
    if args.eps.is_some() {
        cfg.parameters.eps = args.eps;
    }

    let mut scenario = Scenario::build_scenario(cfg, engine)?;
    let report = run(&mut scenario);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &scenario.system, report.elapsed)?;
    out.flush()?;

    Ok(())
}
