use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use revo_store::{
    config::{resolve_stage, StoreConfig},
    migrate::{self, Migrations},
};

const USAGE: &str =
    "Usage: migrate [run|status|revert] [-d|--dry-run] [-v] [-s|--stage STAGE] [-p|--path DIR]";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run,
    Status,
    Revert,
}

#[derive(Debug)]
struct Options {
    command: Command,
    dry_run: bool,
    verbose: bool,
    stage: Option<String>,
    path: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options {
        command: Command::Run,
        dry_run: false,
        verbose: false,
        stage: None,
        path: None,
    };
    let mut command_seen = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" | "--dry-run" => options.dry_run = true,
            "-v" | "--verbose" => options.verbose = true,
            "-s" | "--stage" => {
                let stage = args.next().ok_or_else(|| anyhow!("{arg} needs a value"))?;
                options.stage = Some(stage);
            }
            "-p" | "--path" => {
                let path = args.next().ok_or_else(|| anyhow!("{arg} needs a value"))?;
                options.path = Some(PathBuf::from(path));
            }
            "run" | "status" | "revert" if !command_seen => {
                command_seen = true;
                options.command = match arg.as_str() {
                    "status" => Command::Status,
                    "revert" => Command::Revert,
                    _ => Command::Run,
                };
            }
            other => return Err(anyhow!("unexpected argument: {other}")),
        }
    }

    Ok(options)
}

fn main() -> Result<()> {
    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            process::exit(1);
        }
    };
    init_tracing(options.verbose);

    let stage = resolve_stage(options.stage.as_deref());
    let config = StoreConfig::for_stage(&stage)?;
    let source = match options.path.as_ref().or(config.migrations_dir.as_ref()) {
        Some(dir) => Migrations::from_dir(dir)?,
        None => Migrations::Embedded,
    };
    tracing::info!(
        component = "migrate",
        database_url = %config.redacted_database_url(),
        stage = %config.stage,
        max_pool_size = config.database_max_pool_size,
        migrations = %source.describe(),
        dry_run = options.dry_run,
        "loaded store configuration"
    );

    let pool = config.init_pool()?;
    let mut conn = pool.get().context("failed to get database connection")?;

    match options.command {
        Command::Run if options.dry_run => {
            let pending = migrate::pending(&mut conn, &source)?;
            if pending.is_empty() {
                println!("Nothing to migrate.");
            }
            for name in pending {
                println!("would apply {name}");
            }
        }
        Command::Run => {
            let applied = migrate::run_pending(&mut conn, &source)?;
            println!("Applied {} migration(s).", applied.len());
        }
        Command::Status => {
            let status = migrate::status(&mut conn, &source)?;
            for version in &status.applied {
                println!("applied  {version}");
            }
            for name in &status.pending {
                println!("pending  {name}");
            }
        }
        Command::Revert if options.dry_run => {
            println!("--dry-run is not supported for revert");
            process::exit(1);
        }
        Command::Revert => {
            let version = migrate::revert_last(&mut conn, &source)?;
            println!("Reverted {version}.");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
