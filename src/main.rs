use anyhow::Result;
use clap::Parser;
use hoardrisk::cli::{Cli, Commands};
use hoardrisk::commands;
use hoardrisk::config::{load_config, HoardriskConfig, LoadedConfig};
use hoardrisk::formatting::{formatter_for, FormattingConfig};
use hoardrisk::record::SystemClock;
use std::io;
use std::process::ExitCode;

// Map -v repetitions to a default level; RUST_LOG still wins.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn use_table_color(plain: bool) -> bool {
    !plain && FormattingConfig::from_env().color.should_use_color()
}

fn load(explicit: Option<&std::path::Path>) -> Result<HoardriskConfig> {
    let LoadedConfig { config, source } = load_config(explicit)?;
    match &source {
        Some(path) => log::info!("Using config {}", path.display()),
        None => log::info!("Using default config"),
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let formatter = formatter_for(cli.plain);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Init { force } => {
            let path = commands::init_config(&std::env::current_dir()?, force)?;
            println!("Created {}", path.display());
        }
        Commands::Classify {
            total,
            critical,
            scores,
            format,
        } => {
            commands::run_classify(
                &mut out,
                formatter.as_ref(),
                total,
                critical,
                scores.as_deref(),
                format,
            )?;
        }
        Commands::Assess(args) => {
            let config = load(cli.config.as_deref())?;
            let recorder = commands::open_recorder(&config);
            let stdin = io::stdin();
            commands::run_assess(
                &mut stdin.lock(),
                &mut out,
                formatter.as_ref(),
                &config,
                &recorder,
                &SystemClock,
                &args,
            )?;
        }
        Commands::VerifyHeaders => {
            let config = load(cli.config.as_deref())?;
            let recorder = commands::open_recorder(&config);
            if !commands::run_verify_headers(&mut out, formatter.as_ref(), &recorder)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::List { tail, format } => {
            let config = load(cli.config.as_deref())?;
            let recorder = commands::open_recorder(&config);
            commands::run_list(&mut out, &recorder, tail, format, use_table_color(cli.plain))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    run(cli)
}
