//! Reference price estimator CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use price_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    options, run_adjust, run_clear, run_generate, run_hydrate, run_init, run_parse_amount,
    run_price, run_show,
};
use crate::summary::{
    print_adjust, print_amounts, print_generation, print_init, print_justifications,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config = cli.config.as_deref();
    match &cli.command {
        Command::Init(args) => {
            let result = run_init(args, &options(config)?)?;
            print_init(&result);
        }
        Command::Show(args) => run_show(args)?,
        Command::Price(args) => match run_price(args)? {
            Some(value) => println!("{}: last quoted price set to {value}", args.item),
            None => println!("{}: last quoted price cleared", args.item),
        },
        Command::Hydrate(args) => {
            let filled = run_hydrate(args)?;
            println!("Filled {filled} last quoted price(s).");
        }
        Command::Adjust(args) => {
            let result = run_adjust(args, &options(config)?)?;
            print_adjust(&result);
        }
        Command::Clear(args) => {
            if run_clear(args)? {
                println!("{}: override removed", args.item);
            } else {
                println!("{}: no override to remove", args.item);
            }
        }
        Command::Generate(args) => {
            let result = run_generate(args, &options(config)?)?;
            print_generation(&result);
        }
        Command::ParseAmount(args) => {
            let amounts = run_parse_amount(args);
            print_amounts(&amounts);
            if amounts.iter().any(|amount| amount.value.is_none()) {
                return Ok(1);
            }
        }
        Command::Justifications => {
            print_justifications(&options(config)?.justifications);
        }
    }
    Ok(0)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
