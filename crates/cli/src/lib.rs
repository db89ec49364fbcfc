pub mod commands;
pub mod rules;

use std::path::PathBuf;
use std::process::ExitCode;

use bundly_core::config::{AppConfig, LoadOptions};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use commands::render::RenderArgs;
use commands::check::CheckArgs;

#[derive(Debug, Parser)]
#[command(
    name = "bundly",
    about = "Bundly storefront block tool",
    long_about = "Render, validate, and inspect bundle-discount storefront blocks from rule files.",
    after_help = "Examples:\n  bundly render --rule rules.json --product p-1 --price 10\n  bundly check --rule rules.json --product p-1\n  bundly templates"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Render the storefront block HTML for one product view")]
    Render {
        #[arg(long, help = "Rule file (one rule object or an array)")]
        rule: PathBuf,
        #[arg(long, help = "Product id the shopper is viewing")]
        product: String,
        #[arg(long, help = "Unit price in shop currency")]
        price: Decimal,
        #[arg(long, help = "Override the mapped block template with this file")]
        template: Option<PathBuf>,
    },
    #[command(about = "Validate a rule file and flag ambiguous visibility configurations")]
    Check {
        #[arg(long, help = "Rule file (one rule object or an array)")]
        rule: PathBuf,
        #[arg(long, help = "Also report which rule wins for this product id")]
        product: Option<String>,
    },
    #[command(about = "List the built-in block template handles")]
    Templates,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

fn init_logging(config: &AppConfig) {
    use bundly_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("config validation failed: {error}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Render { rule, product, price, template } => commands::render::run(
            &config,
            &RenderArgs {
                rule_path: rule,
                product_id: product,
                unit_price: price,
                template_path: template,
            },
        ),
        Command::Check { rule, product } => {
            commands::check::run(&CheckArgs { rule_path: rule, product_id: product })
        }
        Command::Templates => commands::templates::run(),
        Command::Config => commands::config::run(&config),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
