use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use design_patterns::behavioral::strategy;
use design_patterns::catalog::{self, Category, Example, Pattern, PatternInfo};
use design_patterns::config::CatalogConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    Creational,
    Structural,
    Behavioral,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Creational => Category::Creational,
            CategoryArg::Structural => Category::Structural,
            CategoryArg::Behavioral => Category::Behavioral,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ExampleArg {
    Conceptual,
    RealWorld,
    #[default]
    Both,
}

impl From<ExampleArg> for Example {
    fn from(arg: ExampleArg) -> Self {
        match arg {
            ExampleArg::Conceptual => Example::Conceptual,
            ExampleArg::RealWorld => Example::RealWorld,
            ExampleArg::Both => Example::Both,
        }
    }
}

/// Runs the design pattern demos
#[derive(Parser, Debug)]
#[command(name = "patterns", version, about)]
struct Cli {
    /// TOML file with demo settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level; RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the patterns in the catalogue
    List {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run one pattern's demos
    Run {
        /// Pattern slug or name, e.g. `template-method`
        pattern: String,

        #[arg(long, value_enum, default_value_t = ExampleArg::Both)]
        example: ExampleArg,
    },

    /// Run every pattern's demos in catalogue order
    RunAll {
        #[arg(long, value_enum, default_value_t = ExampleArg::Both)]
        example: ExampleArg,
    },

    /// Strategy calculator: addition, subtraction or multiplication
    Calc {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
        action: String,
    },
}

fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CatalogConfig> {
    let mut config = CatalogConfig::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load default config".to_string(),
    })?;
    config.apply_env_overrides();
    config.validate().context("Invalid config after environment overrides")?;
    Ok(config)
}

fn print_table(entries: &[PatternInfo]) {
    println!(
        "{:<26} {:<12} {}",
        "PATTERN".bold(),
        "CATEGORY".bold(),
        "INTENT".bold()
    );
    for info in entries {
        println!(
            "{:<26} {:<12} {}",
            info.slug.cyan(),
            info.category.to_string(),
            info.intent
        );
    }
}

fn run_pattern(pattern: Pattern, example: Example, config: &CatalogConfig) -> Result<()> {
    println!(
        "{}",
        format!("=== {} ({}) ===", pattern.name(), pattern.category())
            .bold()
            .green()
    );
    let transcript = catalog::run(pattern, example, config)
        .with_context(|| format!("Demo for {} failed", pattern.name()))?;
    println!("{}", transcript);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    match cli.command {
        Command::List { category, json } => {
            let entries = catalog::entries(category.map(Category::from));
            if json {
                let output =
                    serde_json::to_string_pretty(&entries).context("Failed to serialize catalogue")?;
                println!("{}", output);
            } else {
                print_table(&entries);
            }
        }
        Command::Run { pattern, example } => {
            let config = load_config(cli.config.as_deref())?;
            let pattern: Pattern = pattern.parse()?;
            run_pattern(pattern, example.into(), &config)?;
        }
        Command::RunAll { example } => {
            let config = load_config(cli.config.as_deref())?;
            for (i, pattern) in Pattern::ALL.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                run_pattern(pattern, example.into(), &config)?;
            }
        }
        Command::Calc { a, b, action } => {
            let result = strategy::calculate(a, b, &action)
                .with_context(|| format!("Cannot calculate {} {} {}", a, action, b))?;
            println!("{}", result);
        }
    }

    Ok(())
}
