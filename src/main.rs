// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use metatube_translator::app_config::{LogLevel, TranslationEngine};
use metatube_translator::app_controller::{load_config, ConfigOverrides, Controller};

/// CLI Wrapper for TranslationEngine to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationEngine {
    Baidu,
    Google,
    GoogleFree,
    #[value(name = "deepl")]
    DeepL,
    #[value(name = "openai")]
    OpenAi,
}

impl From<CliTranslationEngine> for TranslationEngine {
    fn from(cli_engine: CliTranslationEngine) -> Self {
        match cli_engine {
            CliTranslationEngine::Baidu => TranslationEngine::Baidu,
            CliTranslationEngine::Google => TranslationEngine::Google,
            CliTranslationEngine::GoogleFree => TranslationEngine::GoogleFree,
            CliTranslationEngine::DeepL => TranslationEngine::DeepL,
            CliTranslationEngine::OpenAi => TranslationEngine::OpenAi,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a movie metadata JSON file
    Movie(RecordArgs),

    /// Translate an actor metadata JSON file
    Actor(RecordArgs),
}

#[derive(Parser, Debug)]
struct RecordArgs {
    /// JSON file holding the record
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Target language code (e.g., 'en', 'zh-CN', 'fr')
    #[arg(short, long)]
    to: String,

    /// Write the translated record here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Translate MetaTube movie and actor metadata
#[derive(Parser, Debug)]
#[command(name = "metatube-translator")]
#[command(version)]
#[command(about = "Translate movie and actor metadata through a MetaTube server")]
#[command(long_about = "Reads a movie or actor record as JSON, translates its text fields
through the configured engine and prints the translated record.

EXAMPLES:
    metatube-translator movie info.json --to en
    metatube-translator -e deepl movie info.json --to de -o info.de.json
    metatube-translator actor actor.json --to zh-CN

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Translation engine, overriding the configuration
    #[arg(short, long, value_enum, global = true)]
    engine: Option<CliTranslationEngine>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; log::set_max_level narrows it later
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let overrides = ConfigOverrides {
        engine: cli.engine.clone().map(Into::into),
        log_level: cli.log_level.clone().map(Into::into),
    };
    if let Some(level) = &overrides.log_level {
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(Path::new(&cli.config_path), &overrides)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(&config)?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling translation");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Movie(args) => controller
            .translate_movie_file(&args.input, &args.to, args.output.as_deref(), &cancel)
            .await
            .context("Movie translation failed")?,
        Commands::Actor(args) => controller
            .translate_actor_file(&args.input, &args.to, args.output.as_deref(), &cancel)
            .await
            .context("Actor translation failed")?,
    }

    Ok(())
}
