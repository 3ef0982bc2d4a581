// mpplay - pick a folder of mp3s, play one or all of them through mpg123,
// steer playback with single keys

use anyhow::Result;
use clap::Parser;
use mpplay::config::DEFAULT_CONFIG_FILE;
use mpplay::{App, Console, Settings, TerminalPlayer};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mpplay", version)]
#[command(about = "Terminal mp3 player driving mpg123 with single-key controls")]
struct Args {
    /// Directory/language file, read at startup and written when asked to save
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// TOML file overriding decoder and mixer commands
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Where the rolling log files go
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Enable developer logging (stderr + debug output)
    #[arg(long)]
    dev: bool,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,
}

fn init_logging(log_dir: &Path, dev: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(log_dir, "mpplay.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mpplay=debug"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    // Dev mode mirrors everything to stderr as well
    let stderr_layer = dev.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(guard)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = init_logging(&args.log_dir, args.dev)?;

    info!("mpplay {} starting up", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load(args.settings.as_deref())?;
    let mut app = App::new(Console::stdio(), args.config, settings, !args.no_banner);

    match app.run(|lang, settings| TerminalPlayer::new(settings, lang)) {
        Ok(outcome) => Ok(ExitCode::from(outcome.exit_code())),
        Err(e) => {
            error!("Fatal: {:#}", e);
            Err(e)
        }
    }
}
