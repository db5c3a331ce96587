use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use telecommander::LogLevel;
use telecommander::core::config::{self, Overrides};
use telecommander::tui::{self, Exit};

#[derive(Parser)]
#[command(name = "telecommander", version, about = "Two-pane terminal directory browser")]
struct Args {
    /// Bytes read from a file when previewing it
    #[arg(long, value_name = "BYTES")]
    preview_bytes: Option<usize>,

    /// How long each frame waits for a keypress, in milliseconds
    #[arg(long, value_name = "MS")]
    poll_ms: Option<u64>,

    /// Row of the divider between the help block and the preview pane
    #[arg(long, value_name = "ROW")]
    divider_row: Option<u16>,

    /// Most directory entries listed
    #[arg(long, value_name = "N")]
    max_entries: Option<usize>,

    /// Log file (defaults to telecommander.log in the user cache directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t, value_enum)]
    log_level: LogLevel,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_file.clone(), args.log_level.into());

    let overrides = Overrides {
        preview_bytes: args.preview_bytes,
        poll_ms: args.poll_ms,
        divider_row: args.divider_row,
        max_entries: args.max_entries,
    };
    let config = match config::resolve(&overrides) {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {err}");
            eprintln!("telecommander: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!("Telecommander starting up with {:?}", config);

    // The terminal has been restored by the time run() returns.
    match tui::run(&config) {
        Ok(exit) => {
            if let Exit::Signalled(signal) = exit {
                info!("Exiting on signal {signal}");
            }
            ExitCode::from(exit.status())
        }
        Err(err) if err.is_terminal_too_small() => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("Fatal: {err}");
            eprintln!("telecommander: {err}");
            ExitCode::FAILURE
        }
    }
}

/// File logger: the terminal belongs to the UI, so nothing goes to stderr.
fn init_logging(path: Option<PathBuf>, level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = path.or_else(default_log_path) else {
        return;
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("telecommander").join("telecommander.log"))
}
