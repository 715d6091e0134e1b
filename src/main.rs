use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pingwatch::data::duration::parse_interval;
use pingwatch::{
    KeyboardControls, MonitorLoop, Overrides, PingProbe, Settings, TerminalCanvas, TerminalGuard,
    Theme,
};

#[derive(Parser, Debug)]
#[command(name = "pingwatch", version)]
#[command(about = "Monitors latency to a host and displays a real-time graph in the terminal")]
struct Args {
    /// The host or IP address to ping [default: 8.8.8.8]
    host: Option<String>,

    /// Interval between pings in seconds, at most one day (e.g. 0.5, 1, 10, or "500ms") [default: 3]
    #[arg(short, long, value_parser = interval_arg)]
    interval: Option<f64>,

    /// Reference maximum value for the graph Y-axis, in ms [default: 200]
    #[arg(long)]
    ymax: Option<f64>,

    /// Desired number of Y-axis ticks (at least 2) [default: 6]
    #[arg(long)]
    yticks: Option<usize>,

    /// Number of samples kept on the graph [default: 200]
    #[arg(long)]
    capacity: Option<usize>,

    /// Consecutive failures before the connection is reported lost [default: 3]
    #[arg(long)]
    alert_threshold: Option<u32>,

    /// TOML configuration file (overridden by PINGWATCH_* variables and flags)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write diagnostics to this file (the screen is taken by the graph)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "pingwatch=trace")
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            interval: self.interval,
            ymax: self.ymax,
            yticks: self.yticks,
            capacity: self.capacity,
            alert_threshold: self.alert_threshold,
            log_file: self.log_file.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn interval_arg(s: &str) -> Result<f64, String> {
    parse_interval(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref(), args.overrides())
        .context("Invalid configuration")?;
    init_logging(&settings)?;

    let probe = PingProbe::new()?;
    // Query the background colour before the terminal switches to the alternate screen.
    let theme = Theme::auto_detect();

    run_tui(&settings, probe, theme)?;
    println!("Monitoring stopped by user.");
    Ok(())
}

/// Run the monitor on the real terminal, restoring it on every exit path.
fn run_tui(settings: &Settings, probe: PingProbe, theme: Theme) -> Result<()> {
    let (guard, terminal) = TerminalGuard::acquire()?;

    let canvas = TerminalCanvas::new(terminal, theme);
    let mut monitor = MonitorLoop::new(settings, probe, canvas)?;
    let result = monitor.run(&mut KeyboardControls);

    drop(monitor);
    drop(guard);

    result.with_context(|| format!("Monitoring {} stopped", settings.host))
}

/// Send `tracing` output to the configured log file, if any.
fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = settings.log_file.as_ref() else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
