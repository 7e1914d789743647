//! bjamlog - Build log classifier for bjam/b2
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Report;
use tracing::{error, info, warn};

use bjamlog_app::config::generate_default_config;
use bjamlog_app::{
    load_settings, load_settings_file, run, ColorMode, ReportFormat, Settings, SettingsOverrides,
};

/// Exit status when the logs call for halting the outer build
const EXIT_BUILD_FAILED: u8 = 1;

/// Exit status for errors that prevented a report (missing log, I/O, config)
const EXIT_ERROR: u8 = 2;

/// Parse bjam's logs.
#[derive(Parser, Debug)]
#[command(name = "bjamlog", version)]
#[command(about = "Parse bjam's logs.", long_about = None)]
struct Args {
    /// bjam's logs (repeat for several logs)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        required_unless_present = "print_config",
        value_parser = check_path
    )]
    files: Vec<PathBuf>,

    /// Emit one JSON document per log instead of the text report
    #[arg(long)]
    json: bool,

    /// Colour policy for the text report: auto, always or never
    #[arg(long, value_name = "WHEN")]
    color: Option<ColorMode>,

    /// Do not print captured compiler output under failures
    #[arg(long)]
    no_details: bool,

    /// Settings file (defaults to ./.bjamlog/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Always exit 0 once the report was written
    #[arg(long)]
    no_fail: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            format: self.json.then_some(ReportFormat::Json),
            color: self.color,
            show_details: self.no_details.then_some(false),
            fail_on_failures: self.no_fail.then_some(false),
            fail_on_unknown: self.no_fail.then_some(false),
        }
    }
}

/// Paths checker
fn check_path(p: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(p);
    if !path.exists() {
        return Err(format!("{} does not exist", p));
    }
    Ok(path)
}

fn load(args: &Args) -> bjamlog_core::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_file(path)?,
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            load_settings(&cwd)
        }
    };
    settings.apply(&args.overrides());
    Ok(settings)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = color_eyre::install() {
        eprintln!("warning: failed to install error reporter: {e}");
    }

    if args.print_config {
        print!("{}", generate_default_config());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = bjamlog_core::logging::init() {
        eprintln!("warning: logging disabled: {e}");
    }

    let settings = match load(&args) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Settings error: {}", e);
            eprintln!("{:?}", Report::new(e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match run(&args.files, &settings, &mut stdout) {
        Ok(verdict) if verdict.should_fail(&settings.behavior) => {
            warn!("Halting build: {:?}", verdict);
            ExitCode::from(EXIT_BUILD_FAILED)
        }
        Ok(verdict) => {
            info!("Build logs accepted: {:?}", verdict);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("bjamlog failed: {}", e);
            eprintln!("{:?}", Report::new(e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
