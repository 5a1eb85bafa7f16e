use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use crate::error::RackError;
use crate::logging::{self, Verbosity};
use crate::replace::replace;
use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "rackreplace")]
#[command(about = "Clone template sheets per config row and fill in the row's values")]
#[command(version)]
pub struct Cli {
    /// Workbook with a `config` sheet holding the `table_config` table
    pub configpath: PathBuf,

    /// Workbook whose sheets are used as templates
    pub format: PathBuf,

    /// Output workbook, overwritten if it exists
    pub outpath: PathBuf,

    /// JSON settings file (defaults to ./appsettings.json when present)
    #[arg(long, env = "RACKREPLACE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Config column naming the template sheet to copy
    #[arg(long, env = "RACK_SELECT_SHEET_TYPE")]
    pub sheet_type_column: Option<String>,

    /// Config column naming the new sheet
    #[arg(long, env = "RACK_SELECT_SHEET_NAME")]
    pub sheet_name_column: Option<String>,

    /// Also write rolling log files into this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// More console output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Exit code for command lines clap rejects (`EX_USAGE`).
pub const USAGE_EXIT_CODE: u8 = 64;

/// Parses `args`, runs the replace command and maps failures to exit codes.
pub fn run(args: impl IntoIterator<Item = OsString>) -> ExitCode {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version print to stdout and exit 0.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    if let Err(err) = logging::init(verbosity, cli.log_dir.as_deref()) {
        eprintln!("[ERROR] cannot set up logging: {err}");
        return ExitCode::FAILURE;
    }

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("[ERROR] {err:#}");
            let code = err
                .downcast_ref::<RackError>()
                .map(RackError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let settings = Settings::discover(cli.settings.as_deref(), &cwd)?
        .with_overrides(cli.sheet_type_column.clone(), cli.sheet_name_column.clone());

    replace(&cli.configpath, &cli.format, &cli.outpath, &settings)?;
    Ok(())
}
