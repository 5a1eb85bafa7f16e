use std::path::Path;

use tracing::{debug, info, trace};

use crate::error::{RackError, RackResult};
use crate::filler::{FillReport, fill_template};
use crate::reader::read_config_table;
use crate::settings::Settings;

pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reads the config workbook and writes one filled sheet per config row to `output`.
///
/// Both inputs are checked before anything is read, so a missing config file never
/// touches the format or the output path.
pub fn replace(
    config: &Path,
    format: &Path,
    output: &Path,
    settings: &Settings,
) -> RackResult<FillReport> {
    info!("==== {TOOL_NAME}({TOOL_VERSION}) ====");
    for path in [config, format] {
        if !path.exists() {
            return Err(RackError::FileNotFound(path.to_path_buf()));
        }
    }

    trace!("configpath:{}", config.display());
    debug!(
        "RackSelectSheetType:{} RackSelectSheetName:{}",
        settings.sheet_type_column, settings.sheet_name_column
    );

    let table = read_config_table(config)?;
    table.log_records();

    let report = fill_template(&table, format, output, settings)?;
    info!(
        "created {} sheet(s), rewrote {} cell(s), {} token(s) without match",
        report.sheets.len(),
        report.replaced_cells,
        report.search_misses
    );

    info!("==== {TOOL_NAME} finish ====");
    Ok(report)
}
