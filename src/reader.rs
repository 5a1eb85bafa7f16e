use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::trace;

use crate::cell::TypedCellValue;
use crate::error::{RackError, RackResult};
use crate::record::ConfigTable;

pub const CONFIG_SHEET: &str = "config";
pub const CONFIG_TABLE: &str = "table_config";

/// Reads the `table_config` table of the `config` sheet.
pub fn read_config_table(path: &Path) -> RackResult<ConfigTable> {
    if !path.exists() {
        return Err(RackError::FileNotFound(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| RackError::spreadsheet(path, e))?;

    if !workbook.sheet_names().iter().any(|name| name == CONFIG_SHEET) {
        return Err(RackError::WorksheetNotFound {
            sheet: CONFIG_SHEET.to_string(),
            path: path.to_path_buf(),
        });
    }

    workbook
        .load_tables()
        .map_err(|e| RackError::spreadsheet(path, e))?;

    let table_names: Vec<String> = workbook
        .table_names_in_sheet(CONFIG_SHEET)
        .into_iter()
        .cloned()
        .collect();
    for name in &table_names {
        trace!("table name:{name}");
    }
    if !table_names.iter().any(|name| name == CONFIG_TABLE) {
        return Err(RackError::TableNotFound {
            table: CONFIG_TABLE.to_string(),
            sheet: CONFIG_SHEET.to_string(),
        });
    }
    trace!("found table {CONFIG_TABLE} on sheet {CONFIG_SHEET}");

    let table = workbook
        .table_by_name(CONFIG_TABLE)
        .map_err(|e| RackError::spreadsheet(path, e))?;

    table_from_range(table.columns().to_vec(), table.data())
}

/// Turns the data rows of a table into records, one per row, keyed by `headers`.
pub fn table_from_range(headers: Vec<String>, data: &Range<Data>) -> RackResult<ConfigTable> {
    let width = headers.len();
    let rows = data.rows().map(|row| {
        (0..width)
            .map(|col| row.get(col).map(TypedCellValue::from).unwrap_or(TypedCellValue::Blank))
            .collect::<Vec<_>>()
    });
    ConfigTable::from_rows(CONFIG_TABLE, headers, rows)
}
