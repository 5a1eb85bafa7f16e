//! Fills copies of template worksheets with values read from a config table.
//!
//! [`read_config_table`] turns the `table_config` table of a config workbook into
//! ordered records; [`fill_template`] clones one template sheet per record and
//! replaces every column name found in its cells by the record's value.

pub mod cell;
pub mod cli;
pub mod document;
pub mod error;
pub mod filler;
pub mod logging;
pub mod reader;
pub mod record;
pub mod replace;
pub mod settings;
pub mod sheet_name;
pub mod text;

pub use cell::{CellKind, TypedCellValue};
pub use document::{TemplateWorkbook, XlsxWorkbook};
pub use error::{RackError, RackResult};
pub use filler::{FillReport, fill_sheet, fill_template, fill_workbook};
pub use reader::{CONFIG_SHEET, CONFIG_TABLE, read_config_table};
pub use record::{ConfigRecord, ConfigTable};
pub use replace::replace;
pub use settings::Settings;
