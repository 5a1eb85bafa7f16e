#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Table, TableColumn, Workbook};
use tempfile::TempDir;

/// Value written into a config fixture cell.
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Bool(bool),
    Blank,
}

pub use Cell::{Blank, Bool, Number, Text};

/// Writes a config workbook whose sheet `sheet` holds table `table` at A1.
pub fn write_config(
    path: &Path,
    sheet: &str,
    table: &str,
    headers: &[&str],
    rows: &[Vec<Cell>],
) -> PathBuf {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Text(s) => {
                    worksheet.write_string(r, c, *s).unwrap();
                }
                Number(n) => {
                    worksheet.write_number(r, c, *n).unwrap();
                }
                Bool(b) => {
                    worksheet.write_boolean(r, c, *b).unwrap();
                }
                Blank => {}
            }
        }
    }

    let columns: Vec<TableColumn> = headers
        .iter()
        .map(|h| TableColumn::new().set_header(*h))
        .collect();
    let spec = Table::new().set_name(table).set_columns(&columns);
    worksheet
        .add_table(0, 0, rows.len() as u32, headers.len() as u16 - 1, &spec)
        .unwrap();

    workbook.save(path).unwrap();
    path.to_path_buf()
}

/// Standard config fixture: sheet `config`, table `table_config`.
pub fn config_file(dir: &TempDir, headers: &[&str], rows: &[Vec<Cell>]) -> PathBuf {
    write_config(
        &dir.path().join("config.xlsx"),
        "config",
        "table_config",
        headers,
        rows,
    )
}

/// Writes a format workbook with the given sheets and string cells.
pub fn format_file(dir: &TempDir, sheets: &[(&str, &[(&str, &str)])]) -> PathBuf {
    let path = dir.path().join("format.xlsx");
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for (name, cells) in sheets {
        let sheet = book.new_sheet(*name).unwrap();
        for (address, text) in cells.iter() {
            sheet.get_cell_mut(*address).set_value_string(*text);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

pub fn sheet_names(path: &Path) -> Vec<String> {
    let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
    book.get_sheet_collection()
        .iter()
        .map(|s| s.get_name().to_string())
        .collect()
}

pub fn cell_text(path: &Path, sheet: &str, address: &str) -> Option<String> {
    let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
    book.get_sheet_by_name(sheet)?
        .get_cell(address)
        .map(|c| c.get_value().to_string())
}

pub fn active_sheet(path: &Path) -> String {
    let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
    book.get_active_sheet().get_name().to_string()
}
