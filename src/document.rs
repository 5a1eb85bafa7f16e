//! Spreadsheet document used as the fill target.
//!
//! The fill pass only needs a handful of operations on the output workbook, collected
//! in [`TemplateWorkbook`]. [`XlsxWorkbook`] provides them on top of `umya-spreadsheet`.

use std::path::{Path, PathBuf};

use umya_spreadsheet::Spreadsheet;

use crate::error::{RackError, RackResult};
use crate::sheet_name::validate_sheet_name;
use crate::text::contains_ignoring_marks;

/// Operations the template filler performs on a workbook.
///
/// Cells are addressed in A1 notation.
pub trait TemplateWorkbook {
    /// Where the workbook lives, for error messages.
    fn location(&self) -> &Path;

    /// Worksheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }

    /// Appends a copy of `template` named `target`. Returns the number of cells of the copy.
    fn copy_sheet(&mut self, template: &str, target: &str) -> Result<usize, String>;

    /// Every cell of `sheet` that holds a value, with its text.
    fn cell_texts(&self, sheet: &str) -> Vec<(String, String)>;

    fn cell_text(&self, sheet: &str, address: &str) -> Option<String>;

    /// Stores `text` as a string cell.
    fn set_cell_text(&mut self, sheet: &str, address: &str, text: &str);

    fn remove_sheet(&mut self, name: &str) -> Result<(), String>;

    /// Addresses of the cells of `sheet` whose text contains `token`, ignoring accent marks.
    fn search(&self, sheet: &str, token: &str) -> Vec<String> {
        self.cell_texts(sheet)
            .into_iter()
            .filter(|(_, text)| contains_ignoring_marks(text, token))
            .map(|(address, _)| address)
            .collect()
    }
}

/// An `.xlsx` workbook loaded fully into memory.
pub struct XlsxWorkbook {
    path: PathBuf,
    book: Spreadsheet,
}

impl XlsxWorkbook {
    pub fn open(path: &Path) -> RackResult<Self> {
        let book = umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| RackError::spreadsheet(path, format!("cannot open for writing: {e}")))?;
        Ok(Self {
            path: path.to_path_buf(),
            book,
        })
    }

    /// Makes the first worksheet the active one.
    pub fn reset_active_sheet(&mut self) {
        self.book.set_active_sheet(0);
    }

    pub fn save(&self) -> RackResult<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path)
            .map_err(|e| RackError::spreadsheet(&self.path, format!("cannot save: {e}")))
    }
}

impl TemplateWorkbook for XlsxWorkbook {
    fn location(&self) -> &Path {
        &self.path
    }

    fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect()
    }

    fn has_sheet(&self, name: &str) -> bool {
        self.book.get_sheet_by_name(name).is_some()
    }

    fn copy_sheet(&mut self, template: &str, target: &str) -> Result<usize, String> {
        validate_sheet_name(target, &self.sheet_names())?;
        let mut copy = self
            .book
            .get_sheet_by_name(template)
            .ok_or_else(|| format!("worksheet '{template}' does not exist"))?
            .clone();
        copy.set_name(target);
        let added = self.book.add_sheet(copy).map_err(|e| e.to_string())?;
        Ok(added.get_cell_collection().len())
    }

    fn cell_texts(&self, sheet: &str) -> Vec<(String, String)> {
        let Some(sheet) = self.book.get_sheet_by_name(sheet) else {
            return Vec::new();
        };
        sheet
            .get_cell_collection()
            .into_iter()
            .map(|cell| {
                (
                    cell.get_coordinate().get_coordinate(),
                    cell.get_value().to_string(),
                )
            })
            .collect()
    }

    fn cell_text(&self, sheet: &str, address: &str) -> Option<String> {
        self.book
            .get_sheet_by_name(sheet)?
            .get_cell(address)
            .map(|cell| cell.get_value().to_string())
    }

    fn set_cell_text(&mut self, sheet: &str, address: &str, text: &str) {
        if let Some(sheet) = self.book.get_sheet_by_name_mut(sheet) {
            sheet.get_cell_mut(address).set_value_string(text);
        }
    }

    fn remove_sheet(&mut self, name: &str) -> Result<(), String> {
        self.book.remove_sheet_by_name(name).map_err(|e| e.to_string())
    }
}
