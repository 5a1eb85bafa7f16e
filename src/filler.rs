use std::fs;
use std::path::Path;

use tracing::{info, trace, warn};

use crate::document::{TemplateWorkbook, XlsxWorkbook};
use crate::error::{RackError, RackResult};
use crate::record::{ConfigRecord, ConfigTable};
use crate::settings::Settings;
use crate::sheet_name::validate_sheet_name;
use crate::text::fold_marks;

/// What a fill run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub sheets: Vec<String>,
    pub replaced_cells: usize,
    pub search_misses: usize,
}

/// Copies `format` to `output`, fills one cloned sheet per record and saves.
///
/// The copy is made before anything else; a fatal error afterwards leaves the
/// unsaved copy on disk.
pub fn fill_template(
    table: &ConfigTable,
    format: &Path,
    output: &Path,
    settings: &Settings,
) -> RackResult<FillReport> {
    info!("== start fill_template ==");
    if !format.exists() {
        return Err(RackError::FileNotFound(format.to_path_buf()));
    }
    if output.exists() && fs::canonicalize(format)? == fs::canonicalize(output)? {
        return Err(RackError::OutputIsTemplate(output.to_path_buf()));
    }

    fs::copy(format, output)?;
    let mut book = XlsxWorkbook::open(output)?;

    let report = fill_workbook(&mut book, table, settings)?;
    if book.sheet_names().is_empty() {
        return Err(RackError::EmptyOutput(output.to_path_buf()));
    }
    book.reset_active_sheet();
    book.save()?;
    Ok(report)
}

/// Clones and fills a sheet per record, then drops the sheets the workbook started with.
pub fn fill_workbook<W: TemplateWorkbook>(
    book: &mut W,
    table: &ConfigTable,
    settings: &Settings,
) -> RackResult<FillReport> {
    let templates = book.sheet_names();
    let mut report = FillReport::default();

    for record in table.records() {
        let sheet = clone_for_record(book, record, settings)?;
        fill_sheet(book, &sheet, record, &mut report);
        report.sheets.push(sheet);
    }

    for name in &templates {
        trace!("delete format sheet:{name}");
        book.remove_sheet(name).map_err(|reason| {
            RackError::spreadsheet(book.location(), format!("cannot delete worksheet '{name}': {reason}"))
        })?;
    }

    Ok(report)
}

fn clone_for_record<W: TemplateWorkbook>(
    book: &mut W,
    record: &ConfigRecord,
    settings: &Settings,
) -> RackResult<String> {
    let missing = |column: &str| RackError::MissingColumn {
        record: record.index(),
        column: column.to_string(),
    };
    let sheet_type = record
        .get(&settings.sheet_type_column)
        .ok_or_else(|| missing(&settings.sheet_type_column))?;
    let sheet_name = record
        .get(&settings.sheet_name_column)
        .ok_or_else(|| missing(&settings.sheet_name_column))?;

    let template = sheet_type.to_string();
    if !book.has_sheet(&template) {
        return Err(RackError::WorksheetNotFound {
            sheet: template,
            path: book.location().to_path_buf(),
        });
    }

    if sheet_name.is_blank() {
        return Err(RackError::BlankTargetName {
            record: record.index(),
            column: settings.sheet_name_column.clone(),
        });
    }
    let target = sheet_name.to_string();

    let clone_failure = |reason: String| RackError::SheetCloneFailure {
        template: template.clone(),
        target: target.clone(),
        reason,
    };
    validate_sheet_name(&target, &book.sheet_names()).map_err(clone_failure)?;
    let cells = book.copy_sheet(&template, &target).map_err(clone_failure)?;
    if cells == 0 {
        return Err(clone_failure("copied worksheet is empty".to_string()));
    }
    trace!("copied {template} to {target} ({cells} cells)");
    Ok(target)
}

/// Replaces every column name found in `sheet` by the record's value, last column first.
pub fn fill_sheet<W: TemplateWorkbook>(
    book: &mut W,
    sheet: &str,
    record: &ConfigRecord,
    report: &mut FillReport,
) {
    for (token, value) in record.iter().rev() {
        trace!("key:{token} type:{}", value.kind());
        if fold_marks(token).is_empty() {
            warn!("[WARN] skipping column without a searchable name");
            continue;
        }

        let cells = book.search(sheet, token);
        if cells.is_empty() {
            warn!("[WARN] no cell on {sheet} contains '{token}'");
            report.search_misses += 1;
            continue;
        }

        let replacement = value.to_string();
        for address in cells {
            let Some(current) = book.cell_text(sheet, &address) else {
                continue;
            };
            let updated = current.replace(token.as_str(), &replacement);
            book.set_cell_text(sheet, &address, &updated);
            report.replaced_cells += 1;
            trace!("{sheet}!{address} '{current}' '{token}' -> '{updated}'");
        }
    }
}
