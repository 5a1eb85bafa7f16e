use std::path::PathBuf;

use thiserror::Error;

pub type RackResult<T> = Result<T, RackError>;

#[derive(Error, Debug)]
pub enum RackError {
    #[error("spreadsheet file not found ({})", .0.display())]
    FileNotFound(PathBuf),

    #[error("worksheet '{sheet}' not found in {}", .path.display())]
    WorksheetNotFound { sheet: String, path: PathBuf },

    #[error("table '{table}' not found on worksheet '{sheet}'")]
    TableNotFound { table: String, sheet: String },

    #[error("table '{table}' defines column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("record {record}: key ({column}) is not contained")]
    MissingColumn { record: usize, column: String },

    #[error("record {record}: target worksheet name in column ({column}) is blank")]
    BlankTargetName { record: usize, column: String },

    #[error("cannot copy worksheet '{template}' to '{target}': {reason}")]
    SheetCloneFailure {
        template: String,
        target: String,
        reason: String,
    },

    #[error("no worksheet left to save in {}", .0.display())]
    EmptyOutput(PathBuf),

    #[error("output path {} is the format file itself", .0.display())]
    OutputIsTemplate(PathBuf),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("failed to process {}: {message}", .path.display())]
    Spreadsheet { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RackError {
    /// Process exit code reported by the command line for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RackError::Spreadsheet { .. } | RackError::Io(_) => 1,
            RackError::FileNotFound(_) => 2,
            RackError::WorksheetNotFound { .. } => 3,
            RackError::TableNotFound { .. } => 4,
            RackError::MissingColumn { .. } => 5,
            RackError::BlankTargetName { .. } => 6,
            RackError::SheetCloneFailure { .. } => 7,
            RackError::DuplicateColumn { .. } => 8,
            RackError::EmptyOutput(_) => 9,
            RackError::OutputIsTemplate(_) => 10,
            RackError::Settings(_) => 11,
        }
    }

    pub(crate) fn spreadsheet(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        RackError::Spreadsheet {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_not_found_names_the_table() {
        let err = RackError::TableNotFound {
            table: "table_config".into(),
            sheet: "config".into(),
        };
        assert_eq!(
            err.to_string(),
            "table 'table_config' not found on worksheet 'config'"
        );
    }

    #[test]
    fn fatal_kinds_have_distinct_exit_codes() {
        let errors = [
            RackError::FileNotFound("a.xlsx".into()),
            RackError::WorksheetNotFound {
                sheet: "config".into(),
                path: "a.xlsx".into(),
            },
            RackError::TableNotFound {
                table: "t".into(),
                sheet: "s".into(),
            },
            RackError::MissingColumn {
                record: 0,
                column: "type".into(),
            },
            RackError::BlankTargetName {
                record: 0,
                column: "name".into(),
            },
            RackError::SheetCloneFailure {
                template: "A".into(),
                target: "B".into(),
                reason: "duplicate".into(),
            },
            RackError::DuplicateColumn {
                table: "t".into(),
                column: "c".into(),
            },
            RackError::EmptyOutput("out.xlsx".into()),
            RackError::OutputIsTemplate("out.xlsx".into()),
            RackError::Settings("bad".into()),
        ];
        let mut codes: Vec<u8> = errors.iter().map(RackError::exit_code).collect();
        assert!(codes.iter().all(|&c| c > 1));
        assert!(!codes.contains(&crate::cli::USAGE_EXIT_CODE));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
