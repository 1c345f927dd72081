//! XLSX writer option, report and error models.

use crate::conf::{derive_default_fmt_date, derive_default_fmt_header, derive_default_fmt_text};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Disable autofit.
    None,
    /// Infer width from header cells only (default).
    #[default]
    Header,
    /// Infer width from body cells only.
    Body,
    /// Infer width from both header and body cells.
    All,
}

/// Column autofit policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Autofit width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::Header,
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Writer-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriteOptions {
    /// Body text format.
    pub fmt_text: SpecCellFormat,
    /// Header row format.
    pub fmt_header: SpecCellFormat,
    /// Date-serial cell format.
    pub fmt_date: SpecCellFormat,
    /// Column width policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// Freeze the pane below the header row.
    pub if_freeze_header: bool,
}

impl Default for SpecXlsxWriteOptions {
    fn default() -> Self {
        Self {
            fmt_text: derive_default_fmt_text(),
            fmt_header: derive_default_fmt_header(),
            fmt_date: derive_default_fmt_date(),
            policy_autofit: SpecAutofitCellsPolicy::default(),
            if_freeze_header: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportAndErrors

/// Per-sheet write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet name actually used in the workbook.
    pub sheet_name: String,
    /// Rows written, header included.
    pub n_rows: usize,
    /// Widest row written.
    pub n_cols: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// Workbook output failures.
#[derive(Debug, thiserror::Error)]
pub enum XlsxExportError {
    /// Sheet does not fit in one Excel worksheet.
    #[error("Sheet exceeds Excel limits: rows={n_rows} cols={n_cols}")]
    SheetOverflow {
        /// Rows in the sheet.
        n_rows: usize,
        /// Widest row in the sheet.
        n_cols: usize,
    },
    /// Write attempted after `close()`.
    #[error("Cannot write after close().")]
    Closed,
    /// Error raised by the workbook backend.
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
