//! Table export specification models and top-level error types.

use serde::Deserialize;

use crate::conf::{C_SELECTION_MARKER_DEFAULT, C_SHEET_NAME_DEFAULT};

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumExportFormat {
    /// Tab-delimited text.
    #[default]
    Txt,
    /// Spreadsheet workbook.
    Xlsx,
}

/// Structural type of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumTableStructure {
    /// Data table; empty header cells get a `Column N` placeholder.
    #[default]
    Table,
    /// Anything else; empty header cells stay empty.
    Other,
}

/// Classified cell value.
///
/// Every variant keeps the display text it was classified from.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Numeric literal; `value` is the text with `,` removed.
    Number {
        /// Stripped numeric text.
        value: String,
        /// Original display text.
        text: String,
    },
    /// Calendar date literal stored as a spreadsheet serial.
    Date {
        /// Days since 1899-12-30.
        serial: f64,
        /// Original display text.
        text: String,
    },
    /// Plain text stored in the shared-string pool.
    Shared {
        /// Pool index.
        index: usize,
        /// Original display text.
        text: String,
    },
}

impl EnumCellValue {
    /// Original display text.
    pub fn text(&self) -> &str {
        match self {
            Self::Number { text, .. } | Self::Date { text, .. } | Self::Shared { text, .. } => {
                text.as_str()
            }
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Export options, resolved once per generation run.
///
/// Deserializing a partial document fills every missing field from
/// [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecTableExportOptions {
    /// Id of the table element.
    pub src_id: Option<String>,
    /// CSS selector locating the table element (ignored when `src_id` is set).
    #[serde(alias = "src")]
    pub selector_src: Option<String>,
    /// Output format.
    pub format: EnumExportFormat,
    /// Structural type of the source.
    #[serde(alias = "type")]
    pub rule_structure: EnumTableStructure,
    /// Use the first row (or first `thead` row) as header.
    #[serde(alias = "show_header")]
    pub if_show_header: bool,
    /// Explicit header row override.
    #[serde(alias = "header_row")]
    pub selector_header_row: Option<String>,
    /// Explicit body rows override.
    #[serde(alias = "body_rows")]
    pub selector_body_rows: Option<String>,
    /// Cells matching this selector are omitted.
    #[serde(alias = "exclude_selector")]
    pub selector_exclude: Option<String>,
    /// Header text marking a selection column.
    pub selection_marker: String,
    /// Worksheet name used by workbook output.
    pub sheet_name: String,
}

impl Default for SpecTableExportOptions {
    fn default() -> Self {
        Self {
            src_id: None,
            selector_src: None,
            format: EnumExportFormat::Txt,
            rule_structure: EnumTableStructure::Table,
            if_show_header: false,
            selector_header_row: None,
            selector_body_rows: None,
            selector_exclude: None,
            selection_marker: C_SELECTION_MARKER_DEFAULT.to_string(),
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
        }
    }
}

impl SpecTableExportOptions {
    /// Merge a JSON option document over the defaults.
    pub fn from_json(s: &str) -> Result<Self, TableExportError> {
        serde_json::from_str(s).map_err(|err| TableExportError::InvalidOptions(err.to_string()))
    }
}

/// One row of classified cells.
pub type Row = Vec<EnumCellValue>;

/// In-memory row/column model of one exported table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheet {
    /// Header row (when present) followed by body rows in source order.
    pub rows: Vec<Row>,
    /// Emitted header texts.
    pub headers: Vec<String>,
    /// First row is a header row.
    pub if_has_header: bool,
    /// Header width, or first body row width when there is no header.
    pub n_cols: usize,
}

impl SpecSheet {
    /// `true` when no row was produced.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Body rows (header excluded).
    pub fn body_rows(&self) -> &[Row] {
        if self.if_has_header && !self.rows.is_empty() {
            &self.rows[1..]
        } else {
            &self.rows
        }
    }
}

/// Setup-stage failures. Extraction itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum TableExportError {
    /// A CSS selector option did not parse.
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector {
        /// Offending selector text.
        selector: String,
        /// Parser message.
        message: String,
    },
    /// Option document did not deserialize.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_from_json_merges_over_defaults() {
        let spec_options = SpecTableExportOptions::from_json(
            r#"{"src_id": "grid", "show_header": true, "exclude_selector": ".pick"}"#,
        )
        .expect("parse options");
        assert_eq!(spec_options.src_id.as_deref(), Some("grid"));
        assert!(spec_options.if_show_header);
        assert_eq!(spec_options.selector_exclude.as_deref(), Some(".pick"));
        assert_eq!(spec_options.format, EnumExportFormat::Txt);
        assert_eq!(spec_options.rule_structure, EnumTableStructure::Table);
        assert_eq!(spec_options.selection_marker, C_SELECTION_MARKER_DEFAULT);
    }

    #[test]
    fn options_from_json_reads_format_and_type() {
        let spec_options = SpecTableExportOptions::from_json(r#"{"format": "xlsx", "type": "other"}"#)
            .expect("parse options");
        assert_eq!(spec_options.format, EnumExportFormat::Xlsx);
        assert_eq!(spec_options.rule_structure, EnumTableStructure::Other);
    }

    #[test]
    fn options_from_json_rejects_bad_document() {
        let err = SpecTableExportOptions::from_json(r#"{"format": "pdf"}"#)
            .expect_err("unknown format must fail");
        assert!(matches!(err, TableExportError::InvalidOptions(_)));
    }

    #[test]
    fn sheet_body_rows_skip_header() {
        let sheet = SpecSheet {
            rows: vec![vec![], vec![], vec![]],
            headers: vec![],
            if_has_header: true,
            n_cols: 0,
        };
        assert_eq!(sheet.body_rows().len(), 2);
    }
}
