//! `tdatakit`:
//! Export an HTML table as tab-delimited text or an XLSX workbook.
//!
//! One [`TableDataGen`] is one generation run: options are resolved, the
//! table is read once into a sheet and string pool, and the result is
//! serialized on demand.
pub use tdatakit_io_table as io_table;
pub use tdatakit_io_xlsx as io_xlsx;

use scraper::Html;
use tdatakit_io_table::{
    EnumExportFormat, HtmlTableSource, SharedStrings, SpecSheet, SpecTableExportOptions,
    TableExportError, generate_delimited_text, read_table,
};
use tdatakit_io_xlsx::{SpecXlsxWriteOptions, XlsxExportError, XlsxWriter};
use tracing::debug;

/// Generation failures.
#[derive(Debug, thiserror::Error)]
pub enum TDataGenError {
    /// Option or selector error.
    #[error(transparent)]
    Table(#[from] TableExportError),
    /// Workbook output error.
    #[error(transparent)]
    Xlsx(#[from] XlsxExportError),
}

/// Serialized output of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumExportOutput {
    /// Tab-delimited text.
    Text(String),
    /// XLSX workbook bytes.
    Xlsx(Vec<u8>),
}

/// Table read once from an HTML document.
#[derive(Debug, Clone)]
pub struct TableDataGen {
    options: SpecTableExportOptions,
    sheet: SpecSheet,
    shared_strings: SharedStrings,
}

impl TableDataGen {
    /// Read the table selected by `options` out of `html`.
    pub fn new(html: &str, options: SpecTableExportOptions) -> Result<Self, TDataGenError> {
        let document = Html::parse_document(html);
        let source = HtmlTableSource::new(&document, &options)?;
        let (sheet, shared_strings) = read_table(&source, &options);
        debug!(
            n_rows = sheet.rows.len(),
            cnt_strings = shared_strings.count(),
            "table data generated"
        );
        Ok(Self {
            options,
            sheet,
            shared_strings,
        })
    }

    /// Same as [`Self::new`] with options given as a JSON document.
    pub fn from_json_options(html: &str, options_json: &str) -> Result<Self, TDataGenError> {
        Self::new(html, SpecTableExportOptions::from_json(options_json)?)
    }

    pub fn options(&self) -> &SpecTableExportOptions {
        &self.options
    }

    pub fn sheet(&self) -> &SpecSheet {
        &self.sheet
    }

    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// Emitted header texts.
    pub fn headers(&self) -> &[String] {
        &self.sheet.headers
    }

    /// Recorded column count.
    pub fn col_count(&self) -> usize {
        self.sheet.n_cols
    }

    /// Serialize in the configured format.
    pub fn generate(&self) -> Result<EnumExportOutput, TDataGenError> {
        match self.options.format {
            EnumExportFormat::Txt => Ok(EnumExportOutput::Text(self.generate_text())),
            EnumExportFormat::Xlsx => Ok(EnumExportOutput::Xlsx(
                self.generate_xlsx(SpecXlsxWriteOptions::default())?,
            )),
        }
    }

    /// Tab-delimited text, regardless of the configured format.
    pub fn generate_text(&self) -> String {
        generate_delimited_text(&self.sheet)
    }

    /// XLSX workbook bytes, regardless of the configured format.
    pub fn generate_xlsx(
        &self,
        write_options: SpecXlsxWriteOptions,
    ) -> Result<Vec<u8>, TDataGenError> {
        let mut writer = XlsxWriter::new(write_options);
        writer.write_sheet(&self.sheet, &self.shared_strings, &self.options.sheet_name)?;
        Ok(writer.save_to_buffer()?)
    }
}
