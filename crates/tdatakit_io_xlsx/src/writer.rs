//! XLSX writer that renders classified sheets into a workbook.

use std::collections::BTreeSet;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use tdatakit_io_table::{EnumCellValue, SharedStrings, SpecSheet};
use tracing::{debug, warn};

use crate::spec::{SpecCellFormat, SpecXlsxReport, SpecXlsxWriteOptions, XlsxExportError};
use crate::util::{
    derive_sheet_width, derive_unique_sheet_name, plan_column_widths, sanitize_sheet_name,
    validate_sheet_limits,
};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] or
/// [`Self::save_to_buffer`] is called.
pub struct XlsxWriter {
    workbook: Workbook,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new(SpecXlsxWriteOptions::default())
    }
}

impl XlsxWriter {
    /// Create writer with format/option presets.
    pub fn new(write_options: SpecXlsxWriteOptions) -> Self {
        Self {
            workbook: Workbook::new(),
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Write one sheet.
    ///
    /// Number literals become numeric cells, dates become numeric cells with a
    /// date format, shared strings are written with their pooled text.
    pub fn write_sheet(
        &mut self,
        sheet: &SpecSheet,
        shared_strings: &SharedStrings,
        sheet_name: &str,
    ) -> Result<(), XlsxExportError> {
        if self.if_closed {
            return Err(XlsxExportError::Closed);
        }
        validate_sheet_limits(sheet)?;

        let mut report = SpecXlsxReport {
            sheet_name: derive_unique_sheet_name(
                &sanitize_sheet_name(sheet_name, "_"),
                &mut self.set_sheet_names_existing,
            ),
            n_rows: sheet.rows.len(),
            n_cols: derive_sheet_width(sheet),
            warnings: vec![],
        };

        let fmt_text = derive_rust_xlsx_format(&self.write_options.fmt_text);
        let fmt_header = derive_rust_xlsx_format(&self.write_options.fmt_header);
        let fmt_date = derive_rust_xlsx_format(&self.write_options.fmt_date);
        let l_widths = plan_column_widths(sheet, &self.write_options.policy_autofit);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&report.sheet_name)?;

        for (idx_row, row) in sheet.rows.iter().enumerate() {
            let n_row = cast_row_num(idx_row)?;
            let if_is_header = sheet.if_has_header && idx_row == 0;
            for (idx_col, value) in row.iter().enumerate() {
                let n_col = cast_col_num(idx_col)?;
                if if_is_header {
                    worksheet.write_string_with_format(n_row, n_col, value.text(), &fmt_header)?;
                    continue;
                }
                match value {
                    EnumCellValue::Number { value, text } => match value.parse::<f64>() {
                        Ok(n_value) if n_value.is_finite() => {
                            worksheet.write_number_with_format(n_row, n_col, n_value, &fmt_text)?;
                        }
                        _ => {
                            report.warn(format!(
                                "Number literal `{text}` at ({idx_row}, {idx_col}) written as text."
                            ));
                            worksheet.write_string_with_format(n_row, n_col, text, &fmt_text)?;
                        }
                    },
                    EnumCellValue::Date { serial, .. } => {
                        worksheet.write_number_with_format(n_row, n_col, *serial, &fmt_date)?;
                    }
                    EnumCellValue::Shared { index, text } => {
                        let c_text = shared_strings.get(*index).unwrap_or(text);
                        worksheet.write_string_with_format(n_row, n_col, c_text, &fmt_text)?;
                    }
                }
            }
        }

        if let Some(l_widths) = l_widths {
            for (idx_col, n_width) in l_widths.into_iter().enumerate() {
                worksheet.set_column_width(cast_col_num(idx_col)?, n_width as f64)?;
            }
        }
        if sheet.if_has_header && self.write_options.if_freeze_header {
            worksheet.set_freeze_panes(1, 0)?;
        }

        for c_warning in &report.warnings {
            warn!(sheet = %report.sheet_name, "{c_warning}");
        }
        debug!(
            sheet = %report.sheet_name,
            n_rows = report.n_rows,
            n_cols = report.n_cols,
            "sheet written"
        );
        self.l_reports.push(report);
        Ok(())
    }

    /// Serialize the workbook to bytes and close the writer.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, XlsxExportError> {
        if self.if_closed {
            return Err(XlsxExportError::Closed);
        }
        let v_bytes = self.workbook.save_to_buffer()?;
        self.if_closed = true;
        Ok(v_bytes)
    }

    /// Flush workbook to disk and close the writer.
    pub fn close(&mut self, path_file_out: &Path) -> Result<(), XlsxExportError> {
        if self.if_closed {
            return Err(XlsxExportError::Closed);
        }
        self.workbook.save(path_file_out)?;
        self.if_closed = true;
        Ok(())
    }
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if let Some(align) = spec.align.as_deref().and_then(derive_format_align) {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }

    format
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, XlsxExportError> {
    u32::try_from(value).map_err(|_| XlsxExportError::SheetOverflow {
        n_rows: value,
        n_cols: 0,
    })
}

fn cast_col_num(value: usize) -> Result<u16, XlsxExportError> {
    u16::try_from(value).map_err(|_| XlsxExportError::SheetOverflow {
        n_rows: 0,
        n_cols: value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_after_save_is_rejected() {
        let mut writer = XlsxWriter::default();
        writer.save_to_buffer().expect("save empty workbook");
        let err = writer
            .write_sheet(&SpecSheet::default(), &SharedStrings::new(), "Sheet1")
            .expect_err("closed writer must fail");
        assert!(matches!(err, XlsxExportError::Closed));
    }

    #[test]
    fn close_writes_workbook_file() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file_out = tmp.path().join("export.xlsx");
        let mut shared_strings = SharedStrings::new();
        let sheet = SpecSheet {
            rows: vec![vec![shared_strings.add("Name")], vec![shared_strings.add("42")]],
            headers: vec!["Name".to_string()],
            if_has_header: true,
            n_cols: 1,
        };

        let mut writer = XlsxWriter::default();
        writer
            .write_sheet(&sheet, &shared_strings, "Export")
            .expect("write sheet");
        writer.close(&path_file_out).expect("close writer");

        let v_bytes = std::fs::read(&path_file_out).expect("read workbook file");
        assert!(v_bytes.starts_with(b"PK"));
        let err = writer
            .close(&path_file_out)
            .expect_err("second close must fail");
        assert!(matches!(err, XlsxExportError::Closed));
    }

    #[test]
    fn duplicate_sheet_names_are_suffixed() {
        let mut writer = XlsxWriter::default();
        let shared_strings = SharedStrings::new();
        writer
            .write_sheet(&SpecSheet::default(), &shared_strings, "Data")
            .expect("first sheet");
        writer
            .write_sheet(&SpecSheet::default(), &shared_strings, "Data")
            .expect("second sheet");
        let l_names: Vec<String> = writer.report().into_iter().map(|r| r.sheet_name).collect();
        assert_eq!(l_names, ["Data", "Data__2"]);
    }

    #[test]
    fn header_format_is_bold() {
        let spec_options = SpecXlsxWriteOptions::default();
        assert_eq!(spec_options.fmt_header.bold, Some(true));
        assert_eq!(spec_options.fmt_date.num_format.as_deref(), Some("mm/dd/yyyy"));
    }
}
