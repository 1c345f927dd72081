//! XLSX constants and default preset factories.

use crate::spec::SpecCellFormat;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Number format applied to date-serial cells.
pub const C_NUM_FORMAT_DATE: &str = "mm/dd/yyyy";

/// Default format for body text cells.
pub fn derive_default_fmt_text() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        ..Default::default()
    }
}

/// Default format for header cells.
pub fn derive_default_fmt_header() -> SpecCellFormat {
    derive_default_fmt_text().with_(SpecCellFormat {
        bold: Some(true),
        align: Some("center".to_string()),
        ..Default::default()
    })
}

/// Default format for date-serial cells.
pub fn derive_default_fmt_date() -> SpecCellFormat {
    derive_default_fmt_text().with_(SpecCellFormat {
        num_format: Some(C_NUM_FORMAT_DATE.to_string()),
        ..Default::default()
    })
}
